//! End-to-end processing: source text to C++ or to any intermediate output format
//!
//! [`compile`] runs tokenize, parse and generate in one call. [`process`] exposes the
//! intermediate stages under format names (`token-simple`, `ast-json`, ...) for inspection.
//! [`BuildPlan`] decides where the artifacts of one script go, and [`build_file`] writes
//! them.

use crate::cclear::error::CompileError;
use crate::cclear::formats::{
    script_to_json, to_treeviz_str, tokens_to_json, tokens_to_simple,
};
use crate::cclear::generating::{Generator, GeneratorOptions};
use crate::cclear::lexing::{tokenize, tokenize_raw};
use crate::cclear::parsing::{parse, Script};
use cclear_config::BuildConfig;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Tokenizes, parses and generates with default options
pub fn compile(source: &str) -> Result<String, CompileError> {
    compile_with(source, &GeneratorOptions::default())
}

pub fn compile_with(source: &str, options: &GeneratorOptions) -> Result<String, CompileError> {
    let script = parse_source(source)?;
    Ok(Generator::new(options.clone()).generate(&script))
}

/// Tokenizes and parses
pub fn parse_source(source: &str) -> Result<Script, CompileError> {
    let tokens = tokenize(source)?;
    Ok(parse(&tokens)?)
}

// ============================================================================
// Processing formats
// ============================================================================

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
    Cpp,
}

/// Represents the output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Simple,
    Json,
    RawSimple,
    RawJson,
    Treeviz,
    Source,
}

/// Represents a complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    pub const fn new(stage: ProcessingStage, format: OutputFormat) -> Self {
        Self { stage, format }
    }

    /// Parse a format string like "token-simple", "token-raw-json" or "cpp"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        if format_str == "cpp" {
            return Ok(Self::new(ProcessingStage::Cpp, OutputFormat::Source));
        }

        let (stage, format) = format_str
            .split_once('-')
            .ok_or_else(|| ProcessingError::InvalidFormat(format_str.to_string()))?;

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            other => return Err(ProcessingError::InvalidStage(other.to_string())),
        };

        let format = match (stage, format) {
            (ProcessingStage::Token, "simple") => OutputFormat::Simple,
            (ProcessingStage::Token, "json") => OutputFormat::Json,
            (ProcessingStage::Token, "raw-simple") => OutputFormat::RawSimple,
            (ProcessingStage::Token, "raw-json") => OutputFormat::RawJson,
            (ProcessingStage::Ast, "json") => OutputFormat::Json,
            (ProcessingStage::Ast, "treeviz") => OutputFormat::Treeviz,
            (_, other) => {
                return Err(ProcessingError::InvalidFormatType(format!(
                    "'{}' is not supported for the {} stage",
                    other,
                    stage.name()
                )))
            }
        };

        Ok(Self { stage, format })
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        vec![
            Self::new(ProcessingStage::Cpp, OutputFormat::Source),
            Self::new(ProcessingStage::Token, OutputFormat::Simple),
            Self::new(ProcessingStage::Token, OutputFormat::Json),
            Self::new(ProcessingStage::Token, OutputFormat::RawSimple),
            Self::new(ProcessingStage::Token, OutputFormat::RawJson),
            Self::new(ProcessingStage::Ast, OutputFormat::Json),
            Self::new(ProcessingStage::Ast, OutputFormat::Treeviz),
        ]
    }

    /// The format string this spec parses from
    pub fn name(&self) -> String {
        let format = match self.format {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::RawSimple => "raw-simple",
            OutputFormat::RawJson => "raw-json",
            OutputFormat::Treeviz => "treeviz",
            OutputFormat::Source => return "cpp".to_string(),
        };
        format!("{}-{}", self.stage.name(), format)
    }
}

impl ProcessingStage {
    fn name(&self) -> &'static str {
        match self {
            ProcessingStage::Token => "token",
            ProcessingStage::Ast => "ast",
            ProcessingStage::Cpp => "cpp",
        }
    }
}

/// All format strings accepted by [`ProcessingSpec::from_string`]
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ProcessingSpec::name)
        .collect()
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingError {
    InvalidFormat(String),
    InvalidStage(String),
    InvalidFormatType(String),
    Compile(CompileError),
    Serialization(String),
}

impl std::error::Error for ProcessingError {}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::InvalidFormat(format) => write!(f, "Invalid format: {}", format),
            ProcessingError::InvalidStage(stage) => write!(f, "Invalid stage: {}", stage),
            ProcessingError::InvalidFormatType(format_type) => {
                write!(f, "Invalid format type: {}", format_type)
            }
            ProcessingError::Compile(err) => write!(f, "{}", err),
            ProcessingError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl From<CompileError> for ProcessingError {
    fn from(err: CompileError) -> Self {
        ProcessingError::Compile(err)
    }
}

impl From<serde_json::Error> for ProcessingError {
    fn from(err: serde_json::Error) -> Self {
        ProcessingError::Serialization(err.to_string())
    }
}

/// Process source text according to the given specification
pub fn process(source: &str, spec: &ProcessingSpec) -> Result<String, ProcessingError> {
    process_with(source, spec, &GeneratorOptions::default())
}

pub fn process_with(
    source: &str,
    spec: &ProcessingSpec,
    options: &GeneratorOptions,
) -> Result<String, ProcessingError> {
    match spec.stage {
        ProcessingStage::Token => {
            let tokens = match spec.format {
                OutputFormat::RawSimple | OutputFormat::RawJson => tokenize_raw(source),
                _ => tokenize(source),
            }
            .map_err(CompileError::from)?;

            match spec.format {
                OutputFormat::Json | OutputFormat::RawJson => Ok(tokens_to_json(&tokens)?),
                _ => Ok(tokens_to_simple(&tokens)),
            }
        }
        ProcessingStage::Ast => {
            let script = parse_source(source)?;
            match spec.format {
                OutputFormat::Treeviz => Ok(to_treeviz_str(&script)),
                _ => Ok(script_to_json(&script)?),
            }
        }
        ProcessingStage::Cpp => Ok(compile_with(source, options)?),
    }
}

// ============================================================================
// Build artifacts
// ============================================================================

/// Where and how build artifacts are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Folder holding the cache directory
    pub workspace: PathBuf,
    /// Write artifacts next to their sources instead of the cache directory
    pub local_output: bool,
    pub cache_dir: String,
    pub source_extension: String,
    pub output_extension: String,
    pub header_extension: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            workspace: PathBuf::from("."),
            local_output: false,
            cache_dir: "__cclrcache__".to_string(),
            source_extension: "cclr".to_string(),
            output_extension: "cpp".to_string(),
            header_extension: "h".to_string(),
        }
    }
}

impl BuildOptions {
    pub fn from_config(config: &BuildConfig, workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
            local_output: config.local_output,
            cache_dir: config.cache_dir.clone(),
            source_extension: config.source_extension.clone(),
            output_extension: config.output_extension.clone(),
            header_extension: config.header_extension.clone(),
        }
    }

    /// True for paths carrying the source extension
    pub fn is_source(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext == self.source_extension.as_str())
            .unwrap_or(false)
    }
}

/// Artifact paths for one script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub cpp: PathBuf,
    pub header: PathBuf,
}

impl BuildPlan {
    pub fn new(script: &Path, options: &BuildOptions) -> Result<Self, BuildError> {
        if !options.is_source(script) {
            return Err(BuildError::NotASource(script.to_path_buf()));
        }
        let stem = script
            .file_stem()
            .ok_or_else(|| BuildError::NotASource(script.to_path_buf()))?;

        let output_dir = if options.local_output {
            script
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        } else {
            options.workspace.join(&options.cache_dir)
        };

        let mut cpp = output_dir.join(stem);
        cpp.set_extension(&options.output_extension);
        let mut header = output_dir.join(stem);
        header.set_extension(&options.header_extension);

        Ok(Self {
            source: script.to_path_buf(),
            output_dir,
            cpp,
            header,
        })
    }
}

/// Contents written to the header artifact
pub fn header_stub(plan: &BuildPlan) -> String {
    let name = plan
        .source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("// Generated from {}\n#pragma once\n", name)
}

/// Errors that stop the build of one script
#[derive(Debug)]
pub enum BuildError {
    NotASource(PathBuf),
    Io(PathBuf, std::io::Error),
    Compile {
        path: PathBuf,
        source: String,
        error: CompileError,
    },
}

impl BuildError {
    /// Multi-line report for the terminal; compile errors include the source context
    pub fn render(&self) -> String {
        match self {
            BuildError::Compile {
                path,
                source,
                error,
            } => error.render(&path.display().to_string(), source),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::NotASource(path) => {
                write!(f, "Not a cclear script: {}", path.display())
            }
            BuildError::Io(path, err) => write!(f, "Error accessing {}: {}", path.display(), err),
            BuildError::Compile { path, error, .. } => {
                write!(f, "{}: {}", path.display(), error)
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// Compiles one script and writes its artifacts. Nothing is written when compilation fails.
pub fn build_file(plan: &BuildPlan, options: &GeneratorOptions) -> Result<(), BuildError> {
    let source =
        fs::read_to_string(&plan.source).map_err(|e| BuildError::Io(plan.source.clone(), e))?;

    let cpp = compile_with(&source, options).map_err(|error| BuildError::Compile {
        path: plan.source.clone(),
        source: source.clone(),
        error,
    })?;

    fs::create_dir_all(&plan.output_dir)
        .map_err(|e| BuildError::Io(plan.output_dir.clone(), e))?;
    fs::write(&plan.cpp, cpp).map_err(|e| BuildError::Io(plan.cpp.clone(), e))?;
    fs::write(&plan.header, header_stub(plan))
        .map_err(|e| BuildError::Io(plan.header.clone(), e))?;
    Ok(())
}
