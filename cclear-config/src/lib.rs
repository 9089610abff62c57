//! Configuration for the cclear toolchain.
//!
//! Settings are resolved in layers, later layers winning key by key:
//!
//!     1. `defaults/cclear.default.toml`, embedded at compile time
//!     2. `cclear.toml` in the build workspace, when present
//!     3. a file named with `--config`, which must exist
//!     4. command-line switches such as `--localoutput`
//!
//! [`Loader`] adds the layers in that order and deserializes the result into
//! [`CclearConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/cclear.default.toml");

/// Per-project configuration file looked up in the workspace.
pub const WORKSPACE_FILE: &str = "cclear.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct CclearConfig {
    pub generator: GeneratorConfig,
    pub build: BuildConfig,
}

/// Knobs for the C++ generator.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// Emitted once per indentation column of a block
    pub indent_unit: String,
    /// Written in front of every function definition
    pub return_type: String,
}

/// Where build artifacts go and how they are named.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    pub cache_dir: String,
    pub source_extension: String,
    pub output_extension: String,
    pub header_extension: String,
    pub local_output: bool,
}

/// Builds a [`CclearConfig`] layer by layer, starting from the embedded defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Adds `cclear.toml` from the workspace directory if the workspace has one.
    pub fn with_workspace(self, workspace: impl AsRef<Path>) -> Self {
        self.with_source(&workspace.as_ref().join(WORKSPACE_FILE), false)
    }

    /// Adds an explicitly requested file. Building fails if it is missing.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_source(path.as_ref(), true)
    }

    /// Forces outputs next to their sources; `false` leaves the lower layers untouched.
    pub fn with_local_output(mut self, local_output: bool) -> Result<Self, ConfigError> {
        if local_output {
            self.builder = self.builder.set_override("build.local_output", true)?;
        }
        Ok(self)
    }

    fn with_source(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    pub fn build(self) -> Result<CclearConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
