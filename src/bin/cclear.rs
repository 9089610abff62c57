//! Command-line interface for cclear
//! This binary compiles CClear scripts to C++ and dumps the intermediate stages for inspection.
//!
//! Usage:
//!   cclear build `<script>` [-w `<workspace>`] [-l] [-c `<config>`]   - Compile one script
//!   cclear build -r `<dir>` [-w `<workspace>`] [-l] [-c `<config>`]   - Compile every script under a folder
//!   cclear emit `<script>` [-f `<format>`]                         - Print one stage of the pipeline
//!   cclear formats                                               - List all available formats

use cclear::cclear::generating::GeneratorOptions;
use cclear::cclear::pipeline::{
    available_formats, build_file, process_with, BuildOptions, BuildPlan, ProcessingError,
    ProcessingSpec,
};
use cclear_config::{CclearConfig, Loader};
use clap::{Arg, ArgAction, ArgMatches, Command};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    let matches = Command::new("cclear")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compiler front end for CClear scripts")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("build")
                .about("Compile .cclr scripts to .cpp and .h files")
                .arg(
                    Arg::new("script")
                        .help("Path to the .cclr script to build")
                        .required_unless_present("recursive")
                        .index(1),
                )
                .arg(
                    Arg::new("recursive")
                        .long("recursive")
                        .short('r')
                        .value_name("DIR")
                        .help("Build every .cclr script found under this folder"),
                )
                .arg(
                    Arg::new("workspace")
                        .long("workspace")
                        .short('w')
                        .value_name("DIR")
                        .default_value(".")
                        .help("Folder where the cache directory is created"),
                )
                .arg(
                    Arg::new("localoutput")
                        .long("localoutput")
                        .short('l')
                        .action(ArgAction::SetTrue)
                        .help("Write outputs next to their sources instead of the cache directory"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .value_name("FILE")
                        .help("Configuration file layered over the defaults"),
                ),
        )
        .subcommand(
            Command::new("emit")
                .about("Print one stage of the pipeline to stdout")
                .arg(
                    Arg::new("script")
                        .help("Path to the .cclr script")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .default_value("cpp")
                        .help("Output format (e.g., cpp, token-simple, ast-treeviz)"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .value_name("FILE")
                        .help("Configuration file layered over the defaults"),
                ),
        )
        .subcommand(Command::new("formats").about("List all available output formats"))
        .get_matches();

    match matches.subcommand() {
        Some(("build", sub_matches)) => handle_build_command(sub_matches),
        Some(("emit", sub_matches)) => handle_emit_command(sub_matches),
        Some(("formats", _)) => handle_formats_command(),
        _ => unreachable!("clap requires a subcommand"),
    }
}

/// Loads defaults, the workspace `cclear.toml`, an explicit `--config` file, then `--localoutput`
fn load_config(workspace: &Path, config_file: Option<&String>, local_output: bool) -> CclearConfig {
    let mut loader = Loader::new().with_workspace(workspace);
    if let Some(path) = config_file {
        loader = loader.with_file(path);
    }
    loader
        .with_local_output(local_output)
        .and_then(Loader::build)
        .unwrap_or_else(|e| {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        })
}

/// Handle the build command
fn handle_build_command(matches: &ArgMatches) {
    let workspace = PathBuf::from(
        matches
            .get_one::<String>("workspace")
            .map(String::as_str)
            .unwrap_or("."),
    );
    let config = load_config(
        &workspace,
        matches.get_one::<String>("config"),
        matches.get_flag("localoutput"),
    );
    let options = BuildOptions::from_config(&config.build, &workspace);
    let generator = GeneratorOptions::from_config(&config.generator);

    let mut scripts = Vec::new();
    if let Some(script) = matches.get_one::<String>("script") {
        scripts.push(PathBuf::from(script));
    }
    if let Some(dir) = matches.get_one::<String>("recursive") {
        scripts.extend(find_scripts(Path::new(dir), &options));
    }

    let mut failures = 0;
    for script in &scripts {
        let result = BuildPlan::new(script, &options).and_then(|plan| {
            build_file(&plan, &generator)?;
            Ok(plan)
        });
        match result {
            Ok(plan) => println!("Built {} -> {}", script.display(), plan.cpp.display()),
            Err(err) => {
                eprintln!("{}", err.render());
                failures += 1;
            }
        }
    }

    if failures > 0 {
        eprintln!("\n{} of {} scripts failed to build", failures, scripts.len());
        std::process::exit(1);
    }
}

/// Every source script under `dir`, in path order
fn find_scripts(dir: &Path, options: &BuildOptions) -> Vec<PathBuf> {
    let mut scripts: Vec<PathBuf> = WalkBuilder::new(dir)
        .build()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                eprintln!("Error walking {}: {}", dir.display(), err);
                None
            }
        })
        .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .map(|entry| entry.into_path())
        .filter(|path| options.is_source(path))
        .collect();
    scripts.sort();
    scripts
}

/// Handle the emit command
fn handle_emit_command(matches: &ArgMatches) {
    let path = matches
        .get_one::<String>("script")
        .expect("script is a required argument");
    let format = matches
        .get_one::<String>("format")
        .expect("format has a default value");

    let spec = ProcessingSpec::from_string(format).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("\nAvailable formats:");
        for name in available_formats() {
            eprintln!("  {}", name);
        }
        std::process::exit(1);
    });

    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        std::process::exit(1);
    });

    let config = load_config(Path::new("."), matches.get_one::<String>("config"), false);
    let options = GeneratorOptions::from_config(&config.generator);

    match process_with(&source, &spec, &options) {
        Ok(output) => print!("{}", output),
        Err(ProcessingError::Compile(err)) => {
            eprintln!("{}", err.render(path, &source));
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    }
}

/// Handle the formats command
fn handle_formats_command() {
    println!("Available formats:");
    for name in available_formats() {
        println!("  {}", name);
    }
}
