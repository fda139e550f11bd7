use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tsasset_driver::{CompilerOptions, DependencySet, DriverError, Orchestrator, TscCompiler};
use tsasset_refs::{collect_references, rewrite_relative_references, RefError};

mod logging;

#[derive(Parser)]
#[command(
    name = "tsasset",
    version = "0.1.0",
    about = "TypeScript asset compiler with reference dependency tracking"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a TypeScript file to JavaScript
    Compile {
        /// Input TypeScript file
        input: PathBuf,

        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Extra compiler option, appended after the defaults (repeatable)
        #[arg(long = "option", allow_hyphen_values = true)]
        options: Vec<String>,

        /// Don't pass the default `--target ES5 --noImplicitAny`
        #[arg(long)]
        no_defaults: bool,

        /// List discovered dependencies on stderr
        #[arg(long)]
        deps: bool,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Build a tsconfig project and emit its combined output file
    Project {
        /// Project manifest
        manifest: PathBuf,

        /// Copy the output here instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print every file reachable through reference directives
    Deps {
        /// Entry TypeScript file
        input: PathBuf,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print a source with its reference paths made absolute (debug)
    Rewrite {
        /// Input TypeScript file
        input: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            input,
            output,
            options,
            no_defaults,
            deps,
            verbose,
        } => {
            logging::init(verbose);
            compile_command(input, output, options, no_defaults, deps)
        }
        Commands::Project {
            manifest,
            output,
            verbose,
        } => {
            logging::init(verbose);
            project_command(manifest, output)
        }
        Commands::Deps { input, verbose } => {
            logging::init(verbose);
            deps_command(input)
        }
        Commands::Rewrite { input } => {
            logging::init(false);
            rewrite_command(input)
        }
    }
}

fn compile_command(
    input: PathBuf,
    output: Option<PathBuf>,
    options: Vec<String>,
    no_defaults: bool,
    deps: bool,
) -> ExitCode {
    let defaults = if no_defaults {
        CompilerOptions::empty()
    } else {
        CompilerOptions::default()
    };
    let orchestrator = Orchestrator::new(TscCompiler::locate(&search_dir(&input)), defaults);

    let compiled = match orchestrator.compile_with_dependencies(&input, &options) {
        Ok(compiled) => compiled,
        Err(e) => {
            report_driver_error(&e);
            return ExitCode::FAILURE;
        }
    };

    if deps {
        for path in compiled.dependencies.paths() {
            eprintln!("depends on: {}", path.display());
        }
    }

    emit(&compiled.js, output.as_deref())
}

fn project_command(manifest: PathBuf, output: Option<PathBuf>) -> ExitCode {
    let orchestrator = Orchestrator::new(
        TscCompiler::locate(&search_dir(&manifest)),
        CompilerOptions::default(),
    );
    let mut dependencies = DependencySet::new();

    match orchestrator.compile_project(&manifest, &mut dependencies) {
        Ok(Some(js)) => emit(&js, output.as_deref()),
        Ok(None) => {
            eprintln!(
                "Build succeeded but produced no output file ({} inputs)",
                dependencies.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_driver_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn deps_command(input: PathBuf) -> ExitCode {
    match collect_references(&input, None) {
        Ok(paths) => {
            for path in paths {
                println!("{}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_reference_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn rewrite_command(input: PathBuf) -> ExitCode {
    let source = match fs::read_to_string(&input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match rewrite_relative_references(&input, &source) {
        Ok(rewritten) => {
            print!("{}", rewritten);
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_reference_error(&e);
            ExitCode::FAILURE
        }
    }
}

// Helper functions

/// Directory to start looking for a local `tsc` from
fn search_dir(input: &Path) -> PathBuf {
    let dir = input.parent().unwrap_or_else(|| Path::new("."));
    if dir.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        dir.to_path_buf()
    }
}

fn emit(js: &str, output: Option<&Path>) -> ExitCode {
    let result = match output {
        Some(path) => fs::write(path, js),
        None => io::stdout().write_all(js.as_bytes()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error writing output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn report_driver_error(err: &DriverError) {
    match err {
        DriverError::References(e) => report_reference_error(e),
        other => eprintln!("Error: {}", other),
    }
}

/// Point at the directive that named an unreadable file, when there is one
fn report_reference_error(err: &RefError) {
    let Some(origin) = err.origin() else {
        eprintln!("Error: {}", err);
        return;
    };
    let Ok(source) = fs::read_to_string(&origin.file) else {
        eprintln!("Error: {}", err);
        return;
    };

    let filename = origin.file.to_string_lossy().to_string();
    let span = (filename.as_str(), origin.span.clone());
    let printed = Report::build(ReportKind::Error, span.clone())
        .with_config(Config::default().with_index_type(IndexType::Byte))
        .with_code("E0001")
        .with_message("Unreadable reference")
        .with_label(
            Label::new(span)
                .with_message(err.to_string())
                .with_color(Color::Red),
        )
        .finish()
        .eprint((filename.as_str(), Source::from(source)));

    if printed.is_err() {
        eprintln!("Error: {}", err);
    }
}
