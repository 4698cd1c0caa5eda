//! # proceedings CLI
//!
//! Command-line interface for running LaTeX engines and BibTeX, and for
//! inspecting proceedings project files.

mod commands;

use clap::{Parser, Subcommand};
use proceedings_core::project::DEFAULT_PROJECT_FILE;
use proceedings_core::CompilerKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "proceedings")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a LaTeX engine on a document
    Latex {
        /// <executable> [additional options] <document>
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run BibTeX on the .aux file of a document
    Bibtex {
        /// <executable> [additional options] <document>
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Write an example project file
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },

    /// Print an example project file
    Example,

    /// List configured compilers and documents
    List {
        /// Path to project file
        #[arg(long, default_value = DEFAULT_PROJECT_FILE)]
        config: PathBuf,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Validate a project file
    Check {
        /// Path to project file
        #[arg(long, default_value = DEFAULT_PROJECT_FILE)]
        config: PathBuf,

        /// Stop at the first invalid entry
        #[arg(long)]
        strict: bool,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for command output
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Latex { args } => commands::run_compiler(CompilerKind::LaTeX, &args),
        Commands::Bibtex { args } => commands::run_compiler(CompilerKind::BibTeX, &args),
        Commands::Init { path } => commands::init_project(path.as_deref()),
        Commands::Example => commands::print_example(),
        Commands::List { config, json } => commands::list_project(&config, json),
        Commands::Check {
            config,
            strict,
            json,
        } => commands::check_project(&config, strict, json),
    }
}
