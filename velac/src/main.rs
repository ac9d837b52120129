//! Velac CLI - the command-line driver for the Vela compiler front-end.
//!
//! This is the main entry point for the velac CLI application. It uses
//! clap for argument parsing and dispatches to the `check`/`ast` command
//! handlers, which lex and parse a Vela source file and report the
//! resulting diagnostics.

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use config::Config;

/// Velac - the command-line front end for the Vela compiler.
#[derive(Parser, Debug)]
#[command(name = "velac")]
#[command(author = "Vela Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lex and parse Vela source files", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true, env = "VELAC_VERBOSE")]
    verbose: bool,

    /// Path to a velac.toml to load instead of the default search order.
    #[arg(short, long, global = true, env = "VELAC_CONFIG")]
    config: Option<PathBuf>,

    /// Disable ANSI color in diagnostic output.
    #[arg(long, global = true, env = "VELAC_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the velac CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Lex and parse a file, reporting diagnostics to stderr.
    Check { file: PathBuf },
    /// Lex and parse a file, printing the resulting AST to stdout when
    /// there were no errors.
    Ast { file: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(!cli.no_color)
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    let exit_code = match cli.command {
        Commands::Check { file } => commands::check::run(&file, &config)?,
        Commands::Ast { file } => commands::ast::run(&file, &config)?,
    };

    std::process::exit(exit_code);
}
