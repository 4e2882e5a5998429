//! Mock lifecycle linter CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use mocklint::report::{generate_report, OutputFormat};
use mocklint::{LintConfig, Linter};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mocklint")]
#[command(about = "Find sinon spies and stubs that are not restored before assertions", long_about = None)]
#[command(version)]
struct Cli {
    /// Log analysis progress
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint test files and directories
    Check {
        /// Files or directories to lint
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Configuration file (JSON5)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Factory method that creates a tracked mock (repeatable)
        #[arg(long = "factory", value_name = "NAME")]
        factories: Vec<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Print the effective configuration as JSON
    PrintConfig {
        /// Configuration file (JSON5)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let outcome = match cli.command {
        Commands::Check { paths, config, format, factories, no_color } => {
            run_check(&paths, config.as_deref(), format, factories, !no_color)
        }
        Commands::PrintConfig { config } => print_config(config.as_deref()).map(|_| true),
    };

    match outcome {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}", format!("Error: {:#}", e).red());
            std::process::exit(2);
        }
    }
}

fn load_config(explicit: Option<&Path>) -> Result<LintConfig> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    LintConfig::discover(explicit, &cwd).context("Failed to load configuration")
}

/// Returns whether the run was clean
fn run_check(
    paths: &[PathBuf],
    config: Option<&Path>,
    format: OutputFormat,
    factories: Vec<String>,
    color: bool,
) -> Result<bool> {
    let mut config = load_config(config)?;
    if !factories.is_empty() {
        config.conventions.dangerous_factories = factories;
    }

    let linter = Linter::new(config);
    let report = linter.lint_paths(paths).context("Failed to lint")?;

    print!("{}", generate_report(&report, format, color)?);
    if format == OutputFormat::Json {
        println!();
    }

    Ok(report.is_clean())
}

fn print_config(explicit: Option<&Path>) -> Result<()> {
    let config = load_config(explicit)?;
    let json = serde_json::to_string_pretty(&config).context("Failed to serialize configuration")?;
    println!("{}", json);
    Ok(())
}
