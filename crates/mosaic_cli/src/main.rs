//! Mosaic CLI — the command-line interface for the Mosaic floorplanner.
//!
//! Provides `mosaic run` for the full place-and-report pipeline and
//! `mosaic check` for validating a configuration and its input files
//! without running the search.

#![warn(missing_docs)]

mod run;

use std::process;

use clap::{Parser, Subcommand};

/// Mosaic — a fixed-outline block floorplanner.
#[derive(Parser, Debug)]
#[command(name = "mosaic", version, about = "Mosaic floorplanner")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the `mosaic.toml` configuration file.
    #[arg(short, long, global = true, default_value = "mosaic.toml")]
    pub config: String,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Place the blocks and write the result report.
    Run(RunArgs),
    /// Validate the configuration and input files without placing.
    Check,
}

/// Arguments for the `mosaic run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Output file path, overriding `files.output` from the configuration.
    #[arg(short, long)]
    pub output: Option<String>,

    /// RNG seed, overriding `anneal.seed` from the configuration.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Path to the configuration file.
    pub config: String,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Run(ref args) => run::run(args, &global),
        Command::Check => run::check(&global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
