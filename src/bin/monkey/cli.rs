//! # Cli
//!
//! Argument parsing for the monkey binary.

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl Cli {
    /// Collapse the repeat count onto a log level. Warnings and errors are
    /// always logged.
    pub fn log_level(&self) -> log::Level {
        match self.verbose {
            0 => log::Level::Warn,
            1 => log::Level::Info,
            2 => log::Level::Debug,
            _ => log::Level::Trace,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate a Monkey source file.
    Run(RunArgs),

    /// Start an interactive session with a persistent environment.
    Repl,

    /// Serve the evaluator over HTTP.
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// The path to the monkey source file.
    #[arg(index = 1)]
    pub file: std::path::PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// The port to listen on.
    #[arg(short, long, default_value_t = 5150)]
    pub port: u16,
}
