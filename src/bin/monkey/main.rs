//! # Monkey
//!
//! This binary is the command line surface of the Monkey interpreter. It can
//! evaluate source files, run an interactive REPL, and serve the evaluator
//! over HTTP.

mod cli;

use cli::*;

use std::{error::Error, fs};

use clap::Parser;
use log::error;
use monkey_lang::{api, evaluate, object::Environment, object::Object, repl};

fn main() -> Result<(), Box<dyn Error>> {
    let args = Cli::parse();

    simple_logger::init_with_level(args.log_level())?;

    match args.command {
        Commands::Run(run_args) => run_file(run_args),
        Commands::Repl => repl::start(),
        Commands::Serve(serve_args) => api::serve(serve_args.port),
    }
}

fn run_file(args: RunArgs) -> Result<(), Box<dyn Error>> {
    let source = fs::read_to_string(&args.file)?;

    let env = Environment::new();
    let (result, errors) = evaluate(&source, &env);

    if !errors.is_empty() {
        for diagnostic in &errors {
            error!("{diagnostic}");
        }
        std::process::exit(-1);
    }

    match result {
        Some(Object::Error(message)) => {
            error!("{message}");
            std::process::exit(-1);
        }
        Some(Object::Null) | None => {}
        Some(value) => println!("{}", value.inspect()),
    }

    Ok(())
}
