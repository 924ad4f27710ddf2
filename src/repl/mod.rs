//! Line-oriented REPL with a persistent environment.

use std::error::Error;
use std::io::{self, BufRead, Write};

use crate::evaluate;
use crate::object::Environment;

const PROMPT: &str = "🐒 >> ";

/// Read-eval-print until `:exit` or end of input. Bindings survive across
/// lines through a shared environment.
pub fn start() -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let env = Environment::new();

    loop {
        write!(stdout, "{PROMPT}")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        let line = line.trim_end();
        if line == ":exit" {
            return Ok(());
        }
        if line.is_empty() {
            continue;
        }

        let (result, errors) = evaluate(line, &env);

        if !errors.is_empty() {
            for error in errors {
                writeln!(stdout, "{error}")?;
            }
            continue;
        }

        if let Some(result) = result {
            writeln!(stdout, "{}", result.inspect())?;
        }
    }
}
