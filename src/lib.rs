//! Monkey: a small, dynamically-typed, expression-oriented scripting
//! language, implemented as a tree-walking interpreter.
//!
//! The pipeline is strictly forward: source → tokens → AST → value. The
//! [`evaluate`] entry point drives the whole thing; the [`repl`] and [`api`]
//! modules are thin embedders on top of it.

pub mod api;
pub mod ast;
pub mod evaluator;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod repl;

use evaluator::Evaluator;
use lexer::Lexer;
use object::{Env, Object};
use parser::Parser;

/// Evaluate a source string under the given environment.
///
/// When the parser reports diagnostics, no evaluation happens and the result
/// is `None`. Otherwise the final value is returned — which may itself be an
/// `Object::Error` produced at runtime.
pub fn evaluate(source: &str, env: &Env) -> (Option<Object>, Vec<String>) {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();

    if !parser.errors().is_empty() {
        return (None, parser.errors().to_vec());
    }

    let result = Evaluator::new().eval_program(&program, env);
    (Some(result), vec![])
}
