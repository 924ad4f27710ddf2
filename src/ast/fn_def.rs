use std::fmt::Display;

use crate::lexer::Token;

use super::{Block, Ident, Node};

/// A function literal. Anonymous; named functions come from `let` bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FnDef {
    pub token: Token,
    pub parameters: Vec<Ident>,
    pub body: Block,
}

impl Node for FnDef {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for FnDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self
            .parameters
            .iter()
            .map(|parameter| parameter.to_string())
            .collect::<Vec<_>>();
        write!(f, "fn({}) {}", parameters.join(", "), self.body)
    }
}
