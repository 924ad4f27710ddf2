use std::fmt::Display;

use crate::lexer::Token;

use super::{Expression, Node};

/// A hash literal. Pairs keep their source order; duplicate keys are resolved
/// at evaluation time (later pairs win).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashLiteral {
    pub token: Token,
    pub pairs: Vec<(Expression, Expression)>,
}

impl Node for HashLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for HashLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pairs = self
            .pairs
            .iter()
            .map(|(key, value)| format!("{key}: {value}"))
            .collect::<Vec<_>>();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}
