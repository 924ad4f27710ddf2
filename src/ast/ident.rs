use std::fmt::Display;

use crate::lexer::Token;

use super::Node;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub token: Token,
    pub value: String,
}

impl Node for Ident {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}
