use std::fmt::Display;

use super::{Node, Statement};

/// AST root: the ordered statements of a single Monkey program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Node for Program {
    fn token_literal(&self) -> &str {
        match self.statements.first() {
            Some(statement) => statement.token_literal(),
            None => "",
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Declaration, Expression, Ident, Statement};
    use crate::lexer::{Token, TokenKind};

    use super::*;

    #[test]
    fn test_program_display() {
        let program = Program {
            statements: vec![Statement::Let(Declaration {
                token: Token::new(TokenKind::Let, "let"),
                name: Ident {
                    token: Token::new(TokenKind::Ident, "myVar"),
                    value: "myVar".into(),
                },
                value: Expression::Ident(Ident {
                    token: Token::new(TokenKind::Ident, "anotherVar"),
                    value: "anotherVar".into(),
                }),
            })],
        };

        assert_eq!("let myVar = anotherVar;", program.to_string());
        assert_eq!("let", program.token_literal());
    }
}
