use std::fmt::Display;

use super::{Declaration, Expression, Node, ReturnStatement};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Let(Declaration),
    Return(ReturnStatement),
    Expression(Expression),
}

impl Node for Statement {
    fn token_literal(&self) -> &str {
        match self {
            Statement::Let(declaration) => declaration.token_literal(),
            Statement::Return(statement) => statement.token_literal(),
            Statement::Expression(expression) => expression.token_literal(),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Let(declaration) => write!(f, "{declaration}"),
            Statement::Return(statement) => write!(f, "{statement}"),
            Statement::Expression(expression) => write!(f, "{expression}"),
        }
    }
}
