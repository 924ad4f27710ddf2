use std::fmt::Display;

use super::{
    ArrayLiteral, BooleanLiteral, FnCall, FnDef, HashLiteral, Ident, If, Indexing, InfixExpr,
    IntegerLiteral, Node, PrefixExpr, StringLiteral, WhileLoop,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Ident(Ident),
    Integer(IntegerLiteral),
    Boolean(BooleanLiteral),
    Str(StringLiteral),
    Array(ArrayLiteral),
    Hash(HashLiteral),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    If(If),
    While(WhileLoop),
    FnDef(FnDef),
    Call(FnCall),
    Index(Indexing),
}

impl Node for Expression {
    fn token_literal(&self) -> &str {
        match self {
            Expression::Ident(ident) => ident.token_literal(),
            Expression::Integer(integer) => integer.token_literal(),
            Expression::Boolean(boolean) => boolean.token_literal(),
            Expression::Str(string) => string.token_literal(),
            Expression::Array(array) => array.token_literal(),
            Expression::Hash(hash) => hash.token_literal(),
            Expression::Prefix(prefix) => prefix.token_literal(),
            Expression::Infix(infix) => infix.token_literal(),
            Expression::If(if_expression) => if_expression.token_literal(),
            Expression::While(while_loop) => while_loop.token_literal(),
            Expression::FnDef(fn_def) => fn_def.token_literal(),
            Expression::Call(call) => call.token_literal(),
            Expression::Index(indexing) => indexing.token_literal(),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Ident(ident) => write!(f, "{ident}"),
            Expression::Integer(integer) => write!(f, "{integer}"),
            Expression::Boolean(boolean) => write!(f, "{boolean}"),
            Expression::Str(string) => write!(f, "{string}"),
            Expression::Array(array) => write!(f, "{array}"),
            Expression::Hash(hash) => write!(f, "{hash}"),
            Expression::Prefix(prefix) => write!(f, "{prefix}"),
            Expression::Infix(infix) => write!(f, "{infix}"),
            Expression::If(if_expression) => write!(f, "{if_expression}"),
            Expression::While(while_loop) => write!(f, "{while_loop}"),
            Expression::FnDef(fn_def) => write!(f, "{fn_def}"),
            Expression::Call(call) => write!(f, "{call}"),
            Expression::Index(indexing) => write!(f, "{indexing}"),
        }
    }
}
