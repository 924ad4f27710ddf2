//! Pratt parser for Monkey.
//!
//! The parser owns the lexer and looks one token ahead. Expressions are
//! parsed by precedence climbing: every token kind may register a prefix
//! parse function and an infix parse function, and the main loop keeps
//! folding infix applications while the peek token binds stronger than the
//! surrounding context.
//!
//! Diagnostics accumulate as human-readable strings; the parser keeps going
//! after an error and never panics. Callers must consult [`Parser::errors`]
//! and refuse to evaluate when it is non-empty.

mod precedence;

pub use precedence::*;

use crate::ast::{
    ArrayLiteral, BinaryOp, Block, BooleanLiteral, Declaration, Expression, FnCall, FnDef,
    HashLiteral, Ident, If, Indexing, InfixExpr, IntegerLiteral, PrefixExpr, PrefixOp, Program,
    ReturnStatement, Statement, StringLiteral, WhileLoop,
};
use crate::lexer::{Lexer, Token, TokenKind};

type PrefixParseFn<'a> = fn(&mut Parser<'a>) -> Option<Expression>;
type InfixParseFn<'a> = fn(&mut Parser<'a>, Expression) -> Option<Expression>;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current_token: Token,
    peek_token: Token,
    errors: Vec<String>,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>) -> Self {
        let mut parser = Self {
            lexer,
            current_token: Token::default(),
            peek_token: Token::default(),
            errors: vec![],
        };

        // Fill current and peek.
        parser.next_token();
        parser.next_token();

        parser
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn parse_program(&mut self) -> Program {
        let mut statements = vec![];

        while self.current_token.kind != TokenKind::Eof {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.next_token();
        }

        Program { statements }
    }

    fn next_token(&mut self) {
        self.current_token = std::mem::replace(&mut self.peek_token, self.lexer.next_token());
    }

    fn current_is(&self, kind: TokenKind) -> bool {
        self.current_token.kind == kind
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek_token.kind == kind
    }

    /// Advance when the peek token matches, otherwise record a diagnostic.
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.next_token();
            true
        } else {
            self.errors.push(format!(
                "expected next token to be {}, received {}",
                kind, self.peek_token.kind
            ));
            false
        }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.current_token.kind {
            TokenKind::Let => self.parse_declaration().map(Statement::Let),
            TokenKind::Return => self.parse_return_statement().map(Statement::Return),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_declaration(&mut self) -> Option<Declaration> {
        let token = self.current_token.clone();

        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }

        let name = Ident {
            token: self.current_token.clone(),
            value: self.current_token.literal.clone(),
        };

        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }

        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(Declaration { token, name, value })
    }

    fn parse_return_statement(&mut self) -> Option<ReturnStatement> {
        let token = self.current_token.clone();

        // `return;`, `return }` and a trailing `return` all omit the value.
        if self.peek_is(TokenKind::Semicolon)
            || self.peek_is(TokenKind::RBrace)
            || self.peek_is(TokenKind::Eof)
        {
            if self.peek_is(TokenKind::Semicolon) {
                self.next_token();
            }
            return Some(ReturnStatement { token, value: None });
        }

        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(ReturnStatement {
            token,
            value: Some(value),
        })
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let expression = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }

        Some(Statement::Expression(expression))
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let Some(prefix) = Self::prefix_parse_fn(self.current_token.kind) else {
            self.errors.push(format!(
                "no prefix parse function for {}",
                self.current_token.kind
            ));
            return None;
        };

        let mut left = prefix(self)?;

        while !self.peek_is(TokenKind::Semicolon)
            && precedence < Precedence::of(self.peek_token.kind)
        {
            let Some(infix) = Self::infix_parse_fn(self.peek_token.kind) else {
                return Some(left);
            };

            self.next_token();
            left = infix(self, left)?;
        }

        Some(left)
    }

    fn prefix_parse_fn(kind: TokenKind) -> Option<PrefixParseFn<'a>> {
        match kind {
            TokenKind::Ident => Some(Self::parse_ident),
            TokenKind::Int => Some(Self::parse_integer_literal),
            TokenKind::String => Some(Self::parse_string_literal),
            TokenKind::True | TokenKind::False => Some(Self::parse_boolean_literal),
            TokenKind::Bang | TokenKind::Minus => Some(Self::parse_prefix_expression),
            TokenKind::LParen => Some(Self::parse_grouped_expression),
            TokenKind::If => Some(Self::parse_if_expression),
            TokenKind::While => Some(Self::parse_while_expression),
            TokenKind::Function => Some(Self::parse_fn_def),
            TokenKind::LBracket => Some(Self::parse_array_literal),
            TokenKind::LBrace => Some(Self::parse_hash_literal),
            _ => None,
        }
    }

    fn infix_parse_fn(kind: TokenKind) -> Option<InfixParseFn<'a>> {
        match kind {
            TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Asterisk
            | TokenKind::Slash
            | TokenKind::Lt
            | TokenKind::Gt
            | TokenKind::Eq
            | TokenKind::NotEq => Some(Self::parse_infix_expression),
            TokenKind::LParen => Some(Self::parse_call_expression),
            TokenKind::LBracket => Some(Self::parse_index_expression),
            _ => None,
        }
    }

    fn parse_ident(&mut self) -> Option<Expression> {
        Some(Expression::Ident(Ident {
            token: self.current_token.clone(),
            value: self.current_token.literal.clone(),
        }))
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.current_token.clone();

        let Ok(value) = token.literal.parse::<i64>() else {
            self.errors
                .push(format!("could not parse '{}' as integer", token.literal));
            return None;
        };

        Some(Expression::Integer(IntegerLiteral { token, value }))
    }

    fn parse_string_literal(&mut self) -> Option<Expression> {
        Some(Expression::Str(StringLiteral {
            token: self.current_token.clone(),
            value: self.current_token.literal.clone(),
        }))
    }

    fn parse_boolean_literal(&mut self) -> Option<Expression> {
        Some(Expression::Boolean(BooleanLiteral {
            token: self.current_token.clone(),
            value: self.current_is(TokenKind::True),
        }))
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.current_token.clone();
        let Some(operator) = PrefixOp::from_token_kind(token.kind) else {
            unreachable!()
        };

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expression::Prefix(PrefixExpr {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.current_token.clone();
        let Some(operator) = BinaryOp::from_token_kind(token.kind) else {
            unreachable!()
        };

        let precedence = Precedence::of(token.kind);
        self.next_token();
        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix(InfixExpr {
            token,
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();

        let expression = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        Some(expression)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.current_token.clone();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }

        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }

        let consequence = self.parse_block_statement();

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expression::If(If {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    fn parse_while_expression(&mut self) -> Option<Expression> {
        let token = self.current_token.clone();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }

        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }

        let body = self.parse_block_statement();

        Some(Expression::While(WhileLoop {
            token,
            condition: Box::new(condition),
            body,
        }))
    }

    fn parse_block_statement(&mut self) -> Block {
        let token = self.current_token.clone();
        let mut statements = vec![];

        self.next_token();

        while !self.current_is(TokenKind::RBrace) && !self.current_is(TokenKind::Eof) {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.next_token();
        }

        Block { token, statements }
    }

    fn parse_fn_def(&mut self) -> Option<Expression> {
        let token = self.current_token.clone();

        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }

        let parameters = self.parse_fn_parameters()?;

        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }

        let body = self.parse_block_statement();

        Some(Expression::FnDef(FnDef {
            token,
            parameters,
            body,
        }))
    }

    fn parse_fn_parameters(&mut self) -> Option<Vec<Ident>> {
        let mut parameters = vec![];

        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Some(parameters);
        }

        self.next_token();
        parameters.push(Ident {
            token: self.current_token.clone(),
            value: self.current_token.literal.clone(),
        });

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            parameters.push(Ident {
                token: self.current_token.clone(),
                value: self.current_token.literal.clone(),
            });
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }

        Some(parameters)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.current_token.clone();
        let arguments = self.parse_expression_list(TokenKind::RParen)?;

        Some(Expression::Call(FnCall {
            token,
            function: Box::new(function),
            arguments,
        }))
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.current_token.clone();

        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenKind::RBracket) {
            return None;
        }

        Some(Expression::Index(Indexing {
            token,
            left: Box::new(left),
            index: Box::new(index),
        }))
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let token = self.current_token.clone();
        let elements = self.parse_expression_list(TokenKind::RBracket)?;

        Some(Expression::Array(ArrayLiteral { token, elements }))
    }

    /// Comma-separated expressions up to `end`. The empty list is legal.
    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expression>> {
        let mut expressions = vec![];

        if self.peek_is(end) {
            self.next_token();
            return Some(expressions);
        }

        self.next_token();
        expressions.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            expressions.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }

        Some(expressions)
    }

    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let token = self.current_token.clone();
        let mut pairs = vec![];

        while !self.peek_is(TokenKind::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            if !self.expect_peek(TokenKind::Colon) {
                return None;
            }

            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;

            pairs.push((key, value));

            if !self.peek_is(TokenKind::RBrace) && !self.expect_peek(TokenKind::Comma) {
                return None;
            }
        }

        if !self.expect_peek(TokenKind::RBrace) {
            return None;
        }

        Some(Expression::Hash(HashLiteral { token, pairs }))
    }
}
