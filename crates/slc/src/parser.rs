//! Recursive-descent parser with a single token of lookahead.
//!
//! ```text
//! program     → statement*
//! statement   → declaration | assignment | if_statement
//! declaration → 'int' IDENTIFIER ('=' expression)? ';'
//! assignment  → IDENTIFIER '=' expression ';'
//! if_stmt     → 'if' '(' expression ')' block ('else' block)?
//! block       → '{' statement* '}'
//! expression  → term ('==' term)*
//! term        → factor (('+'|'-') factor)*
//! factor      → NUMBER | IDENTIFIER | '(' expression ')'
//! ```
//!
//! Newlines are only skipped around statements. Inside an expression a
//! newline is just another unexpected token.

use tracing::trace;

use crate::{
    ast::{BinaryOperator, Block, Expression, Program, Statement},
    tokenizer::{Position, Token, TokenKind, Tokenizer},
};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("Parse error at line {line}, column {column}: {reason}")]
pub struct ParseError {
    pub reason: String,
    pub line: u32,
    pub column: u32,
}

impl ParseError {
    fn at(token: &Token, reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
            line: token.position.line,
            column: token.position.column,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

#[derive(Debug)]
pub struct Parser {
    tokenizer: Tokenizer,
    current: Token,
    /// First error of the session. Once set, the parser does no more work.
    error: Option<ParseError>,
}

impl Parser {
    pub fn new(mut tokenizer: Tokenizer) -> Self {
        let current = tokenizer.next_token();
        Self {
            tokenizer,
            current,
            error: None,
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    fn fail(&mut self, reason: &str) -> ParseError {
        let error = ParseError::at(&self.current, reason);
        trace!(%error, "Parse failed");
        self.error = Some(error.clone());
        error
    }

    fn advance(&mut self) -> Token {
        let next = self.tokenizer.next_token();
        std::mem::replace(&mut self.current, next)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, reason: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.fail(reason))
        }
    }

    fn skip_newlines(&mut self) {
        while self.eat(TokenKind::Newline) {}
    }

    /// Parses statements until `terminator` or the end of input, whichever
    /// comes first. Neither is consumed.
    fn parse_statements(&mut self, terminator: TokenKind) -> Result<Vec<Statement>, ParseError> {
        let mut statements = vec![];
        self.skip_newlines();
        while !self.check(terminator) && !self.check(TokenKind::End) && !self.has_error() {
            statements.push(self.parse_statement()?);
            self.skip_newlines();
        }
        Ok(statements)
    }

    /// Parses the whole input. After a failure the same error is returned on
    /// every further call.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        if let Some(error) = &self.error {
            return Err(error.clone());
        }

        let mut program = Program::new();
        for statement in self.parse_statements(TokenKind::End)? {
            program.append(statement);
        }
        Ok(program)
    }

    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        trace!(token = ?self.current.kind, line = self.current.position.line, "Parsing statement");

        match self.current.kind {
            TokenKind::Int => self.parse_declaration(),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::Identifier => self.parse_assignment(),
            _ => Err(self.fail("Expected statement")),
        }
    }

    fn parse_declaration(&mut self) -> Result<Statement, ParseError> {
        self.expect(TokenKind::Int, "Expected int")?;
        let name = self.expect(TokenKind::Identifier, "Expected identifier after 'int'")?;

        let initializer = if self.eat(TokenKind::Assign) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect(TokenKind::Semicolon, "Expected ';' after declaration")?;
        Ok(Statement::declaration(
            name.text(),
            initializer,
            name.position,
        ))
    }

    fn parse_assignment(&mut self) -> Result<Statement, ParseError> {
        let name = self.expect(TokenKind::Identifier, "Expected identifier")?;
        self.expect(TokenKind::Assign, "Expected '=' in assignment")?;
        let value = self.parse_expression()?;
        self.expect(TokenKind::Semicolon, "Expected ';' in assignment")?;
        Ok(Statement::assignment(name.text(), value, name.position))
    }

    fn parse_if_statement(&mut self) -> Result<Statement, ParseError> {
        let keyword = self.expect(TokenKind::If, "Expected 'if'")?;
        self.expect(TokenKind::LParen, "Expected '(' after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen, "Expected ')' after if condition")?;
        let then_block = self.parse_block()?;

        let else_block = if self.eat(TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Statement::if_statement(
            condition,
            then_block,
            else_block,
            keyword.position,
        ))
    }

    fn parse_block(&mut self) -> Result<Block, ParseError> {
        let brace = self.expect(TokenKind::LBrace, "Expected '{'")?;
        let mut block = Block::new(brace.position);
        for statement in self.parse_statements(TokenKind::RBrace)? {
            block.append(statement);
        }
        self.expect(TokenKind::RBrace, "Expected '}'")?;
        Ok(block)
    }

    fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_term()?;
        while self.check(TokenKind::Equal) {
            let operator = self.advance();
            let right = self.parse_term()?;
            left = Expression::binary(left, BinaryOperator::Equal, right, operator.position);
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_factor()?;
        while let Some(operator) = BinaryOperator::from_token(self.current.kind)
            .filter(|op| matches!(op, BinaryOperator::Plus | BinaryOperator::Minus))
        {
            let token = self.advance();
            let right = self.parse_factor()?;
            left = Expression::binary(left, operator, right, token.position);
        }
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expression, ParseError> {
        match self.current.kind {
            TokenKind::Number => {
                let Ok(value) = self.current.text().parse::<i32>() else {
                    return Err(self.fail("Integer literal out of range"));
                };
                let token = self.advance();
                Ok(Expression::number(value, token.position))
            }
            TokenKind::Identifier => {
                let token = self.advance();
                Ok(Expression::identifier(token.text(), token.position))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen, "Expected ')' after expression")?;
                Ok(expr)
            }
            _ => Err(self.fail("Expected number, identifier, or '('")),
        }
    }
}

/// Parses `source` in a fresh session.
#[tracing::instrument(level = "trace", skip_all)]
pub fn parse(source: &str) -> Result<Program, ParseError> {
    Parser::new(Tokenizer::new(source)).parse_program()
}
