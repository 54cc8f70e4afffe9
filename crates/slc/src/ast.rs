//! Syntax tree produced by the parser and consumed by code generation.
//!
//! Every node owns its children outright, and every node records the
//! [`Position`] of the token it starts at.

use serde::Serialize;

use crate::tokenizer::{Position, TokenKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub position: Position,
}

impl Program {
    pub fn new() -> Self {
        Self {
            statements: vec![],
            position: Position::default(),
        }
    }

    pub fn append(&mut self, statement: Statement) {
        self.statements.push(statement);
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

/// A braced statement sequence, positioned at its opening `{`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub position: Position,
}

impl Block {
    pub fn new(position: Position) -> Self {
        Self {
            statements: vec![],
            position,
        }
    }

    pub fn append(&mut self, statement: Statement) {
        self.statements.push(statement);
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Statement {
    Declaration {
        name: String,
        initializer: Option<Expression>,
        position: Position,
    },
    Assignment {
        name: String,
        value: Expression,
        position: Position,
    },
    If {
        condition: Expression,
        then_block: Block,
        else_block: Option<Block>,
        position: Position,
    },
}

impl Statement {
    pub fn declaration(
        name: impl Into<String>,
        initializer: Option<Expression>,
        position: Position,
    ) -> Self {
        Statement::Declaration {
            name: name.into(),
            initializer,
            position,
        }
    }

    pub fn assignment(name: impl Into<String>, value: Expression, position: Position) -> Self {
        Statement::Assignment {
            name: name.into(),
            value,
            position,
        }
    }

    pub fn if_statement(
        condition: Expression,
        then_block: Block,
        else_block: Option<Block>,
        position: Position,
    ) -> Self {
        Statement::If {
            condition,
            then_block,
            else_block,
            position,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Statement::Declaration { position, .. }
            | Statement::Assignment { position, .. }
            | Statement::If { position, .. } => *position,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Equal,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(BinaryOperator::Plus),
            TokenKind::Minus => Some(BinaryOperator::Minus),
            TokenKind::Equal => Some(BinaryOperator::Equal),
            _ => None,
        }
    }

    pub fn token_kind(self) -> TokenKind {
        match self {
            BinaryOperator::Plus => TokenKind::Plus,
            BinaryOperator::Minus => TokenKind::Minus,
            BinaryOperator::Equal => TokenKind::Equal,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Expression {
    BinaryOp {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
        position: Position,
    },
    Number {
        value: i32,
        position: Position,
    },
    Identifier {
        name: String,
        position: Position,
    },
}

impl Expression {
    pub fn binary(
        left: Expression,
        operator: BinaryOperator,
        right: Expression,
        position: Position,
    ) -> Self {
        Expression::BinaryOp {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            position,
        }
    }

    pub fn number(value: i32, position: Position) -> Self {
        Expression::Number { value, position }
    }

    pub fn identifier(name: impl Into<String>, position: Position) -> Self {
        Expression::Identifier {
            name: name.into(),
            position,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Expression::BinaryOp { position, .. }
            | Expression::Number { position, .. }
            | Expression::Identifier { position, .. } => *position,
        }
    }
}
