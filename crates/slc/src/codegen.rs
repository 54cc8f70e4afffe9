//! Tree-walking code generation for the accumulator machine.
//!
//! Every expression leaves its value in `A`. Binary operations stage the left
//! operand on the stack while the right one is evaluated, then move the right
//! operand into `B` and restore the left one into `A`.
//!
//! Two constructs produce no code yet: the `==` operator (both operands are
//! still evaluated and staged) and `if` statements.

use tracing::trace;

use crate::{
    asm::{AsmProgram, Instruction, DATA_LABELS},
    ast::{BinaryOperator, Expression, Program, Statement},
};

#[derive(Debug, Default)]
pub struct CodeGenerator {
    output: AsmProgram,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn emit(&mut self, instruction: Instruction) {
        self.output.push(instruction);
    }

    fn expression(&mut self, expr: &Expression) {
        match expr {
            Expression::Number { value, .. } => self.emit(Instruction::Ldi(*value)),
            Expression::Identifier { name, .. } => self.emit(Instruction::Lda(name.clone())),
            Expression::BinaryOp {
                left,
                operator,
                right,
                ..
            } => {
                self.expression(left);
                self.emit(Instruction::Push);
                self.expression(right);
                self.emit(Instruction::Mov);
                self.emit(Instruction::Pop);
                match operator {
                    BinaryOperator::Plus => self.emit(Instruction::Add),
                    BinaryOperator::Minus => self.emit(Instruction::Sub),
                    BinaryOperator::Equal => {}
                }
            }
        }
    }

    fn statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Declaration {
                name,
                initializer: Some(value),
                ..
            }
            | Statement::Assignment { name, value, .. } => {
                self.expression(value);
                self.emit(Instruction::Sta(name.clone()));
            }
            Statement::Declaration {
                initializer: None, ..
            } => {}
            Statement::If { position, .. } => {
                trace!(line = position.line, "No code emitted for if statement");
            }
        }
    }

    /// Generates the complete listing for `program`. The generator is reset
    /// first, so it can be reused.
    pub fn generate(&mut self, program: &Program) -> AsmProgram {
        self.output = AsmProgram::new();

        self.emit(Instruction::Section("text"));
        self.emit(Instruction::Blank);
        for statement in &program.statements {
            self.statement(statement);
        }
        self.emit(Instruction::Hlt);
        self.emit(Instruction::Blank);
        self.emit(Instruction::Section("data"));
        for label in DATA_LABELS {
            self.emit(Instruction::Data(label.to_string(), 0));
        }

        std::mem::take(&mut self.output)
    }
}

#[tracing::instrument(level = "trace", skip_all)]
pub fn generate(program: &Program) -> AsmProgram {
    CodeGenerator::new().generate(program)
}
