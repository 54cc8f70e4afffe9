//! Textual assembly for the 8-bit accumulator machine.
//!
//! The machine has a primary register `A`, a secondary register `B` and a
//! stack. Variables live in the data section under a `var_` prefix.

use std::fmt;

/// Labels the data section always declares, whatever the program uses.
pub const DATA_LABELS: [&str; 7] = ["a", "b", "sum", "diff", "x", "counter", "result"];

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Section marker such as `.text` or `.data`
    Section(&'static str),
    /// Empty separator line
    Blank,
    /// Loads an immediate into `A`
    Ldi(i32),
    /// Loads a variable into `A`
    Lda(String),
    /// Stores `A` into a variable
    Sta(String),
    /// Pushes `A`
    Push,
    /// Pops into `A`
    Pop,
    /// Copies `A` into `B`
    Mov,
    /// `A = A + B`
    Add,
    /// `A = A - B`
    Sub,
    Hlt,
    /// Data section entry: `var_<name> = <value>`
    Data(String, i32),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Section(name) => write!(f, ".{name}"),
            Self::Blank => Ok(()),
            Self::Ldi(value) => write!(f, "ldi A {value}"),
            Self::Lda(var) => write!(f, "lda %var_{var}"),
            Self::Sta(var) => write!(f, "sta %var_{var}"),
            Self::Push => write!(f, "push A"),
            Self::Pop => write!(f, "pop A"),
            Self::Mov => write!(f, "mov B A"),
            Self::Add => write!(f, "add"),
            Self::Sub => write!(f, "sub"),
            Self::Hlt => write!(f, "hlt"),
            Self::Data(var, value) => write!(f, "var_{var} = {value}"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AsmProgram {
    pub instructions: Vec<Instruction>,
}

impl AsmProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// One rendered line per instruction, in emission order.
    pub fn lines(&self) -> Vec<String> {
        self.instructions.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for AsmProgram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for instruction in self.instructions.iter() {
            writeln!(f, "{instruction}")?;
        }
        Ok(())
    }
}
