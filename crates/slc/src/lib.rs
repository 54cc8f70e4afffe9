//! Compiler front end for SimpleLang: tokenizer, parser and a code generator
//! targeting a toy 8-bit accumulator machine.

pub mod asm;
pub mod ast;
pub mod codegen;
pub mod diagnostics;
pub mod driver;
pub mod parser;
pub mod tokenizer;
pub mod tree_printer;
