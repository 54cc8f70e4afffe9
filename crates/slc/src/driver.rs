//! End-to-end compilation of a source file into on-disk artifacts.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::{
    asm::AsmProgram,
    ast::Program,
    codegen, parser,
    parser::ParseError,
    tokenizer::{self, TokenList},
};

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("could not read {}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("could not serialize {what}")]
    Serialize {
        what: &'static str,
        source: serde_json::Error,
    },
    #[error("{error}")]
    Parse {
        source_text: String,
        error: ParseError,
    },
}

/// In-memory results of every pipeline stage.
#[derive(Debug)]
pub struct Compilation {
    pub tokens: TokenList,
    pub program: Program,
    pub asm: AsmProgram,
}

/// Paths of the files written by [`compile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub tokens_dump: PathBuf,
    pub tokens_json: PathBuf,
    pub ast_json: PathBuf,
    pub assembly: PathBuf,
}

impl Artifacts {
    fn in_dir(out_dir: &Path) -> Self {
        Self {
            tokens_dump: out_dir.join("tokens.txt"),
            tokens_json: out_dir.join("tokens.json"),
            ast_json: out_dir.join("ast.json"),
            assembly: out_dir.join("program.asm"),
        }
    }
}

pub fn read_source(path: &Path) -> Result<String, DriverError> {
    fs::read_to_string(path).map_err(|source| DriverError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), DriverError> {
    fs::write(path, contents).map_err(|source| DriverError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn to_json<T: Serialize>(what: &'static str, value: &T) -> Result<String, DriverError> {
    serde_json::to_string_pretty(value).map_err(|source| DriverError::Serialize { what, source })
}

fn tokenize_logged(source: &str) -> TokenList {
    let tokens = tokenizer::tokenize(source);
    for token in tokens.error_tokens() {
        warn!(
            line = token.position.line,
            column = token.position.column,
            text = token.text(),
            "Unrecognized character"
        );
    }
    trace!(token_count = tokens.tokens.len(), "Tokenized source");
    tokens
}

/// Runs every stage on `source` without touching the filesystem.
pub fn compile_source(source: &str) -> Result<Compilation, ParseError> {
    let tokens = tokenize_logged(source);
    let program = parser::parse(source)?;
    debug!(statements = program.statements.len(), "Parsed source");
    let asm = codegen::generate(&program);
    debug!(lines = asm.instructions.len(), "Generated assembly");
    Ok(Compilation {
        tokens,
        program,
        asm,
    })
}

/// Compiles `source_path`, writing the token dump, the token and tree JSON,
/// and the assembly listing into `out_dir`. On a parse error only the token
/// files are written.
pub fn compile(source_path: &Path, out_dir: &Path) -> Result<Artifacts, DriverError> {
    let source = read_source(source_path)?;
    trace!(source_len = source.len(), "Read input file");

    fs::create_dir_all(out_dir).map_err(|source| DriverError::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;
    let artifacts = Artifacts::in_dir(out_dir);

    let tokens = tokenize_logged(&source);
    write_file(&artifacts.tokens_dump, &tokens.dump())?;
    write_file(&artifacts.tokens_json, &to_json("tokens", &tokens)?)?;
    debug!(tokens_path = %artifacts.tokens_json.display(), "Tokenized source file");

    let program = match parser::parse(&source) {
        Ok(program) => program,
        Err(error) => {
            return Err(DriverError::Parse {
                source_text: source,
                error,
            })
        }
    };
    write_file(&artifacts.ast_json, &to_json("syntax tree", &program)?)?;
    debug!(ast_path = %artifacts.ast_json.display(), "Parsed source file");

    let asm = codegen::generate(&program);
    write_file(&artifacts.assembly, &asm.to_string())?;
    info!(assembly_path = %artifacts.assembly.display(), "Assembly generated");

    Ok(artifacts)
}
