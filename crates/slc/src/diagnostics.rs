//! Human-readable error reports for the CLI.
//!
//! Parse errors are rendered against the source text with the offending
//! token underlined. I/O errors have no source to point at and render as a
//! single headline plus the OS error.

use std::fmt;
use std::io;
use std::ops::Range;
use std::path::Path;

use ariadne::{Config, IndexType, Label, Report, ReportKind, Source};

use crate::{parser::ParseError, tokenizer::Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosticStage {
    Parse,
    Io,
}

impl DiagnosticStage {
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticStage::Parse => "SLC-PARSE-001",
            DiagnosticStage::Io => "SLC-IO-001",
        }
    }

    fn headline(self, message: &str) -> String {
        format!("error[{self}:{}]: {message}", self.code())
    }
}

impl fmt::Display for DiagnosticStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticStage::Parse => "parse",
            DiagnosticStage::Io => "io",
        };
        f.write_str(name)
    }
}

/// Renders `error` with the token it points at underlined in `source`.
pub fn render_parse_error(
    source: &str,
    source_path: Option<&Path>,
    error: &ParseError,
    use_color: bool,
) -> String {
    let stage = DiagnosticStage::Parse;
    let file_id = file_id_from_path(source_path);
    let span = span_from_position(source, error.position());

    let report = Report::build(ReportKind::Error, (file_id.clone(), span.clone()))
        .with_code(stage.code())
        .with_message(stage.headline("parsing failed"))
        .with_config(
            Config::default()
                .with_color(use_color)
                .with_index_type(IndexType::Byte),
        )
        .with_label(Label::new((file_id.clone(), span)).with_message(&error.reason))
        .with_note(error.to_string())
        .finish();

    let mut output = Vec::new();
    match report.write((file_id, Source::from(source)), &mut output) {
        Ok(()) => String::from_utf8_lossy(&output).trim_end().to_string(),
        Err(_) => format!("{}\nnote: {error}", stage.headline("parsing failed")),
    }
}

pub fn render_io_error(path: &Path, error: &io::Error) -> String {
    let headline =
        DiagnosticStage::Io.headline(&format!("could not read {}", path.display()));
    format!("{headline}\nnote: {error}")
}

pub fn file_id_from_path(path: Option<&Path>) -> String {
    path.map(|value| value.display().to_string())
        .unwrap_or_else(|| "<memory>".to_string())
}

/// Byte range of the character at `position`. Past the end of the source
/// the range is one byte wide starting at `source.len()`.
pub fn span_from_position(source: &str, position: Position) -> Range<usize> {
    let start = line_column_to_byte_index(source, position.line, position.column);
    let width = source[start..].chars().next().map_or(1, char::len_utf8);
    start..start + width
}

pub fn line_column_to_byte_index(source: &str, line_1_based: u32, column_1_based: u32) -> usize {
    let mut position = Position::default();
    for (idx, ch) in source.char_indices() {
        if position == Position::new(line_1_based, column_1_based) {
            return idx;
        }
        position.advance(ch);
    }
    source.len()
}
