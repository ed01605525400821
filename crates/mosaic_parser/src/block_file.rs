//! Parser for the `.block` input format.
//!
//! The header declares the outline and entity counts:
//!
//! ```text
//! Outline: 100 100
//! NumBlocks: 2
//! NumTerminals: 1
//! ```
//!
//! The body holds one entity per line: `name width height` for a block,
//! `name terminal x y` for a terminal. Blank lines are ignored anywhere.

use crate::error::ParseError;
use mosaic_diagnostics::{Diagnostic, DiagnosticSink};
use mosaic_geom::{Block, Design, Outline, Terminal};
use std::path::Path;

/// Reads and parses a `.block` file into a fresh [`Design`].
pub fn parse_block_file(path: &Path, sink: &DiagnosticSink) -> Result<Design, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_block_str(&content, sink)
}

/// Parses `.block` content from a string.
///
/// Declared `NumBlocks:`/`NumTerminals:` counts that disagree with the
/// body produce a warning diagnostic, not an error.
pub fn parse_block_str(content: &str, sink: &DiagnosticSink) -> Result<Design, ParseError> {
    let mut outline: Option<Outline> = None;
    let mut declared_blocks: Option<usize> = None;
    let mut declared_terminals: Option<usize> = None;
    let mut blocks: Vec<Block> = Vec::new();
    let mut terminals: Vec<Terminal> = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();

        if line.starts_with("Outline:") {
            if fields.len() != 3 {
                return Err(malformed(line_no, line));
            }
            outline = Some(Outline::new(
                parse_int(fields[1], line_no)?,
                parse_int(fields[2], line_no)?,
            ));
        } else if line.starts_with("NumBlocks:") {
            if fields.len() != 2 {
                return Err(malformed(line_no, line));
            }
            declared_blocks = Some(parse_int(fields[1], line_no)? as usize);
        } else if line.starts_with("NumTerminals:") {
            if fields.len() != 2 {
                return Err(malformed(line_no, line));
            }
            declared_terminals = Some(parse_int(fields[1], line_no)? as usize);
        } else if fields.len() == 4 && fields[1] == "terminal" {
            terminals.push(Terminal::new(
                fields[0],
                parse_int(fields[2], line_no)?,
                parse_int(fields[3], line_no)?,
            ));
        } else if fields.len() == 3 {
            blocks.push(Block::new(
                fields[0],
                parse_int(fields[1], line_no)?,
                parse_int(fields[2], line_no)?,
            ));
        } else {
            return Err(malformed(line_no, line));
        }
    }

    let outline = outline.ok_or(ParseError::MissingOutline)?;

    if let Some(n) = declared_blocks {
        if n != blocks.len() {
            sink.emit(Diagnostic::warning(format!(
                "NumBlocks declares {n} but {} blocks were found",
                blocks.len()
            )));
        }
    }
    if let Some(n) = declared_terminals {
        if n != terminals.len() {
            sink.emit(Diagnostic::warning(format!(
                "NumTerminals declares {n} but {} terminals were found",
                terminals.len()
            )));
        }
    }

    let mut design = Design::new(outline);
    for block in blocks {
        design.add_block(block);
    }
    for terminal in terminals {
        design.add_terminal(terminal);
    }
    Ok(design)
}

fn parse_int(token: &str, line: usize) -> Result<i64, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

fn malformed(line: usize, text: &str) -> ParseError {
    ParseError::MalformedLine {
        line,
        text: text.to_string(),
    }
}
