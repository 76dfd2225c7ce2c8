//! Line-oriented unit extraction.
//!
//! Classifies each line of a source file by byte-prefix and whole-line
//! checks only. Single-line imports, indented package clauses and nested
//! import blocks are deliberately not recognized.

use crate::domain::{Dialect, Unit};

/// Where the extractor currently is within a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineState {
    #[default]
    Normal,
    InsideDependencyBlock,
}

pub struct UnitExtractor<'a> {
    dialect: &'a Dialect,
}

impl<'a> UnitExtractor<'a> {
    pub fn new(dialect: &'a Dialect) -> Self {
        Self { dialect }
    }

    pub fn extract(&self, content: &[u8]) -> Unit {
        let mut unit = Unit::default();
        let mut state = LineState::Normal;

        for line in split_lines(content) {
            state = self.step(state, line, &mut unit);
        }

        unit
    }

    fn step(&self, state: LineState, line: &[u8], unit: &mut Unit) -> LineState {
        // Package clauses are consumed in either state; only the first one names the unit.
        if let Some(rest) = line.strip_prefix(self.dialect.package_prefix.as_bytes()) {
            if unit.module_name.is_empty() {
                unit.module_name = trim_line(rest).to_vec();
            }
            return state;
        }

        match state {
            LineState::Normal if line == self.dialect.block_opener.as_bytes() => {
                LineState::InsideDependencyBlock
            }
            LineState::Normal => {
                unit.body.push(line.to_vec());
                LineState::Normal
            }
            LineState::InsideDependencyBlock if line == self.dialect.block_closer.as_bytes() => {
                LineState::Normal
            }
            LineState::InsideDependencyBlock => {
                unit.dependencies.push(trim_line(line).to_vec());
                LineState::InsideDependencyBlock
            }
        }
    }
}

/// Split on `\n`, dropping one trailing `\r` from each line.
///
/// A final terminator does not produce an extra empty line.
pub fn split_lines(content: &[u8]) -> impl Iterator<Item = &[u8]> {
    content.split_inclusive(|&b| b == b'\n').map(|line| {
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        line.strip_suffix(b"\r").unwrap_or(line)
    })
}

/// Trim surrounding whitespace; Unicode-aware for valid UTF-8, ASCII otherwise.
pub fn trim_line(line: &[u8]) -> &[u8] {
    match std::str::from_utf8(line) {
        Ok(text) => text.trim().as_bytes(),
        Err(_) => line.trim_ascii(),
    }
}
