pub mod blocks;
pub mod inline;
pub mod lines;

use thiserror::Error;

use blocks::{Outline, assemble};
use lines::page_lines;

/// Structural errors in a page file. Any of these aborts the page.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("mismatched indent on line {line}: expected {expected}, found {found}")]
    MismatchedIndent {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("no block to continue on line {line}: {content:?}")]
    OrphanContinuation { line: usize, content: String },
    #[error("callout mismatch: #+BEGIN_{open} closed by #+END_{close}")]
    CalloutMismatch { open: String, close: String },
}

/// Tokenizes and assembles a whole page file.
pub fn parse_outline(text: &str) -> Result<Outline, ParseError> {
    assemble(&page_lines(text))
}
