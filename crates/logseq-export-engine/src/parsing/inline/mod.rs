//! # Inline References
//!
//! Cursor-based scanning of block text for the five reference forms Logseq
//! uses: page refs, tags, block refs, asset links and external resources.
//!
//! - **`types`**: `InlineLink` and `InlineLinkKind`
//! - **`kinds`**: delimiter-owning types (`PageRef`, `Tag`, `BlockRef`, ...)
//! - **`cursor`**: `Cursor` for byte-wise scanning
//! - **`parser`**: `parse_links()` with `try_parse_*` helpers
//!
//! Code spans are raw zones: nothing inside backticks is a reference.

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::parse_links;
pub use types::{InlineLink, InlineLinkKind};
