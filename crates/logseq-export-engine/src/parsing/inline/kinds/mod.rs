//! # Inline Kinds
//!
//! Types that own the delimiters of each Logseq reference form.
//!
//! - **`CodeSpan`**: `` ` `` raw zone that suppresses reference parsing
//! - **`PageRef`**: `[[Name]]`
//! - **`BlockRef`**: `((uuid))`
//! - **`Tag`**: `#word` and `#[[Multi Word]]`
//! - **`MarkdownLink`**: `[label](url)` and `![label](url)`, with the
//!   `../assets/` prefix that marks a graph asset
//! - **`Embed`**: `{{embed ...}}` wrapper around a page or block reference
//!
//! The parser calls these constants; it never hardcodes delimiters.

pub mod block_ref;
pub mod code_span;
pub mod embed;
pub mod markdown_link;
pub mod page_ref;
pub mod tag;

pub use block_ref::BlockRef;
pub use code_span::CodeSpan;
pub use embed::Embed;
pub use markdown_link::MarkdownLink;
pub use page_ref::PageRef;
pub use tag::Tag;
