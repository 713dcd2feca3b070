pub mod asset;
pub mod block;
pub mod block_content;
pub mod graph;
pub mod link;
pub mod page;
pub mod projection;
pub mod property;

pub use asset::Asset;
pub use block::{Block, BlockIdx, BlockTree};
pub use block_content::BlockContent;
pub use graph::{BlockLocation, Graph};
pub use link::{Link, LinkType};
pub use page::{Page, PageKind};
pub use property::{Property, PropertyMap, unwrap_page_link};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("Page already exists: {0}")]
    DuplicatePage(String),
    #[error("Asset already exists: {0}")]
    DuplicateAsset(String),
    #[error("Block id {id} in page {page} is already used by page {existing}")]
    DuplicateBlock {
        id: String,
        page: String,
        existing: String,
    },
    #[error("Page not found: {0}")]
    PageNotFound(String),
    #[error("Asset not found: {0}")]
    AssetNotFound(String),
    #[error("Asset not in source graph: {path} (linked from block {block_id})")]
    MissingProjectedAsset { path: String, block_id: String },
}
