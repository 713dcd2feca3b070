pub mod io;
pub mod models;
pub mod parsing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use io::{LoadError, LoadOptions, load_graph, load_graph_with, load_page, page_name_from_file};
pub use models::{
    Asset, Block, BlockContent, BlockIdx, BlockLocation, BlockTree, Graph, GraphError, Link,
    LinkType, Page, PageKind, Property, PropertyMap,
};
pub use parsing::{ParseError, parse_outline};
