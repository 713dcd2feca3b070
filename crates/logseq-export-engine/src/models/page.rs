use std::sync::OnceLock;

use log::warn;
use regex::Regex;
use relative_path::{RelativePath, RelativePathBuf};
use serde::Serialize;

use crate::models::{
    block::{Block, BlockIdx, BlockTree},
    link::{Link, LinkType},
    property::{Property, PropertyMap},
};
use crate::parsing::{ParseError, blocks::Outline, parse_outline};

fn journal_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{4})[/-](\d{2})[/-](\d{2})$").expect("Invalid journal date regex")
    })
}

/// Whether a page stands alone or is the section index of a namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    #[default]
    Page,
    Section,
}

/// A page of the graph: a named tree of blocks.
///
/// The root block holds page properties (the lines before the first bullet)
/// and every top-level bullet is one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub name: String,
    /// Last segment of a namespaced name.
    pub title: String,
    /// `pages` or `journals`, followed by any parent namespace segments.
    pub namespace: String,
    /// Path of the source file relative to the graph root. Empty for placeholders.
    pub path_in_graph: RelativePathBuf,
    pub kind: PageKind,
    tree: BlockTree,
    all_blocks: Vec<BlockIdx>,
}

impl Page {
    pub const NAMESPACE_SEPARATOR: char = '/';
    pub const PAGES: &'static str = "pages";
    pub const JOURNALS: &'static str = "journals";
    pub const ALIAS: &'static str = "alias";
    pub const HOIST_NAMESPACE: &'static str = "hoist-namespace";
    pub const DATE: &'static str = "date";

    /// A page with an empty root block.
    pub fn new(name: impl Into<String>, path_in_graph: impl AsRef<RelativePath>) -> Self {
        let name = name.into();
        let root = Block::empty(name.clone());
        Self::with_tree(name, path_in_graph.as_ref().to_relative_path_buf(), BlockTree::new(root))
    }

    /// A stand-in for a page that is referenced but has no file.
    ///
    /// Placeholders are public so that references to them survive projection.
    pub fn placeholder(name: impl Into<String>) -> Self {
        let mut page = Self::new(name, "");
        page.tree
            .root_mut()
            .properties
            .set(Property::new(Block::PUBLIC, "true"));
        page
    }

    /// Parses page text into a page.
    pub fn parse(
        name: impl Into<String>,
        path_in_graph: impl AsRef<RelativePath>,
        text: &str,
    ) -> Result<Self, ParseError> {
        let outline = parse_outline(text)?;
        Self::from_outline(name, path_in_graph, &outline)
    }

    /// Builds the block tree from an assembled outline.
    pub fn from_outline(
        name: impl Into<String>,
        path_in_graph: impl AsRef<RelativePath>,
        outline: &Outline,
    ) -> Result<Self, ParseError> {
        let name = name.into();
        if outline.is_empty() {
            warn!("No blocks found in page: {name}");
        }

        let root = Block::new(name.clone(), &outline.preamble, 0)?;
        let mut tree = BlockTree::new(root);

        // (outline node, parent in tree), pushed in reverse to keep sibling order
        let mut pending: Vec<(usize, BlockIdx)> = outline
            .roots
            .iter()
            .rev()
            .map(|&node| (node, BlockTree::ROOT))
            .collect();
        while let Some((node, parent)) = pending.pop() {
            let source = outline.node(node);
            let block = Block::new(name.clone(), &source.lines, source.depth + 1)?;
            let Some(idx) = tree.add_child(parent, block) else {
                continue;
            };
            pending.extend(source.children.iter().rev().map(|&child| (child, idx)));
        }

        Ok(Self::with_tree(
            name,
            path_in_graph.as_ref().to_relative_path_buf(),
            tree,
        ))
    }

    fn with_tree(name: String, path_in_graph: RelativePathBuf, tree: BlockTree) -> Self {
        let (title, namespace) = split_name(&name);
        let all_blocks = tree.preorder();
        Self {
            name,
            title,
            namespace,
            path_in_graph,
            kind: PageKind::Page,
            tree,
            all_blocks,
        }
    }

    /// Lowercase name, the page's identity within a graph.
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn root(&self) -> &Block {
        self.tree.root()
    }

    pub fn tree(&self) -> &BlockTree {
        &self.tree
    }

    /// Replaces the block tree and recomputes the pre-order block list.
    pub fn set_root(&mut self, tree: BlockTree) {
        self.all_blocks = tree.preorder();
        self.tree = tree;
    }

    /// Every block in pre-order, starting with the root.
    pub fn all_blocks(&self) -> impl Iterator<Item = &Block> {
        self.all_blocks.iter().filter_map(|&idx| self.tree.get(idx))
    }

    pub fn block_indices(&self) -> &[BlockIdx] {
        &self.all_blocks
    }

    pub fn block(&self, idx: BlockIdx) -> Option<&Block> {
        self.tree.get(idx)
    }

    pub fn find_block(&self, id: &str) -> Option<&Block> {
        self.tree.position(id).and_then(|idx| self.tree.get(idx))
    }

    pub fn is_block_public(&self, idx: BlockIdx) -> bool {
        self.tree.is_public(idx)
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.root().properties
    }

    pub fn aliases(&self) -> Vec<String> {
        self.properties().list(Self::ALIAS)
    }

    pub fn tags(&self) -> Vec<String> {
        self.root().tags()
    }

    /// True when `name` is this page's name or one of its aliases.
    pub fn answers_to(&self, name: &str) -> bool {
        let wanted = name.to_lowercase();
        self.name.to_lowercase() == wanted
            || self.aliases().iter().any(|a| a.to_lowercase() == wanted)
    }

    pub fn is_placeholder(&self) -> bool {
        self.path_in_graph.as_str().is_empty()
    }

    pub fn is_public(&self) -> bool {
        self.tree.is_public(BlockTree::ROOT)
    }

    pub fn requests_hoisted_namespace(&self) -> bool {
        self.properties()
            .bool(Self::HOIST_NAMESPACE)
            .unwrap_or(false)
    }

    pub fn is_journal(&self) -> bool {
        journal_regex().is_match(&self.name)
    }

    /// The `date` property, else the journal date as `YYYY-MM-DD`.
    pub fn date(&self) -> Option<String> {
        if let Some(date) = self.properties().get(Self::DATE) {
            return Some(date.as_str().to_string());
        }
        let caps = journal_regex().captures(&self.name)?;
        Some(format!("{}-{}-{}", &caps[1], &caps[2], &caps[3]))
    }

    /// Path of the banner image inside the assets folder, if any.
    pub fn banner(&self) -> Option<String> {
        self.root()
            .links()
            .into_iter()
            .find(|l| l.link_type == LinkType::Asset && l.raw.is_empty())
            .map(|l| l.link_path)
    }

    /// Every link in the page, in block pre-order.
    pub fn links(&self) -> Vec<Link> {
        self.all_blocks().flat_map(Block::links).collect()
    }

    pub fn links_of_type(&self, link_type: LinkType) -> Vec<Link> {
        self.all_blocks()
            .flat_map(Block::links)
            .filter(|l| l.link_type == link_type)
            .collect()
    }

    pub fn page_links(&self) -> Vec<Link> {
        self.links_of_type(LinkType::Page)
    }

    pub fn tag_links(&self) -> Vec<Link> {
        self.links_of_type(LinkType::Tag)
    }

    pub fn asset_links(&self) -> Vec<Link> {
        self.links_of_type(LinkType::Asset)
    }

    pub fn resource_links(&self) -> Vec<Link> {
        self.links_of_type(LinkType::Resource)
    }

    pub fn block_links(&self) -> Vec<Link> {
        self.links_of_type(LinkType::Block)
    }
}

/// Splits `a/b/c` into title `c` and namespace `pages/a/b` (or `journals/...`).
fn split_name(name: &str) -> (String, String) {
    let base = if journal_regex().is_match(name) {
        Page::JOURNALS
    } else {
        Page::PAGES
    };
    match name.rsplit_once(Page::NAMESPACE_SEPARATOR) {
        Some((parents, title)) if !journal_regex().is_match(name) => {
            (title.to_string(), format!("{base}/{parents}"))
        }
        _ => (name.to_string(), base.to_string()),
    }
}
