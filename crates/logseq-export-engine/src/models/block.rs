use std::sync::OnceLock;

use regex::Regex;
use uuid::Uuid;

use crate::models::{
    block_content::BlockContent,
    link::{Link, LinkType},
    property::{Property, PropertyMap},
};
use crate::parsing::ParseError;

/// Index of a block inside its page's [`BlockTree`].
pub type BlockIdx = usize;

fn task_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(TODO|DOING|DONE|LATER|NOW|WAITING|CANCELED|CANCELLED)(\s|$)")
            .expect("Invalid task marker regex")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub id: String,
    /// Name of the page holding this block.
    pub page_name: String,
    pub depth: usize,
    pub properties: PropertyMap,
    pub content: BlockContent,
    /// Source lines with bullet markers removed, properties included.
    pub source_lines: Vec<String>,
    parent: Option<BlockIdx>,
    children: Vec<BlockIdx>,
}

impl Block {
    pub const ID: &'static str = "id";
    pub const PUBLIC: &'static str = "public";
    pub const HEADING: &'static str = "heading";
    pub const TAGS: &'static str = "tags";
    pub const BANNER: &'static str = "banner";

    /// A block with a fresh id, no properties and no content.
    pub fn empty(page_name: impl Into<String>) -> Self {
        let id = Uuid::new_v4().to_string();
        Self {
            content: BlockContent::new(id.clone()),
            id,
            page_name: page_name.into(),
            depth: 0,
            properties: PropertyMap::new(),
            source_lines: vec![],
            parent: None,
            children: vec![],
        }
    }

    /// Builds a block from its source lines.
    ///
    /// `name:: value` lines become properties and everything else is the
    /// body. An explicit `id` property is kept as the block id; otherwise a
    /// new one is generated and recorded as the `id` property.
    pub fn new(
        page_name: impl Into<String>,
        lines: &[String],
        depth: usize,
    ) -> Result<Self, ParseError> {
        let mut properties = PropertyMap::new();
        let mut body = Vec::with_capacity(lines.len());
        for line in lines {
            match Property::parse_line(line) {
                Some(property) => {
                    properties.set(property);
                }
                None => body.push(line.as_str()),
            }
        }

        let id = match properties.get(Self::ID) {
            Some(p) if !p.value.trim().is_empty() => p.value.trim().to_string(),
            _ => {
                let id = Uuid::new_v4().to_string();
                properties.set(Property::new(Self::ID, id.clone()));
                id
            }
        };

        Ok(Self {
            content: BlockContent::from_markdown(id.clone(), &body.join("\n"))?,
            id,
            page_name: page_name.into(),
            depth,
            properties,
            source_lines: lines.to_vec(),
            parent: None,
            children: vec![],
        })
    }

    pub fn parent(&self) -> Option<BlockIdx> {
        self.parent
    }

    pub fn children(&self) -> &[BlockIdx] {
        &self.children
    }

    /// This block's own `public` setting, ignoring ancestors.
    pub fn public_setting(&self) -> Option<bool> {
        self.properties.bool(Self::PUBLIC)
    }

    pub fn is_header(&self) -> bool {
        self.properties.bool(Self::HEADING).unwrap_or(false)
    }

    /// True when the body starts with a task marker such as `TODO` or `DONE`.
    pub fn is_task(&self) -> bool {
        task_regex().is_match(self.content.markdown())
    }

    pub fn tags(&self) -> Vec<String> {
        self.properties.list(Self::TAGS)
    }

    pub fn callout(&self) -> Option<&str> {
        self.content.callout()
    }

    pub fn set_property(&mut self, name: &str, value: &str) {
        self.properties.set(Property::new(name, value));
    }

    /// `page#id`, unique across the graph.
    pub fn anchor(&self) -> String {
        format!("{}#{}", self.page_name, self.id)
    }

    /// Links in the body, preceded by a synthetic embedded asset link when a
    /// `banner` property is set.
    pub fn links(&self) -> Vec<Link> {
        let mut links = Vec::with_capacity(self.content.link_count() + 1);
        if let Some(banner) = self.banner_link() {
            links.push(banner);
        }
        links.extend(self.content.links().cloned());
        links
    }

    fn banner_link(&self) -> Option<Link> {
        let banner = self.properties.get(Self::BANNER)?;
        let value = banner.value.trim();
        let file = value.rsplit('/').next().unwrap_or(value);
        if file.is_empty() {
            return None;
        }
        let mut link = Link::new(LinkType::Asset, file, "").embedded();
        link.raw = String::new();
        link.links_from = self.id.clone();
        Some(link)
    }

    /// A copy with no tree position, ready to be added to another tree.
    pub(crate) fn detached(&self) -> Self {
        Self {
            parent: None,
            children: vec![],
            ..self.clone()
        }
    }
}

/// A page's blocks, stored in an arena with the root at a fixed index.
///
/// Depth is maintained by the tree: the root is depth 0 and every child is
/// one deeper than its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockTree {
    blocks: Vec<Block>,
}

impl BlockTree {
    pub const ROOT: BlockIdx = 0;

    pub fn new(mut root: Block) -> Self {
        root.depth = 0;
        root.parent = None;
        root.children.clear();
        Self { blocks: vec![root] }
    }

    pub fn root(&self) -> &Block {
        &self.blocks[Self::ROOT]
    }

    pub fn root_mut(&mut self) -> &mut Block {
        &mut self.blocks[Self::ROOT]
    }

    pub fn get(&self, idx: BlockIdx) -> Option<&Block> {
        self.blocks.get(idx)
    }

    pub fn get_mut(&mut self, idx: BlockIdx) -> Option<&mut Block> {
        self.blocks.get_mut(idx)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Appends `block` as the last child of `parent` and returns its index.
    /// Returns `None` if `parent` is not in the tree.
    pub fn add_child(&mut self, parent: BlockIdx, mut block: Block) -> Option<BlockIdx> {
        let idx = self.blocks.len();
        let parent_block = self.blocks.get_mut(parent)?;
        parent_block.children.push(idx);
        block.depth = parent_block.depth + 1;
        block.parent = Some(parent);
        block.children.clear();
        self.blocks.push(block);
        Some(idx)
    }

    pub fn parent_of(&self, idx: BlockIdx) -> Option<&Block> {
        self.blocks.get(idx)?.parent.and_then(|p| self.blocks.get(p))
    }

    pub fn children_of(&self, idx: BlockIdx) -> impl Iterator<Item = &Block> {
        self.blocks
            .get(idx)
            .map(|b| b.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|&c| self.blocks.get(c))
    }

    /// Indices in pre-order: parents before children, siblings in order.
    pub fn preorder(&self) -> Vec<BlockIdx> {
        let mut out = Vec::with_capacity(self.blocks.len());
        let mut stack = vec![Self::ROOT];
        while let Some(idx) = stack.pop() {
            out.push(idx);
            stack.extend(self.blocks[idx].children.iter().rev());
        }
        out
    }

    pub fn position(&self, id: &str) -> Option<BlockIdx> {
        self.blocks.iter().position(|b| b.id == id)
    }

    /// Visibility cascade: the nearest `public` setting on the block or an
    /// ancestor decides, and a tree with no setting at all is private.
    pub fn is_public(&self, idx: BlockIdx) -> bool {
        let mut current = self.blocks.get(idx);
        while let Some(block) = current {
            if let Some(public) = block.public_setting() {
                return public;
            }
            current = block.parent.and_then(|p| self.blocks.get(p));
        }
        false
    }
}
