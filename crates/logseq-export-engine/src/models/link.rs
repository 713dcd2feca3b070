use serde::Serialize;

use crate::parsing::inline::{InlineLink, InlineLinkKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Page,
    Tag,
    Block,
    Asset,
    Resource,
}

impl From<InlineLinkKind> for LinkType {
    fn from(kind: InlineLinkKind) -> Self {
        match kind {
            InlineLinkKind::Page => Self::Page,
            InlineLinkKind::Tag => Self::Tag,
            InlineLinkKind::Block => Self::Block,
            InlineLinkKind::Asset => Self::Asset,
            InlineLinkKind::Resource => Self::Resource,
        }
    }
}

/// A reference from one block to a page, tag, block, asset or url.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub raw: String,
    /// Id of the block containing the link. Set when the link is added.
    pub links_from: String,
    pub link_path: String,
    pub link_type: LinkType,
    pub is_embed: bool,
    pub label: String,
}

impl Link {
    pub fn new(link_type: LinkType, path: impl Into<String>, label: impl Into<String>) -> Self {
        let link_path = path.into();
        Self {
            raw: link_path.clone(),
            links_from: String::new(),
            link_path,
            link_type,
            is_embed: false,
            label: label.into(),
        }
    }

    pub fn embedded(mut self) -> Self {
        self.is_embed = true;
        self
    }

    /// Key used for per-block de-duplication.
    pub fn path_key(&self) -> String {
        self.link_path.to_lowercase()
    }

    /// True for page and tag links naming `name` (case-insensitive).
    pub fn targets_page(&self, name: &str) -> bool {
        matches!(self.link_type, LinkType::Page | LinkType::Tag)
            && self.link_path.to_lowercase() == name.to_lowercase()
    }
}

impl From<InlineLink> for Link {
    fn from(found: InlineLink) -> Self {
        Self {
            raw: found.raw,
            links_from: String::new(),
            link_path: found.target,
            link_type: found.kind.into(),
            is_embed: found.embed,
            label: found.label,
        }
    }
}
