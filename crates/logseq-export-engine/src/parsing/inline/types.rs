/// Which reference form an [`InlineLink`] was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineLinkKind {
    Page,
    Tag,
    Block,
    Asset,
    Resource,
}

/// A reference found in block text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineLink {
    pub kind: InlineLinkKind,
    /// Page name, tag name, block id, asset path or url.
    pub target: String,
    pub label: String,
    /// The exact source text of the reference.
    pub raw: String,
    pub embed: bool,
}
