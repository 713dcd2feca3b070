/// Outline bullet syntax as written by Logseq.
///
/// Every block starts on a line beginning with `- ` and any further lines of
/// the same block are prefixed with two spaces. A line consisting of a lone
/// `-` is an empty bullet and carries no content.
pub struct Bullet;

/// What a single line contributes to the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole<'a> {
    /// `- text`: starts a new block whose first line is `text`.
    Open(&'a str),
    /// `  text`: continues the current block.
    Continue(&'a str),
    /// A lone `-`.
    Empty,
    /// Anything else; appended verbatim to the current group.
    Plain(&'a str),
}

impl Bullet {
    pub const OPEN: &'static str = "- ";
    pub const CONTINUATION: &'static str = "  ";
    pub const EMPTY: &'static str = "-";

    pub fn classify(content: &str) -> LineRole<'_> {
        if content == Self::EMPTY {
            LineRole::Empty
        } else if let Some(rest) = content.strip_prefix(Self::OPEN) {
            LineRole::Open(rest)
        } else if let Some(rest) = content.strip_prefix(Self::CONTINUATION) {
            LineRole::Continue(rest)
        } else {
            LineRole::Plain(content)
        }
    }
}
