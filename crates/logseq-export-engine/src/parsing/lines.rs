/// One physical line of a page file with its leading tabs measured.
///
/// Logseq writes nesting as tab characters in front of the bullet marker, so
/// `indent` is the number of leading tabs and `content` is everything after
/// them (spaces are never treated as indentation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLine {
    pub indent: usize,
    pub content: String,
}

impl PageLine {
    pub const TAB: char = '\t';

    /// Splits a raw line into its tab indent and remaining content.
    pub fn tokenize(line: &str) -> Self {
        let content = line.trim_start_matches(Self::TAB);
        Self {
            indent: line.len() - content.len(),
            content: content.to_string(),
        }
    }
}

/// Tokenizes every line of `text`.
///
/// Windows line endings are tolerated: a trailing `\r` is dropped from each
/// line so that `- foo\r\n` behaves exactly like `- foo\n`.
pub fn page_lines(text: &str) -> Vec<PageLine> {
    text.lines().map(PageLine::tokenize).collect()
}
