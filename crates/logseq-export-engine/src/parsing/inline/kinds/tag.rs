/// `#tag` syntax.
///
/// A tag starts with an ASCII letter, continues with ASCII word characters,
/// `/` or `-`, and must be at least two characters long. Trailing `/` and `-` are
/// not part of the name. The `#` must open the text or follow whitespace.
pub struct Tag;

impl Tag {
    pub const HASH: u8 = b'#';

    pub fn is_name_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_' || c == '/' || c == '-'
    }

    /// Length in bytes of the tag name at the start of `s`, if any.
    pub fn name_len(s: &str) -> Option<usize> {
        if !s.chars().next()?.is_ascii_alphabetic() {
            return None;
        }
        let end = s
            .char_indices()
            .find(|&(_, c)| !Self::is_name_char(c))
            .map_or(s.len(), |(i, _)| i);
        let name = s[..end].trim_end_matches(['/', '-']);
        (name.chars().count() >= 2).then_some(name.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("foo", Some(3))]
    #[case("foo bar", Some(3))]
    #[case("foo/bar baz", Some(7))]
    #[case("foo-", Some(3))]
    #[case("foo/-.", Some(3))]
    #[case("a-b", Some(3))]
    #[case("a", None)]
    #[case("a-", None)]
    #[case("1abc", None)]
    #[case("", None)]
    #[case("café!", Some(3))]
    #[case("naïve", Some(2))]
    fn tag_name_len(#[case] input: &str, #[case] expected: Option<usize>) {
        assert_eq!(Tag::name_len(input), expected);
    }
}
