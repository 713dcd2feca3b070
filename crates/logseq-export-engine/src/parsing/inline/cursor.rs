/// A byte cursor over one block's text.
///
/// Delimiters are all ASCII, so byte-wise matching never lands inside a
/// multi-byte character and slices taken at delimiter positions are always on
/// char boundaries.
#[derive(Clone)]
pub struct Cursor<'a> {
    pub s: &'a str,
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i..].starts_with(pat)
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.s.as_bytes().get(self.i).copied()?;
        self.i += 1;
        Some(b)
    }

    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Text from the current position to the end. Only valid on a char boundary.
    pub fn rest(&self) -> &'a str {
        &self.s[self.i..]
    }

    /// The character just before the cursor, if any.
    pub fn prev_char(&self) -> Option<char> {
        self.s[..self.i].chars().next_back()
    }

    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.s[start..end]
    }

    /// Advances until `pat` is next, stopping early at a newline.
    ///
    /// Returns true when `pat` was found; the cursor is left on it.
    pub fn seek_on_line(&mut self, pat: &[u8]) -> bool {
        while !self.eof() {
            if self.starts_with(pat) {
                return true;
            }
            if self.peek() == Some(b'\n') {
                return false;
            }
            self.bump();
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello");
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some(b'h'));
        assert_eq!(cur.bump(), Some(b'h'));
        assert_eq!(cur.i, 1);
        assert_eq!(cur.rest(), "ello");
    }

    #[test]
    fn cursor_starts_with() {
        let cur = Cursor::new("[[link]]");
        assert!(cur.starts_with(b"[["));
        assert!(!cur.starts_with(b"]]"));
    }

    #[test]
    fn starts_with_at_eof() {
        let mut cur = Cursor::new("ab");
        cur.bump_n(2);
        assert!(cur.eof());
        assert!(cur.starts_with(b""));
        assert!(!cur.starts_with(b"a"));
    }

    #[test]
    fn bump_at_eof_returns_none() {
        let mut cur = Cursor::new("x");
        assert_eq!(cur.bump(), Some(b'x'));
        assert_eq!(cur.bump(), None);
        assert_eq!(cur.bump(), None);
    }

    #[test]
    fn prev_char_is_multibyte_aware() {
        let mut cur = Cursor::new("é#");
        assert_eq!(cur.prev_char(), None);
        cur.bump_n("é".len());
        assert_eq!(cur.prev_char(), Some('é'));
    }

    #[test]
    fn seek_on_line_stops_at_newline() {
        let mut cur = Cursor::new("abc\n]]");
        assert!(!cur.seek_on_line(b"]]"));
        assert_eq!(cur.peek(), Some(b'\n'));

        let mut cur = Cursor::new("abc]]");
        assert!(cur.seek_on_line(b"]]"));
        assert_eq!(cur.i, 3);
    }
}
