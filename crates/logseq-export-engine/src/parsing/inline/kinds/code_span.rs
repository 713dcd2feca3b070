/// Backtick code span. Nothing inside one is treated as a reference.
pub struct CodeSpan;

impl CodeSpan {
    pub const TICK: u8 = b'`';
}
