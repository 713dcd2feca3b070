pub struct BlockRef;

impl BlockRef {
    pub const OPEN: &'static [u8; 2] = b"((";
    pub const CLOSE: &'static [u8; 2] = b"))";
}
