pub struct Embed;

impl Embed {
    pub const OPEN: &'static [u8; 8] = b"{{embed ";
    pub const CLOSE: &'static [u8; 2] = b"}}";
}
