pub struct MarkdownLink;

impl MarkdownLink {
    pub const BANG: u8 = b'!';
    pub const LABEL_OPEN: u8 = b'[';
    pub const LABEL_CLOSE: u8 = b']';
    pub const URL_OPEN: u8 = b'(';
    pub const URL_CLOSE: u8 = b')';
    /// Links into the graph's asset folder are written relative to `pages/`.
    pub const ASSET_PREFIX: &'static str = "../assets/";

    /// Splits an asset url into the path inside the assets folder.
    pub fn asset_path(url: &str) -> Option<&str> {
        url.strip_prefix(Self::ASSET_PREFIX)
            .filter(|path| !path.is_empty())
    }
}
