use std::collections::BTreeMap;
use std::sync::OnceLock;

use log::{debug, warn};
use pulldown_cmark::{Options, Parser, html};
use regex::{Captures, Regex};

use crate::models::link::Link;
use crate::parsing::{ParseError, inline::parse_links};

fn callout_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)#\+BEGIN_(\S+)\n(.+?)\n#\+END_(\S+)").expect("Invalid callout regex")
    })
}

/// The body of a block: markdown with properties removed, plus the links in it.
///
/// Links are keyed by lowercase path. Adding a second link to the same path
/// is a no-op, so the first occurrence in the text wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockContent {
    block_id: String,
    markdown: String,
    callout: Option<String>,
    links: BTreeMap<String, Link>,
    /// Link keys in insertion order.
    order: Vec<String>,
}

impl BlockContent {
    pub const CODE_FENCE: &'static str = "```";

    pub fn new(block_id: impl Into<String>) -> Self {
        Self {
            block_id: block_id.into(),
            ..Self::default()
        }
    }

    pub fn from_markdown(
        block_id: impl Into<String>,
        markdown: &str,
    ) -> Result<Self, ParseError> {
        let mut content = Self::new(block_id);
        content.set_markdown(markdown)?;
        Ok(content)
    }

    /// Replaces the markdown, unwrapping any `#+BEGIN_X ... #+END_X` callout
    /// and re-extracting links.
    pub fn set_markdown(&mut self, markdown: &str) -> Result<(), ParseError> {
        self.links.clear();
        self.order.clear();
        self.callout = None;

        let re = callout_regex();
        let mut markdown = markdown.to_string();
        for caps in re.captures_iter(&markdown) {
            if caps[1] != caps[3] {
                return Err(ParseError::CalloutMismatch {
                    open: caps[1].to_string(),
                    close: caps[3].to_string(),
                });
            }
        }
        let callout = re.captures(&markdown).map(|caps| caps[1].to_lowercase());
        if let Some(callout) = callout {
            debug!("({}) found callout: {callout}", self.block_id);
            markdown = re
                .replace_all(&markdown, |caps: &Captures<'_>| caps[2].to_string())
                .into_owned();
            self.callout = Some(callout);
        }
        self.markdown = markdown;

        if self.is_code_block() {
            return Ok(());
        }
        for found in parse_links(&self.markdown) {
            self.add_link(Link::from(found));
        }
        Ok(())
    }

    /// Adds `link` unless one with the same path is already present.
    ///
    /// Returns the stored link, or `None` for a duplicate.
    pub fn add_link(&mut self, mut link: Link) -> Option<&Link> {
        let key = link.path_key();
        if self.links.contains_key(&key) {
            warn!(
                "Duplicate link in block {}: {}",
                self.block_id, link.link_path
            );
            return None;
        }

        debug!("Adding link from block {}: {}", self.block_id, link.link_path);
        link.links_from = self.block_id.clone();
        self.order.push(key.clone());
        Some(&*self.links.entry(key).or_insert(link))
    }

    pub fn find_link(&self, path: &str) -> Option<&Link> {
        self.links.get(&path.to_lowercase())
    }

    /// Links in the order they were added.
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.order.iter().filter_map(|key| self.links.get(key))
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_code_block(&self) -> bool {
        self.markdown.contains(Self::CODE_FENCE)
    }

    pub fn block_id(&self) -> &str {
        &self.block_id
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    /// Lowercase callout kind, e.g. `quote` or `note`.
    pub fn callout(&self) -> Option<&str> {
        self.callout.as_deref()
    }

    /// Renders the markdown to HTML with GitHub-flavoured extensions.
    pub fn render_html(&self) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_FOOTNOTES);

        let parser = Parser::new_ext(&self.markdown, options);
        let mut out = String::with_capacity(self.markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}
