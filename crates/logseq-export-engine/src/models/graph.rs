use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use log::debug;

use crate::models::{
    GraphError,
    asset::Asset,
    block::{Block, BlockIdx},
    link::{Link, LinkType},
    page::{Page, PageKind},
};

/// Where a block lives: the owning page's key and its index in that page's tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLocation {
    pub page_key: String,
    pub index: BlockIdx,
}

/// The whole parsed corpus: pages, assets and a flat block index.
///
/// Pages are keyed by lowercase name and assets by their path inside the
/// assets folder. BTreeMap keeps iteration order stable across runs.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    graph_dir: PathBuf,
    pages: BTreeMap<String, Page>,
    assets: BTreeMap<String, Asset>,
    blocks: BTreeMap<String, BlockLocation>,
    hoisted_namespaces: BTreeSet<String>,
}

impl Graph {
    pub fn new(graph_dir: impl Into<PathBuf>) -> Self {
        Self {
            graph_dir: graph_dir.into(),
            ..Self::default()
        }
    }

    pub fn graph_dir(&self) -> &Path {
        &self.graph_dir
    }

    /// Adds a page, replacing any placeholder named like the page or one of
    /// its aliases.
    ///
    /// Every tag the page uses, as a `tags::` property or an inline tag, gets
    /// a public placeholder page unless a page of that name already exists.
    pub fn add_page(&mut self, page: Page) -> Result<(), GraphError> {
        let key = page.key();
        if let Some(existing) = self.pages.get(&key)
            && !existing.is_placeholder()
        {
            return Err(GraphError::DuplicatePage(page.name.clone()));
        }
        self.check_block_ids(&key, &page)?;

        self.remove_placeholder(&key);
        for alias in page.aliases() {
            self.remove_placeholder(&alias.to_lowercase());
        }

        debug!("Adding page: {}", page.name);
        self.index_blocks(&key, &page);
        if page.requests_hoisted_namespace() {
            self.hoisted_namespaces.insert(key.clone());
        }
        let tags = tag_names(&page);
        self.pages.insert(key, page);

        for tag in tags {
            self.ensure_placeholder(&tag);
        }
        Ok(())
    }

    pub fn add_asset(&mut self, asset: Asset) -> Result<(), GraphError> {
        let key = asset.key().to_string();
        if self.assets.contains_key(&key) {
            return Err(GraphError::DuplicateAsset(key));
        }
        debug!("Adding asset: {key}");
        self.assets.insert(key, asset);
        Ok(())
    }

    fn check_block_ids(&self, key: &str, page: &Page) -> Result<(), GraphError> {
        let mut seen = HashSet::new();
        for block in page.all_blocks() {
            if !seen.insert(block.id.as_str()) {
                return Err(GraphError::DuplicateBlock {
                    id: block.id.clone(),
                    page: page.name.clone(),
                    existing: page.name.clone(),
                });
            }
            if let Some(location) = self.blocks.get(&block.id)
                && location.page_key != key
            {
                return Err(GraphError::DuplicateBlock {
                    id: block.id.clone(),
                    page: page.name.clone(),
                    existing: self.page_name_for_key(&location.page_key),
                });
            }
        }
        Ok(())
    }

    fn page_name_for_key(&self, key: &str) -> String {
        self.pages
            .get(key)
            .map_or_else(|| key.to_string(), |p| p.name.clone())
    }

    fn index_blocks(&mut self, key: &str, page: &Page) {
        for &index in page.block_indices() {
            if let Some(block) = page.block(index) {
                self.blocks.insert(
                    block.id.clone(),
                    BlockLocation {
                        page_key: key.to_string(),
                        index,
                    },
                );
            }
        }
    }

    fn remove_placeholder(&mut self, key: &str) {
        if !self.pages.get(key).is_some_and(Page::is_placeholder) {
            return;
        }
        if let Some(replaced) = self.pages.remove(key) {
            debug!("Replacing placeholder page: {}", replaced.name);
            self.blocks.retain(|_, location| location.page_key != key);
        }
    }

    fn ensure_placeholder(&mut self, name: &str) {
        if self.find_page(name).is_ok() {
            return;
        }
        let key = name.to_lowercase();
        debug!("Adding placeholder page for tag: {name}");
        let placeholder = Page::placeholder(name);
        self.index_blocks(&key, &placeholder);
        self.pages.insert(key, placeholder);
    }

    /// Looks a page up by name, then by alias. Both are case-insensitive.
    pub fn find_page(&self, name: &str) -> Result<&Page, GraphError> {
        if let Some(page) = self.pages.get(&name.to_lowercase()) {
            return Ok(page);
        }
        let wanted = name.to_lowercase();
        self.pages
            .values()
            .find(|page| page.aliases().iter().any(|a| a.to_lowercase() == wanted))
            .ok_or_else(|| GraphError::PageNotFound(name.to_string()))
    }

    pub fn find_asset(&self, path: &str) -> Result<&Asset, GraphError> {
        self.assets
            .get(path)
            .ok_or_else(|| GraphError::AssetNotFound(path.to_string()))
    }

    pub fn find_block(&self, id: &str) -> Option<&Block> {
        let location = self.blocks.get(id)?;
        self.pages.get(&location.page_key)?.block(location.index)
    }

    /// The page that holds block `id`.
    pub fn block_page(&self, id: &str) -> Option<&Page> {
        let location = self.blocks.get(id)?;
        self.pages.get(&location.page_key)
    }

    pub fn block_location(&self, id: &str) -> Option<&BlockLocation> {
        self.blocks.get(id)
    }

    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    pub fn assets(&self) -> impl Iterator<Item = &Asset> {
        self.assets.values()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.assets.is_empty()
    }

    /// Every link in the graph, page by page in key order.
    pub fn links(&self) -> Vec<Link> {
        self.pages.values().flat_map(Page::links).collect()
    }

    pub fn links_of_type(&self, link_type: LinkType) -> Vec<Link> {
        self.pages
            .values()
            .flat_map(|page| page.links_of_type(link_type))
            .collect()
    }

    fn links_to(&self, page: &Page, link_type: LinkType) -> Vec<Link> {
        let mut names = page.aliases();
        names.push(page.name.clone());
        self.links_of_type(link_type)
            .into_iter()
            .filter(|link| names.iter().any(|name| link.targets_page(name)))
            .collect()
    }

    /// `[[page]]` references to `page` or any of its aliases.
    pub fn find_links_to_page(&self, page: &Page) -> Vec<Link> {
        debug!("Finding links in graph to: {}", page.name);
        self.links_to(page, LinkType::Page)
    }

    /// `#tag` references to `page` or any of its aliases.
    pub fn find_tag_links_to_page(&self, page: &Page) -> Vec<Link> {
        debug!("Finding tag links in graph to: {}", page.name);
        self.links_to(page, LinkType::Tag)
    }

    /// All page and tag references to `page`, page links first.
    pub fn backlinks(&self, page: &Page) -> Vec<Link> {
        let mut links = self.find_links_to_page(page);
        links.extend(self.find_tag_links_to_page(page));
        links
    }

    /// Lowercase name prefixes whose pages asked for their namespace to be hoisted.
    pub fn hoisted_namespaces(&self) -> impl Iterator<Item = &str> {
        self.hoisted_namespaces.iter().map(String::as_str)
    }

    /// True if the page is a hoisted namespace or lives under one.
    pub fn page_is_hoisted(&self, page: &Page) -> bool {
        let key = page.key();
        self.hoisted_namespaces.iter().any(|prefix| {
            key == *prefix
                || key
                    .strip_prefix(prefix.as_str())
                    .is_some_and(|rest| rest.starts_with(Page::NAMESPACE_SEPARATOR))
        })
    }

    /// Pages whose names sit below `name/`, at any depth.
    pub fn pages_in_namespace(&self, name: &str) -> Vec<&Page> {
        let prefix = format!("{}{}", name.to_lowercase(), Page::NAMESPACE_SEPARATOR);
        self.pages
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .map(|(_, page)| page)
            .collect()
    }

    /// Marks every page that has pages in its namespace as a section.
    pub fn put_pages_in_context(&mut self) {
        let sections: Vec<String> = self
            .pages
            .keys()
            .filter(|key| !self.pages_in_namespace(key).is_empty())
            .cloned()
            .collect();

        for page in self.pages.values_mut() {
            page.kind = PageKind::Page;
        }
        for key in sections {
            if let Some(page) = self.pages.get_mut(&key) {
                page.kind = PageKind::Section;
            }
        }
    }

    pub(crate) fn hoisted_namespaces_mut(&mut self) -> &mut BTreeSet<String> {
        &mut self.hoisted_namespaces
    }
}

/// Tag names declared by a page's `tags::` properties and inline `#tags`.
fn tag_names(page: &Page) -> Vec<String> {
    let mut names: Vec<String> = page.all_blocks().flat_map(Block::tags).collect();
    names.extend(page.tag_links().into_iter().map(|link| link.link_path));
    names
}
