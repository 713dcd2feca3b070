use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use glob::Pattern;
use log::{debug, info, warn};
use regex::Regex;
use relative_path::RelativePathBuf;
use tokio::task::JoinSet;

use crate::models::{Asset, Graph, GraphError, Page};
use crate::parsing::ParseError;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Invalid graph directory: {0}")]
    InvalidGraphDir(PathBuf),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("Failed to list files: {0}")]
    Glob(#[from] glob::GlobError),
    #[error("Invalid page file name {path}: {reason}")]
    InvalidPageName { path: PathBuf, reason: String },
    #[error("Failed to parse {path}: {source}")]
    Parse { path: PathBuf, source: ParseError },
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("Page loading task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Loader settings that come from the tool's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Page file names to skip, e.g. Logseq's `Templates.md`.
    pub ignored_files: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            ignored_files: vec!["Templates.md".to_string()],
        }
    }
}

pub const ASSETS_DIR: &str = "assets";
pub const PAGES_DIR: &str = "pages";
pub const JOURNALS_DIR: &str = "journals";
const NAMESPACE_TOKEN: &str = "___";
const PAGE_EXTENSION: &str = ".md";

fn journal_file_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}_\d{2}_\d{2}$").expect("Invalid journal file regex"))
}

/// Turns a page file name into the page name it encodes.
///
/// `___` stands for the namespace separator `/`. Journal files named
/// `YYYY_MM_DD` become `YYYY-MM-DD`; every other name is percent-decoded.
pub fn page_name_from_file(file_name: &str) -> Result<String, String> {
    let stem = file_name.strip_suffix(PAGE_EXTENSION).unwrap_or(file_name);
    let name = stem.replace(NAMESPACE_TOKEN, "/");

    if journal_file_regex().is_match(&name) {
        return Ok(name.replace('_', "-"));
    }
    urlencoding::decode(&name)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| e.to_string())
}

/// Loads a graph with the default options.
pub async fn load_graph(root: &Path) -> Result<Graph, LoadError> {
    load_graph_with(root, &LoadOptions::default()).await
}

/// Loads every asset, page and journal under `root`.
///
/// Page files are read and parsed concurrently. Nothing is added to the graph
/// until every parse has finished, and pages are then added in path order so
/// the result does not depend on which task finished first. Any failure
/// aborts the whole load.
pub async fn load_graph_with(root: &Path, options: &LoadOptions) -> Result<Graph, LoadError> {
    if !root.is_dir() {
        return Err(LoadError::InvalidGraphDir(root.to_path_buf()));
    }
    info!("Loading Logseq graph from {}", root.display());

    let mut graph = Graph::new(root);
    load_assets(&mut graph, root)?;

    let mut files = vec![];
    for section in [PAGES_DIR, JOURNALS_DIR] {
        for path in list_files(&root.join(section), "*.md")? {
            let ignored = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| options.ignored_files.iter().any(|i| i == n));
            if ignored {
                warn!("Skipping ignored page file: {}", path.display());
                continue;
            }
            files.push(path);
        }
    }
    info!("Found {} page files", files.len());

    let mut tasks = JoinSet::new();
    for (order, path) in files.into_iter().enumerate() {
        let root = root.to_path_buf();
        tasks.spawn(async move { (order, load_page(&root, &path).await) });
    }

    let mut loaded: Vec<Option<Result<Page, LoadError>>> = Vec::new();
    loaded.resize_with(tasks.len(), || None);
    let mut join_error = None;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((order, result)) => loaded[order] = Some(result),
            Err(e) => join_error = join_error.or(Some(e)),
        }
    }
    if let Some(e) = join_error {
        return Err(LoadError::Task(e));
    }

    let pages = loaded
        .into_iter()
        .flatten()
        .collect::<Result<Vec<Page>, LoadError>>()?;
    for page in pages {
        graph.add_page(page)?;
    }
    graph.put_pages_in_context();

    info!(
        "Loaded {} pages, {} blocks and {} assets",
        graph.page_count(),
        graph.block_count(),
        graph.asset_count()
    );
    Ok(graph)
}

/// Reads and parses a single page file.
pub async fn load_page(root: &Path, path: &Path) -> Result<Page, LoadError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoadError::InvalidPageName {
            path: path.to_path_buf(),
            reason: "file name is not valid UTF-8".to_string(),
        })?;
    let name = page_name_from_file(file_name).map_err(|reason| LoadError::InvalidPageName {
        path: path.to_path_buf(),
        reason,
    })?;
    let path_in_graph = relative_to(root, path)?;

    debug!("Loading page {name} from {}", path.display());
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    Page::parse(name, path_in_graph, &text).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn load_assets(graph: &mut Graph, root: &Path) -> Result<(), LoadError> {
    let assets_dir = root.join(ASSETS_DIR);
    info!("Assets directory: {}", assets_dir.display());

    for path in list_files(&assets_dir, "*.*")? {
        if !path.is_file() {
            continue;
        }
        graph.add_asset(Asset::new(relative_to(&assets_dir, &path)?))?;
    }
    Ok(())
}

/// Files in `dir` matching `pattern`, sorted. A missing directory is empty.
fn list_files(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, LoadError> {
    if !dir.is_dir() {
        debug!("No directory at {}", dir.display());
        return Ok(vec![]);
    }
    let escaped = Pattern::escape(&dir.to_string_lossy());
    let full = format!("{escaped}/{pattern}");

    let mut files = glob::glob(&full)?.collect::<Result<Vec<_>, _>>()?;
    files.sort();
    Ok(files)
}

fn relative_to(base: &Path, path: &Path) -> Result<RelativePathBuf, LoadError> {
    let invalid = |reason: &str| LoadError::InvalidPageName {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };
    let rel = path
        .strip_prefix(base)
        .map_err(|_| invalid("file is outside the graph directory"))?;
    RelativePathBuf::from_path(rel).map_err(|_| invalid("path cannot be made relative"))
}
