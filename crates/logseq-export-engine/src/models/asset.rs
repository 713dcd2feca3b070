use relative_path::{RelativePath, RelativePathBuf};
use serde::Serialize;

/// A file in the graph's `assets/` folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    /// File name, e.g. `diagram.png`.
    pub name: String,
    /// Path relative to the assets folder, as written in asset links.
    pub path_in_graph: RelativePathBuf,
}

impl Asset {
    pub fn new(path_in_graph: impl AsRef<RelativePath>) -> Self {
        let path_in_graph = path_in_graph.as_ref().normalize();
        let name = path_in_graph
            .file_name()
            .unwrap_or(path_in_graph.as_str())
            .to_string();
        Self {
            name,
            path_in_graph,
        }
    }

    /// Asset lookups use the path exactly as written.
    pub fn key(&self) -> &str {
        self.path_in_graph.as_str()
    }
}
