use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary graph directory with empty `pages`, `journals` and `assets` folders
pub fn create_test_graph_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for section in ["pages", "journals", "assets"] {
        fs::create_dir(dir.path().join(section)).unwrap();
    }
    dir
}

/// Create a page file in one of the graph's sections
pub fn create_test_page(graph_dir: &TempDir, section: &str, filename: &str, content: &str) -> PathBuf {
    let file_path = graph_dir.path().join(section).join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}

/// Create a small placeholder asset file
pub fn create_test_asset(graph_dir: &TempDir, filename: &str) -> PathBuf {
    let file_path = graph_dir.path().join("assets").join(filename);
    fs::write(&file_path, b"\x89PNG").unwrap();
    file_path
}
