use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// The checked-in sample graph under `tests/fixtures/graph`.
pub fn fixture_graph_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("graph")
}

/// Builds a throwaway graph from `(section, file name, content)` triples.
pub fn create_graph(files: &[(&str, &str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for section in ["pages", "journals", "assets"] {
        fs::create_dir(dir.path().join(section)).unwrap();
    }
    for (section, file_name, content) in files {
        fs::write(dir.path().join(section).join(file_name), content).unwrap();
    }
    dir
}
