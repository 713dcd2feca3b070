mod common;

use common::{create_graph, fixture_graph_dir};
use logseq_export_engine::{
    Graph, LinkType, LoadError, LoadOptions, PageKind, load_graph, load_graph_with,
};
use pretty_assertions::assert_eq;

const SHARED_BLOCK: &str = "6501e6e0-0000-4000-8000-000000000001";

fn page_names(graph: &Graph) -> Vec<&str> {
    graph.pages().map(|p| p.name.as_str()).collect()
}

fn bodies(graph: &Graph, page: &str) -> Vec<String> {
    graph
        .find_page(page)
        .unwrap()
        .all_blocks()
        .map(|b| b.content.markdown().to_string())
        .collect()
}

#[tokio::test]
async fn fixture_graph_loads_every_page() {
    // Given
    let dir = fixture_graph_dir();

    // When
    let graph = load_graph(&dir).await.unwrap();

    // Then
    assert_eq!(
        page_names(&graph),
        vec![
            "2024-03-09",
            "Cargo",
            "programming",
            "Projects",
            "Projects/Exporter",
            "Rust",
            "secret-topic",
            "tools",
        ]
    );
    assert!(graph.find_page("templates").is_err());
    assert_eq!(graph.asset_count(), 2);

    let journal = graph.find_page("2024-03-09").unwrap();
    assert!(journal.is_journal());
    assert_eq!(journal.path_in_graph.as_str(), "journals/2024_03_09.md");
}

#[tokio::test]
async fn fixture_graph_resolves_names_and_links() {
    let graph = load_graph(&fixture_graph_dir()).await.unwrap();

    let rust = graph.find_page("RUSTLANG").unwrap();
    assert_eq!(rust.name, "Rust");
    assert_eq!(rust.tags(), vec!["programming"]);
    assert!(graph.find_page("tools").unwrap().is_placeholder());

    let backlinks: Vec<String> = graph
        .backlinks(rust)
        .into_iter()
        .map(|l| l.raw)
        .collect();
    assert_eq!(backlinks, vec!["[[Rust]]", "[[Rustlang]]"]);

    assert_eq!(graph.block_page(SHARED_BLOCK).unwrap().name, "Cargo");
    assert_eq!(graph.links_of_type(LinkType::Block).len(), 1);
    assert_eq!(graph.links_of_type(LinkType::Asset)[0].link_path, "diagram.png");
}

#[tokio::test]
async fn fixture_graph_namespaces() {
    let graph = load_graph(&fixture_graph_dir()).await.unwrap();

    let projects = graph.find_page("projects").unwrap();
    assert_eq!(projects.kind, PageKind::Section);
    assert!(graph.page_is_hoisted(graph.find_page("projects/exporter").unwrap()));
    assert_eq!(
        graph
            .pages_in_namespace("Projects")
            .iter()
            .map(|p| p.title.as_str())
            .collect::<Vec<_>>(),
        vec!["Exporter"]
    );
}

#[tokio::test]
async fn fixture_graph_public_projection() {
    // Given
    let graph = load_graph(&fixture_graph_dir()).await.unwrap();

    // When
    let public = graph.public_graph().unwrap();

    // Then
    assert_eq!(
        page_names(&public),
        vec!["Cargo", "programming", "Projects/Exporter", "Rust", "tools"]
    );
    assert_eq!(
        bodies(&public, "rust"),
        vec![
            "",
            "Systems language, built with [[Cargo]]",
            "Tooling lives under #tools",
            "![diagram](../assets/diagram.png)",
        ]
    );
    assert_eq!(
        bodies(&public, "cargo"),
        vec!["", "Shared recipe", "cargo build --release"]
    );
    assert!(public.find_block(SHARED_BLOCK).is_some());
    assert_eq!(public.asset_count(), 1);
    assert!(public.find_asset("diagram.png").is_ok());
    assert_eq!(public.hoisted_namespaces().collect::<Vec<_>>(), vec!["projects"]);

    let rust = public.find_page("rust").unwrap();
    assert_eq!(public.backlinks(rust).len(), 1);
}

#[tokio::test]
async fn loading_twice_gives_the_same_graph() {
    let dir = fixture_graph_dir();

    let first = load_graph(&dir).await.unwrap();
    let second = load_graph(&dir).await.unwrap();

    assert_eq!(page_names(&first), page_names(&second));
    for page in first.pages() {
        assert_eq!(bodies(&first, &page.name), bodies(&second, &page.name));
    }
    assert_eq!(
        first.block_location(SHARED_BLOCK),
        second.block_location(SHARED_BLOCK)
    );
}

#[tokio::test]
async fn ignored_files_come_from_options() {
    let options = LoadOptions {
        ignored_files: vec![],
    };

    let graph = load_graph_with(&fixture_graph_dir(), &options).await.unwrap();

    assert!(graph.find_page("templates").is_ok());
}

#[tokio::test]
async fn duplicate_block_ids_across_pages_abort_load() {
    let dir = create_graph(&[
        ("pages", "A.md", "- one\n  id:: same-id"),
        ("pages", "B.md", "- two\n  id:: same-id"),
    ]);

    let err = load_graph(dir.path()).await.unwrap_err();

    assert!(matches!(err, LoadError::Graph(_)));
}

#[tokio::test]
async fn malformed_outline_reports_the_file() {
    let dir = create_graph(&[
        ("pages", "Good.md", "- fine"),
        ("journals", "2024_01_01.md", "- top\n\t  orphan"),
    ]);

    let err = load_graph(dir.path()).await.unwrap_err();

    match err {
        LoadError::Parse { path, .. } => assert!(path.ends_with("journals/2024_01_01.md")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_graph_loads_empty() {
    let dir = create_graph(&[]);

    let graph = load_graph(dir.path()).await.unwrap();

    assert!(graph.is_empty());
    assert!(graph.public_graph().unwrap().is_empty());
}
