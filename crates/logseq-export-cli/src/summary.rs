use logseq_export_engine::{Graph, LinkType, PageKind};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PageSummary {
    pub name: String,
    pub path: String,
    pub kind: PageKind,
    pub journal: bool,
    pub placeholder: bool,
    pub blocks: usize,
    pub links: usize,
    pub backlinks: usize,
}

/// What the CLI reports about a loaded graph.
#[derive(Debug, Serialize)]
pub struct GraphSummary {
    pub graph_dir: String,
    pub public_only: bool,
    pub pages: usize,
    pub journals: usize,
    pub placeholders: usize,
    pub blocks: usize,
    pub assets: usize,
    pub asset_links: usize,
    pub hoisted_namespaces: Vec<String>,
    pub page_list: Vec<PageSummary>,
}

impl GraphSummary {
    pub fn new(graph: &Graph, public_only: bool) -> Self {
        let page_list: Vec<PageSummary> = graph
            .pages()
            .map(|page| PageSummary {
                name: page.name.clone(),
                path: page.path_in_graph.to_string(),
                kind: page.kind,
                journal: page.is_journal(),
                placeholder: page.is_placeholder(),
                blocks: page.all_blocks().count(),
                links: page.links().len(),
                backlinks: graph.backlinks(page).len(),
            })
            .collect();

        Self {
            graph_dir: graph.graph_dir().display().to_string(),
            public_only,
            pages: page_list.len(),
            journals: page_list.iter().filter(|p| p.journal).count(),
            placeholders: page_list.iter().filter(|p| p.placeholder).count(),
            blocks: graph.block_count(),
            assets: graph.asset_count(),
            asset_links: graph.links_of_type(LinkType::Asset).len(),
            hoisted_namespaces: graph.hoisted_namespaces().map(str::to_string).collect(),
            page_list,
        }
    }

    pub fn to_text(&self) -> String {
        let scope = if self.public_only { "public" } else { "full" };
        let mut out = format!(
            "Graph {} ({scope})\n  pages: {} ({} journals, {} placeholders)\n  blocks: {}\n  assets: {} ({} linked)\n",
            self.graph_dir,
            self.pages,
            self.journals,
            self.placeholders,
            self.blocks,
            self.assets,
            self.asset_links,
        );
        if !self.hoisted_namespaces.is_empty() {
            out.push_str(&format!(
                "  hoisted namespaces: {}\n",
                self.hoisted_namespaces.join(", ")
            ));
        }
        for page in &self.page_list {
            let kind = match page.kind {
                PageKind::Page => "page",
                PageKind::Section => "section",
            };
            out.push_str(&format!(
                "  - {} [{kind}] {} blocks, {} links, {} backlinks\n",
                page.name, page.blocks, page.links, page.backlinks
            ));
        }
        out
    }
}
