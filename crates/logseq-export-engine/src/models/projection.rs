use log::{debug, info};

use crate::models::{
    GraphError,
    block::{Block, BlockIdx, BlockTree},
    block_content::BlockContent,
    graph::Graph,
    link::LinkType,
    page::Page,
    property::PropertyMap,
};

impl Graph {
    /// Builds the publishable subset of this graph.
    ///
    /// Pages are projected block by block: a private block is dropped along
    /// with everything below it, whatever its descendants say. A page whose
    /// root is private keeps only its public top-level subtrees under a root
    /// stripped of content and of every property but its id, and disappears
    /// if none are left. Placeholders are
    /// not copied; adding the surviving pages recreates the ones still tagged.
    /// Every asset that a surviving link points at is copied over.
    pub fn public_graph(&self) -> Result<Graph, GraphError> {
        let mut public = Graph::new(self.graph_dir());
        public
            .hoisted_namespaces_mut()
            .extend(self.hoisted_namespaces().map(str::to_string));

        for page in self.pages() {
            match project_page(page) {
                Some(projected) => public.add_page(projected)?,
                None => debug!("Leaving page out of projection: {}", page.name),
            }
        }

        for link in public.links_of_type(LinkType::Asset) {
            if public.find_asset(&link.link_path).is_ok() {
                continue;
            }
            let asset = self
                .find_asset(&link.link_path)
                .map_err(|_| GraphError::MissingProjectedAsset {
                    path: link.link_path.clone(),
                    block_id: link.links_from.clone(),
                })?;
            public.add_asset(asset.clone())?;
        }

        public.put_pages_in_context();
        info!(
            "Public projection: {} of {} pages, {} of {} assets",
            public.page_count(),
            self.page_count(),
            public.asset_count(),
            self.asset_count()
        );
        Ok(public)
    }
}

fn project_page(page: &Page) -> Option<Page> {
    if page.is_placeholder() {
        return None;
    }

    let source = page.tree();
    let root_public = source.is_public(BlockTree::ROOT);

    let mut root = source.root().detached();
    if !root_public {
        // Keep only the id: tags, banner and aliases stay private.
        let id = root.id.clone();
        root.content = BlockContent::new(id.clone());
        root.properties = PropertyMap::new();
        root.set_property(Block::ID, &id);
    }
    let mut tree = BlockTree::new(root);

    let mut kept = 0;
    for &child in source.root().children() {
        kept += copy_public_subtree(source, child, &mut tree, BlockTree::ROOT);
    }
    if !root_public && kept == 0 {
        return None;
    }

    let mut projected = page.clone();
    projected.set_root(tree);
    Some(projected)
}

/// Copies `idx` and its public descendants under `parent`. Returns 1 if copied.
fn copy_public_subtree(
    source: &BlockTree,
    idx: BlockIdx,
    target: &mut BlockTree,
    parent: BlockIdx,
) -> usize {
    let Some(block) = source.get(idx) else {
        return 0;
    };
    if !source.is_public(idx) {
        return 0;
    }

    let Some(copied) = target.add_child(parent, block.detached()) else {
        return 0;
    };
    for &child in block.children() {
        copy_public_subtree(source, child, target, copied);
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::asset::Asset;
    use pretty_assertions::assert_eq;

    fn parsed(name: &str, text: &str) -> Page {
        Page::parse(name, format!("pages/{name}.md"), text).unwrap()
    }

    fn bodies(page: &Page) -> Vec<String> {
        page.all_blocks()
            .map(|b| b.content.markdown().to_string())
            .collect()
    }

    fn graph_with(pages: Vec<Page>) -> Graph {
        let mut graph = Graph::new("/graph");
        for page in pages {
            graph.add_page(page).unwrap();
        }
        graph
    }

    #[test]
    fn public_page_drops_private_subtrees() {
        // Given
        let text = "public:: true\nintro\n- keep\n\t- keep child\n- secret\n  public:: false\n\t- hidden even if public\n\t  public:: true";
        let graph = graph_with(vec![parsed("Mixed", text)]);

        // When
        let public = graph.public_graph().unwrap();

        // Then
        let page = public.find_page("mixed").unwrap();
        assert_eq!(bodies(page), vec!["intro", "keep", "keep child"]);
    }

    #[test]
    fn private_page_keeps_public_children_under_empty_root() {
        let text = "secret intro [[Private Ref]]\n- nope\n- shared\n  public:: true\n\t- shared child";
        let graph = graph_with(vec![parsed("Journal", text)]);

        let public = graph.public_graph().unwrap();

        let page = public.find_page("journal").unwrap();
        assert_eq!(bodies(page), vec!["", "shared", "shared child"]);
        assert_eq!(page.root().id, graph.find_page("journal").unwrap().root().id);
        assert!(page.links().is_empty());
        let depths: Vec<usize> = page.all_blocks().map(|b| b.depth).collect();
        assert_eq!(depths, vec![0, 1, 2]);
    }

    #[test]
    fn private_root_properties_do_not_leak() {
        // Given
        let text = "tags:: secret-topic\nalias:: Hidden Name\nbanner:: ../assets/private.png\n- shared\n  public:: true";
        let mut graph = graph_with(vec![parsed("Journal", text)]);
        graph.add_asset(Asset::new("private.png")).unwrap();

        // When
        let public = graph.public_graph().unwrap();

        // Then
        let page = public.find_page("journal").unwrap();
        assert!(page.links().is_empty());
        assert!(page.tags().is_empty());
        assert!(page.aliases().is_empty());
        assert_eq!(page.properties().len(), 1);
        assert_eq!(
            page.properties().get(Block::ID).map(|p| p.value.as_str()),
            Some(page.root().id.as_str())
        );
        assert!(public.find_page("secret-topic").is_err());
        assert!(public.find_page("hidden name").is_err());
        assert_eq!(public.asset_count(), 0);
    }

    #[test]
    fn private_banner_without_asset_does_not_fail_projection() {
        let text = "banner:: ../assets/gone.png\n- shared\n  public:: true";
        let graph = graph_with(vec![parsed("Journal", text)]);

        let public = graph.public_graph().unwrap();

        assert!(public.find_page("journal").is_ok());
        assert_eq!(public.asset_count(), 0);
    }

    #[test]
    fn fully_private_page_is_omitted() {
        let graph = graph_with(vec![
            parsed("Secret", "- hidden"),
            parsed("Open", "public:: true\n- visible"),
        ]);

        let public = graph.public_graph().unwrap();

        assert!(public.find_page("secret").is_err());
        assert!(public.find_page("open").is_ok());
    }

    #[test]
    fn tag_placeholders_follow_public_pages() {
        let graph = graph_with(vec![
            parsed("Open", "public:: true\n- about #rust"),
            parsed("Secret", "- about #hidden-topic"),
        ]);

        let public = graph.public_graph().unwrap();

        assert!(public.find_page("rust").unwrap().is_placeholder());
        assert!(public.find_page("hidden-topic").is_err());
    }

    #[test]
    fn linked_assets_are_copied() {
        let mut graph = graph_with(vec![
            parsed("Open", "public:: true\n- ![pic](../assets/pic.png)"),
            parsed("Secret", "- ![other](../assets/other.png)"),
        ]);
        graph.add_asset(Asset::new("pic.png")).unwrap();
        graph.add_asset(Asset::new("other.png")).unwrap();

        let public = graph.public_graph().unwrap();

        assert_eq!(public.asset_count(), 1);
        assert!(public.find_asset("pic.png").is_ok());
    }

    #[test]
    fn missing_asset_fails_projection() {
        let graph = graph_with(vec![parsed(
            "Open",
            "public:: true\n- ![pic](../assets/gone.png)\n  id:: img-block",
        )]);

        let err = graph.public_graph().unwrap_err();

        assert_eq!(
            err,
            GraphError::MissingProjectedAsset {
                path: "gone.png".to_string(),
                block_id: "img-block".to_string(),
            }
        );
    }

    #[test]
    fn hoisted_namespaces_carry_over() {
        let graph = graph_with(vec![parsed("Projects", "hoist-namespace:: true\n- x")]);
        let public = graph.public_graph().unwrap();
        assert_eq!(public.hoisted_namespaces().collect::<Vec<_>>(), vec!["projects"]);
    }

    #[test]
    fn private_blocks_leave_the_block_index() {
        let graph = graph_with(vec![parsed(
            "Mixed",
            "public:: true\n- open\n  id:: open-block\n- closed\n  public:: false\n  id:: closed-block",
        )]);

        let public = graph.public_graph().unwrap();

        assert!(public.find_block("open-block").is_some());
        assert!(public.find_block("closed-block").is_none());
    }
}
