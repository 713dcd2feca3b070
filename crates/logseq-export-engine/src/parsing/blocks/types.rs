/// One bullet of an assembled outline, before any property or link parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode {
    /// Source lines of the block with bullet and continuation markers removed.
    pub lines: Vec<String>,
    /// Nesting depth; top-level bullets are 0.
    pub depth: usize,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

impl OutlineNode {
    /// The block text, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// The bullet forest of a page plus the lines that precede the first bullet.
///
/// Nodes live in an arena; `roots` lists the top-level bullets in document
/// order and every node's `children` are in document order too.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    /// Lines before the first `- ` bullet (page properties live here).
    pub preamble: Vec<String>,
    pub nodes: Vec<OutlineNode>,
    pub roots: Vec<usize>,
}

impl Outline {
    pub fn node(&self, idx: usize) -> &OutlineNode {
        &self.nodes[idx]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when there is neither preamble text nor any bullet.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.preamble.iter().all(|l| l.trim().is_empty())
    }

    /// Node indices in pre-order (parents before children, siblings in order).
    pub fn preorder(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        while let Some(idx) = stack.pop() {
            out.push(idx);
            stack.extend(self.nodes[idx].children.iter().rev());
        }
        out
    }
}
