use log::warn;

use crate::parsing::{ParseError, lines::PageLine};

use super::{
    markers::{Bullet, LineRole},
    types::{Outline, OutlineNode},
};

/// An ancestor that later, deeper bullets may still attach to.
#[derive(Debug, Clone, Copy)]
struct OpenBlock {
    node: usize,
    /// Bullet level as written in the file (tabs before the marker).
    level: usize,
}

/// Groups page lines into bullet blocks and links them into a forest.
///
/// Lines accumulate in the current group until the next `- ` marker closes
/// it. The indent stored for a group is the tab count plus one, because the
/// page preamble sits at indent 0 without any marker of its own.
pub struct OutlineBuilder {
    group: Vec<String>,
    group_indent: usize,
    stack: Vec<OpenBlock>,
    line_no: usize,
    outline: Outline,
}

impl OutlineBuilder {
    pub fn new() -> Self {
        Self {
            group: vec![],
            group_indent: 0,
            stack: vec![],
            line_no: 0,
            outline: Outline::default(),
        }
    }

    pub fn push(&mut self, line: &PageLine) -> Result<(), ParseError> {
        self.line_no += 1;

        let (indent, content) = match Bullet::classify(&line.content) {
            LineRole::Empty => return Ok(()),
            LineRole::Open(rest) => {
                self.flush();
                self.group_indent = line.indent + 1;
                (line.indent + 1, rest)
            }
            LineRole::Continue(rest) => {
                if self.group.is_empty() {
                    return Err(ParseError::OrphanContinuation {
                        line: self.line_no,
                        content: line.content.clone(),
                    });
                }
                (line.indent + 1, rest)
            }
            LineRole::Plain(rest) => (line.indent, rest),
        };

        if indent != self.group_indent {
            return Err(ParseError::MismatchedIndent {
                line: self.line_no,
                expected: self.group_indent,
                found: indent,
            });
        }

        self.group.push(content.to_string());
        Ok(())
    }

    pub fn finish(mut self) -> Outline {
        // EOF flush
        self.flush();
        self.outline
    }

    fn flush(&mut self) {
        let lines = std::mem::take(&mut self.group);
        if self.group_indent == 0 {
            if !lines.is_empty() {
                self.outline.preamble = lines;
            }
            return;
        }
        if lines.is_empty() {
            return;
        }
        self.place(lines, self.group_indent - 1);
    }

    fn place(&mut self, lines: Vec<String>, level: usize) {
        while let Some(top) = self.stack.last() {
            if top.level < level {
                break;
            }
            self.stack.pop();
        }

        let parent = self.stack.last().map(|open| open.node);
        let depth = parent.map_or(0, |p| self.outline.nodes[p].depth + 1);
        if depth != level {
            warn!(
                "Bullet on line {} skips outline levels (level {level}, attached at depth {depth})",
                self.line_no
            );
        }

        let idx = self.outline.nodes.len();
        self.outline.nodes.push(OutlineNode {
            lines,
            depth,
            parent,
            children: vec![],
        });
        match parent {
            Some(p) => self.outline.nodes[p].children.push(idx),
            None => self.outline.roots.push(idx),
        }
        self.stack.push(OpenBlock { node: idx, level });
    }
}

impl Default for OutlineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Assembles tokenized lines into an [`Outline`].
pub fn assemble(lines: &[PageLine]) -> Result<Outline, ParseError> {
    let mut builder = OutlineBuilder::new();
    for line in lines {
        builder.push(line)?;
    }
    Ok(builder.finish())
}
