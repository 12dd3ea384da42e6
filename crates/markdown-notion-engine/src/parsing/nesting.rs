//! List nesting over raw indentation counts.
//!
//! Indentation depth is the literal leading-space count of the item line,
//! and the engine deepens at most one level per line. The container stack
//! is realized as a path of child indices into the growing block tree
//! rather than a stack of mutable container references, which would need
//! aliasing parent pointers; the path is re-walked on each insertion.
//! The stack deliberately survives intervening non-list lines.

use super::ConvertError;
use crate::models::Block;

/// Tracks which list level new items attach to.
#[derive(Debug, Default)]
pub(crate) struct ListStack {
    /// Index of the open parent item at each depth, outermost first.
    path: Vec<usize>,
    current_indent: usize,
}

impl ListStack {
    /// Attaches a list item parsed with `indent` leading spaces, at the
    /// level implied by the indentation relative to the open level.
    pub(crate) fn insert(
        &mut self,
        blocks: &mut Vec<Block>,
        item: Block,
        indent: usize,
        line: usize,
    ) -> Result<(), ConvertError> {
        while indent < self.current_indent {
            self.path.pop();
            self.current_indent -= 1;
        }

        if indent == self.current_indent {
            open_container(blocks, &self.path, line)?.push(item);
            return Ok(());
        }

        // Deeper than the open level: the item becomes a child of the last
        // item in the open container. One level per line, regardless of how
        // far the indentation jumped.
        let container = open_container(blocks, &self.path, line)?;
        match container.last() {
            Some(previous) if previous.is_list_item() => {
                self.path.push(container.len() - 1);
            }
            _ => return Err(ConvertError::InvalidListNesting { line }),
        }
        self.current_indent += 1;
        open_container(blocks, &self.path, line)?.push(item);
        Ok(())
    }
}

/// Walks the index path down to the currently open children container,
/// creating child containers on first descent.
fn open_container<'a>(
    blocks: &'a mut Vec<Block>,
    path: &[usize],
    line: usize,
) -> Result<&'a mut Vec<Block>, ConvertError> {
    let mut container = blocks;
    for &index in path {
        container = container
            .get_mut(index)
            .and_then(Block::list_children_mut)
            .ok_or(ConvertError::InvalidListNesting { line })?;
    }
    Ok(container)
}
