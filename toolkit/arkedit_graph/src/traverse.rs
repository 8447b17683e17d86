//! Whole-graph block traversal.
//!
//! Uses an iterative DFS with an explicit stack to avoid recursion depth
//! issues on deeply nested CFGs. Only reachable blocks are visited, so
//! tombstoned arena slots never appear in a traversal.

use arkedit_core::{BlockId, Result};

use crate::graph::Graph;

/// Compute a postorder traversal of the CFG starting from the start block.
pub(crate) fn compute_postorder(graph: &Graph) -> Result<Vec<BlockId>> {
    let num_blocks = graph.blocks.len();
    let mut visited = vec![false; num_blocks];
    let mut postorder = Vec::with_capacity(num_blocks);

    // Stack entries: (block, children_processed).
    // When children_processed is false, we push successors.
    // When true, we emit the block to postorder.
    let mut stack: Vec<(BlockId, bool)> = vec![(graph.start_block(), false)];

    while let Some(&mut (bb, ref mut children_done)) = stack.last_mut() {
        if *children_done {
            postorder.push(bb);
            stack.pop();
            continue;
        }

        *children_done = true;

        if visited[bb.index()] {
            stack.pop();
            continue;
        }
        visited[bb.index()] = true;

        // Push successors (they'll be processed before we come back to
        // emit this block). Reversed so the first edge is visited first.
        let succs = graph.succs(bb)?;
        for &succ in succs.iter().rev() {
            if !visited[succ.index()] {
                stack.push((succ, false));
            }
        }
    }

    Ok(postorder)
}

impl Graph {
    /// Blocks in reverse post-order, eagerly materialized.
    ///
    /// Deterministic for a fixed graph: two consecutive calls with no
    /// mutation in between return identical sequences. Most whole-graph
    /// passes want this order because every block (except the start)
    /// appears after at least one of its predecessors.
    pub fn blocks_rpo(&self) -> Result<Vec<BlockId>> {
        let mut order = compute_postorder(self)?;
        order.reverse();
        Ok(order)
    }

    /// Visit blocks in reverse post-order.
    pub fn visit_blocks_rpo(&self, mut callback: impl FnMut(BlockId)) -> Result<()> {
        for bb in self.blocks_rpo()? {
            callback(bb);
        }
        Ok(())
    }
}
