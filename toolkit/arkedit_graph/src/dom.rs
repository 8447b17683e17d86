//! Dominator tree for graph blocks.
//!
//! Uses the Cooper-Harvey-Kennedy iterative algorithm, which is simpler
//! than Lengauer-Tarjan and fast enough for typical function sizes. The
//! algorithm works on reverse postorder and converges in O(n * d) where d
//! is the loop nesting depth.
//!
//! Reference: Cooper, Harvey, Kennedy — "A Simple, Fast Dominance
//! Algorithm" (2001)

use arkedit_core::{BlockId, Error, Result};

use crate::graph::Graph;
use crate::traverse::compute_postorder;

/// Immediate-dominator table over a graph's block arena.
pub struct DominatorTree {
    /// Immediate dominator per arena slot. `idom[start] == Some(start)`;
    /// unreachable (and tombstoned) slots stay `None`.
    idom: Vec<Option<BlockId>>,
}

impl DominatorTree {
    /// Build the dominator tree for `graph`.
    pub fn build(graph: &Graph) -> Result<Self> {
        let n = graph.blocks.len();
        let mut postorder = compute_postorder(graph)?;
        postorder.reverse();
        let rpo = postorder;

        // Arena slot → RPO position for O(1) intersect lookups.
        let mut rpo_pos = vec![usize::MAX; n];
        for (pos, &bb) in rpo.iter().enumerate() {
            rpo_pos[bb.index()] = pos;
        }

        let start = graph.start_block();
        let mut idom: Vec<Option<BlockId>> = vec![None; n];
        idom[start.index()] = Some(start); // start dominates itself

        let mut changed = true;
        while changed {
            changed = false;
            // Iterate in RPO (skip the start at position 0).
            for &bb in &rpo[1..] {
                let preds = graph.preds(bb)?;

                // Find the first already-processed predecessor.
                let mut new_idom = None;
                for &pred in &preds {
                    if idom[pred.index()].is_some() {
                        new_idom = Some(pred);
                        break;
                    }
                }
                let Some(mut new_idom_val) = new_idom else {
                    continue;
                };

                // Intersect with the remaining processed predecessors.
                for &pred in &preds {
                    if pred == new_idom_val {
                        continue;
                    }
                    if idom[pred.index()].is_some() {
                        new_idom_val = Self::intersect(pred, new_idom_val, &idom, &rpo_pos);
                    }
                }

                if idom[bb.index()] != Some(new_idom_val) {
                    idom[bb.index()] = Some(new_idom_val);
                    changed = true;
                }
            }
        }

        Ok(Self { idom })
    }

    /// Whether `bb` was reachable when the tree was built.
    pub fn is_reachable(&self, bb: BlockId) -> bool {
        self.idom.get(bb.index()).copied().flatten().is_some()
    }

    /// The immediate dominator of `bb` (`None` for the start block).
    pub fn immediate_dominator(&self, bb: BlockId) -> Option<BlockId> {
        match self.idom.get(bb.index()).copied().flatten() {
            Some(dom) if dom != bb => Some(dom),
            _ => None,
        }
    }

    /// Does `a` dominate `b`? A block dominates itself.
    pub fn dominates(&self, a: BlockId, b: BlockId) -> bool {
        let mut current = b;
        loop {
            if current == a {
                return true;
            }
            match self.idom.get(current.index()).copied().flatten() {
                Some(dom) if dom != current => current = dom,
                _ => return current == a,
            }
        }
    }

    /// Blocks whose immediate dominator is `bb`, in arena order.
    pub fn dominated_by(&self, bb: BlockId) -> Vec<BlockId> {
        let mut result = Vec::new();
        for (index, &slot) in self.idom.iter().enumerate() {
            let id = BlockId::new(
                u32::try_from(index).unwrap_or_else(|_| panic!("block id overflow")),
            );
            if slot == Some(bb) && id != bb {
                result.push(id);
            }
        }
        result
    }

    /// CHK intersect: walk two fingers upward until they meet.
    fn intersect(
        mut a: BlockId,
        mut b: BlockId,
        idom: &[Option<BlockId>],
        rpo_pos: &[usize],
    ) -> BlockId {
        while a != b {
            while rpo_pos[a.index()] > rpo_pos[b.index()] {
                let Some(next) = idom[a.index()] else {
                    debug_assert!(false, "intersect: broken idom chain at {}", a.raw());
                    return a;
                };
                a = next;
            }
            while rpo_pos[b.index()] > rpo_pos[a.index()] {
                let Some(next) = idom[b.index()] else {
                    debug_assert!(false, "intersect: broken idom chain at {}", b.raw());
                    return b;
                };
                b = next;
            }
        }
        a
    }
}

impl Graph {
    fn dominator_tree_for(&self, blocks: &[BlockId]) -> Result<DominatorTree> {
        let tree = DominatorTree::build(self)?;
        for &bb in blocks {
            self.block_data(bb)?;
            if !tree.is_reachable(bb) {
                return self.fail(Error::InconsistentState(format!(
                    "dominance query on block {} not reachable from start",
                    bb.raw()
                )));
            }
        }
        Ok(tree)
    }

    /// The immediate dominator of `bb` (`None` for the start block).
    ///
    /// Disconnected blocks cannot answer dominance queries; asking is an
    /// inconsistent-state error.
    pub fn immediate_dominator(&self, bb: BlockId) -> Result<Option<BlockId>> {
        let tree = self.dominator_tree_for(&[bb])?;
        Ok(tree.immediate_dominator(bb))
    }

    /// Whether `a` dominates `b`. A block dominates itself.
    pub fn dominates(&self, a: BlockId, b: BlockId) -> Result<bool> {
        let tree = self.dominator_tree_for(&[a, b])?;
        Ok(tree.dominates(a, b))
    }

    /// Visit the blocks immediately dominated by `bb`, stopping early when
    /// the callback returns `false`. Returns `false` iff a callback did.
    pub fn visit_dominated_blocks(
        &self,
        bb: BlockId,
        mut callback: impl FnMut(BlockId) -> bool,
    ) -> Result<bool> {
        let tree = self.dominator_tree_for(&[bb])?;
        for dominated in tree.dominated_by(bb) {
            if !callback(dominated) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
