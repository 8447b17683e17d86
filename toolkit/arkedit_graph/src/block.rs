//! Basic blocks: structural flags, edge lists and instruction chains.
//!
//! Blocks are arena records addressed by [`BlockId`]; all operations are
//! methods on [`Graph`]. Successor and predecessor lists are ordered and
//! kept symmetric by every edge mutator. Instructions within a block form
//! a doubly linked chain threaded through the instruction arena.

use smallvec::SmallVec;

use arkedit_core::{BlockId, Error, InstId, Result};

use crate::graph::Graph;
use crate::inst::Payload;
use crate::opcode::{DynOpcode, IsaKind, Opcode, StatOpcode};

bitflags::bitflags! {
    /// Structural role flags of a basic block.
    ///
    /// Flags are not mutually exclusive, except that exactly one block per
    /// graph carries `START` and exactly one carries `END`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct BlockFlags: u16 {
        const START        = 1 << 0;
        const END          = 1 << 1;
        const LOOP_HEAD    = 1 << 2;
        const LOOP_PREHEAD = 1 << 3;
        const TRY_BEGIN    = 1 << 4;
        const TRY          = 1 << 5;
        const TRY_END      = 1 << 6;
        const CATCH_BEGIN  = 1 << 7;
        const CATCH        = 1 << 8;
    }
}

/// Arena record for one basic block.
#[derive(Debug)]
pub(crate) struct BlockData {
    pub(crate) flags: BlockFlags,
    /// Ordered outgoing edges; position is meaningful (e.g. the true/false
    /// successors of a conditional jump).
    pub(crate) succs: SmallVec<[BlockId; 2]>,
    /// Ordered incoming edges, kept symmetric with `succs`.
    pub(crate) preds: SmallVec<[BlockId; 2]>,
    pub(crate) first_inst: Option<InstId>,
    pub(crate) last_inst: Option<InstId>,
}

impl BlockData {
    pub(crate) fn new(flags: BlockFlags) -> Self {
        BlockData {
            flags,
            succs: SmallVec::new(),
            preds: SmallVec::new(),
            first_inst: None,
            last_inst: None,
        }
    }
}

impl Graph {
    // ── Edge queries ────────────────────────────────────────────────

    /// Ordered successors of `bb`, eagerly materialized.
    pub fn succs(&self, bb: BlockId) -> Result<Vec<BlockId>> {
        Ok(self.block_data(bb)?.succs.to_vec())
    }

    /// Ordered predecessors of `bb`, eagerly materialized.
    pub fn preds(&self, bb: BlockId) -> Result<Vec<BlockId>> {
        Ok(self.block_data(bb)?.preds.to_vec())
    }

    /// The successor of `bb` at `index`.
    pub fn succ(&self, bb: BlockId, index: usize) -> Result<BlockId> {
        let data = self.block_data(bb)?;
        match data.succs.get(index) {
            Some(&succ) => Ok(succ),
            None => self.fail(Error::OutOfRange {
                index,
                len: data.succs.len(),
            }),
        }
    }

    /// The predecessor of `bb` at `index`.
    pub fn pred(&self, bb: BlockId, index: usize) -> Result<BlockId> {
        let data = self.block_data(bb)?;
        match data.preds.get(index) {
            Some(&pred) => Ok(pred),
            None => self.fail(Error::OutOfRange {
                index,
                len: data.preds.len(),
            }),
        }
    }

    /// Number of successors of `bb`.
    pub fn succ_count(&self, bb: BlockId) -> Result<usize> {
        Ok(self.block_data(bb)?.succs.len())
    }

    /// Number of predecessors of `bb`.
    pub fn pred_count(&self, bb: BlockId) -> Result<usize> {
        Ok(self.block_data(bb)?.preds.len())
    }

    /// Visit successors of `bb` in edge order.
    pub fn visit_succs(&self, bb: BlockId, mut callback: impl FnMut(BlockId)) -> Result<()> {
        for &succ in &self.block_data(bb)?.succs {
            callback(succ);
        }
        Ok(())
    }

    /// Visit predecessors of `bb` in edge order, stopping early when the
    /// callback returns `false`.
    ///
    /// Returns `false` iff a callback returned `false` (find-style
    /// short-circuit).
    pub fn visit_preds(
        &self,
        bb: BlockId,
        mut callback: impl FnMut(BlockId) -> bool,
    ) -> Result<bool> {
        for &pred in &self.block_data(bb)?.preds {
            if !callback(pred) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    // ── Edge mutation ───────────────────────────────────────────────

    /// Append an edge `bb → succ`.
    pub fn append_succ(&mut self, bb: BlockId, succ: BlockId) -> Result<()> {
        self.block_data(succ)?;
        self.block_data_mut(bb)?.succs.push(succ);
        self.block_data_mut(succ)?.preds.push(bb);
        Ok(())
    }

    /// Insert an edge `bb → succ` at `index` in the successor list.
    pub fn insert_succ(&mut self, bb: BlockId, succ: BlockId, index: usize) -> Result<()> {
        self.block_data(succ)?;
        let len = self.block_data(bb)?.succs.len();
        if index > len {
            return self.fail(Error::OutOfRange { index, len });
        }
        self.block_data_mut(bb)?.succs.insert(index, succ);
        self.block_data_mut(succ)?.preds.push(bb);
        Ok(())
    }

    /// Remove the edge at `index` in the successor list of `bb`.
    pub fn erase_succ(&mut self, bb: BlockId, index: usize) -> Result<()> {
        let len = self.block_data(bb)?.succs.len();
        if index >= len {
            return self.fail(Error::OutOfRange { index, len });
        }
        let succ = self.block_data_mut(bb)?.succs.remove(index);
        let preds = &mut self.block_data_mut(succ)?.preds;
        if let Some(position) = preds.iter().position(|&pred| pred == bb) {
            preds.remove(position);
        }
        Ok(())
    }

    /// Replace the successor at `index` with `succ`, rewiring predecessor
    /// lists on both sides.
    pub fn set_succ(&mut self, bb: BlockId, index: usize, succ: BlockId) -> Result<()> {
        self.block_data(succ)?;
        let len = self.block_data(bb)?.succs.len();
        if index >= len {
            return self.fail(Error::OutOfRange { index, len });
        }
        let old = self.block_data(bb)?.succs[index];
        let old_preds = &mut self.block_data_mut(old)?.preds;
        if let Some(position) = old_preds.iter().position(|&pred| pred == bb) {
            old_preds.remove(position);
        }
        self.block_data_mut(bb)?.succs[index] = succ;
        self.block_data_mut(succ)?.preds.push(bb);
        Ok(())
    }

    // ── Flag predicates ─────────────────────────────────────────────

    fn has_flag(&self, bb: BlockId, flag: BlockFlags) -> Result<bool> {
        Ok(self.block_data(bb)?.flags.contains(flag))
    }

    /// Whether `bb` is the graph's start block.
    pub fn is_start(&self, bb: BlockId) -> Result<bool> {
        self.has_flag(bb, BlockFlags::START)
    }

    /// Whether `bb` is the graph's end block.
    pub fn is_end(&self, bb: BlockId) -> Result<bool> {
        self.has_flag(bb, BlockFlags::END)
    }

    /// Whether `bb` heads a loop.
    pub fn is_loop_head(&self, bb: BlockId) -> Result<bool> {
        self.has_flag(bb, BlockFlags::LOOP_HEAD)
    }

    /// Whether `bb` is a loop pre-header.
    pub fn is_loop_prehead(&self, bb: BlockId) -> Result<bool> {
        self.has_flag(bb, BlockFlags::LOOP_PREHEAD)
    }

    /// Whether `bb` opens a try region.
    pub fn is_try_begin(&self, bb: BlockId) -> Result<bool> {
        self.has_flag(bb, BlockFlags::TRY_BEGIN)
    }

    /// Whether `bb` lies inside a try region.
    pub fn is_try(&self, bb: BlockId) -> Result<bool> {
        self.has_flag(bb, BlockFlags::TRY)
    }

    /// Whether `bb` closes a try region.
    pub fn is_try_end(&self, bb: BlockId) -> Result<bool> {
        self.has_flag(bb, BlockFlags::TRY_END)
    }

    /// Whether `bb` opens a catch handler.
    pub fn is_catch_begin(&self, bb: BlockId) -> Result<bool> {
        self.has_flag(bb, BlockFlags::CATCH_BEGIN)
    }

    /// Whether `bb` lies inside a catch handler.
    pub fn is_catch(&self, bb: BlockId) -> Result<bool> {
        self.has_flag(bb, BlockFlags::CATCH)
    }

    /// Mark or clear the loop-head flag (structural annotation only).
    pub fn set_loop_head(&mut self, bb: BlockId, value: bool) -> Result<()> {
        self.block_data_mut(bb)?
            .flags
            .set(BlockFlags::LOOP_HEAD, value);
        Ok(())
    }

    // ── Instruction chains ──────────────────────────────────────────

    /// The first instruction of `bb`, if any.
    pub fn first_inst(&self, bb: BlockId) -> Result<Option<InstId>> {
        Ok(self.block_data(bb)?.first_inst)
    }

    /// The last instruction of `bb`, if any.
    pub fn last_inst(&self, bb: BlockId) -> Result<Option<InstId>> {
        Ok(self.block_data(bb)?.last_inst)
    }

    /// All instructions of `bb` in chain order.
    pub fn instructions(&self, bb: BlockId) -> Result<Vec<InstId>> {
        let mut result = Vec::new();
        let mut cursor = self.block_data(bb)?.first_inst;
        while let Some(inst) = cursor {
            result.push(inst);
            cursor = self.inst_data(inst)?.next;
        }
        Ok(result)
    }

    /// Number of instructions in `bb`.
    pub fn number_of_insts(&self, bb: BlockId) -> Result<usize> {
        Ok(self.instructions(bb)?.len())
    }

    /// Attach a created-but-unattached instruction at the front of `bb`.
    pub fn add_inst_front(&mut self, bb: BlockId, inst: InstId) -> Result<()> {
        self.ensure_unattached(inst)?;
        let first = self.block_data(bb)?.first_inst;
        {
            let data = self.inst_data_mut(inst)?;
            data.block = Some(bb);
            data.prev = None;
            data.next = first;
        }
        match first {
            Some(old_first) => self.inst_data_mut(old_first)?.prev = Some(inst),
            None => self.block_data_mut(bb)?.last_inst = Some(inst),
        }
        self.block_data_mut(bb)?.first_inst = Some(inst);
        Ok(())
    }

    /// Attach a created-but-unattached instruction at the back of `bb`.
    pub fn add_inst_back(&mut self, bb: BlockId, inst: InstId) -> Result<()> {
        self.ensure_unattached(inst)?;
        let last = self.block_data(bb)?.last_inst;
        {
            let data = self.inst_data_mut(inst)?;
            data.block = Some(bb);
            data.prev = last;
            data.next = None;
        }
        match last {
            Some(old_last) => self.inst_data_mut(old_last)?.next = Some(inst),
            None => self.block_data_mut(bb)?.first_inst = Some(inst),
        }
        self.block_data_mut(bb)?.last_inst = Some(inst);
        Ok(())
    }

    fn ensure_unattached(&self, inst: InstId) -> Result<()> {
        if let Some(block) = self.inst_data(inst)?.block {
            return self.fail(Error::InconsistentState(format!(
                "instruction {} is already attached to block {}",
                inst.raw(),
                block.raw()
            )));
        }
        Ok(())
    }

    /// Detach and tombstone every instruction of `bb`.
    pub fn remove_all_insts(&mut self, bb: BlockId) -> Result<()> {
        let insts = self.instructions(bb)?;
        for inst in insts {
            self.drop_inst_edges(inst)?;
            self.insts[inst.index()] = None;
            self.constants.retain(|_, id| *id != inst);
        }
        let data = self.block_data_mut(bb)?;
        data.first_inst = None;
        data.last_inst = None;
        Ok(())
    }

    // ── Splitting ───────────────────────────────────────────────────

    /// Split the block owning `inst` after it.
    ///
    /// Instructions following `inst` and all successor edges move to a new
    /// block; the old block is then wired to the new one. Returns the new
    /// block.
    pub fn split_block_after(&mut self, inst: InstId) -> Result<BlockId> {
        let Some(bb) = self.inst_data(inst)?.block else {
            return self.fail(Error::bad_argument(format!(
                "cannot split after unattached instruction {}",
                inst.raw()
            )));
        };

        let new_bb = self.create_empty_block();

        // Move the tail of the chain.
        let tail = self.inst_data(inst)?.next;
        self.inst_data_mut(inst)?.next = None;
        let old_last = self.block_data(bb)?.last_inst;
        {
            let data = self.block_data_mut(bb)?;
            data.last_inst = Some(inst);
        }
        if let Some(tail_head) = tail {
            self.inst_data_mut(tail_head)?.prev = None;
            let new_data = self.block_data_mut(new_bb)?;
            new_data.first_inst = Some(tail_head);
            new_data.last_inst = old_last;
            let mut cursor = Some(tail_head);
            while let Some(moved) = cursor {
                let data = self.inst_data_mut(moved)?;
                data.block = Some(new_bb);
                cursor = data.next;
            }
        }

        // Move successor edges, preserving order and rewiring the
        // successors' predecessor entries in place.
        let succs: Vec<BlockId> = std::mem::take(&mut self.block_data_mut(bb)?.succs).into_vec();
        for &succ in &succs {
            let preds = &mut self.block_data_mut(succ)?.preds;
            if let Some(position) = preds.iter().position(|&pred| pred == bb) {
                preds[position] = new_bb;
            }
        }
        self.block_data_mut(new_bb)?.succs = succs.into();

        self.append_succ(bb, new_bb)?;
        Ok(new_bb)
    }

    // ── Phi factories ───────────────────────────────────────────────

    /// Create a phi at the head of `bb` with the given inputs.
    pub fn create_phi(&mut self, bb: BlockId, inputs: &[InstId]) -> Result<InstId> {
        let opcode = match self.isa() {
            IsaKind::Dynamic => Opcode::Dynamic(DynOpcode::Phi),
            IsaKind::Static => Opcode::Static(StatOpcode::Phi),
        };
        self.create_pinned(bb, opcode, inputs)
    }

    /// Create a catch-phi at the head of `bb` with the given inputs.
    pub fn create_catch_phi(&mut self, bb: BlockId, inputs: &[InstId]) -> Result<InstId> {
        let opcode = match self.isa() {
            IsaKind::Dynamic => Opcode::Dynamic(DynOpcode::CatchPhi),
            IsaKind::Static => Opcode::Static(StatOpcode::CatchPhi),
        };
        self.create_pinned(bb, opcode, inputs)
    }

    fn create_pinned(&mut self, bb: BlockId, opcode: Opcode, inputs: &[InstId]) -> Result<InstId> {
        self.block_data(bb)?;
        for &input in inputs {
            self.inst_data(input)?;
        }
        let inst = self.alloc_inst(opcode, Payload::None);
        for &input in inputs {
            self.inst_data_mut(inst)?.inputs.push(input);
            self.inst_data_mut(input)?.users.push(inst);
        }
        self.add_inst_front(bb, inst)?;
        Ok(inst)
    }
}

#[cfg(test)]
mod tests;
