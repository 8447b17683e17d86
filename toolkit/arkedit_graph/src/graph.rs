//! The graph — owner of a function's basic blocks and instructions.
//!
//! A [`Graph`] owns two tombstoned arenas (blocks and instructions): slots
//! are cleared when an entity is removed but never reused, so surviving
//! ids keep their meaning across structural passes. Every public accessor
//! re-validates handles against the arena, which is how stale or foreign
//! ids surface as bad-argument errors instead of touching the wrong
//! entity.
//!
//! A graph is either checked out of a function (sharing the owning file's
//! string table and error handler) or standalone (with a private table, as
//! in unit tests). Either way it is a move-only value: committing it back
//! with `set_graph` consumes it, so a stale edited graph cannot be
//! committed twice.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use arkedit_core::{
    BlockId, Error, ErrorHandler, InstId, LogHandler, Result, StringId, StringTable,
};

use crate::block::{BlockData, BlockFlags};
use crate::inst::{InstData, Payload};
use crate::opcode::{DynOpcode, IsaKind, Opcode, StatOpcode};
use crate::{DynamicIsa, StaticIsa};

/// Key for the constant-interning map: value and type together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum ConstKey {
    I32(i32),
    I64(i64),
    U64(u64),
    /// Bit pattern, so that `-0.0` and `0.0` intern separately and NaNs
    /// with equal payloads intern together.
    F64(u64),
}

/// A function body as an editable control-flow graph.
pub struct Graph {
    isa: IsaKind,
    pub(crate) blocks: Vec<Option<BlockData>>,
    pub(crate) insts: Vec<Option<InstData>>,
    pub(crate) start: BlockId,
    pub(crate) end: BlockId,
    pub(crate) params: Vec<InstId>,
    pub(crate) constants: FxHashMap<ConstKey, InstId>,
    strings: Arc<StringTable>,
    handler: Arc<dyn ErrorHandler>,
}

impl Graph {
    /// Create a standalone graph with a private string table.
    ///
    /// The graph starts with an empty start block and an empty end block
    /// and no edge between them.
    pub fn new(isa: IsaKind) -> Self {
        Self::with_context(isa, Arc::new(StringTable::new()), Arc::new(LogHandler))
    }

    /// Create a graph bound to an existing string table and error handler
    /// (the owning file's, when checked out of a function).
    pub fn with_context(
        isa: IsaKind,
        strings: Arc<StringTable>,
        handler: Arc<dyn ErrorHandler>,
    ) -> Self {
        let mut graph = Graph {
            isa,
            blocks: Vec::new(),
            insts: Vec::new(),
            start: BlockId::new(0),
            end: BlockId::new(1),
            params: Vec::new(),
            constants: FxHashMap::default(),
            strings,
            handler,
        };
        graph.start = graph.alloc_block(BlockFlags::START);
        graph.end = graph.alloc_block(BlockFlags::END);
        graph
    }

    /// The dialect this graph is bound to.
    pub fn isa(&self) -> IsaKind {
        self.isa
    }

    /// The string table operand strings intern into.
    pub fn strings(&self) -> &Arc<StringTable> {
        &self.strings
    }

    /// Report `error` through the configured handler, then return it.
    ///
    /// All errors this graph surfaces are created through here, so the
    /// handler sees each exactly once.
    pub(crate) fn fail<T>(&self, error: Error) -> Result<T> {
        self.handler.on_error(&error);
        Err(error)
    }

    // ── Arena plumbing ──────────────────────────────────────────────

    pub(crate) fn alloc_block(&mut self, flags: BlockFlags) -> BlockId {
        let id = BlockId::new(
            u32::try_from(self.blocks.len())
                .unwrap_or_else(|_| panic!("block count exceeds u32::MAX")),
        );
        self.blocks.push(Some(BlockData::new(flags)));
        id
    }

    pub(crate) fn alloc_inst(&mut self, opcode: Opcode, payload: Payload) -> InstId {
        let id = InstId::new(
            u32::try_from(self.insts.len())
                .unwrap_or_else(|_| panic!("instruction count exceeds u32::MAX")),
        );
        self.insts.push(Some(InstData::new(opcode, payload)));
        id
    }

    pub(crate) fn block_data(&self, bb: BlockId) -> Result<&BlockData> {
        match self.blocks.get(bb.index()) {
            Some(Some(data)) => Ok(data),
            _ => self.fail(Error::bad_argument(format!(
                "stale or foreign block handle {}",
                bb.raw()
            ))),
        }
    }

    pub(crate) fn block_data_mut(&mut self, bb: BlockId) -> Result<&mut BlockData> {
        match self.blocks.get(bb.index()) {
            Some(Some(_)) => {}
            _ => {
                return self.fail(Error::bad_argument(format!(
                    "stale or foreign block handle {}",
                    bb.raw()
                )))
            }
        }
        match self.blocks.get_mut(bb.index()) {
            Some(Some(data)) => Ok(data),
            _ => unreachable!("validated above"),
        }
    }

    pub(crate) fn inst_data(&self, inst: InstId) -> Result<&InstData> {
        match self.insts.get(inst.index()) {
            Some(Some(data)) => Ok(data),
            _ => self.fail(Error::bad_argument(format!(
                "stale or foreign instruction handle {}",
                inst.raw()
            ))),
        }
    }

    pub(crate) fn inst_data_mut(&mut self, inst: InstId) -> Result<&mut InstData> {
        match self.insts.get(inst.index()) {
            Some(Some(_)) => {}
            _ => {
                return self.fail(Error::bad_argument(format!(
                    "stale or foreign instruction handle {}",
                    inst.raw()
                )))
            }
        }
        match self.insts.get_mut(inst.index()) {
            Some(Some(data)) => Ok(data),
            _ => unreachable!("validated above"),
        }
    }

    // ── Block lookups ───────────────────────────────────────────────

    /// The unique start block.
    pub fn start_block(&self) -> BlockId {
        self.start
    }

    /// The unique end block.
    pub fn end_block(&self) -> BlockId {
        self.end
    }

    /// Look up a block by id, validating the handle.
    pub fn block(&self, id: u32) -> Result<BlockId> {
        let bb = BlockId::new(id);
        self.block_data(bb)?;
        Ok(bb)
    }

    /// Number of live blocks (tombstoned slots excluded).
    pub fn number_of_blocks(&self) -> usize {
        self.blocks.iter().filter(|slot| slot.is_some()).count()
    }

    /// Number of live instructions (tombstoned slots excluded).
    pub fn number_of_instructions(&self) -> usize {
        self.insts.iter().filter(|slot| slot.is_some()).count()
    }

    /// Allocate a new, unattached (edge-less) empty block.
    pub fn create_empty_block(&mut self) -> BlockId {
        self.alloc_block(BlockFlags::empty())
    }

    // ── Parameters ──────────────────────────────────────────────────

    /// Append a parameter pseudo-instruction to the start block.
    pub fn add_parameter(&mut self) -> InstId {
        let index = u32::try_from(self.params.len())
            .unwrap_or_else(|_| panic!("parameter count exceeds u32::MAX"));
        let opcode = match self.isa {
            IsaKind::Dynamic => Opcode::Dynamic(DynOpcode::Parameter),
            IsaKind::Static => Opcode::Static(StatOpcode::Parameter),
        };
        let inst = self.alloc_inst(opcode, Payload::ParameterIndex(index));
        let start = self.start;
        // Start block handles are always live, so attach cannot fail here.
        if let Err(error) = self.add_inst_back(start, inst) {
            unreachable!("parameter attach failed: {error}");
        }
        self.params.push(inst);
        inst
    }

    /// The parameter instruction at `index`.
    pub fn parameter(&self, index: usize) -> Result<InstId> {
        match self.params.get(index) {
            Some(&inst) => Ok(inst),
            None => self.fail(Error::OutOfRange {
                index,
                len: self.params.len(),
            }),
        }
    }

    /// Number of parameters.
    pub fn number_of_parameters(&self) -> usize {
        self.params.len()
    }

    // ── Constant interning ──────────────────────────────────────────

    fn find_or_create_constant(&mut self, key: ConstKey, payload: Payload) -> InstId {
        if let Some(&existing) = self.constants.get(&key) {
            return existing;
        }
        let opcode = match self.isa {
            IsaKind::Dynamic => Opcode::Dynamic(DynOpcode::Constant),
            IsaKind::Static => Opcode::Static(StatOpcode::Constant),
        };
        let inst = self.alloc_inst(opcode, payload);
        let start = self.start;
        if let Err(error) = self.add_inst_back(start, inst) {
            unreachable!("constant attach failed: {error}");
        }
        self.constants.insert(key, inst);
        inst
    }

    /// The `i32` constant for `value`, creating it on first request.
    ///
    /// Interning: the same value always yields the same instruction.
    pub fn find_or_create_constant_i32(&mut self, value: i32) -> InstId {
        self.find_or_create_constant(ConstKey::I32(value), Payload::ConstI32(value))
    }

    /// The `i64` constant for `value`, creating it on first request.
    pub fn find_or_create_constant_i64(&mut self, value: i64) -> InstId {
        self.find_or_create_constant(ConstKey::I64(value), Payload::ConstI64(value))
    }

    /// The `u64` constant for `value`, creating it on first request.
    pub fn find_or_create_constant_u64(&mut self, value: u64) -> InstId {
        self.find_or_create_constant(ConstKey::U64(value), Payload::ConstU64(value))
    }

    /// The `f64` constant for `value`, creating it on first request.
    ///
    /// Keyed by bit pattern: `-0.0` and `0.0` are distinct constants.
    pub fn find_or_create_constant_f64(&mut self, value: f64) -> InstId {
        self.find_or_create_constant(ConstKey::F64(value.to_bits()), Payload::ConstF64(value))
    }

    // ── Structural tagging / passes ─────────────────────────────────

    /// Tag four existing blocks as the boundary of a try/catch region.
    ///
    /// Pure flag annotation: control flow must already be wired by the
    /// caller.
    pub fn insert_try_catch(
        &mut self,
        try_first: BlockId,
        try_last: BlockId,
        catch_begin: BlockId,
        catch_end: BlockId,
    ) -> Result<()> {
        // Validate all four handles before mutating any flag.
        self.block_data(try_first)?;
        self.block_data(try_last)?;
        self.block_data(catch_begin)?;
        self.block_data(catch_end)?;

        self.block_data_mut(try_first)?
            .flags
            .insert(BlockFlags::TRY_BEGIN | BlockFlags::TRY);
        self.block_data_mut(try_last)?
            .flags
            .insert(BlockFlags::TRY_END);
        self.block_data_mut(catch_begin)?
            .flags
            .insert(BlockFlags::CATCH_BEGIN | BlockFlags::CATCH);
        self.block_data_mut(catch_end)?
            .flags
            .insert(BlockFlags::CATCH);
        Ok(())
    }

    /// Remove every block unreachable from the start block.
    ///
    /// Surviving block ids are not renumbered; removed slots become
    /// tombstones. The end block is kept even when unreachable, since it
    /// is structural.
    pub fn remove_unreachable_blocks(&mut self) -> Result<()> {
        let reachable = self.reachable_from_start()?;

        let doomed: Vec<BlockId> = (0..self.blocks.len())
            .map(|raw| {
                BlockId::new(u32::try_from(raw).unwrap_or_else(|_| panic!("block id overflow")))
            })
            .filter(|bb| {
                self.blocks[bb.index()].is_some() && !reachable[bb.index()] && *bb != self.end
            })
            .collect();

        tracing::debug!(removed = doomed.len(), "removing unreachable blocks");

        for bb in &doomed {
            self.remove_all_insts(*bb)?;
        }

        // Drop edges pointing between doomed and surviving blocks.
        for bb in &doomed {
            let succs: Vec<BlockId> = self.block_data(*bb)?.succs.iter().copied().collect();
            for succ in succs {
                if let Ok(data) = self.block_data_mut(succ) {
                    data.preds.retain(|pred| *pred != *bb);
                }
            }
            let preds: Vec<BlockId> = self.block_data(*bb)?.preds.iter().copied().collect();
            for pred in preds {
                if let Ok(data) = self.block_data_mut(pred) {
                    data.succs.retain(|succ| *succ != *bb);
                }
            }
        }

        for bb in doomed {
            self.blocks[bb.index()] = None;
        }
        Ok(())
    }

    fn reachable_from_start(&self) -> Result<Vec<bool>> {
        let mut reachable = vec![false; self.blocks.len()];
        let mut stack = vec![self.start];
        while let Some(bb) = stack.pop() {
            if reachable[bb.index()] {
                continue;
            }
            reachable[bb.index()] = true;
            for &succ in &self.block_data(bb)?.succs {
                if !reachable[succ.index()] {
                    stack.push(succ);
                }
            }
        }
        Ok(reachable)
    }

    // ── ISA builders ────────────────────────────────────────────────

    /// A transient builder for dynamic-dialect instructions.
    ///
    /// Each factory consumes the builder, so it cannot be held across
    /// statements: `graph.dyn_isa().create_load_string("x")?`.
    pub fn dyn_isa(&mut self) -> DynamicIsa<'_> {
        DynamicIsa::new(self)
    }

    /// A transient builder for static-dialect instructions.
    pub fn stat_isa(&mut self) -> StaticIsa<'_> {
        StaticIsa::new(self)
    }

    /// Intern `text` into this graph's string table.
    pub fn create_string(&self, text: &str) -> StringId {
        self.strings.intern(text)
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("isa", &self.isa)
            .field("blocks", &self.number_of_blocks())
            .field("insts", &self.number_of_instructions())
            .finish()
    }
}
