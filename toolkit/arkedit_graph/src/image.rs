//! Serializable snapshot of a graph, for the container codec.
//!
//! A [`GraphImage`] captures everything a graph owns except the shared
//! string table and error handler, which belong to the file and are
//! re-attached on reconstruction. Arena tombstones are preserved so ids
//! stay stable across a write/open round trip.

use std::sync::Arc;

use arkedit_core::{BlockId, Error, ErrorHandler, InstId, Result, StringTable};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::block::{BlockData, BlockFlags};
use crate::graph::Graph;
use crate::inst::{InstData, Payload};
use crate::opcode::{DynOpcode, IsaKind, Opcode, StatOpcode};

#[derive(Serialize, Deserialize)]
struct BlockImage {
    flags: u16,
    succs: Vec<BlockId>,
    preds: Vec<BlockId>,
    first_inst: Option<InstId>,
    last_inst: Option<InstId>,
}

#[derive(Serialize, Deserialize)]
struct InstImage {
    opcode: Opcode,
    inputs: Vec<InstId>,
    users: Vec<InstId>,
    imms: Vec<u64>,
    payload: Payload,
    block: Option<BlockId>,
    prev: Option<InstId>,
    next: Option<InstId>,
}

/// Opaque serialized form of a [`Graph`].
#[derive(Serialize, Deserialize)]
pub struct GraphImage {
    isa: IsaKind,
    blocks: Vec<Option<BlockImage>>,
    insts: Vec<Option<InstImage>>,
    start: BlockId,
    end: BlockId,
    params: Vec<InstId>,
}

impl Graph {
    /// Snapshot this graph for serialization.
    pub fn to_image(&self) -> GraphImage {
        GraphImage {
            isa: self.isa(),
            blocks: self
                .blocks
                .iter()
                .map(|slot| {
                    slot.as_ref().map(|data| BlockImage {
                        flags: data.flags.bits(),
                        succs: data.succs.to_vec(),
                        preds: data.preds.to_vec(),
                        first_inst: data.first_inst,
                        last_inst: data.last_inst,
                    })
                })
                .collect(),
            insts: self
                .insts
                .iter()
                .map(|slot| {
                    slot.as_ref().map(|data| InstImage {
                        opcode: data.opcode,
                        inputs: data.inputs.to_vec(),
                        users: data.users.to_vec(),
                        imms: data.imms.to_vec(),
                        payload: data.payload,
                        block: data.block,
                        prev: data.prev,
                        next: data.next,
                    })
                })
                .collect(),
            start: self.start_block(),
            end: self.end_block(),
            params: (0..self.number_of_parameters())
                .filter_map(|index| self.parameter(index).ok())
                .collect(),
        }
    }

    /// Rebuild a graph from its image, re-attaching the owning file's
    /// string table and error handler.
    pub fn from_image(
        image: GraphImage,
        strings: Arc<StringTable>,
        handler: Arc<dyn ErrorHandler>,
    ) -> Result<Self> {
        let mut graph = Graph::with_context(image.isa, strings, handler);

        if image.start.index() >= image.blocks.len() || image.end.index() >= image.blocks.len() {
            return Err(Error::BadFormat(
                "graph image start/end out of range".into(),
            ));
        }

        graph.blocks = image
            .blocks
            .into_iter()
            .map(|slot| {
                slot.map(|data| {
                    let mut block = BlockData::new(BlockFlags::from_bits_truncate(data.flags));
                    block.succs = SmallVec::from_vec(data.succs);
                    block.preds = SmallVec::from_vec(data.preds);
                    block.first_inst = data.first_inst;
                    block.last_inst = data.last_inst;
                    block
                })
            })
            .collect();
        graph.insts = image
            .insts
            .into_iter()
            .map(|slot| {
                slot.map(|data| {
                    let mut inst = InstData::new(data.opcode, data.payload);
                    inst.inputs = SmallVec::from_vec(data.inputs);
                    inst.users = SmallVec::from_vec(data.users);
                    inst.imms = SmallVec::from_vec(data.imms);
                    inst.block = data.block;
                    inst.prev = data.prev;
                    inst.next = data.next;
                    inst
                })
            })
            .collect();
        graph.start = image.start;
        graph.end = image.end;
        graph.params = image.params;
        graph.rebuild_constant_pool();
        Ok(graph)
    }

    /// Re-key the constant-dedup map from the instruction arena.
    fn rebuild_constant_pool(&mut self) {
        use crate::graph::ConstKey;

        let mut pool = rustc_hash::FxHashMap::default();
        for (index, slot) in self.insts.iter().enumerate() {
            let Some(data) = slot else { continue };
            let is_constant = matches!(
                data.opcode,
                Opcode::Dynamic(DynOpcode::Constant) | Opcode::Static(StatOpcode::Constant)
            );
            if !is_constant {
                continue;
            }
            let id = InstId::new(
                u32::try_from(index).unwrap_or_else(|_| panic!("instruction id overflow")),
            );
            let key = match data.payload {
                Payload::ConstI32(value) => ConstKey::I32(value),
                Payload::ConstI64(value) => ConstKey::I64(value),
                Payload::ConstU64(value) => ConstKey::U64(value),
                Payload::ConstF64(value) => ConstKey::F64(value.to_bits()),
                _ => continue,
            };
            pool.insert(key, id);
        }
        self.constants = pool;
    }
}
