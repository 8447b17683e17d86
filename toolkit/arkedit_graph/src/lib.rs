//! Control-flow-graph IR for arkedit.
//!
//! This crate provides:
//!
//! - **[`Graph`]** — the owner of a function body: two tombstoned arenas
//!   (basic blocks and instructions), the start/end blocks, parameters,
//!   and a deduplicating constant pool.
//!
//! - **Block operations** — ordered successor/predecessor edges with
//!   symmetric maintenance, structural flags (loop/try/catch roles),
//!   instruction chains, splitting, and visitors with find-style early
//!   termination.
//!
//! - **Dominance** ([`DominatorTree`]) — Cooper-Harvey-Kennedy immediate
//!   dominators, block and instruction dominance queries, and a
//!   short-circuiting dominated-blocks visitor.
//!
//! - **ISA builders** ([`DynamicIsa`], [`StaticIsa`]) — one factory per
//!   opcode of the graph's dialect. Builders are transient: each factory
//!   consumes the builder, so one cannot be held across statements.
//!
//! # Editing model
//!
//! Everything is addressed by `Copy` ids ([`BlockId`](arkedit_core::BlockId),
//! [`InstId`](arkedit_core::InstId)); reads take `&Graph`, mutations take
//! `&mut Graph`. Eager enumerations (`succs`, `blocks_rpo`, `instructions`)
//! copy ids out before caller code runs, so mutating the graph while
//! iterating a previously captured vector is safe — the vector just goes
//! stale.

pub mod block;
pub mod dom;
pub mod dyn_isa;
pub mod graph;
#[cfg(feature = "serde")]
pub mod image;
pub mod inst;
pub mod opcode;
pub mod stat_isa;
#[cfg(test)]
mod test_helpers;
mod traverse;

pub use block::BlockFlags;
#[cfg(feature = "serde")]
pub use image::GraphImage;
pub use dom::DominatorTree;
pub use dyn_isa::DynamicIsa;
pub use graph::Graph;
pub use opcode::{ConditionCode, DynOpcode, IsaKind, Opcode, StatOpcode};
pub use stat_isa::StaticIsa;
