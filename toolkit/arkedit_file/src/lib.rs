//! File container and structural metadata for arkedit.
//!
//! This crate provides:
//!
//! - **[`File`]** — the top-level owner: string table, modules, classes,
//!   functions, fields, annotations, import/export descriptors, and the
//!   value/literal/literal-array pools. A file is move-only and runs its
//!   close hook exactly once on drop.
//!
//! - **Structural metadata** — modules contain classes, namespaces and
//!   module-level functions; classes contain methods and fields; functions
//!   carry annotations and (at most) one control-flow graph.
//!
//! - **Graph checkout/commit** — [`File::take_graph`] materializes or
//!   moves a function's CFG out for editing; [`File::set_graph`] commits
//!   it back by value, so a stale edited graph cannot be committed twice.
//!
//! - **The container codec** — [`File::open`] / [`File::write_abc`]
//!   round-trip the whole model through an opaque on-disk format.
//!   Round trips are structural (same modules, functions, blocks and
//!   instructions), not byte-identical.
//!
//! # Ownership
//!
//! Everything reachable from a file — metadata handles, pool entries, and
//! graphs checked out of functions — shares the file's string table and
//! error handler. Handles are plain ids; their validity is bounded by the
//! owning file's lifetime.

pub mod annotation;
pub mod class;
pub mod file;
mod format;
pub mod function;
pub mod module;
pub mod pools;

pub use file::{CloseGuard, File};
pub use function::FunctionFlags;
