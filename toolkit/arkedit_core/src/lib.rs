//! Core types for the arkedit toolkit.
//!
//! This crate provides:
//!
//! - **Entity handles** ([`BlockId`], [`InstId`], [`ModuleId`], …) — cheap
//!   `Copy` ids into arenas owned by a graph or a file. Two handles of the
//!   same type are interchangeable iff their raw values are equal.
//!
//! - **String interning** ([`StringTable`]) — an id-addressed string pool
//!   shared (via `Arc`) between a file and the graphs checked out of it.
//!
//! - **Constant-pool payloads** ([`Literal`], [`Value`]) — tagged constants
//!   with typed accessors that fail on tag mismatch instead of returning a
//!   reinterpreted payload.
//!
//! - **Errors** ([`Error`], [`Status`], [`ErrorHandler`]) — the single
//!   error channel every fallible operation in the toolkit reports through.
//!
//! - **Ownership** ([`Resource`]) — a close-hook wrapper for entities that
//!   must run a finalizer exactly once (a file's close hook), with an
//!   explicit release escape hatch.
//!
//! # Crate Dependencies
//!
//! `arkedit_core` sits at the bottom of the workspace: `arkedit_graph` and
//! `arkedit_file` both build on it, and it depends on no other member.

pub mod ids;
pub mod literal;
pub mod resource;
pub mod status;
pub mod strings;
pub mod value;

pub use ids::{
    AnnotationId, BlockId, ClassId, ExportId, FieldId, FunctionId, ImportId, InstId,
    LiteralArrayId, LiteralId, ModuleId, NamespaceId, StringId, ValueId,
};
pub use literal::{Literal, LiteralTag};
pub use resource::{Deleter, Resource};
pub use status::{Error, ErrorHandler, LogHandler, Result, Status};
pub use strings::StringTable;
pub use value::{Value, ValueKind};
