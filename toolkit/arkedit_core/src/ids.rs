//! Entity handles — `u32` newtypes indexing into graph and file arenas.
//!
//! Every entity in the toolkit is addressed by one of these ids. A handle
//! carries no lifetime or back-pointer: validity is bounded by the owning
//! arena (a [`Graph`] for blocks/instructions, a [`File`] for everything
//! else), and arena accessors re-validate handles on every use.
//!
//! Ids are allocated sequentially starting from 0 and are never reused
//! within one arena, so a surviving handle keeps meaning the same entity
//! across structural passes.
//!
//! [`Graph`]: https://docs.rs/arkedit_graph
//! [`File`]: https://docs.rs/arkedit_file

/// Defines a `u32` newtype handle with `new`/`raw`/`index` accessors.
macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create a handle from a raw index.
            #[inline]
            pub fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Get the raw `u32` value.
            #[inline]
            pub fn raw(self) -> u32 {
                self.0
            }

            /// Get the index as `usize` (for indexing into `Vec`s).
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

define_id! {
    /// A basic block within a single graph.
    BlockId
}

define_id! {
    /// An instruction within a single graph.
    InstId
}

define_id! {
    /// An interned string in a [`StringTable`](crate::StringTable).
    StringId
}

define_id! {
    /// A value in a file's value pool.
    ValueId
}

define_id! {
    /// A literal in a file's literal pool.
    LiteralId
}

define_id! {
    /// A literal array in a file's literal-array pool.
    LiteralArrayId
}

define_id! {
    /// A module within a file.
    ModuleId
}

define_id! {
    /// A namespace within a module.
    NamespaceId
}

define_id! {
    /// A class within a module.
    ClassId
}

define_id! {
    /// A function — either a class method or a module-level function.
    FunctionId
}

define_id! {
    /// A field of a class.
    FieldId
}

define_id! {
    /// An annotation attached to a function or a class.
    AnnotationId
}

define_id! {
    /// An import descriptor of a module.
    ImportId
}

define_id! {
    /// An export descriptor of a module.
    ExportId
}
