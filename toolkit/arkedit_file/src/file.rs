//! The file — top-level owner of everything reachable from an opened
//! container.
//!
//! A [`File`] owns the string table, the structural metadata arenas
//! (modules, classes, functions, fields, annotations, import/export
//! descriptors), the constant pools (values, literals, literal arrays) and
//! the error handler every entity under it reports through. It is a
//! move-only value; its close hook runs exactly once when it is dropped,
//! unless [`File::release`] suppressed it.
//!
//! Graphs are not stored separately: each function carries its own CFG
//! slot, checked out with [`File::take_graph`] and committed back with
//! [`File::set_graph`].

use std::path::Path;
use std::sync::Arc;

use arkedit_core::{
    Error, ErrorHandler, FunctionId, Literal, LogHandler, ModuleId, Resource, Result, StringId,
    StringTable, Value,
};
use arkedit_graph::IsaKind;

use crate::annotation::AnnotationRecord;
use crate::class::{ClassRecord, FieldRecord};
use crate::function::FunctionRecord;
use crate::module::{ExportRecord, ImportRecord, ModuleRecord, NamespaceRecord};

/// Marker owned by the file's close-hook [`Resource`].
#[derive(Debug)]
pub struct CloseGuard {
    name: String,
}

impl CloseGuard {
    /// The owning file's name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An opened (or programmatically built) bytecode container.
pub struct File {
    pub(crate) name: String,
    pub(crate) target: IsaKind,
    pub(crate) strings: Arc<StringTable>,
    pub(crate) handler: Arc<dyn ErrorHandler>,
    pub(crate) modules: Vec<ModuleRecord>,
    pub(crate) namespaces: Vec<NamespaceRecord>,
    pub(crate) classes: Vec<ClassRecord>,
    pub(crate) functions: Vec<FunctionRecord>,
    pub(crate) fields: Vec<FieldRecord>,
    pub(crate) annotations: Vec<AnnotationRecord>,
    pub(crate) imports: Vec<ImportRecord>,
    pub(crate) exports: Vec<ExportRecord>,
    pub(crate) values: Vec<Value>,
    pub(crate) literals: Vec<Literal>,
    pub(crate) literal_arrays: Vec<Vec<arkedit_core::LiteralId>>,
    guard: Resource<CloseGuard>,
}

impl File {
    /// Create an empty container for the given dialect.
    pub fn new(name: impl Into<String>, target: IsaKind) -> Self {
        Self::with_handler(name, target, Arc::new(LogHandler))
    }

    /// Create an empty container with a custom error handler.
    ///
    /// The handler is notified once for every error any operation on this
    /// file — or on a graph checked out of it — surfaces.
    pub fn with_handler(
        name: impl Into<String>,
        target: IsaKind,
        handler: Arc<dyn ErrorHandler>,
    ) -> Self {
        let name = name.into();
        tracing::debug!(%name, ?target, "creating file");
        File {
            guard: Resource::with_deleter(
                CloseGuard { name: name.clone() },
                |guard: &mut CloseGuard| {
                    tracing::debug!(name = %guard.name, "closing file");
                },
            ),
            name,
            target,
            strings: Arc::new(StringTable::new()),
            handler,
            modules: Vec::new(),
            namespaces: Vec::new(),
            classes: Vec::new(),
            functions: Vec::new(),
            fields: Vec::new(),
            annotations: Vec::new(),
            imports: Vec::new(),
            exports: Vec::new(),
            values: Vec::new(),
            literals: Vec::new(),
            literal_arrays: Vec::new(),
        }
    }

    /// Open a container from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_handler(path, Arc::new(LogHandler))
    }

    /// Open a container from disk with a custom error handler.
    pub fn open_with_handler(
        path: impl AsRef<Path>,
        handler: Arc<dyn ErrorHandler>,
    ) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "opening file");
        let result = crate::format::read_file(path, Arc::clone(&handler));
        match result {
            Ok(file) => Ok(file),
            Err(error) => {
                handler.on_error(&error);
                Err(error)
            }
        }
    }

    /// Serialize the current state of this container to `path`.
    ///
    /// Structural round trip: reopening yields the same modules, classes,
    /// functions, blocks and instructions, not necessarily the same bytes.
    /// Fails while any function's graph is checked out.
    pub fn write_abc(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "writing file");
        match crate::format::write_file(self, path) {
            Ok(()) => Ok(()),
            Err(error) => self.fail(error),
        }
    }

    /// Close the container now, running the close hook.
    pub fn close(self) {
        drop(self);
    }

    /// Suppress the close hook and drop the container silently.
    pub fn release(self) {
        let File { guard, .. } = self;
        let _ = guard.release();
    }

    /// Replace the close hook (observability seam for embedders).
    pub fn set_close_hook(
        &mut self,
        hook: impl FnMut(&mut CloseGuard) + Send + 'static,
    ) {
        self.guard.set_deleter(hook);
    }

    /// The container's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The dialect every function in this container uses.
    pub fn target(&self) -> IsaKind {
        self.target
    }

    /// The file-wide string table.
    pub fn strings(&self) -> &Arc<StringTable> {
        &self.strings
    }

    /// Intern `text` into the file-wide string table.
    pub fn create_string(&self, text: &str) -> StringId {
        self.strings.intern(text)
    }

    /// Look up interned text.
    pub fn string(&self, id: StringId) -> Result<Arc<str>> {
        match self.strings.get(id) {
            Some(text) => Ok(text),
            None => self.fail(Error::bad_argument(format!(
                "string id {} is not interned in this file",
                id.raw()
            ))),
        }
    }

    /// Report `error` through the configured handler, then return it.
    pub(crate) fn fail<T>(&self, error: Error) -> Result<T> {
        self.handler.on_error(&error);
        Err(error)
    }

    // ── Enumeration ─────────────────────────────────────────────────

    /// All modules, in creation order.
    pub fn modules(&self) -> Vec<ModuleId> {
        (0..self.modules.len())
            .map(|index| {
                ModuleId::new(
                    u32::try_from(index).unwrap_or_else(|_| panic!("module id overflow")),
                )
            })
            .collect()
    }

    /// Visit modules, stopping early when the callback returns `false`.
    pub fn enumerate_modules(&self, mut callback: impl FnMut(ModuleId) -> bool) -> bool {
        for module in self.modules() {
            if !callback(module) {
                return false;
            }
        }
        true
    }

    /// Every function in the container: module-level functions plus class
    /// methods, walked module by module.
    ///
    /// A convenience composition of the lower-level enumerators.
    pub fn all_functions(&self) -> Vec<FunctionId> {
        let mut result = Vec::new();
        for module in self.modules() {
            if let Ok(functions) = self.module_functions(module) {
                result.extend(functions);
            }
            if let Ok(classes) = self.module_classes(module) {
                for class in classes {
                    if let Ok(methods) = self.class_methods(class) {
                        result.extend(methods);
                    }
                }
            }
        }
        result
    }
}

impl std::fmt::Debug for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("File")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("modules", &self.modules.len())
            .field("functions", &self.functions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests;
