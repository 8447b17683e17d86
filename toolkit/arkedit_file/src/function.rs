//! Functions and the graph checkout/commit boundary.
//!
//! A function's CFG lives in a slot with three states: absent (never
//! materialized), present, or checked out. [`File::take_graph`] moves the
//! graph out — materializing an empty one bound to the file's string
//! table on first request — and [`File::set_graph`] commits it back by
//! value. Because commit consumes the graph, a stale edited graph cannot
//! be committed twice, and because checkout moves it, two simultaneous
//! editors of one function cannot exist.

use std::sync::Arc;

use arkedit_core::{AnnotationId, ClassId, Error, FunctionId, ModuleId, Result, StringId};
use arkedit_graph::Graph;
use serde::{Deserialize, Serialize};

use crate::file::File;

bitflags::bitflags! {
    /// Structural properties of a function.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct FunctionFlags: u8 {
        const STATIC    = 1 << 0;
        const CTOR      = 1 << 1;
        const ANONYMOUS = 1 << 2;
    }
}

/// The CFG slot of a function.
#[derive(Debug, Default)]
pub(crate) enum GraphSlot {
    /// Never materialized (or loaded without a body).
    #[default]
    Absent,
    /// Owned by the function, ready for checkout.
    Present(Graph),
    /// Moved out by `take_graph`; waiting for `set_graph`.
    CheckedOut,
}

#[derive(Debug)]
pub(crate) struct FunctionRecord {
    pub(crate) module: ModuleId,
    pub(crate) class: Option<ClassId>,
    pub(crate) name: StringId,
    pub(crate) flags: FunctionFlags,
    pub(crate) annotations: Vec<AnnotationId>,
    pub(crate) graph: GraphSlot,
}

/// Serialized form of a function (the graph as an image).
#[derive(Serialize, Deserialize)]
pub(crate) struct FunctionImage {
    pub(crate) module: ModuleId,
    pub(crate) class: Option<ClassId>,
    pub(crate) name: StringId,
    pub(crate) flags: u8,
    pub(crate) annotations: Vec<AnnotationId>,
    pub(crate) graph: Option<arkedit_graph::GraphImage>,
}

impl File {
    pub(crate) fn function_record(&self, function: FunctionId) -> Result<&FunctionRecord> {
        match self.functions.get(function.index()) {
            Some(record) => Ok(record),
            None => self.fail(Error::bad_argument(format!(
                "stale or foreign function handle {}",
                function.raw()
            ))),
        }
    }

    pub(crate) fn function_record_mut(
        &mut self,
        function: FunctionId,
    ) -> Result<&mut FunctionRecord> {
        if self.functions.get(function.index()).is_none() {
            return self.fail(Error::bad_argument(format!(
                "stale or foreign function handle {}",
                function.raw()
            )));
        }
        match self.functions.get_mut(function.index()) {
            Some(record) => Ok(record),
            None => unreachable!("validated above"),
        }
    }

    fn push_function(
        &mut self,
        module: ModuleId,
        class: Option<ClassId>,
        name: &str,
    ) -> FunctionId {
        let id = FunctionId::new(
            u32::try_from(self.functions.len())
                .unwrap_or_else(|_| panic!("function id overflow")),
        );
        let mut flags = FunctionFlags::empty();
        if name.is_empty() {
            flags |= FunctionFlags::ANONYMOUS;
        }
        let name = self.strings.intern(name);
        self.functions.push(FunctionRecord {
            module,
            class,
            name,
            flags,
            annotations: Vec::new(),
            graph: GraphSlot::Absent,
        });
        id
    }

    /// Add a module-level function.
    pub fn add_function(&mut self, module: ModuleId, name: &str) -> Result<FunctionId> {
        self.module_record(module)?;
        let id = self.push_function(module, None, name);
        self.module_record_mut(module)?.functions.push(id);
        Ok(id)
    }

    /// Add a method to `class`.
    pub fn add_method(&mut self, class: ClassId, name: &str) -> Result<FunctionId> {
        let module = self.class_record(class)?.module;
        let id = self.push_function(module, Some(class), name);
        self.class_record_mut(class)?.methods.push(id);
        if name == "constructor" {
            self.function_record_mut(id)?.flags |= FunctionFlags::CTOR;
        }
        Ok(id)
    }

    /// The function's name.
    pub fn function_name(&self, function: FunctionId) -> Result<Arc<str>> {
        let name = self.function_record(function)?.name;
        self.string(name)
    }

    /// The module the function belongs to.
    pub fn function_module(&self, function: FunctionId) -> Result<ModuleId> {
        Ok(self.function_record(function)?.module)
    }

    /// The class the function is a method of, if any.
    pub fn function_class(&self, function: FunctionId) -> Result<Option<ClassId>> {
        Ok(self.function_record(function)?.class)
    }

    /// Structural flags of the function.
    pub fn function_flags(&self, function: FunctionId) -> Result<FunctionFlags> {
        Ok(self.function_record(function)?.flags)
    }

    /// Overwrite the function's structural flags.
    pub fn set_function_flags(&mut self, function: FunctionId, flags: FunctionFlags) -> Result<()> {
        self.function_record_mut(function)?.flags = flags;
        Ok(())
    }

    /// Whether the function is a static method.
    pub fn function_is_static(&self, function: FunctionId) -> Result<bool> {
        Ok(self
            .function_record(function)?
            .flags
            .contains(FunctionFlags::STATIC))
    }

    /// Whether the function is a constructor.
    pub fn function_is_ctor(&self, function: FunctionId) -> Result<bool> {
        Ok(self
            .function_record(function)?
            .flags
            .contains(FunctionFlags::CTOR))
    }

    /// Whether the function has no source-level name.
    pub fn function_is_anonymous(&self, function: FunctionId) -> Result<bool> {
        Ok(self
            .function_record(function)?
            .flags
            .contains(FunctionFlags::ANONYMOUS))
    }

    // ── Graph checkout / commit ─────────────────────────────────────

    /// Check the function's CFG out for editing.
    ///
    /// On first request the graph is materialized empty, bound to this
    /// file's string table and error handler. Checking out while a
    /// previous checkout has not been committed is an inconsistent-state
    /// error.
    pub fn take_graph(&mut self, function: FunctionId) -> Result<Graph> {
        let target = self.target;
        let strings = Arc::clone(&self.strings);
        let handler = Arc::clone(&self.handler);

        let record = self.function_record_mut(function)?;
        match std::mem::replace(&mut record.graph, GraphSlot::CheckedOut) {
            GraphSlot::Present(graph) => {
                tracing::debug!(function = function.raw(), "graph checked out");
                Ok(graph)
            }
            GraphSlot::Absent => {
                tracing::debug!(function = function.raw(), "graph materialized");
                Ok(Graph::with_context(target, strings, handler))
            }
            GraphSlot::CheckedOut => {
                // Keep the slot in its checked-out state.
                self.fail(Error::InconsistentState(format!(
                    "graph of function {} is already checked out",
                    function.raw()
                )))
            }
        }
    }

    /// Commit an edited CFG back into the function.
    ///
    /// The graph must share this file's string table (i.e. it was checked
    /// out of this file, or deliberately built against its table).
    pub fn set_graph(&mut self, function: FunctionId, graph: Graph) -> Result<()> {
        if !Arc::ptr_eq(graph.strings(), &self.strings) {
            return self.fail(Error::bad_argument(format!(
                "graph committed to function {} belongs to a different file",
                function.raw()
            )));
        }
        if graph.isa() != self.target {
            return self.fail(Error::WrongIsa(format!(
                "cannot commit a {:?} graph into a {:?} file",
                graph.isa(),
                self.target
            )));
        }
        tracing::debug!(function = function.raw(), "graph committed");
        self.function_record_mut(function)?.graph = GraphSlot::Present(graph);
        Ok(())
    }

    /// Read-only access to the committed CFG, if present and not checked
    /// out.
    pub fn function_graph(&self, function: FunctionId) -> Result<Option<&Graph>> {
        match &self.function_record(function)?.graph {
            GraphSlot::Present(graph) => Ok(Some(graph)),
            GraphSlot::Absent | GraphSlot::CheckedOut => Ok(None),
        }
    }
}
