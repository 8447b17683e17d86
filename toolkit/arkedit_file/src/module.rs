//! Modules, namespaces and import/export descriptors.
//!
//! A module owns (by id) its classes, module-level functions, namespaces
//! and import/export descriptors. All operations live on [`File`], which
//! validates every handle against its arenas.

use std::sync::Arc;

use arkedit_core::{ClassId, Error, ExportId, FunctionId, ImportId, ModuleId, NamespaceId, Result, StringId};
use serde::{Deserialize, Serialize};

use crate::file::File;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct ModuleRecord {
    pub(crate) name: StringId,
    pub(crate) classes: Vec<ClassId>,
    pub(crate) functions: Vec<FunctionId>,
    pub(crate) namespaces: Vec<NamespaceId>,
    pub(crate) imports: Vec<ImportId>,
    pub(crate) exports: Vec<ExportId>,
    /// External modules are referenced but not defined in this container.
    pub(crate) external: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct NamespaceRecord {
    pub(crate) module: ModuleId,
    pub(crate) name: StringId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct ImportRecord {
    pub(crate) module: ModuleId,
    pub(crate) name: StringId,
    pub(crate) alias: StringId,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct ExportRecord {
    pub(crate) module: ModuleId,
    pub(crate) name: StringId,
    pub(crate) alias: StringId,
}

impl File {
    pub(crate) fn module_record(&self, module: ModuleId) -> Result<&ModuleRecord> {
        match self.modules.get(module.index()) {
            Some(record) => Ok(record),
            None => self.fail(Error::bad_argument(format!(
                "stale or foreign module handle {}",
                module.raw()
            ))),
        }
    }

    pub(crate) fn module_record_mut(&mut self, module: ModuleId) -> Result<&mut ModuleRecord> {
        if self.modules.get(module.index()).is_none() {
            return self.fail(Error::bad_argument(format!(
                "stale or foreign module handle {}",
                module.raw()
            )));
        }
        match self.modules.get_mut(module.index()) {
            Some(record) => Ok(record),
            None => unreachable!("validated above"),
        }
    }

    /// Add a module defined in this container.
    pub fn add_module(&mut self, name: &str) -> ModuleId {
        self.push_module(name, false)
    }

    /// Register an external module (referenced by imports only).
    pub fn add_external_module(&mut self, name: &str) -> ModuleId {
        self.push_module(name, true)
    }

    fn push_module(&mut self, name: &str, external: bool) -> ModuleId {
        let id = ModuleId::new(
            u32::try_from(self.modules.len()).unwrap_or_else(|_| panic!("module id overflow")),
        );
        let name = self.strings.intern(name);
        self.modules.push(ModuleRecord {
            name,
            classes: Vec::new(),
            functions: Vec::new(),
            namespaces: Vec::new(),
            imports: Vec::new(),
            exports: Vec::new(),
            external,
        });
        id
    }

    /// The module's name.
    pub fn module_name(&self, module: ModuleId) -> Result<Arc<str>> {
        let name = self.module_record(module)?.name;
        self.string(name)
    }

    /// Whether the module is external to this container.
    pub fn module_is_external(&self, module: ModuleId) -> Result<bool> {
        Ok(self.module_record(module)?.external)
    }

    /// Classes defined by the module, in creation order.
    pub fn module_classes(&self, module: ModuleId) -> Result<Vec<ClassId>> {
        Ok(self.module_record(module)?.classes.clone())
    }

    /// Module-level functions, in creation order.
    pub fn module_functions(&self, module: ModuleId) -> Result<Vec<FunctionId>> {
        Ok(self.module_record(module)?.functions.clone())
    }

    /// Namespaces declared by the module.
    pub fn module_namespaces(&self, module: ModuleId) -> Result<Vec<NamespaceId>> {
        Ok(self.module_record(module)?.namespaces.clone())
    }

    /// Declare a namespace within `module`.
    pub fn add_namespace(&mut self, module: ModuleId, name: &str) -> Result<NamespaceId> {
        self.module_record(module)?;
        let id = NamespaceId::new(
            u32::try_from(self.namespaces.len())
                .unwrap_or_else(|_| panic!("namespace id overflow")),
        );
        let name = self.strings.intern(name);
        self.namespaces.push(NamespaceRecord { module, name });
        self.module_record_mut(module)?.namespaces.push(id);
        Ok(id)
    }

    /// The namespace's name.
    pub fn namespace_name(&self, namespace: NamespaceId) -> Result<Arc<str>> {
        match self.namespaces.get(namespace.index()) {
            Some(record) => self.string(record.name),
            None => self.fail(Error::bad_argument(format!(
                "stale or foreign namespace handle {}",
                namespace.raw()
            ))),
        }
    }

    // ── Imports ─────────────────────────────────────────────────────

    /// Record that `module` imports `name` (bound locally as `alias`).
    pub fn add_import(&mut self, module: ModuleId, name: &str, alias: &str) -> Result<ImportId> {
        self.module_record(module)?;
        let id = ImportId::new(
            u32::try_from(self.imports.len()).unwrap_or_else(|_| panic!("import id overflow")),
        );
        let name = self.strings.intern(name);
        let alias = self.strings.intern(alias);
        self.imports.push(ImportRecord {
            module,
            name,
            alias,
        });
        self.module_record_mut(module)?.imports.push(id);
        Ok(id)
    }

    /// Import descriptors of `module`.
    pub fn module_imports(&self, module: ModuleId) -> Result<Vec<ImportId>> {
        Ok(self.module_record(module)?.imports.clone())
    }

    pub(crate) fn import_record(&self, import: ImportId) -> Result<&ImportRecord> {
        match self.imports.get(import.index()) {
            Some(record) => Ok(record),
            None => self.fail(Error::bad_argument(format!(
                "stale or foreign import handle {}",
                import.raw()
            ))),
        }
    }

    /// The imported name.
    pub fn import_name(&self, import: ImportId) -> Result<Arc<str>> {
        let name = self.import_record(import)?.name;
        self.string(name)
    }

    /// The local alias the import is bound to.
    pub fn import_alias(&self, import: ImportId) -> Result<Arc<str>> {
        let alias = self.import_record(import)?.alias;
        self.string(alias)
    }

    // ── Exports ─────────────────────────────────────────────────────

    /// Record that `module` exports `name` under `alias`.
    pub fn add_export(&mut self, module: ModuleId, name: &str, alias: &str) -> Result<ExportId> {
        self.module_record(module)?;
        let id = ExportId::new(
            u32::try_from(self.exports.len()).unwrap_or_else(|_| panic!("export id overflow")),
        );
        let name = self.strings.intern(name);
        let alias = self.strings.intern(alias);
        self.exports.push(ExportRecord {
            module,
            name,
            alias,
        });
        self.module_record_mut(module)?.exports.push(id);
        Ok(id)
    }

    /// Export descriptors of `module`.
    pub fn module_exports(&self, module: ModuleId) -> Result<Vec<ExportId>> {
        Ok(self.module_record(module)?.exports.clone())
    }

    pub(crate) fn export_record(&self, export: ExportId) -> Result<&ExportRecord> {
        match self.exports.get(export.index()) {
            Some(record) => Ok(record),
            None => self.fail(Error::bad_argument(format!(
                "stale or foreign export handle {}",
                export.raw()
            ))),
        }
    }

    /// The exported name.
    pub fn export_name(&self, export: ExportId) -> Result<Arc<str>> {
        let name = self.export_record(export)?.name;
        self.string(name)
    }

    /// The name the export is visible under.
    pub fn export_alias(&self, export: ExportId) -> Result<Arc<str>> {
        let alias = self.export_record(export)?.alias;
        self.string(alias)
    }
}
