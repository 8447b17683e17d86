//! Classes and their fields.

use std::sync::Arc;

use arkedit_core::{
    AnnotationId, ClassId, Error, FieldId, FunctionId, ModuleId, Result, StringId, ValueId,
};
use serde::{Deserialize, Serialize};

use crate::file::File;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct ClassRecord {
    pub(crate) module: ModuleId,
    pub(crate) name: StringId,
    pub(crate) methods: Vec<FunctionId>,
    pub(crate) fields: Vec<FieldId>,
    pub(crate) annotations: Vec<AnnotationId>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct FieldRecord {
    pub(crate) class: ClassId,
    pub(crate) name: StringId,
    pub(crate) value: Option<ValueId>,
}

impl File {
    pub(crate) fn class_record(&self, class: ClassId) -> Result<&ClassRecord> {
        match self.classes.get(class.index()) {
            Some(record) => Ok(record),
            None => self.fail(Error::bad_argument(format!(
                "stale or foreign class handle {}",
                class.raw()
            ))),
        }
    }

    pub(crate) fn class_record_mut(&mut self, class: ClassId) -> Result<&mut ClassRecord> {
        if self.classes.get(class.index()).is_none() {
            return self.fail(Error::bad_argument(format!(
                "stale or foreign class handle {}",
                class.raw()
            )));
        }
        match self.classes.get_mut(class.index()) {
            Some(record) => Ok(record),
            None => unreachable!("validated above"),
        }
    }

    /// Define a class in `module`.
    pub fn add_class(&mut self, module: ModuleId, name: &str) -> Result<ClassId> {
        self.module_record(module)?;
        let id = ClassId::new(
            u32::try_from(self.classes.len()).unwrap_or_else(|_| panic!("class id overflow")),
        );
        let name = self.strings.intern(name);
        self.classes.push(ClassRecord {
            module,
            name,
            methods: Vec::new(),
            fields: Vec::new(),
            annotations: Vec::new(),
        });
        self.module_record_mut(module)?.classes.push(id);
        Ok(id)
    }

    /// The class's name.
    pub fn class_name(&self, class: ClassId) -> Result<Arc<str>> {
        let name = self.class_record(class)?.name;
        self.string(name)
    }

    /// The module that defines the class.
    pub fn class_module(&self, class: ClassId) -> Result<ModuleId> {
        Ok(self.class_record(class)?.module)
    }

    /// Methods of the class, in creation order.
    pub fn class_methods(&self, class: ClassId) -> Result<Vec<FunctionId>> {
        Ok(self.class_record(class)?.methods.clone())
    }

    /// Fields of the class, in creation order.
    pub fn class_fields(&self, class: ClassId) -> Result<Vec<FieldId>> {
        Ok(self.class_record(class)?.fields.clone())
    }

    /// Visit class methods, stopping early when the callback returns
    /// `false`. Returns `false` iff a callback did.
    pub fn enumerate_class_methods(
        &self,
        class: ClassId,
        mut callback: impl FnMut(FunctionId) -> bool,
    ) -> Result<bool> {
        for method in &self.class_record(class)?.methods {
            if !callback(*method) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    // ── Fields ──────────────────────────────────────────────────────

    /// Add a field to `class`, optionally with an initializer value.
    pub fn add_field(
        &mut self,
        class: ClassId,
        name: &str,
        value: Option<ValueId>,
    ) -> Result<FieldId> {
        self.class_record(class)?;
        if let Some(value) = value {
            self.value(value)?;
        }
        let id = FieldId::new(
            u32::try_from(self.fields.len()).unwrap_or_else(|_| panic!("field id overflow")),
        );
        let name = self.strings.intern(name);
        self.fields.push(FieldRecord { class, name, value });
        self.class_record_mut(class)?.fields.push(id);
        Ok(id)
    }

    pub(crate) fn field_record(&self, field: FieldId) -> Result<&FieldRecord> {
        match self.fields.get(field.index()) {
            Some(record) => Ok(record),
            None => self.fail(Error::bad_argument(format!(
                "stale or foreign field handle {}",
                field.raw()
            ))),
        }
    }

    /// The field's name.
    pub fn field_name(&self, field: FieldId) -> Result<Arc<str>> {
        let name = self.field_record(field)?.name;
        self.string(name)
    }

    /// The field's initializer value, if any.
    pub fn field_value(&self, field: FieldId) -> Result<Option<ValueId>> {
        Ok(self.field_record(field)?.value)
    }

    /// The class the field belongs to.
    pub fn field_class(&self, field: FieldId) -> Result<ClassId> {
        Ok(self.field_record(field)?.class)
    }
}
