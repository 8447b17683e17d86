//! Annotations attached to functions and classes.
//!
//! An annotation names its interface and carries named elements backed by
//! the file's value pool.

use std::sync::Arc;

use arkedit_core::{AnnotationId, ClassId, Error, FunctionId, Result, StringId, ValueId};
use serde::{Deserialize, Serialize};

use crate::file::File;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct AnnotationRecord {
    pub(crate) interface: StringId,
    pub(crate) elements: Vec<(StringId, ValueId)>,
}

impl File {
    pub(crate) fn annotation_record(&self, annotation: AnnotationId) -> Result<&AnnotationRecord> {
        match self.annotations.get(annotation.index()) {
            Some(record) => Ok(record),
            None => self.fail(Error::bad_argument(format!(
                "stale or foreign annotation handle {}",
                annotation.raw()
            ))),
        }
    }

    fn push_annotation(
        &mut self,
        interface: &str,
        elements: &[(&str, ValueId)],
    ) -> Result<AnnotationId> {
        for (_, value) in elements {
            self.value(*value)?;
        }
        let id = AnnotationId::new(
            u32::try_from(self.annotations.len())
                .unwrap_or_else(|_| panic!("annotation id overflow")),
        );
        let interface = self.strings.intern(interface);
        let elements = elements
            .iter()
            .map(|(name, value)| (self.strings.intern(name), *value))
            .collect();
        self.annotations.push(AnnotationRecord {
            interface,
            elements,
        });
        Ok(id)
    }

    /// Attach an annotation to a function.
    pub fn add_function_annotation(
        &mut self,
        function: FunctionId,
        interface: &str,
        elements: &[(&str, ValueId)],
    ) -> Result<AnnotationId> {
        self.function_record(function)?;
        let id = self.push_annotation(interface, elements)?;
        self.function_record_mut(function)?.annotations.push(id);
        Ok(id)
    }

    /// Attach an annotation to a class.
    pub fn add_class_annotation(
        &mut self,
        class: ClassId,
        interface: &str,
        elements: &[(&str, ValueId)],
    ) -> Result<AnnotationId> {
        self.class_record(class)?;
        let id = self.push_annotation(interface, elements)?;
        self.class_record_mut(class)?.annotations.push(id);
        Ok(id)
    }

    /// Annotations attached to a function.
    pub fn function_annotations(&self, function: FunctionId) -> Result<Vec<AnnotationId>> {
        Ok(self.function_record(function)?.annotations.clone())
    }

    /// Annotations attached to a class.
    pub fn class_annotations(&self, class: ClassId) -> Result<Vec<AnnotationId>> {
        Ok(self.class_record(class)?.annotations.clone())
    }

    /// The annotation's interface name.
    pub fn annotation_interface(&self, annotation: AnnotationId) -> Result<Arc<str>> {
        let interface = self.annotation_record(annotation)?.interface;
        self.string(interface)
    }

    /// The annotation's named elements, in declaration order.
    pub fn annotation_elements(
        &self,
        annotation: AnnotationId,
    ) -> Result<Vec<(StringId, ValueId)>> {
        Ok(self.annotation_record(annotation)?.elements.clone())
    }
}
