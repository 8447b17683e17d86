//! The on-disk container codec.
//!
//! Layout: 4-byte magic, little-endian `u16` version, then a bincode
//! payload of [`FileImage`]. The payload layout is an implementation
//! detail — the only contract is the structural round trip through
//! [`File::write_abc`](crate::File::write_abc) and
//! [`File::open`](crate::File::open).

use std::path::Path;
use std::sync::Arc;

use arkedit_core::{Error, ErrorHandler, Literal, LiteralId, Result, StringTable, Value};
use arkedit_graph::{Graph, IsaKind};
use serde::{Deserialize, Serialize};

use crate::annotation::AnnotationRecord;
use crate::class::{ClassRecord, FieldRecord};
use crate::file::File;
use crate::function::{FunctionFlags, FunctionImage, FunctionRecord, GraphSlot};
use crate::module::{ExportRecord, ImportRecord, ModuleRecord, NamespaceRecord};

const MAGIC: [u8; 4] = *b"aked";
const VERSION: u16 = 1;

#[derive(Serialize, Deserialize)]
pub(crate) struct FileImage {
    name: String,
    target: IsaKind,
    strings: Vec<String>,
    modules: Vec<ModuleRecord>,
    namespaces: Vec<NamespaceRecord>,
    classes: Vec<ClassRecord>,
    functions: Vec<FunctionImage>,
    fields: Vec<FieldRecord>,
    annotations: Vec<AnnotationRecord>,
    imports: Vec<ImportRecord>,
    exports: Vec<ExportRecord>,
    values: Vec<Value>,
    literals: Vec<Literal>,
    literal_arrays: Vec<Vec<LiteralId>>,
}

pub(crate) fn write_file(file: &File, path: &Path) -> Result<()> {
    let mut functions = Vec::with_capacity(file.functions.len());
    for (index, record) in file.functions.iter().enumerate() {
        let graph = match &record.graph {
            GraphSlot::Present(graph) => Some(graph.to_image()),
            GraphSlot::Absent => None,
            GraphSlot::CheckedOut => {
                return Err(Error::InconsistentState(format!(
                    "cannot serialize while the graph of function {index} is checked out"
                )));
            }
        };
        functions.push(FunctionImage {
            module: record.module,
            class: record.class,
            name: record.name,
            flags: record.flags.bits(),
            annotations: record.annotations.clone(),
            graph,
        });
    }

    let image = FileImage {
        name: file.name.clone(),
        target: file.target,
        strings: file.strings.snapshot(),
        modules: file.modules.clone(),
        namespaces: file.namespaces.clone(),
        classes: file.classes.clone(),
        functions,
        fields: file.fields.clone(),
        annotations: file.annotations.clone(),
        imports: file.imports.clone(),
        exports: file.exports.clone(),
        values: file.values.clone(),
        literals: file.literals.clone(),
        literal_arrays: file.literal_arrays.clone(),
    };

    let payload = bincode::serialize(&image)
        .map_err(|error| Error::BadFormat(format!("encoding failed: {error}")))?;
    let mut bytes = Vec::with_capacity(MAGIC.len() + 2 + payload.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&VERSION.to_le_bytes());
    bytes.extend_from_slice(&payload);
    std::fs::write(path, bytes)?;
    Ok(())
}

pub(crate) fn read_file(path: &Path, handler: Arc<dyn ErrorHandler>) -> Result<File> {
    let bytes = std::fs::read(path)?;

    if bytes.len() < MAGIC.len() + 2 || bytes[..MAGIC.len()] != MAGIC {
        return Err(Error::BadFormat(format!(
            "{} is not an arkedit container",
            path.display()
        )));
    }
    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != VERSION {
        return Err(Error::BadFormat(format!(
            "unsupported container version {version}, expected {VERSION}"
        )));
    }

    let image: FileImage = bincode::deserialize(&bytes[MAGIC.len() + 2..])
        .map_err(|error| Error::BadFormat(format!("decoding failed: {error}")))?;

    let strings = Arc::new(StringTable::from_snapshot(image.strings));

    let mut functions = Vec::with_capacity(image.functions.len());
    for function in image.functions {
        let graph = match function.graph {
            Some(graph_image) => GraphSlot::Present(Graph::from_image(
                graph_image,
                Arc::clone(&strings),
                Arc::clone(&handler),
            )?),
            None => GraphSlot::Absent,
        };
        functions.push(FunctionRecord {
            module: function.module,
            class: function.class,
            name: function.name,
            flags: FunctionFlags::from_bits_truncate(function.flags),
            annotations: function.annotations,
            graph,
        });
    }

    Ok(File::from_parts(
        image.name,
        image.target,
        strings,
        handler,
        image.modules,
        image.namespaces,
        image.classes,
        functions,
        image.fields,
        image.annotations,
        image.imports,
        image.exports,
        image.values,
        image.literals,
        image.literal_arrays,
    ))
}

impl File {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        name: String,
        target: IsaKind,
        strings: Arc<StringTable>,
        handler: Arc<dyn ErrorHandler>,
        modules: Vec<ModuleRecord>,
        namespaces: Vec<NamespaceRecord>,
        classes: Vec<ClassRecord>,
        functions: Vec<FunctionRecord>,
        fields: Vec<FieldRecord>,
        annotations: Vec<AnnotationRecord>,
        imports: Vec<ImportRecord>,
        exports: Vec<ExportRecord>,
        values: Vec<Value>,
        literals: Vec<Literal>,
        literal_arrays: Vec<Vec<LiteralId>>,
    ) -> Self {
        let mut file = File::with_handler(name, target, handler);
        file.strings = strings;
        file.modules = modules;
        file.namespaces = namespaces;
        file.classes = classes;
        file.functions = functions;
        file.fields = fields;
        file.annotations = annotations;
        file.imports = imports;
        file.exports = exports;
        file.values = values;
        file.literals = literals;
        file.literal_arrays = literal_arrays;
        file
    }
}
