//! Id-addressed string pool shared between a file and its graphs.
//!
//! Interning is idempotent: the same text always maps to the same
//! [`StringId`]. The table is internally locked so a `File` and the graphs
//! checked out of it can share one pool through `Arc<StringTable>` —
//! instruction builders intern operand strings into the owning file's pool
//! without needing a mutable path back to it.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::ids::StringId;

#[derive(Default)]
struct TableInner {
    map: FxHashMap<Arc<str>, u32>,
    strings: Vec<Arc<str>>,
}

/// Interning string pool.
pub struct StringTable {
    inner: RwLock<TableInner>,
}

impl StringTable {
    /// Create an empty pool.
    pub fn new() -> Self {
        StringTable {
            inner: RwLock::new(TableInner::default()),
        }
    }

    /// Intern `text`, returning its id. Idempotent.
    pub fn intern(&self, text: &str) -> StringId {
        // Fast path: already interned.
        {
            let guard = self.inner.read();
            if let Some(&id) = guard.map.get(text) {
                return StringId::new(id);
            }
        }

        let mut guard = self.inner.write();

        // Double-check after acquiring the write lock.
        if let Some(&id) = guard.map.get(text) {
            return StringId::new(id);
        }

        let id = u32::try_from(guard.strings.len())
            .unwrap_or_else(|_| panic!("string pool exceeds u32::MAX entries"));
        let shared: Arc<str> = Arc::from(text);
        guard.strings.push(Arc::clone(&shared));
        guard.map.insert(shared, id);
        StringId::new(id)
    }

    /// Look up the text for an id, if the id belongs to this pool.
    pub fn get(&self, id: StringId) -> Option<Arc<str>> {
        let guard = self.inner.read();
        guard.strings.get(id.index()).map(Arc::clone)
    }

    /// Number of distinct strings interned.
    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    /// Whether the pool has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the pool in id order, for serialization.
    pub fn snapshot(&self) -> Vec<String> {
        let guard = self.inner.read();
        guard.strings.iter().map(|s| s.to_string()).collect()
    }

    /// Rebuild a pool from a serialized snapshot, preserving ids.
    pub fn from_snapshot(strings: Vec<String>) -> Self {
        let table = StringTable::new();
        {
            let mut guard = table.inner.write();
            for (index, text) in strings.into_iter().enumerate() {
                let id = u32::try_from(index)
                    .unwrap_or_else(|_| panic!("string pool exceeds u32::MAX entries"));
                let shared: Arc<str> = Arc::from(text.as_str());
                guard.strings.push(Arc::clone(&shared));
                guard.map.insert(shared, id);
            }
        }
        table
    }
}

impl Default for StringTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StringTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringTable")
            .field("len", &self.len())
            .finish()
    }
}
