use std::collections::BTreeMap;

use crate::store::{PrefOp, PrefValue, PreferenceStore, StoreError};

/// In-process preference store for tests and dry runs. Mirrors the device
/// store's batch semantics, including the option to refuse commits so
/// callers' fail-fast paths can be exercised.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, PrefValue>,
    reject_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Make every subsequent `apply` fail with `WriteRejected`.
    pub fn reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<PrefValue>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    async fn apply(&mut self, ops: Vec<PrefOp>) -> Result<(), StoreError> {
        if self.reject_writes {
            return Err(StoreError::WriteRejected(
                "memory store configured to refuse commits".to_string(),
            ));
        }
        for op in ops {
            match op {
                PrefOp::Put { key, value } => {
                    self.values.insert(key, value);
                }
                PrefOp::Remove { key } => {
                    self.values.remove(&key);
                }
            }
        }
        Ok(())
    }
}
