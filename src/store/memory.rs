use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::Utc;
use serde_json::{Map, Value};

use super::{
    Collection, Document, DocumentFilter, DocumentId, DocumentStore, DocumentWrite, SortOrder,
    StoreError,
};

/// In-process document store used by the server binary and the test suites.
///
/// A hosted adapter would implement [`DocumentStore`] against the managed
/// database; the semantics here match what the workflows rely on:
/// server-assigned sequential ids, server-assigned timestamps, and
/// all-or-nothing `apply` batches.
pub struct MemoryStore {
    collections: Mutex<HashMap<Collection, BTreeMap<String, Document>>>,
    sequence: AtomicU64,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
            sequence: AtomicU64::new(1),
        }
    }
}

impl MemoryStore {
    fn next_id(&self, collection: Collection) -> DocumentId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        DocumentId(format!("{}-{id:06}", collection.id_prefix()))
    }
}

fn merge(target: &mut Map<String, Value>, fields: Map<String, Value>) {
    for (key, value) in fields {
        target.insert(key, value);
    }
}

impl DocumentStore for MemoryStore {
    fn get_documents(
        &self,
        collection: Collection,
        filter: &DocumentFilter,
        sort: SortOrder,
    ) -> Result<Vec<Document>, StoreError> {
        let guard = self.collections.lock().expect("store mutex poisoned");
        let mut documents: Vec<Document> = guard
            .get(&collection)
            .map(|docs| docs.values().filter(|doc| filter.matches(doc)).cloned().collect())
            .unwrap_or_default();

        // Sequential ids break ties between documents created within the
        // same clock tick.
        documents.sort_by(|a, b| (a.created_at, &a.id).cmp(&(b.created_at, &b.id)));
        if sort == SortOrder::CreatedDesc {
            documents.reverse();
        }

        Ok(documents)
    }

    fn get_document(
        &self,
        collection: Collection,
        id: &DocumentId,
    ) -> Result<Document, StoreError> {
        let guard = self.collections.lock().expect("store mutex poisoned");
        guard
            .get(&collection)
            .and_then(|docs| docs.get(&id.0))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.name(),
                id: id.0.clone(),
            })
    }

    fn create_document(
        &self,
        collection: Collection,
        fields: Map<String, Value>,
    ) -> Result<Document, StoreError> {
        let mut guard = self.collections.lock().expect("store mutex poisoned");
        let now = Utc::now();
        let document = Document {
            id: self.next_id(collection),
            created_at: now,
            updated_at: now,
            fields,
        };

        guard
            .entry(collection)
            .or_default()
            .insert(document.id.0.clone(), document.clone());

        Ok(document)
    }

    fn update_document(
        &self,
        collection: Collection,
        id: &DocumentId,
        fields: Map<String, Value>,
    ) -> Result<Document, StoreError> {
        let mut guard = self.collections.lock().expect("store mutex poisoned");
        let document = guard
            .get_mut(&collection)
            .and_then(|docs| docs.get_mut(&id.0))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.name(),
                id: id.0.clone(),
            })?;

        merge(&mut document.fields, fields);
        document.updated_at = Utc::now();
        Ok(document.clone())
    }

    fn apply(&self, writes: Vec<DocumentWrite>) -> Result<(), StoreError> {
        let mut guard = self.collections.lock().expect("store mutex poisoned");

        // Validate every target before touching any of them so a missing
        // document cannot leave the batch half-applied.
        for write in &writes {
            let present = guard
                .get(&write.collection)
                .map(|docs| docs.contains_key(&write.id.0))
                .unwrap_or(false);
            if !present {
                return Err(StoreError::NotFound {
                    collection: write.collection.name(),
                    id: write.id.0.clone(),
                });
            }
        }

        let now = Utc::now();
        for write in writes {
            if let Some(document) = guard
                .get_mut(&write.collection)
                .and_then(|docs| docs.get_mut(&write.id.0))
            {
                merge(&mut document.fields, write.fields);
                document.updated_at = now;
            }
        }

        Ok(())
    }

    fn delete_document(&self, collection: Collection, id: &DocumentId) -> Result<(), StoreError> {
        let mut guard = self.collections.lock().expect("store mutex poisoned");
        let removed = guard
            .get_mut(&collection)
            .and_then(|docs| docs.remove(&id.0));

        match removed {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound {
                collection: collection.name(),
                id: id.0.clone(),
            }),
        }
    }
}
