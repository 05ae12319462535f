//! Access layer for the document store backing every dashboard collection.
//!
//! The hosted database is an external collaborator; [`DocumentStore`] is the
//! seam the workflow repositories talk through. Documents are schemaless maps
//! on the wire, so each repository decodes them into typed records at this
//! boundary and rejects malformed documents instead of trusting their shape
//! downstream.

mod memory;

pub use memory::MemoryStore;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifier assigned by the store when a document is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(pub String);

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of collections this service reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Internships,
    Applications,
    Candidates,
    Competitions,
    Announcements,
    Notifications,
    Messages,
    Feedback,
}

impl Collection {
    pub const fn name(self) -> &'static str {
        match self {
            Collection::Internships => "internships",
            Collection::Applications => "applications",
            Collection::Candidates => "candidates",
            Collection::Competitions => "competitions",
            Collection::Announcements => "announcements",
            Collection::Notifications => "notifications",
            Collection::Messages => "messages",
            Collection::Feedback => "feedback",
        }
    }

    pub(crate) const fn id_prefix(self) -> &'static str {
        match self {
            Collection::Internships => "int",
            Collection::Applications => "app",
            Collection::Candidates => "cnd",
            Collection::Competitions => "cmp",
            Collection::Announcements => "ann",
            Collection::Notifications => "ntf",
            Collection::Messages => "msg",
            Collection::Feedback => "fbk",
        }
    }
}

/// A stored document: server-assigned id and timestamps plus loose fields.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocumentId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone)]
enum FilterClause {
    Eq(String, Value),
    In(String, Vec<Value>),
}

/// Equality/membership filter over document fields, mirroring the query
/// shapes the dashboard issues (`companyId ==`, `status in [...]`).
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    clauses: Vec<FilterClause>,
}

impl DocumentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.clauses.push(FilterClause::Eq(field.into(), value.into()));
        self
    }

    pub fn field_in(mut self, field: impl Into<String>, values: Vec<Value>) -> Self {
        self.clauses.push(FilterClause::In(field.into(), values));
        self
    }

    pub(crate) fn matches(&self, document: &Document) -> bool {
        self.clauses.iter().all(|clause| match clause {
            FilterClause::Eq(field, expected) => {
                document.fields.get(field) == Some(expected)
            }
            FilterClause::In(field, allowed) => document
                .fields
                .get(field)
                .map(|value| allowed.contains(value))
                .unwrap_or(false),
        })
    }
}

/// Result ordering by document creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    CreatedDesc,
    CreatedAsc,
}

/// One entry of a transactional batch update.
#[derive(Debug, Clone)]
pub struct DocumentWrite {
    pub collection: Collection,
    pub id: DocumentId,
    pub fields: Map<String, Value>,
}

/// Failures raised by the store itself.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document {id} not found in {collection}")]
    NotFound { collection: &'static str, id: String },
    #[error("document store unavailable: {0}")]
    Unavailable(String),
}

/// The external document-store collaborator.
///
/// `apply` updates every listed document or none of them; the application
/// lifecycle relies on it to keep status writes and counter adjustments in a
/// single transaction.
pub trait DocumentStore: Send + Sync {
    fn get_documents(
        &self,
        collection: Collection,
        filter: &DocumentFilter,
        sort: SortOrder,
    ) -> Result<Vec<Document>, StoreError>;

    fn get_document(&self, collection: Collection, id: &DocumentId)
        -> Result<Document, StoreError>;

    fn create_document(
        &self,
        collection: Collection,
        fields: Map<String, Value>,
    ) -> Result<Document, StoreError>;

    fn update_document(
        &self,
        collection: Collection,
        id: &DocumentId,
        fields: Map<String, Value>,
    ) -> Result<Document, StoreError>;

    fn apply(&self, writes: Vec<DocumentWrite>) -> Result<(), StoreError>;

    fn delete_document(&self, collection: Collection, id: &DocumentId) -> Result<(), StoreError>;
}

/// Failures surfaced by the typed repositories layered over the store.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("malformed {collection} document {id}: {detail}")]
    Malformed {
        collection: &'static str,
        id: String,
        detail: String,
    },
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::Store(StoreError::NotFound { .. }))
    }
}

/// Decode a stored document into a typed record, folding the envelope
/// metadata (id, timestamps) into the record fields first.
pub(crate) fn decode_document<T: DeserializeOwned>(
    collection: Collection,
    document: &Document,
) -> Result<T, RepositoryError> {
    let mut fields = document.fields.clone();
    fields.insert("id".to_string(), Value::String(document.id.0.clone()));
    fields.insert(
        "createdAt".to_string(),
        Value::String(document.created_at.to_rfc3339()),
    );
    fields.insert(
        "updatedAt".to_string(),
        Value::String(document.updated_at.to_rfc3339()),
    );

    serde_json::from_value(Value::Object(fields)).map_err(|err| RepositoryError::Malformed {
        collection: collection.name(),
        id: document.id.0.clone(),
        detail: err.to_string(),
    })
}

/// Serialize a record or partial update into store fields. The envelope keys
/// are store-owned and never written back.
pub(crate) fn encode_fields<T: Serialize>(value: &T) -> Map<String, Value> {
    let mut map = match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    map.remove("id");
    map.remove("createdAt");
    map.remove("updatedAt");
    map
}
