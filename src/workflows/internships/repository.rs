use std::sync::Arc;

use serde_json::Value;

use crate::store::{
    decode_document, encode_fields, Collection, DocumentFilter, DocumentId, DocumentStore,
    RepositoryError, SortOrder,
};

use super::domain::{Internship, InternshipDraft, InternshipStatus, InternshipUpdate};

/// Typed access to the `internships` collection. Documents are decoded at
/// this boundary; malformed ones surface as [`RepositoryError::Malformed`].
pub struct InternshipRepository<S> {
    store: Arc<S>,
}

impl<S> Clone for InternshipRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: DocumentStore> InternshipRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Persist a new posting. The application counter and the decision
    /// counters always start at zero regardless of what the form carried.
    pub fn insert(&self, draft: &InternshipDraft, actor: &str) -> Result<Internship, RepositoryError> {
        let status = draft.status.unwrap_or(InternshipStatus::Open);
        let mut fields = encode_fields(draft);
        fields.insert("status".to_string(), Value::String(status.label().to_string()));
        fields.insert("postedBy".to_string(), Value::String(actor.to_string()));
        fields.insert("companyId".to_string(), Value::String(actor.to_string()));
        fields.insert("applications".to_string(), Value::from(0u32));
        fields.insert("acceptedCount".to_string(), Value::from(0u32));
        fields.insert("rejectedCount".to_string(), Value::from(0u32));

        let document = self.store.create_document(Collection::Internships, fields)?;
        decode_document(Collection::Internships, &document)
    }

    pub fn fetch(&self, id: &DocumentId) -> Result<Internship, RepositoryError> {
        let document = self.store.get_document(Collection::Internships, id)?;
        decode_document(Collection::Internships, &document)
    }

    pub fn list_all(&self) -> Result<Vec<Internship>, RepositoryError> {
        self.list(&DocumentFilter::new())
    }

    pub fn for_company(&self, company_id: &str) -> Result<Vec<Internship>, RepositoryError> {
        self.list(&DocumentFilter::new().field_eq("companyId", company_id))
    }

    fn list(&self, filter: &DocumentFilter) -> Result<Vec<Internship>, RepositoryError> {
        let documents =
            self.store
                .get_documents(Collection::Internships, filter, SortOrder::CreatedDesc)?;
        documents
            .iter()
            .map(|document| decode_document(Collection::Internships, document))
            .collect()
    }

    pub fn update(
        &self,
        id: &DocumentId,
        update: &InternshipUpdate,
    ) -> Result<Internship, RepositoryError> {
        let document =
            self.store
                .update_document(Collection::Internships, id, encode_fields(update))?;
        decode_document(Collection::Internships, &document)
    }

    pub fn delete(&self, id: &DocumentId) -> Result<(), RepositoryError> {
        self.store.delete_document(Collection::Internships, id)?;
        Ok(())
    }

    /// Raw counter-field merge used by the application lifecycle; everything
    /// else goes through [`InternshipUpdate`].
    pub(crate) fn update_fields(
        &self,
        id: &DocumentId,
        fields: serde_json::Map<String, Value>,
    ) -> Result<(), RepositoryError> {
        self.store.update_document(Collection::Internships, id, fields)?;
        Ok(())
    }
}
