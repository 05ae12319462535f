use std::sync::Arc;

use serde_json::{Map, Value};

use crate::store::{
    decode_document, encode_fields, Collection, DocumentFilter, DocumentId, DocumentStore,
    DocumentWrite, RepositoryError, SortOrder,
};

use super::domain::{Application, ApplicationDraft, ApplicationStatus};

/// Typed access to the `applications` collection.
pub struct ApplicationRepository<S> {
    store: Arc<S>,
}

impl<S> Clone for ApplicationRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: DocumentStore> ApplicationRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Persist a new application in `pending` state, denormalizing the
    /// company scope and posting title for the list screens.
    pub fn insert(
        &self,
        draft: &ApplicationDraft,
        company_id: &str,
        internship_title: &str,
    ) -> Result<Application, RepositoryError> {
        let mut fields = encode_fields(draft);
        fields.insert(
            "status".to_string(),
            Value::String(ApplicationStatus::Pending.label().to_string()),
        );
        fields.insert("companyId".to_string(), Value::String(company_id.to_string()));
        fields.insert(
            "internshipTitle".to_string(),
            Value::String(internship_title.to_string()),
        );

        let document = self.store.create_document(Collection::Applications, fields)?;
        decode_document(Collection::Applications, &document)
    }

    pub fn fetch(&self, id: &DocumentId) -> Result<Application, RepositoryError> {
        let document = self.store.get_document(Collection::Applications, id)?;
        decode_document(Collection::Applications, &document)
    }

    /// Applications for a company, newest first (`appliedAt` descending),
    /// optionally narrowed by status and posting.
    pub fn for_company(
        &self,
        company_id: &str,
        status: Option<ApplicationStatus>,
        internship_id: Option<&DocumentId>,
    ) -> Result<Vec<Application>, RepositoryError> {
        let mut filter = DocumentFilter::new().field_eq("companyId", company_id);
        if let Some(status) = status {
            filter = filter.field_eq("status", status.label());
        }
        if let Some(internship_id) = internship_id {
            filter = filter.field_eq("internshipId", internship_id.0.as_str());
        }
        self.list(&filter)
    }

    pub fn for_internship(&self, internship_id: &DocumentId) -> Result<Vec<Application>, RepositoryError> {
        self.list(&DocumentFilter::new().field_eq("internshipId", internship_id.0.as_str()))
    }

    fn list(&self, filter: &DocumentFilter) -> Result<Vec<Application>, RepositoryError> {
        let documents =
            self.store
                .get_documents(Collection::Applications, filter, SortOrder::CreatedDesc)?;
        documents
            .iter()
            .map(|document| decode_document(Collection::Applications, document))
            .collect()
    }

    /// Build the status half of a transition batch.
    pub(crate) fn status_write(id: &DocumentId, status: ApplicationStatus) -> DocumentWrite {
        let mut fields = Map::new();
        fields.insert("status".to_string(), Value::String(status.label().to_string()));
        DocumentWrite {
            collection: Collection::Applications,
            id: id.clone(),
            fields,
        }
    }

    /// Apply a transition batch all-or-nothing.
    pub(crate) fn apply(&self, writes: Vec<DocumentWrite>) -> Result<(), RepositoryError> {
        self.store.apply(writes)?;
        Ok(())
    }
}
