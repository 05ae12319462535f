use std::sync::Arc;

use serde_json::Value;

use crate::store::{
    decode_document, encode_fields, Collection, DocumentFilter, DocumentId, DocumentStore,
    RepositoryError, SortOrder,
};

use super::domain::{Candidate, CandidateDraft, CandidateUpdate};

/// Typed access to the `candidates` collection.
pub struct CandidateRepository<S> {
    store: Arc<S>,
}

impl<S> Clone for CandidateRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: DocumentStore> CandidateRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn insert(
        &self,
        draft: &CandidateDraft,
        company_id: &str,
    ) -> Result<Candidate, RepositoryError> {
        let mut fields = encode_fields(draft);
        fields.insert("companyId".to_string(), Value::String(company_id.to_string()));

        let document = self.store.create_document(Collection::Candidates, fields)?;
        decode_document(Collection::Candidates, &document)
    }

    pub fn fetch(&self, id: &DocumentId) -> Result<Candidate, RepositoryError> {
        let document = self.store.get_document(Collection::Candidates, id)?;
        decode_document(Collection::Candidates, &document)
    }

    pub fn for_company(&self, company_id: &str) -> Result<Vec<Candidate>, RepositoryError> {
        let documents = self.store.get_documents(
            Collection::Candidates,
            &DocumentFilter::new().field_eq("companyId", company_id),
            SortOrder::CreatedDesc,
        )?;
        documents
            .iter()
            .map(|document| decode_document(Collection::Candidates, document))
            .collect()
    }

    pub fn update(
        &self,
        id: &DocumentId,
        update: &CandidateUpdate,
    ) -> Result<Candidate, RepositoryError> {
        let document =
            self.store
                .update_document(Collection::Candidates, id, encode_fields(update))?;
        decode_document(Collection::Candidates, &document)
    }

    pub fn delete(&self, id: &DocumentId) -> Result<(), RepositoryError> {
        self.store.delete_document(Collection::Candidates, id)?;
        Ok(())
    }
}
