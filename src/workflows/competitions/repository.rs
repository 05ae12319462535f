use std::sync::Arc;

use serde_json::{Map, Value};

use crate::store::{
    decode_document, encode_fields, Collection, DocumentFilter, DocumentId, DocumentStore,
    RepositoryError, SortOrder,
};

use super::domain::{Competition, CompetitionDraft, CompetitionStatus, Submission};

/// Typed access to the `competitions` collection. Participant and submission
/// lists live inside the competition document and are written back whole.
pub struct CompetitionRepository<S> {
    store: Arc<S>,
}

impl<S> Clone for CompetitionRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: DocumentStore> CompetitionRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn insert(&self, draft: &CompetitionDraft) -> Result<Competition, RepositoryError> {
        let status = draft.status.unwrap_or(CompetitionStatus::Draft);
        let mut fields = encode_fields(draft);
        fields.insert("status".to_string(), Value::String(status.label().to_string()));
        fields.insert("participants".to_string(), Value::Array(Vec::new()));
        fields.insert("submissions".to_string(), Value::Array(Vec::new()));

        let document = self.store.create_document(Collection::Competitions, fields)?;
        decode_document(Collection::Competitions, &document)
    }

    pub fn fetch(&self, id: &DocumentId) -> Result<Competition, RepositoryError> {
        let document = self.store.get_document(Collection::Competitions, id)?;
        decode_document(Collection::Competitions, &document)
    }

    pub fn list_all(&self) -> Result<Vec<Competition>, RepositoryError> {
        let documents = self.store.get_documents(
            Collection::Competitions,
            &DocumentFilter::new(),
            SortOrder::CreatedDesc,
        )?;
        documents
            .iter()
            .map(|document| decode_document(Collection::Competitions, document))
            .collect()
    }

    pub fn save_participants(
        &self,
        id: &DocumentId,
        participants: &[String],
    ) -> Result<Competition, RepositoryError> {
        let mut fields = Map::new();
        fields.insert(
            "participants".to_string(),
            serde_json::to_value(participants).unwrap_or_default(),
        );
        let document = self.store.update_document(Collection::Competitions, id, fields)?;
        decode_document(Collection::Competitions, &document)
    }

    pub fn save_submissions(
        &self,
        id: &DocumentId,
        submissions: &[Submission],
    ) -> Result<Competition, RepositoryError> {
        let mut fields = Map::new();
        fields.insert(
            "submissions".to_string(),
            serde_json::to_value(submissions).unwrap_or_default(),
        );
        let document = self.store.update_document(Collection::Competitions, id, fields)?;
        decode_document(Collection::Competitions, &document)
    }

    pub fn set_status(
        &self,
        id: &DocumentId,
        status: CompetitionStatus,
    ) -> Result<Competition, RepositoryError> {
        let mut fields = Map::new();
        fields.insert("status".to_string(), Value::String(status.label().to_string()));
        let document = self.store.update_document(Collection::Competitions, id, fields)?;
        decode_document(Collection::Competitions, &document)
    }
}
