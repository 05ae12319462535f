use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::store::{
    Collection, Document, DocumentFilter, DocumentId, DocumentStore, DocumentWrite, MemoryStore,
    SortOrder, StoreError,
};
use crate::workflows::applications::domain::ApplicationDraft;
use crate::workflows::applications::service::ApplicationService;
use crate::workflows::internships::{
    Internship, InternshipDraft, InternshipService, InternshipStatus, WorkArrangement,
};

pub(super) const COMPANY: &str = "user-acme";

pub(super) fn posting_draft() -> InternshipDraft {
    InternshipDraft {
        title: "Frontend Developer Internship".into(),
        company: "Acme".into(),
        location: Some("Remote".into()),
        arrangement: WorkArrangement::Remote,
        duration: Some("3 months".into()),
        stipend: Some("1200".into()),
        description: "Ship dashboard features with the web team".into(),
        requirements: None,
        responsibilities: None,
        application_deadline: None,
        positions: 2,
        skills: vec!["React".into(), "TypeScript".into()],
        status: Some(InternshipStatus::Open),
    }
}

pub(super) fn application_draft(internship: &Internship, applicant: &str) -> ApplicationDraft {
    ApplicationDraft {
        internship_id: internship.id.clone(),
        applicant_name: applicant.to_string(),
        applicant_email: format!(
            "{}@example.com",
            applicant.to_lowercase().replace(' ', ".")
        ),
        cover_letter: Some("I would love to join.".into()),
        resume_link: Some("https://example.com/resume.pdf".into()),
        expected_stipend: Some(1200),
        availability: Some("Immediate".into()),
    }
}

pub(super) struct Fixture {
    pub(super) store: Arc<MemoryStore>,
    pub(super) internships: InternshipService<MemoryStore>,
    pub(super) applications: ApplicationService<MemoryStore>,
}

pub(super) fn fixture() -> Fixture {
    let store = Arc::new(MemoryStore::default());
    Fixture {
        internships: InternshipService::new(store.clone()),
        applications: ApplicationService::new(store.clone()),
        store,
    }
}

impl Fixture {
    pub(super) fn open_posting(&self) -> Internship {
        self.internships
            .create(COMPANY, &posting_draft())
            .expect("posting created")
    }

    pub(super) fn posting(&self, id: &DocumentId) -> Internship {
        self.internships.get(id).expect("posting present")
    }
}

/// Store wrapper that fails every call, for exercising the unavailable
/// branch of the handlers.
pub(super) struct OfflineStore;

impl DocumentStore for OfflineStore {
    fn get_documents(
        &self,
        _collection: Collection,
        _filter: &DocumentFilter,
        _sort: SortOrder,
    ) -> Result<Vec<Document>, StoreError> {
        Err(StoreError::Unavailable("store offline".into()))
    }

    fn get_document(
        &self,
        _collection: Collection,
        _id: &DocumentId,
    ) -> Result<Document, StoreError> {
        Err(StoreError::Unavailable("store offline".into()))
    }

    fn create_document(
        &self,
        _collection: Collection,
        _fields: serde_json::Map<String, Value>,
    ) -> Result<Document, StoreError> {
        Err(StoreError::Unavailable("store offline".into()))
    }

    fn update_document(
        &self,
        _collection: Collection,
        _id: &DocumentId,
        _fields: serde_json::Map<String, Value>,
    ) -> Result<Document, StoreError> {
        Err(StoreError::Unavailable("store offline".into()))
    }

    fn apply(&self, _writes: Vec<DocumentWrite>) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".into()))
    }

    fn delete_document(&self, _collection: Collection, _id: &DocumentId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".into()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
