use std::sync::Arc;

use crate::store::{Collection, DocumentFilter, DocumentId, DocumentStore, RepositoryError, SortOrder};

use super::domain::{Internship, InternshipDraft, InternshipFormError, InternshipUpdate};
use super::repository::InternshipRepository;

/// Service facade for posting management.
pub struct InternshipService<S> {
    repository: InternshipRepository<S>,
    store: Arc<S>,
}

impl<S: DocumentStore> InternshipService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            repository: InternshipRepository::new(store.clone()),
            store,
        }
    }

    /// Create a posting on behalf of `actor`, who becomes both the owner and
    /// the scoping company.
    pub fn create(
        &self,
        actor: &str,
        draft: &InternshipDraft,
    ) -> Result<Internship, InternshipError> {
        draft.validate()?;
        let internship = self.repository.insert(draft, actor)?;
        tracing::info!(internship = %internship.id, %actor, "internship posted");
        Ok(internship)
    }

    pub fn get(&self, id: &DocumentId) -> Result<Internship, InternshipError> {
        Ok(self.repository.fetch(id)?)
    }

    pub fn list_all(&self) -> Result<Vec<Internship>, InternshipError> {
        Ok(self.repository.list_all()?)
    }

    pub fn for_company(&self, company_id: &str) -> Result<Vec<Internship>, InternshipError> {
        Ok(self.repository.for_company(company_id)?)
    }

    pub fn update(
        &self,
        id: &DocumentId,
        update: &InternshipUpdate,
    ) -> Result<Internship, InternshipError> {
        Ok(self.repository.update(id, update)?)
    }

    /// Delete a posting. Only the user who posted it may remove it; dependent
    /// applications are kept as orphans so the application history stays
    /// append-only.
    pub fn delete(&self, actor: &str, id: &DocumentId) -> Result<(), InternshipError> {
        let internship = self.repository.fetch(id)?;
        if internship.posted_by != actor {
            return Err(InternshipError::NotOwner {
                id: id.0.clone(),
                actor: actor.to_string(),
            });
        }

        let orphaned = self
            .store
            .get_documents(
                Collection::Applications,
                &DocumentFilter::new().field_eq("internshipId", id.0.as_str()),
                SortOrder::CreatedDesc,
            )?
            .len();

        self.repository.delete(id)?;
        if orphaned > 0 {
            tracing::warn!(internship = %id, orphaned, "posting deleted with applications left behind");
        }
        Ok(())
    }
}

/// Errors raised by posting management.
#[derive(Debug, thiserror::Error)]
pub enum InternshipError {
    #[error(transparent)]
    Form(#[from] InternshipFormError),
    #[error("internship {id} is not owned by {actor}")]
    NotOwner { id: String, actor: String },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<crate::store::StoreError> for InternshipError {
    fn from(value: crate::store::StoreError) -> Self {
        Self::Repository(RepositoryError::Store(value))
    }
}
