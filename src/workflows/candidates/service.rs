use std::sync::Arc;

use crate::store::{DocumentId, DocumentStore, RepositoryError};

use super::domain::{
    Candidate, CandidateDraft, CandidateFormError, CandidateStage, CandidateUpdate,
};
use super::repository::CandidateRepository;

/// Service facade for candidate profiles.
pub struct CandidateService<S> {
    repository: CandidateRepository<S>,
}

impl<S: DocumentStore> CandidateService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            repository: CandidateRepository::new(store),
        }
    }

    pub fn add(
        &self,
        company_id: &str,
        draft: &CandidateDraft,
    ) -> Result<Candidate, CandidateError> {
        draft.validate()?;
        Ok(self.repository.insert(draft, company_id)?)
    }

    pub fn get(&self, id: &DocumentId) -> Result<Candidate, CandidateError> {
        Ok(self.repository.fetch(id)?)
    }

    /// Company-scoped listing with stage filtering and free-text search over
    /// the visible columns.
    pub fn for_company(
        &self,
        company_id: &str,
        stage: Option<CandidateStage>,
        search: Option<&str>,
    ) -> Result<Vec<Candidate>, CandidateError> {
        let candidates = self.repository.for_company(company_id)?;
        let needle = search.map(str::to_lowercase);

        Ok(candidates
            .into_iter()
            .filter(|candidate| stage.map_or(true, |stage| candidate.status == stage))
            .filter(|candidate| {
                needle.as_deref().map_or(true, |needle| {
                    candidate.name.to_lowercase().contains(needle)
                        || candidate.email.to_lowercase().contains(needle)
                        || candidate
                            .position
                            .as_deref()
                            .unwrap_or_default()
                            .to_lowercase()
                            .contains(needle)
                })
            })
            .collect())
    }

    /// Highest-rated profiles for the dashboard sidebar.
    pub fn top_rated(&self, company_id: &str, limit: usize) -> Result<Vec<Candidate>, CandidateError> {
        let mut candidates = self.repository.for_company(company_id)?;
        candidates.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        candidates.truncate(limit);
        Ok(candidates)
    }

    pub fn update(
        &self,
        id: &DocumentId,
        update: &CandidateUpdate,
    ) -> Result<Candidate, CandidateError> {
        update.validate()?;
        Ok(self.repository.update(id, update)?)
    }

    pub fn delete(&self, id: &DocumentId) -> Result<(), CandidateError> {
        Ok(self.repository.delete(id)?)
    }
}

/// Errors raised by candidate management.
#[derive(Debug, thiserror::Error)]
pub enum CandidateError {
    #[error(transparent)]
    Form(#[from] CandidateFormError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
