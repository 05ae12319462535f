use std::sync::Arc;

use chrono::Utc;

use crate::store::{DocumentId, DocumentStore, RepositoryError};

use super::domain::{
    Competition, CompetitionDraft, CompetitionFormError, CompetitionStatus, ReviewVerdict,
    Submission, SubmissionDraft, SubmissionReview, SubmissionStatus,
};
use super::repository::CompetitionRepository;

/// Service facade for competition management and submission review.
pub struct CompetitionService<S> {
    repository: CompetitionRepository<S>,
}

impl<S: DocumentStore> CompetitionService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            repository: CompetitionRepository::new(store),
        }
    }

    pub fn create(&self, draft: &CompetitionDraft) -> Result<Competition, CompetitionError> {
        draft.validate()?;
        let competition = self.repository.insert(draft)?;
        tracing::info!(competition = %competition.id, "competition created");
        Ok(competition)
    }

    pub fn get(&self, id: &DocumentId) -> Result<Competition, CompetitionError> {
        Ok(self.repository.fetch(id)?)
    }

    pub fn list_all(&self) -> Result<Vec<Competition>, CompetitionError> {
        Ok(self.repository.list_all()?)
    }

    pub fn set_status(
        &self,
        id: &DocumentId,
        status: CompetitionStatus,
    ) -> Result<Competition, CompetitionError> {
        Ok(self.repository.set_status(id, status)?)
    }

    /// Append a participant, honoring the capacity cap and keeping the list
    /// free of duplicates.
    pub fn register(
        &self,
        id: &DocumentId,
        participant: &str,
    ) -> Result<Competition, CompetitionError> {
        let competition = self.repository.fetch(id)?;

        if competition.status == CompetitionStatus::Completed {
            return Err(CompetitionError::ClosedForEntries);
        }
        if competition.is_full() {
            return Err(CompetitionError::CapacityReached {
                max: competition.max_participants,
            });
        }
        if competition
            .participants
            .iter()
            .any(|existing| existing == participant)
        {
            return Err(CompetitionError::AlreadyRegistered {
                participant: participant.to_string(),
            });
        }

        let mut participants = competition.participants;
        participants.push(participant.to_string());
        Ok(self.repository.save_participants(id, &participants)?)
    }

    /// Record a new pending submission with a per-competition sequential id.
    pub fn submit(
        &self,
        id: &DocumentId,
        draft: &SubmissionDraft,
    ) -> Result<Competition, CompetitionError> {
        draft.validate()?;
        let competition = self.repository.fetch(id)?;

        if competition.status == CompetitionStatus::Completed {
            return Err(CompetitionError::ClosedForEntries);
        }

        let mut submissions = competition.submissions;
        let submission = Submission {
            id: format!("sub-{:03}", submissions.len() + 1),
            candidate_name: draft.candidate_name.clone(),
            submission_date: Utc::now(),
            title: draft.title.clone(),
            description: draft.description.clone(),
            links: draft.links.clone(),
            score: None,
            feedback: None,
            status: SubmissionStatus::Pending,
        };
        submissions.push(submission);
        Ok(self.repository.save_submissions(id, &submissions)?)
    }

    /// Score and decide one submission.
    pub fn review(
        &self,
        id: &DocumentId,
        submission_id: &str,
        review: &SubmissionReview,
    ) -> Result<Submission, CompetitionError> {
        let competition = self.repository.fetch(id)?;

        let mut submissions = competition.submissions;
        let target = submissions
            .iter_mut()
            .find(|submission| submission.id == submission_id)
            .ok_or_else(|| CompetitionError::SubmissionNotFound {
                id: submission_id.to_string(),
            })?;

        target.score = review.score;
        target.feedback = review.feedback.clone();
        target.status = match review.verdict {
            ReviewVerdict::Approved => SubmissionStatus::Approved,
            ReviewVerdict::Rejected => SubmissionStatus::Rejected,
        };
        let reviewed = target.clone();

        self.repository.save_submissions(id, &submissions)?;
        tracing::info!(
            competition = %id,
            submission = %reviewed.id,
            total = reviewed.score.map(|score| score.total()).unwrap_or(0),
            "submission reviewed"
        );
        Ok(reviewed)
    }
}

/// Errors raised by competition management.
#[derive(Debug, thiserror::Error)]
pub enum CompetitionError {
    #[error(transparent)]
    Form(#[from] CompetitionFormError),
    #[error("competition is full ({max} participants)")]
    CapacityReached { max: u32 },
    #[error("{participant} is already registered")]
    AlreadyRegistered { participant: String },
    #[error("competition is no longer accepting entries")]
    ClosedForEntries,
    #[error("submission {id} not found")]
    SubmissionNotFound { id: String },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
