use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::DocumentId;

/// Pipeline stage shown on candidate cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStage {
    Pending,
    Review,
    Interview,
    Offer,
}

impl CandidateStage {
    pub const fn label(self) -> &'static str {
        match self {
            CandidateStage::Pending => "pending",
            CandidateStage::Review => "review",
            CandidateStage::Interview => "interview",
            CandidateStage::Offer => "offer",
        }
    }
}

/// A stored candidate profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: DocumentId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub position: Option<String>,
    pub status: CandidateStage,
    /// Reviewer rating on a five-point scale.
    pub rating: f32,
    pub company_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create-form payload for a candidate profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateDraft {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default = "default_stage")]
    pub status: CandidateStage,
    #[serde(default)]
    pub rating: f32,
}

fn default_stage() -> CandidateStage {
    CandidateStage::Pending
}

impl CandidateDraft {
    /// Ratings outside the five-point scale are rejected rather than
    /// repaired; a typo in a review form should bounce back to the reviewer.
    pub fn validate(&self) -> Result<(), CandidateFormError> {
        if self.name.trim().is_empty() {
            return Err(CandidateFormError::MissingField("name"));
        }
        if !self.email.contains('@') {
            return Err(CandidateFormError::InvalidEmail(self.email.clone()));
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(CandidateFormError::RatingOutOfRange(self.rating));
        }
        Ok(())
    }
}

/// Targeted edits to an existing profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CandidateStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
}

impl CandidateUpdate {
    pub fn validate(&self) -> Result<(), CandidateFormError> {
        if let Some(rating) = self.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(CandidateFormError::RatingOutOfRange(rating));
            }
        }
        Ok(())
    }
}

/// Validation errors for the candidate forms.
#[derive(Debug, thiserror::Error)]
pub enum CandidateFormError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("'{0}' is not a usable email address")]
    InvalidEmail(String),
    #[error("rating {0} is outside the 0-5 scale")]
    RatingOutOfRange(f32),
}
