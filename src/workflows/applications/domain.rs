use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::DocumentId;

/// Where an application sits in the review pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Interview,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Interview => "interview",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A candidate's submission against one internship posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: DocumentId,
    pub internship_id: DocumentId,
    pub company_id: String,
    pub applicant_name: String,
    pub applicant_email: String,
    #[serde(default)]
    pub internship_title: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub resume_link: Option<String>,
    #[serde(default)]
    pub expected_stipend: Option<u32>,
    #[serde(default)]
    pub availability: Option<String>,
    pub status: ApplicationStatus,
    /// The document creation time doubles as the application time.
    #[serde(rename = "createdAt")]
    pub applied_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Intake payload for a new application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDraft {
    pub internship_id: DocumentId,
    pub applicant_name: String,
    pub applicant_email: String,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub resume_link: Option<String>,
    #[serde(default)]
    pub expected_stipend: Option<u32>,
    #[serde(default)]
    pub availability: Option<String>,
}

impl ApplicationDraft {
    pub fn validate(&self) -> Result<(), ApplicationFormError> {
        if self.applicant_name.trim().is_empty() {
            return Err(ApplicationFormError::MissingField("applicantName"));
        }
        if !self.applicant_email.contains('@') {
            return Err(ApplicationFormError::InvalidEmail(
                self.applicant_email.clone(),
            ));
        }
        Ok(())
    }
}

/// Validation errors for the intake form.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationFormError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("'{0}' is not a usable email address")]
    InvalidEmail(String),
}

/// List filters for the candidates screen: status/internship narrowing plus
/// free-text search over the applicant columns.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationQuery {
    #[serde(default)]
    pub status: Option<ApplicationStatus>,
    #[serde(default)]
    pub internship_id: Option<DocumentId>,
    #[serde(default)]
    pub search: Option<String>,
}

impl ApplicationQuery {
    /// In-memory narrowing applied after the store filters, the way the
    /// candidate list filters its fetched page.
    pub(crate) fn matches(&self, application: &Application) -> bool {
        if let Some(needle) = self.search.as_deref() {
            let needle = needle.to_lowercase();
            let haystacks = [
                application.applicant_name.as_str(),
                application.applicant_email.as_str(),
                application.internship_title.as_deref().unwrap_or_default(),
            ];
            if !haystacks
                .iter()
                .any(|hay| hay.to_lowercase().contains(&needle))
            {
                return false;
            }
        }
        true
    }
}
