use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::store::DocumentId;

use super::scoring::RubricScore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitionStatus {
    Draft,
    Active,
    Completed,
}

impl CompetitionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CompetitionStatus::Draft => "draft",
            CompetitionStatus::Active => "active",
            CompetitionStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
}

/// A project entry submitted against a competition. Stored as an ordered
/// child record inside the competition document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub candidate_name: String,
    pub submission_date: DateTime<Utc>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub score: Option<RubricScore>,
    #[serde(default)]
    pub feedback: Option<String>,
    pub status: SubmissionStatus,
}

/// A stored competition with its ordered participant and submission lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    pub id: DocumentId,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub skills_required: Vec<String>,
    pub max_participants: u32,
    pub status: CompetitionStatus,
    #[serde(default)]
    pub evaluation_criteria: Option<String>,
    #[serde(default)]
    pub prize_details: Option<String>,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub submissions: Vec<Submission>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Competition {
    pub fn is_full(&self) -> bool {
        self.participants.len() as u32 >= self.max_participants
    }

    pub fn submission(&self, submission_id: &str) -> Option<&Submission> {
        self.submissions
            .iter()
            .find(|submission| submission.id == submission_id)
    }
}

/// Create-form payload for a competition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionDraft {
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default = "default_max_participants")]
    pub max_participants: u32,
    #[serde(default)]
    pub evaluation_criteria: Option<String>,
    #[serde(default)]
    pub prize_details: Option<String>,
    #[serde(default)]
    pub status: Option<CompetitionStatus>,
}

fn default_max_participants() -> u32 {
    50
}

impl CompetitionDraft {
    pub fn validate(&self) -> Result<(), CompetitionFormError> {
        if self.title.trim().is_empty() {
            return Err(CompetitionFormError::MissingField("title"));
        }
        if self.description.trim().is_empty() {
            return Err(CompetitionFormError::MissingField("description"));
        }
        if self.end_date <= self.start_date {
            return Err(CompetitionFormError::DatesOutOfOrder {
                start: self.start_date,
                end: self.end_date,
            });
        }
        if self.max_participants == 0 {
            return Err(CompetitionFormError::NoCapacity);
        }
        Ok(())
    }
}

/// Intake payload for a new submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionDraft {
    pub candidate_name: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

impl SubmissionDraft {
    pub fn validate(&self) -> Result<(), CompetitionFormError> {
        if self.candidate_name.trim().is_empty() {
            return Err(CompetitionFormError::MissingField("candidateName"));
        }
        if self.title.trim().is_empty() {
            return Err(CompetitionFormError::MissingField("title"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewVerdict {
    Approved,
    Rejected,
}

/// A reviewer's decision on one submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReview {
    pub verdict: ReviewVerdict,
    #[serde(default)]
    pub score: Option<RubricScore>,
    #[serde(default)]
    pub feedback: Option<String>,
}

/// Validation errors for the competition forms.
#[derive(Debug, thiserror::Error)]
pub enum CompetitionFormError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("end date {end} must come after start date {start}")]
    DatesOutOfOrder { start: NaiveDate, end: NaiveDate },
    #[error("maximum participants must be at least 1")]
    NoCapacity,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> CompetitionDraft {
        CompetitionDraft {
            title: "UI/UX Design Challenge".into(),
            description: "Design a dashboard".into(),
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date"),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 15).expect("valid date"),
            skills_required: vec!["Figma".into()],
            max_participants: 50,
            evaluation_criteria: None,
            prize_details: None,
            status: Some(CompetitionStatus::Active),
        }
    }

    #[test]
    fn dates_must_be_ordered() {
        let mut bad = draft();
        bad.end_date = bad.start_date;
        assert!(matches!(
            bad.validate(),
            Err(CompetitionFormError::DatesOutOfOrder { .. })
        ));

        assert!(draft().validate().is_ok());
    }

    #[test]
    fn required_fields_are_enforced() {
        let mut bad = draft();
        bad.title = "  ".into();
        assert!(matches!(
            bad.validate(),
            Err(CompetitionFormError::MissingField("title"))
        ));
    }
}
