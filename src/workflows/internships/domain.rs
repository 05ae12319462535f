use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::store::DocumentId;

/// Where the intern is expected to work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkArrangement {
    Remote,
    Onsite,
    Hybrid,
}

impl WorkArrangement {
    pub const fn label(self) -> &'static str {
        match self {
            WorkArrangement::Remote => "remote",
            WorkArrangement::Onsite => "onsite",
            WorkArrangement::Hybrid => "hybrid",
        }
    }
}

/// Lifecycle of a posting. The stored spelling follows the original
/// documents (`"in progress"` with a space); `"active"` is accepted as a
/// legacy alias for open, which some older postings still carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InternshipStatus {
    #[serde(rename = "draft")]
    Draft,
    #[serde(rename = "open", alias = "active")]
    Open,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "closed")]
    Closed,
}

impl InternshipStatus {
    pub const fn label(self) -> &'static str {
        match self {
            InternshipStatus::Draft => "draft",
            InternshipStatus::Open => "open",
            InternshipStatus::InProgress => "in progress",
            InternshipStatus::Closed => "closed",
        }
    }

    /// Open and in-progress postings count toward the dashboard's active
    /// total.
    pub const fn is_active(self) -> bool {
        matches!(self, InternshipStatus::Open | InternshipStatus::InProgress)
    }
}

/// A stored internship posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Internship {
    pub id: DocumentId,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub arrangement: WorkArrangement,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub stipend: Option<String>,
    pub description: String,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub responsibilities: Option<String>,
    #[serde(default)]
    pub application_deadline: Option<NaiveDate>,
    pub positions: u32,
    #[serde(default)]
    pub skills: Vec<String>,
    pub status: InternshipStatus,
    pub posted_by: String,
    pub company_id: String,
    /// Running total of applications received; only the application intake
    /// path writes it.
    #[serde(default)]
    pub applications: u32,
    #[serde(default)]
    pub accepted_count: u32,
    #[serde(default)]
    pub rejected_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Internship {
    /// Days left until the deadline, clamped at zero once it has passed.
    /// `None` when the posting has no deadline.
    pub fn remaining_days(&self, today: NaiveDate) -> Option<i64> {
        self.application_deadline
            .map(|deadline| (deadline - today).num_days().max(0))
    }

    /// Whether a new application may be submitted against this posting.
    pub fn accepts_applications(&self, today: NaiveDate) -> bool {
        if !self.status.is_active() {
            return false;
        }
        match self.application_deadline {
            Some(deadline) => deadline >= today,
            None => true,
        }
    }
}

/// Create-form payload for a new posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipDraft {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "type", default = "default_arrangement")]
    pub arrangement: WorkArrangement,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub stipend: Option<String>,
    pub description: String,
    #[serde(default)]
    pub requirements: Option<String>,
    #[serde(default)]
    pub responsibilities: Option<String>,
    #[serde(default)]
    pub application_deadline: Option<NaiveDate>,
    #[serde(default = "default_positions")]
    pub positions: u32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub status: Option<InternshipStatus>,
}

fn default_arrangement() -> WorkArrangement {
    WorkArrangement::Remote
}

fn default_positions() -> u32 {
    1
}

impl InternshipDraft {
    pub fn validate(&self) -> Result<(), InternshipFormError> {
        if self.title.trim().is_empty() {
            return Err(InternshipFormError::MissingField("title"));
        }
        if self.company.trim().is_empty() {
            return Err(InternshipFormError::MissingField("company"));
        }
        if self.description.trim().is_empty() {
            return Err(InternshipFormError::MissingField("description"));
        }
        if self.positions == 0 {
            return Err(InternshipFormError::NoPositions);
        }
        Ok(())
    }
}

/// Targeted field edits for an existing posting. Unset fields are left
/// untouched in the stored document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub arrangement: Option<WorkArrangement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stipend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsibilities: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InternshipStatus>,
}

/// Validation errors for the posting forms.
#[derive(Debug, thiserror::Error)]
pub enum InternshipFormError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("positions must be at least 1")]
    NoPositions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn posting(status: InternshipStatus, deadline: Option<NaiveDate>) -> Internship {
        Internship {
            id: DocumentId("int-000001".into()),
            title: "Platform Intern".into(),
            company: "Acme".into(),
            location: None,
            arrangement: WorkArrangement::Remote,
            duration: None,
            stipend: None,
            description: "Build things".into(),
            requirements: None,
            responsibilities: None,
            application_deadline: deadline,
            positions: 2,
            skills: vec!["Rust".into()],
            status,
            posted_by: "user-1".into(),
            company_id: "user-1".into(),
            applications: 0,
            accepted_count: 0,
            rejected_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn remaining_days_clamp_at_zero() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date");
        let open = posting(
            InternshipStatus::Open,
            NaiveDate::from_ymd_opt(2025, 6, 25),
        );
        assert_eq!(open.remaining_days(today), Some(10));

        let past = posting(
            InternshipStatus::Open,
            NaiveDate::from_ymd_opt(2025, 6, 1),
        );
        assert_eq!(past.remaining_days(today), Some(0));

        let undated = posting(InternshipStatus::Open, None);
        assert_eq!(undated.remaining_days(today), None);
    }

    #[test]
    fn only_active_undated_or_future_postings_accept_applications() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date");
        assert!(posting(InternshipStatus::Open, None).accepts_applications(today));
        assert!(posting(InternshipStatus::InProgress, None).accepts_applications(today));
        assert!(!posting(InternshipStatus::Closed, None).accepts_applications(today));
        assert!(!posting(InternshipStatus::Draft, None).accepts_applications(today));
        assert!(!posting(
            InternshipStatus::Open,
            NaiveDate::from_ymd_opt(2025, 6, 1)
        )
        .accepts_applications(today));
    }

    #[test]
    fn legacy_active_status_decodes_as_open() {
        let status: InternshipStatus =
            serde_json::from_value(json!("active")).expect("alias accepted");
        assert_eq!(status, InternshipStatus::Open);
        assert_eq!(serde_json::to_value(status).expect("serializes"), json!("open"));

        let in_progress: InternshipStatus =
            serde_json::from_value(json!("in progress")).expect("stored spelling accepted");
        assert!(in_progress.is_active());
    }

    #[test]
    fn draft_validation_reports_first_missing_field() {
        let draft = InternshipDraft {
            title: " ".into(),
            company: "Acme".into(),
            location: None,
            arrangement: WorkArrangement::Remote,
            duration: None,
            stipend: None,
            description: "desc".into(),
            requirements: None,
            responsibilities: None,
            application_deadline: None,
            positions: 1,
            skills: Vec::new(),
            status: None,
        };
        assert!(matches!(
            draft.validate(),
            Err(InternshipFormError::MissingField("title"))
        ));

        let no_positions = InternshipDraft {
            title: "t".into(),
            positions: 0,
            ..draft
        };
        assert!(matches!(
            no_positions.validate(),
            Err(InternshipFormError::NoPositions)
        ));
    }
}
