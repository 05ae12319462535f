use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::DocumentId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnouncementStatus {
    Draft,
    Active,
}

/// Broadcast posted to one or more audience groups.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: DocumentId,
    pub title: String,
    pub content: String,
    pub audience: Vec<String>,
    pub status: AnnouncementStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementDraft {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub audience: Vec<String>,
    #[serde(default = "default_announcement_status")]
    pub status: AnnouncementStatus,
}

fn default_announcement_status() -> AnnouncementStatus {
    AnnouncementStatus::Draft
}

impl AnnouncementDraft {
    pub fn validate(&self) -> Result<(), CommunicationFormError> {
        if self.title.trim().is_empty() {
            return Err(CommunicationFormError::MissingField("title"));
        }
        if self.content.trim().is_empty() {
            return Err(CommunicationFormError::MissingField("content"));
        }
        if self.audience.is_empty() {
            return Err(CommunicationFormError::EmptyAudience);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Application,
    Submission,
    Reminder,
    Message,
    System,
}

/// In-app notification with a read flag; history is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: DocumentId,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDraft {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

/// Direct message between a recruiter and a candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: DocumentId,
    pub sender: String,
    pub recipient: String,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDraft {
    pub sender: String,
    pub recipient: String,
    pub body: String,
}

impl MessageDraft {
    pub fn validate(&self) -> Result<(), CommunicationFormError> {
        if self.recipient.trim().is_empty() {
            return Err(CommunicationFormError::MissingField("recipient"));
        }
        if self.body.trim().is_empty() {
            return Err(CommunicationFormError::MissingField("body"));
        }
        Ok(())
    }
}

/// Canned outreach template; `[Placeholder]` markers are filled at compose
/// time.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageTemplate {
    pub key: &'static str,
    pub label: &'static str,
    pub body: &'static str,
}

impl MessageTemplate {
    pub fn all() -> [MessageTemplate; 3] {
        [
            MessageTemplate {
                key: "interview-invitation",
                label: "Interview Invitation",
                body: "Dear [Candidate Name], We are pleased to invite you to an interview for the [Position] position. The interview is scheduled for [Date] at [Time]. Please confirm your availability.",
            },
            MessageTemplate {
                key: "application-received",
                label: "Application Received",
                body: "Dear [Candidate Name], Thank you for applying to the [Position] position. We have received your application and will review it shortly.",
            },
            MessageTemplate {
                key: "offer-letter",
                label: "Offer Letter",
                body: "Dear [Candidate Name], We are delighted to offer you the [Position] internship position at our company. Please confirm your acceptance by [Response Date].",
            },
        ]
    }

    pub fn by_key(key: &str) -> Option<MessageTemplate> {
        Self::all().into_iter().find(|template| template.key == key)
    }

    /// Replace `[Name]` markers with supplied values; unmatched markers are
    /// left visible so the sender notices them.
    pub fn fill(&self, values: &[(&str, &str)]) -> String {
        let mut body = self.body.to_string();
        for (marker, value) in values {
            body = body.replace(&format!("[{marker}]"), value);
        }
        body
    }
}

/// One respondent's feedback form: per-category ratings plus a free comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEntry {
    pub id: DocumentId,
    pub candidate_name: String,
    pub categories: BTreeMap<String, f32>,
    #[serde(default)]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FeedbackEntry {
    pub fn average(&self) -> f32 {
        super::feedback::average_rating(&self.categories)
    }

    #[cfg(test)]
    pub(crate) fn sample(candidate: &str, pairs: &[(&str, f32)]) -> Self {
        Self {
            id: DocumentId(format!("fbk-{candidate}")),
            candidate_name: candidate.to_string(),
            categories: pairs
                .iter()
                .map(|(name, rating)| (name.to_string(), *rating))
                .collect(),
            comment: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDraft {
    pub candidate_name: String,
    pub categories: BTreeMap<String, f32>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl FeedbackDraft {
    pub fn validate(&self) -> Result<(), CommunicationFormError> {
        if self.candidate_name.trim().is_empty() {
            return Err(CommunicationFormError::MissingField("candidateName"));
        }
        if self.categories.is_empty() {
            return Err(CommunicationFormError::MissingField("categories"));
        }
        Ok(())
    }
}

/// Validation errors for the communication forms.
#[derive(Debug, thiserror::Error)]
pub enum CommunicationFormError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("announcements need at least one audience group")]
    EmptyAudience,
}
