//! Announcements, notifications, recruiter messaging, and feedback
//! collection.

pub mod domain;
pub mod feedback;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{
    Announcement, AnnouncementDraft, AnnouncementStatus, CommunicationFormError, FeedbackDraft,
    FeedbackEntry, Message, MessageDraft, MessageTemplate, Notification, NotificationDraft,
    NotificationKind,
};
pub use feedback::{average_rating, FeedbackSummary, StarRating};
pub use repository::CommunicationRepository;
pub use router::communication_router;
pub use service::{CommunicationError, CommunicationService};
