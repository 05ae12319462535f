use std::sync::Arc;

use crate::store::{DocumentId, DocumentStore, RepositoryError};

use super::domain::{
    Announcement, AnnouncementDraft, AnnouncementStatus, CommunicationFormError, FeedbackDraft,
    FeedbackEntry, Message, MessageDraft, MessageTemplate, Notification, NotificationDraft,
};
use super::feedback::{summarize, FeedbackSummary};
use super::repository::CommunicationRepository;

/// Service facade for the communication center.
pub struct CommunicationService<S> {
    repository: CommunicationRepository<S>,
}

impl<S: DocumentStore> CommunicationService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            repository: CommunicationRepository::new(store),
        }
    }

    // Announcements

    pub fn create_announcement(
        &self,
        draft: &AnnouncementDraft,
    ) -> Result<Announcement, CommunicationError> {
        draft.validate()?;
        Ok(self.repository.insert_announcement(draft)?)
    }

    pub fn announcements(&self) -> Result<Vec<Announcement>, CommunicationError> {
        Ok(self.repository.list_announcements()?)
    }

    pub fn publish_announcement(&self, id: &DocumentId) -> Result<Announcement, CommunicationError> {
        Ok(self
            .repository
            .set_announcement_status(id, AnnouncementStatus::Active)?)
    }

    pub fn delete_announcement(&self, id: &DocumentId) -> Result<(), CommunicationError> {
        Ok(self.repository.delete_announcement(id)?)
    }

    // Notifications

    pub fn record_notification(
        &self,
        draft: &NotificationDraft,
    ) -> Result<Notification, CommunicationError> {
        Ok(self.repository.insert_notification(draft)?)
    }

    pub fn notifications(&self) -> Result<Vec<Notification>, CommunicationError> {
        Ok(self.repository.list_notifications()?)
    }

    pub fn unread_count(&self) -> Result<usize, CommunicationError> {
        Ok(self
            .repository
            .list_notifications()?
            .iter()
            .filter(|notification| !notification.read)
            .count())
    }

    pub fn mark_read(&self, id: &DocumentId) -> Result<Notification, CommunicationError> {
        Ok(self.repository.mark_notification_read(id)?)
    }

    pub fn mark_all_read(&self) -> Result<usize, CommunicationError> {
        Ok(self.repository.mark_all_notifications_read()?)
    }

    // Messages

    pub fn send_message(&self, draft: &MessageDraft) -> Result<Message, CommunicationError> {
        draft.validate()?;
        let message = self.repository.insert_message(draft)?;
        tracing::info!(message = %message.id, recipient = %message.recipient, "message sent");
        Ok(message)
    }

    pub fn inbox(&self, recipient: &str) -> Result<Vec<Message>, CommunicationError> {
        Ok(self.repository.messages_for(recipient)?)
    }

    pub fn mark_message_read(&self, id: &DocumentId) -> Result<Message, CommunicationError> {
        Ok(self.repository.mark_message_read(id)?)
    }

    pub fn templates(&self) -> [MessageTemplate; 3] {
        MessageTemplate::all()
    }

    // Feedback

    pub fn record_feedback(
        &self,
        draft: &FeedbackDraft,
    ) -> Result<FeedbackEntry, CommunicationError> {
        draft.validate()?;
        Ok(self.repository.insert_feedback(draft)?)
    }

    pub fn feedback(&self) -> Result<Vec<FeedbackEntry>, CommunicationError> {
        Ok(self.repository.list_feedback()?)
    }

    pub fn feedback_summary(&self) -> Result<FeedbackSummary, CommunicationError> {
        let entries = self.repository.list_feedback()?;
        Ok(summarize(&entries))
    }
}

/// Errors raised by the communication center.
#[derive(Debug, thiserror::Error)]
pub enum CommunicationError {
    #[error(transparent)]
    Form(#[from] CommunicationFormError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::workflows::communication::domain::NotificationKind;
    use std::collections::BTreeMap;

    fn service() -> CommunicationService<MemoryStore> {
        CommunicationService::new(Arc::new(MemoryStore::default()))
    }

    fn notification(title: &str) -> NotificationDraft {
        NotificationDraft {
            title: title.into(),
            message: "Alex Johnson has applied for the Web Development internship".into(),
            kind: NotificationKind::Application,
        }
    }

    #[test]
    fn unread_count_tracks_read_marks() {
        let service = service();
        let first = service
            .record_notification(&notification("New Application"))
            .expect("record succeeds");
        service
            .record_notification(&notification("Submission Received"))
            .expect("record succeeds");

        assert_eq!(service.unread_count().expect("count"), 2);

        service.mark_read(&first.id).expect("mark read");
        assert_eq!(service.unread_count().expect("count"), 1);

        let flipped = service.mark_all_read().expect("mark all");
        assert_eq!(flipped, 1);
        assert_eq!(service.unread_count().expect("count"), 0);

        // Idempotent once everything is read.
        assert_eq!(service.mark_all_read().expect("mark all"), 0);
    }

    #[test]
    fn draft_announcements_can_be_published() {
        let service = service();
        let announcement = service
            .create_announcement(&AnnouncementDraft {
                title: "New Web Development Competition".into(),
                content: "Registrations open Monday".into(),
                audience: vec!["All Candidates".into(), "Web Development".into()],
                status: AnnouncementStatus::Draft,
            })
            .expect("create succeeds");
        assert_eq!(announcement.status, AnnouncementStatus::Draft);

        let published = service
            .publish_announcement(&announcement.id)
            .expect("publish succeeds");
        assert_eq!(published.status, AnnouncementStatus::Active);
    }

    #[test]
    fn inbox_is_scoped_to_the_recipient() {
        let service = service();
        service
            .send_message(&MessageDraft {
                sender: "recruiting@acme.example".into(),
                recipient: "Alex Johnson".into(),
                body: "We would like to schedule an interview.".into(),
            })
            .expect("send succeeds");
        service
            .send_message(&MessageDraft {
                sender: "recruiting@acme.example".into(),
                recipient: "Emily Rodriguez".into(),
                body: "Thanks for applying.".into(),
            })
            .expect("send succeeds");

        let inbox = service.inbox("Alex Johnson").expect("inbox");
        assert_eq!(inbox.len(), 1);
        assert!(!inbox[0].read);

        let read = service
            .mark_message_read(&inbox[0].id)
            .expect("mark read");
        assert!(read.read);
    }

    #[test]
    fn feedback_summary_aggregates_recorded_entries() {
        let service = service();
        let mut categories = BTreeMap::new();
        categories.insert("Mentorship".to_string(), 5.0_f32);
        categories.insert("Overall Experience".to_string(), 4.0_f32);

        service
            .record_feedback(&FeedbackDraft {
                candidate_name: "Alex Johnson".into(),
                categories,
                comment: Some("Great experience".into()),
            })
            .expect("record succeeds");

        let summary = service.feedback_summary().expect("summary");
        assert_eq!(summary.entries, 1);
        assert!((summary.average - 4.5).abs() < 1e-6);
        assert!(summary.stars.half);
    }
}
