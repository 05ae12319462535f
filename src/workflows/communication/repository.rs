use std::sync::Arc;

use serde_json::{Map, Value};

use crate::store::{
    decode_document, encode_fields, Collection, DocumentFilter, DocumentId, DocumentStore,
    DocumentWrite, RepositoryError, SortOrder,
};

use super::domain::{
    Announcement, AnnouncementDraft, AnnouncementStatus, FeedbackDraft, FeedbackEntry, Message,
    MessageDraft, Notification, NotificationDraft,
};

/// Typed access to the communication collections (announcements,
/// notifications, messages, feedback).
pub struct CommunicationRepository<S> {
    store: Arc<S>,
}

impl<S> Clone for CommunicationRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: DocumentStore> CommunicationRepository<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    fn list<T: serde::de::DeserializeOwned>(
        &self,
        collection: Collection,
        filter: &DocumentFilter,
    ) -> Result<Vec<T>, RepositoryError> {
        let documents = self
            .store
            .get_documents(collection, filter, SortOrder::CreatedDesc)?;
        documents
            .iter()
            .map(|document| decode_document(collection, document))
            .collect()
    }

    // Announcements

    pub fn insert_announcement(
        &self,
        draft: &AnnouncementDraft,
    ) -> Result<Announcement, RepositoryError> {
        let document = self
            .store
            .create_document(Collection::Announcements, encode_fields(draft))?;
        decode_document(Collection::Announcements, &document)
    }

    pub fn list_announcements(&self) -> Result<Vec<Announcement>, RepositoryError> {
        self.list(Collection::Announcements, &DocumentFilter::new())
    }

    pub fn set_announcement_status(
        &self,
        id: &DocumentId,
        status: AnnouncementStatus,
    ) -> Result<Announcement, RepositoryError> {
        let mut fields = Map::new();
        fields.insert(
            "status".to_string(),
            serde_json::to_value(status).unwrap_or_default(),
        );
        let document = self
            .store
            .update_document(Collection::Announcements, id, fields)?;
        decode_document(Collection::Announcements, &document)
    }

    pub fn delete_announcement(&self, id: &DocumentId) -> Result<(), RepositoryError> {
        self.store.delete_document(Collection::Announcements, id)?;
        Ok(())
    }

    // Notifications

    pub fn insert_notification(
        &self,
        draft: &NotificationDraft,
    ) -> Result<Notification, RepositoryError> {
        let mut fields = encode_fields(draft);
        fields.insert("read".to_string(), Value::Bool(false));
        let document = self
            .store
            .create_document(Collection::Notifications, fields)?;
        decode_document(Collection::Notifications, &document)
    }

    pub fn list_notifications(&self) -> Result<Vec<Notification>, RepositoryError> {
        self.list(Collection::Notifications, &DocumentFilter::new())
    }

    pub fn mark_notification_read(&self, id: &DocumentId) -> Result<Notification, RepositoryError> {
        let mut fields = Map::new();
        fields.insert("read".to_string(), Value::Bool(true));
        let document = self
            .store
            .update_document(Collection::Notifications, id, fields)?;
        decode_document(Collection::Notifications, &document)
    }

    /// Flip every unread notification in one batch.
    pub fn mark_all_notifications_read(&self) -> Result<usize, RepositoryError> {
        let unread = self.store.get_documents(
            Collection::Notifications,
            &DocumentFilter::new().field_eq("read", false),
            SortOrder::CreatedDesc,
        )?;

        let writes: Vec<DocumentWrite> = unread
            .iter()
            .map(|document| {
                let mut fields = Map::new();
                fields.insert("read".to_string(), Value::Bool(true));
                DocumentWrite {
                    collection: Collection::Notifications,
                    id: document.id.clone(),
                    fields,
                }
            })
            .collect();

        let count = writes.len();
        if count > 0 {
            self.store.apply(writes)?;
        }
        Ok(count)
    }

    // Messages

    pub fn insert_message(&self, draft: &MessageDraft) -> Result<Message, RepositoryError> {
        let mut fields = encode_fields(draft);
        fields.insert("read".to_string(), Value::Bool(false));
        let document = self.store.create_document(Collection::Messages, fields)?;
        decode_document(Collection::Messages, &document)
    }

    pub fn messages_for(&self, recipient: &str) -> Result<Vec<Message>, RepositoryError> {
        self.list(
            Collection::Messages,
            &DocumentFilter::new().field_eq("recipient", recipient),
        )
    }

    pub fn mark_message_read(&self, id: &DocumentId) -> Result<Message, RepositoryError> {
        let mut fields = Map::new();
        fields.insert("read".to_string(), Value::Bool(true));
        let document = self.store.update_document(Collection::Messages, id, fields)?;
        decode_document(Collection::Messages, &document)
    }

    // Feedback

    pub fn insert_feedback(&self, draft: &FeedbackDraft) -> Result<FeedbackEntry, RepositoryError> {
        let document = self
            .store
            .create_document(Collection::Feedback, encode_fields(draft))?;
        decode_document(Collection::Feedback, &document)
    }

    pub fn list_feedback(&self) -> Result<Vec<FeedbackEntry>, RepositoryError> {
        self.list(Collection::Feedback, &DocumentFilter::new())
    }
}
