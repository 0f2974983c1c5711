//! In-memory conversation store implementation
//!
//! Implements the ConversationStore port with a process-local map.

use std::collections::HashMap;

use application::{error::ApplicationError, ports::ConversationStore};
use async_trait::async_trait;
use domain::{entities::Conversation, value_objects::ConversationId};
use parking_lot::RwLock;
use tracing::{debug, instrument};

/// Process-local conversation store
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    conversations: RwLock<HashMap<ConversationId, Conversation>>,
}

impl InMemoryConversationStore {
    /// Create a new empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of conversations currently held
    pub fn len(&self) -> usize {
        self.conversations.read().len()
    }

    /// Check if the store holds no conversations
    pub fn is_empty(&self) -> bool {
        self.conversations.read().is_empty()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    #[instrument(skip(self, conversation), fields(conversation_id = %conversation.id))]
    async fn save(&self, conversation: &Conversation) -> Result<(), ApplicationError> {
        self.conversations
            .write()
            .insert(conversation.id, conversation.clone());
        debug!("Saved conversation");
        Ok(())
    }

    #[instrument(skip(self), fields(conversation_id = %id))]
    async fn get(&self, id: &ConversationId) -> Result<Option<Conversation>, ApplicationError> {
        Ok(self.conversations.read().get(id).cloned())
    }

    #[instrument(skip(self, conversation), fields(conversation_id = %conversation.id))]
    async fn update(&self, conversation: &Conversation) -> Result<(), ApplicationError> {
        let mut conversations = self.conversations.write();
        if !conversations.contains_key(&conversation.id) {
            return Err(ApplicationError::NotFound(format!(
                "conversation {}",
                conversation.id
            )));
        }
        conversations.insert(conversation.id, conversation.clone());
        debug!("Updated conversation");
        Ok(())
    }

    #[instrument(skip(self), fields(conversation_id = %id))]
    async fn delete(&self, id: &ConversationId) -> Result<(), ApplicationError> {
        self.conversations.write().remove(id);
        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Conversation>, ApplicationError> {
        let mut conversations: Vec<Conversation> =
            self.conversations.read().values().cloned().collect();
        conversations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        conversations.truncate(limit);
        Ok(conversations)
    }
}
