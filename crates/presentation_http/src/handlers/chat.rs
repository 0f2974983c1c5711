//! Chat handler
//!
//! Follow-up questions against an existing advisory conversation.

use axum::{Json, extract::State};
use domain::value_objects::ConversationId;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Follow-up chat request
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// Conversation returned by the advisory endpoint
    pub conversation_id: String,
    /// The follow-up question
    pub message: String,
}

/// Follow-up chat response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Conversation id, echoed back for the next turn
    pub conversation_id: String,
    /// The model's reply
    pub message: String,
    /// Model that produced the reply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Total tokens consumed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<u32>,
    /// Generation latency in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Ask a follow-up question
pub async fn follow_up(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Message cannot be empty".to_string()));
    }

    let id = ConversationId::parse(&request.conversation_id)
        .map_err(|_| ApiError::BadRequest("Invalid conversation id".to_string()))?;

    let reply = state.advisory_service.follow_up(&id, &request.message).await?;

    let metadata = reply.metadata;
    Ok(Json(ChatResponse {
        conversation_id: request.conversation_id,
        message: reply.content,
        model: metadata.as_ref().and_then(|m| m.model.clone()),
        tokens: metadata.as_ref().and_then(|m| m.tokens),
        latency_ms: metadata.as_ref().and_then(|m| m.latency_ms),
    }))
}
