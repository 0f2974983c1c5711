//! Advisory handler
//!
//! Starts a new weather-aware advisory for a crop and a city.

use application::ports::CurrentConditions;
use axum::{Json, extract::State};
use domain::forecast::SevereDayFlag;
use domain::value_objects::{CityName, CropName};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

/// Request to start an advisory
#[derive(Debug, Clone, Deserialize)]
pub struct AdvisoryRequest {
    /// The crop being grown
    pub crop: String,
    /// The city to fetch weather for
    pub city: String,
}

/// Advisory response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisoryResponse {
    /// Conversation id for follow-up questions
    pub conversation_id: String,
    /// The generated advice
    pub advice: String,
    /// Model that produced the advice
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Total tokens consumed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<u32>,
    /// Generation latency in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    /// Current conditions the advice was based on
    pub current: CurrentConditions,
    /// Forecast days flagged as severe
    pub severe_days: Vec<SevereDayFlag>,
}

/// Start a new advisory
pub async fn start_advisory(
    State(state): State<AppState>,
    Json(request): Json<AdvisoryRequest>,
) -> Result<Json<AdvisoryResponse>, ApiError> {
    let crop = CropName::new(&request.crop).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let city = CityName::new(&request.city).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    info!(crop = %crop, city = %city, "Starting advisory");

    let advisory = state.advisory_service.start_advisory(&crop, &city).await?;

    let metadata = advisory.reply.metadata;
    Ok(Json(AdvisoryResponse {
        conversation_id: advisory.conversation_id.to_string(),
        advice: advisory.reply.content,
        model: metadata.as_ref().and_then(|m| m.model.clone()),
        tokens: metadata.as_ref().and_then(|m| m.tokens),
        latency_ms: metadata.as_ref().and_then(|m| m.latency_ms),
        current: advisory.current,
        severe_days: advisory.severe_days,
    }))
}
