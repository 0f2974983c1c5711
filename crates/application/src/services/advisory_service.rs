//! Advisory service - Weather-aware crop guidance
//!
//! Orchestrates the full advisory flow: fetch weather, normalize the
//! forecast to one sample per day, flag severe days, then ask the model
//! for guidance. Follow-up questions replay the stored conversation.

use std::fmt;
use std::sync::Arc;

use domain::{
    entities::{ChatMessage, Conversation, MessageMetadata},
    forecast::{SevereDayFlag, flag_severe_days, normalize_forecast},
    value_objects::{CityName, ConversationId, CropName},
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::ApplicationError;
use crate::ports::{ConversationStore, CurrentConditions, InferencePort, InferenceResult, WeatherPort};
use crate::services::prompt;

/// The result of starting an advisory
#[derive(Debug, Clone, Serialize)]
pub struct Advisory {
    /// Conversation to address follow-up questions to
    pub conversation_id: ConversationId,
    /// The model's advisory reply
    pub reply: ChatMessage,
    /// Current conditions the advice was based on
    pub current: CurrentConditions,
    /// Forecast days flagged as severe
    pub severe_days: Vec<SevereDayFlag>,
}

/// Health of the two advisory backends
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BackendHealth {
    /// Weather service reachable
    pub weather: bool,
    /// Inference backend reachable
    pub inference: bool,
}

impl BackendHealth {
    /// Both backends must respond for the service to be ready
    pub const fn is_ready(self) -> bool {
        self.weather && self.inference
    }
}

/// Service implementing the advisory use cases
pub struct AdvisoryService {
    weather: Arc<dyn WeatherPort>,
    inference: Arc<dyn InferencePort>,
    conversations: Arc<dyn ConversationStore>,
}

impl fmt::Debug for AdvisoryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvisoryService").finish_non_exhaustive()
    }
}

impl AdvisoryService {
    /// Create a new advisory service
    pub fn new(
        weather: Arc<dyn WeatherPort>,
        inference: Arc<dyn InferencePort>,
        conversations: Arc<dyn ConversationStore>,
    ) -> Self {
        Self {
            weather,
            inference,
            conversations,
        }
    }

    /// Start a new advisory for a crop in a city
    ///
    /// Fetches current conditions and the forecast, reduces the forecast
    /// to one sample per calendar day, flags severe days, and asks the
    /// model for guidance. The exchange is stored as a new conversation.
    #[instrument(skip(self), fields(crop = %crop, city = %city))]
    pub async fn start_advisory(
        &self,
        crop: &CropName,
        city: &CityName,
    ) -> Result<Advisory, ApplicationError> {
        let current = self.weather.current_conditions(city).await?;
        let entries = self.weather.forecast_entries(city).await?;

        let days = normalize_forecast(&entries)?;
        let severe_days = flag_severe_days(&days);

        let mut conversation = Conversation::with_system_prompt(prompt::ADVISOR_SYSTEM_PROMPT);
        conversation.add_user_message(prompt::advisory_prompt(crop, city, &current, &severe_days));

        let result = self.inference.generate_with_context(&conversation).await?;
        let reply = Self::assistant_reply(result);

        conversation.add_message(reply.clone());
        self.conversations.save(&conversation).await?;

        info!(
            conversation_id = %conversation.id,
            flagged_days = severe_days.len(),
            "Advisory generated"
        );

        Ok(Advisory {
            conversation_id: conversation.id,
            reply,
            current,
            severe_days,
        })
    }

    /// Continue an existing advisory conversation
    #[instrument(skip(self, message), fields(conversation_id = %id))]
    pub async fn follow_up(
        &self,
        id: &ConversationId,
        message: &str,
    ) -> Result<ChatMessage, ApplicationError> {
        let mut conversation = self
            .conversations
            .get(id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("conversation {id}")))?;

        conversation.add_user_message(message);

        let result = self.inference.generate_with_context(&conversation).await?;
        let reply = Self::assistant_reply(result);

        conversation.add_message(reply.clone());
        self.conversations.update(&conversation).await?;

        Ok(reply)
    }

    /// Check both backends
    pub async fn backend_health(&self) -> BackendHealth {
        BackendHealth {
            weather: self.weather.is_available().await,
            inference: self.inference.is_healthy().await,
        }
    }

    /// Check whether both backends are reachable
    pub async fn is_ready(&self) -> bool {
        self.backend_health().await.is_ready()
    }

    /// The model the inference backend will answer with
    pub fn current_model(&self) -> String {
        self.inference.current_model()
    }

    fn assistant_reply(result: InferenceResult) -> ChatMessage {
        let metadata = MessageMetadata {
            model: Some(result.model),
            tokens: result.tokens_used,
            latency_ms: Some(result.latency_ms),
        };
        ChatMessage::assistant(result.content).with_metadata(metadata)
    }
}

#[cfg(test)]
mod tests {
    use domain::forecast::{ForecastEntry, SevereCondition};

    use super::*;
    use crate::ports::{MockConversationStore, MockInferencePort, MockWeatherPort};

    fn sample_current() -> CurrentConditions {
        CurrentConditions {
            condition: "Clouds".to_string(),
            description: "scattered clouds".to_string(),
            temperature_c: 24.3,
            humidity: Some(64),
            wind_speed: 3.6,
            city: "Pune".to_string(),
        }
    }

    fn sample_entries() -> Vec<ForecastEntry> {
        vec![
            ForecastEntry {
                timestamp: "2024-07-01 00:00:00".to_string(),
                rain_mm_3h: Some(0.2),
                wind_speed: 4.0,
                temperature_c: 22.0,
            },
            ForecastEntry {
                timestamp: "2024-07-01 03:00:00".to_string(),
                rain_mm_3h: Some(3.0),
                wind_speed: 6.0,
                temperature_c: 21.0,
            },
            ForecastEntry {
                timestamp: "2024-07-02 00:00:00".to_string(),
                rain_mm_3h: None,
                wind_speed: 22.0,
                temperature_c: 23.5,
            },
        ]
    }

    fn sample_result(content: &str) -> InferenceResult {
        InferenceResult {
            content: content.to_string(),
            model: "gpt-4o-mini".to_string(),
            tokens_used: Some(128),
            latency_ms: 450,
        }
    }

    fn service(
        weather: MockWeatherPort,
        inference: MockInferencePort,
        store: MockConversationStore,
    ) -> AdvisoryService {
        AdvisoryService::new(Arc::new(weather), Arc::new(inference), Arc::new(store))
    }

    #[tokio::test]
    async fn start_advisory_flags_severe_days_and_stores_conversation() {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_current_conditions()
            .returning(|_| Ok(sample_current()));
        weather
            .expect_forecast_entries()
            .returning(|_| Ok(sample_entries()));

        let mut inference = MockInferencePort::new();
        inference
            .expect_generate_with_context()
            .withf(|conv| {
                conv.system_prompt.is_some()
                    && conv.messages[0].content.contains("growing wheat near Pune")
            })
            .returning(|_| Ok(sample_result("Stake the plants before the wind arrives.")));

        let mut store = MockConversationStore::new();
        store
            .expect_save()
            .withf(|conv| conv.message_count() == 2)
            .times(1)
            .returning(|_| Ok(()));

        let service = service(weather, inference, store);
        let crop = CropName::new("wheat").unwrap();
        let city = CityName::new("Pune").unwrap();

        let advisory = service.start_advisory(&crop, &city).await.unwrap();

        // Only the second day trips a threshold (wind 22.0); the first
        // day's surviving sample is the mild midnight slot.
        assert_eq!(advisory.severe_days.len(), 1);
        assert_eq!(
            advisory.severe_days[0].conditions,
            vec![SevereCondition::StrongWind]
        );
        assert_eq!(
            advisory.reply.content,
            "Stake the plants before the wind arrives."
        );
        let metadata = advisory.reply.metadata.as_ref().unwrap();
        assert_eq!(metadata.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(metadata.latency_ms, Some(450));
    }

    #[tokio::test]
    async fn start_advisory_propagates_weather_failure() {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_current_conditions()
            .returning(|_| Err(ApplicationError::NotFound("city Atlantis".to_string())));

        let service = service(weather, MockInferencePort::new(), MockConversationStore::new());
        let crop = CropName::new("wheat").unwrap();
        let city = CityName::new("Atlantis").unwrap();

        let err = service.start_advisory(&crop, &city).await.unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)));
    }

    #[tokio::test]
    async fn start_advisory_rejects_malformed_forecast() {
        let mut weather = MockWeatherPort::new();
        weather
            .expect_current_conditions()
            .returning(|_| Ok(sample_current()));
        weather.expect_forecast_entries().returning(|_| {
            Ok(vec![ForecastEntry {
                timestamp: "2024-07".to_string(),
                rain_mm_3h: None,
                wind_speed: 4.0,
                temperature_c: 20.0,
            }])
        });

        let service = service(weather, MockInferencePort::new(), MockConversationStore::new());
        let crop = CropName::new("wheat").unwrap();
        let city = CityName::new("Pune").unwrap();

        let err = service.start_advisory(&crop, &city).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Domain(_)));
    }

    #[tokio::test]
    async fn follow_up_appends_both_turns() {
        let mut conversation = Conversation::with_system_prompt(prompt::ADVISOR_SYSTEM_PROMPT);
        conversation.add_user_message("Opening question");
        conversation.add_assistant_message("Opening answer");
        let id = conversation.id;

        let mut store = MockConversationStore::new();
        let stored = conversation.clone();
        store
            .expect_get()
            .returning(move |_| Ok(Some(stored.clone())));
        store
            .expect_update()
            .withf(|conv| conv.message_count() == 4)
            .times(1)
            .returning(|_| Ok(()));

        let mut inference = MockInferencePort::new();
        inference
            .expect_generate_with_context()
            .withf(|conv| conv.last_message().is_some_and(|m| m.content == "When should I water?"))
            .returning(|_| Ok(sample_result("Water at dawn, before the heat.")));

        let service = service(MockWeatherPort::new(), inference, store);

        let reply = service.follow_up(&id, "When should I water?").await.unwrap();
        assert_eq!(reply.content, "Water at dawn, before the heat.");
    }

    #[tokio::test]
    async fn follow_up_unknown_conversation_is_not_found() {
        let mut store = MockConversationStore::new();
        store.expect_get().returning(|_| Ok(None));

        let service = service(MockWeatherPort::new(), MockInferencePort::new(), store);

        let err = service
            .follow_up(&ConversationId::new(), "Anyone there?")
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)));
    }

    #[tokio::test]
    async fn is_ready_requires_both_backends() {
        let mut weather = MockWeatherPort::new();
        weather.expect_is_available().returning(|| true);
        let mut inference = MockInferencePort::new();
        inference.expect_is_healthy().returning(|| false);

        let service = service(weather, inference, MockConversationStore::new());
        assert!(!service.is_ready().await);
    }

    #[tokio::test]
    async fn is_ready_when_both_backends_respond() {
        let mut weather = MockWeatherPort::new();
        weather.expect_is_available().returning(|| true);
        let mut inference = MockInferencePort::new();
        inference.expect_is_healthy().returning(|| true);

        let service = service(weather, inference, MockConversationStore::new());
        assert!(service.is_ready().await);
    }
}
