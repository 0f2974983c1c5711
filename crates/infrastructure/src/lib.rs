//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the OpenWeatherMap
//! weather adapter, the OpenAI-compatible inference adapter, and the
//! in-memory conversation store.

pub mod adapters;
pub mod config;
pub mod persistence;

pub use adapters::{OpenAiInferenceAdapter, WeatherAdapter};
pub use config::{AppConfig, ServerConfig};
pub use persistence::InMemoryConversationStore;
