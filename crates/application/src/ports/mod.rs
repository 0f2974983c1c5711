//! Port definitions for the application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod conversation_store;
mod inference_port;
mod weather_port;

pub use conversation_store::ConversationStore;
#[cfg(test)]
pub use conversation_store::MockConversationStore;
pub use inference_port::{InferencePort, InferenceResult};
#[cfg(test)]
pub use inference_port::MockInferencePort;
pub use weather_port::{CurrentConditions, WeatherPort};
#[cfg(test)]
pub use weather_port::MockWeatherPort;
