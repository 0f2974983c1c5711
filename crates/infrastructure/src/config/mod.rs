//! Application configuration
//!
//! Layered configuration: built-in defaults, then an optional
//! `config.toml`, then environment variables with the `CROPSAGE`
//! prefix (e.g. `CROPSAGE__SERVER__PORT=8080`).

mod server;

use ai_core::InferenceConfig;
use integration_weather::WeatherConfig;
use serde::{Deserialize, Serialize};

pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Inference configuration
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Weather service configuration
    #[serde(default)]
    pub weather: WeatherConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("inference.base_url", "https://api.openai.com")?
            .set_default("inference.default_model", "gpt-4o-mini")?
            .set_default("weather.base_url", "https://api.openweathermap.org/data/2.5")?
            // Load from file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., CROPSAGE__SERVER__PORT)
            .add_source(
                config::Environment::with_prefix("CROPSAGE")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
