//! AI Core - Chat-completion inference for advisory generation
//!
//! Provides abstractions for LLM inference against any backend exposing
//! the OpenAI-compatible chat-completions API, hosted or local.

pub mod config;
pub mod error;
pub mod openai;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use openai::OpenAiInferenceEngine;
pub use ports::{InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage};
