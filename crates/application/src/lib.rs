//! Application layer - Use cases and orchestration
//!
//! Contains the advisory use cases and the port definitions the
//! infrastructure layer implements. Orchestrates domain objects and
//! infrastructure adapters.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
