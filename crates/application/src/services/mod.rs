//! Application services - Use case implementations

mod advisory_service;
pub mod prompt;

pub use advisory_service::{Advisory, AdvisoryService, BackendHealth};
