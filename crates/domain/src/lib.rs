//! Domain layer for CropSage
//!
//! Contains the forecast normalization and severe-weather classification
//! logic, conversation entities, value objects, and domain errors. This
//! layer is pure and synchronous and has no I/O dependencies.

pub mod entities;
pub mod errors;
pub mod forecast;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use forecast::*;
pub use value_objects::*;
