//! Value Objects - Immutable, identity-less domain primitives

mod city_name;
mod conversation_id;
mod crop_name;

pub use city_name::CityName;
pub use conversation_id::ConversationId;
pub use crop_name::CropName;
