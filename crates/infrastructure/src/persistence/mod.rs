//! Persistence module
//!
//! In-memory storage for advisory conversations. Conversations live for
//! the lifetime of the process; there is no durable store.

pub mod conversation_store;

pub use conversation_store::InMemoryConversationStore;
