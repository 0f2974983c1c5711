//! HTTP request handlers

pub mod advisory;
pub mod chat;
pub mod health;
