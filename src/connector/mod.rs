//! # Connector Layer
//!
//! External integrations on both sides of the application core:
//! - the chat-completion providers implementing [`crate::application::ChatClient`]
//! - the HTTP surface (axum router, controllers, DI container)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
