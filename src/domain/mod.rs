//! # Domain Layer
//!
//! Core models and error types. This layer is independent of HTTP framing
//! and of any particular model provider.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
