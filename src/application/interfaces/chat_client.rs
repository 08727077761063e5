use async_trait::async_trait;

use crate::domain::ChatError;

/// An interface for sending chat-style prompts to an LLM and receiving text
/// responses.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. The API key is a per-call parameter: two in-flight extractions
/// with different keys never observe each other's credential, and no
/// implementor may stash it in process-global state.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send a `system` context message followed by a `user` prompt,
    /// authenticating with `api_key`, and return the assistant's response
    /// text.
    ///
    /// Failures are pre-classified: [`ChatError::RateLimited`] when the
    /// provider signalled rate limiting, [`ChatError::Other`] for everything
    /// else.
    async fn complete(
        &self,
        api_key: &str,
        system: &str,
        user: &str,
    ) -> Result<String, ChatError>;
}
