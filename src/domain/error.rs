use thiserror::Error;

/// Failure modes of a remote chat-completion call.
///
/// The retry policy keys off the variant, so adapters classify failures once
/// at the transport boundary instead of callers matching substrings of an
/// opaque error message.
#[derive(Debug, Clone, Error)]
pub enum ChatError {
    /// The provider rejected the call because of rate limiting. Retryable.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Any other failure: transport, authentication, malformed response.
    /// Not retryable.
    #[error("{0}")]
    Other(String),
}

impl ChatError {
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited(_))
    }
}
