use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use tracing::debug;

use crate::application::ChatClient;
use crate::domain::ChatError;

/// A [`ChatClient`] that fabricates replies without any network traffic.
///
/// The code is derived from a hash of the prompt, so the same text always
/// maps to the same reply. The reply deliberately includes surrounding prose
/// so the digit filter downstream is exercised the way a real model reply
/// would exercise it.
pub struct MockChatClient;

impl MockChatClient {
    pub fn new() -> Self {
        Self
    }

    fn fabricate_code(text: &str) -> String {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        format!("{:05}", hasher.finish() % 100_000)
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(
        &self,
        _api_key: &str,
        _system: &str,
        user: &str,
    ) -> Result<String, ChatError> {
        let code = Self::fabricate_code(user);
        debug!("MockChatClient replying with {code}");
        Ok(format!("Respuesta: {code}"))
    }
}
