use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::application::ChatClient;
use crate::domain::{ChatError, CpvCode};

/// Total attempts before a persistently rate-limited text is given up on.
pub const MAX_ATTEMPTS: u32 = 3;

/// Fixed pause between rate-limited attempts.
pub const RETRY_WAIT: Duration = Duration::from_secs(30);

/// System message establishing the model's role. The wording is part of the
/// contract with the model and must not be reworded: output stability of the
/// predictions depends on it.
const SYSTEM_PROMPT: &str = "Eres un experto en codificación CPV. \
    Debes proporcionar únicamente códigos CPV válidos de 5 dígitos.";

/// How often to retry a rate-limited call and how long to wait in between.
///
/// Retry state lives entirely within one [`ExtractCpvCodeUseCase::execute`]
/// call; nothing is shared across texts or across requests.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            wait: RETRY_WAIT,
        }
    }
}

/// Predicts the CPV code for a single objective text.
///
/// Owns the prompt construction, the remote call through [`ChatClient`], the
/// digit normalization of the reply, and the bounded retry-on-rate-limit
/// loop.
pub struct ExtractCpvCodeUseCase {
    chat_client: Arc<dyn ChatClient>,
    retry: RetryPolicy,
}

impl ExtractCpvCodeUseCase {
    pub fn new(chat_client: Arc<dyn ChatClient>) -> Self {
        Self {
            chat_client,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// One-shot user prompt embedding the objective text. Wording and example
    /// are part of the contract with the model, like the system prompt.
    fn user_prompt(objective_text: &str) -> String {
        format!(
            "Dado el siguiente texto: '{objective_text}', proporciona solo los \
             primeros 5 dígitos del código CPV. Debe ser un número de exactamente \
             5 dígitos. Solo números, sin texto adicional ni espacios.\n\n\
             Ejemplo:\n\
             Texto: 'Servicios de mantenimiento de parques.'\n\
             Respuesta: 77311"
        )
    }

    /// Predict the CPV code for one objective text.
    ///
    /// Returns `None` when the model's reply does not normalize to a clean
    /// five-digit code, when the provider fails with a non-rate-limit error,
    /// or when every rate-limit retry has been used up. A content
    /// validation failure is never retried.
    ///
    /// `api_key` is scoped to this call and is never written to the log.
    pub async fn execute(&self, objective_text: &str, api_key: &str) -> Option<CpvCode> {
        let user = Self::user_prompt(objective_text);

        let mut attempt = 0;
        while attempt < self.retry.max_attempts {
            match self
                .chat_client
                .complete(api_key, SYSTEM_PROMPT, &user)
                .await
            {
                Ok(reply) => {
                    let code = CpvCode::normalize(&reply);
                    match &code {
                        Some(code) => {
                            debug!("Predicted CPV code {code} for text '{objective_text}'")
                        }
                        None => warn!(
                            "Reply for text '{objective_text}' did not normalize \
                             to a 5-digit code: {reply:?}"
                        ),
                    }
                    return code;
                }
                Err(ChatError::RateLimited(detail)) => {
                    attempt += 1;
                    warn!(
                        "Rate limit reached for text '{objective_text}': {detail}. \
                         Retrying in {} seconds... (attempt {attempt}/{})",
                        self.retry.wait.as_secs(),
                        self.retry.max_attempts
                    );
                    tokio::time::sleep(self.retry.wait).await;
                }
                Err(ChatError::Other(detail)) => {
                    error!("Error processing text '{objective_text}': {detail}");
                    return None;
                }
            }
        }

        error!("Max retries reached for text: {objective_text}");
        None
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;

    use super::*;

    /// Replays the same scripted outcome on every call, counting calls.
    struct ScriptedChat {
        reply: Result<String, ChatError>,
        calls: AtomicU32,
    }

    impl ScriptedChat {
        fn new(reply: Result<String, ChatError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicU32::new(0),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatClient for ScriptedChat {
        async fn complete(
            &self,
            _api_key: &str,
            _system: &str,
            _user: &str,
        ) -> Result<String, ChatError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    #[tokio::test]
    async fn clean_reply_yields_code_in_one_call() {
        let chat = ScriptedChat::new(Ok("77311".to_string()));
        let use_case = ExtractCpvCodeUseCase::new(chat.clone());

        let code = use_case.execute("Park maintenance", "test-key").await;

        assert_eq!(code.unwrap().as_str(), "77311");
        assert_eq!(chat.calls(), 1);
    }

    #[tokio::test]
    async fn prose_around_the_code_is_discarded() {
        let chat = ScriptedChat::new(Ok("Respuesta: 77311".to_string()));
        let use_case = ExtractCpvCodeUseCase::new(chat.clone());

        let code = use_case.execute("Park maintenance", "test-key").await;

        assert_eq!(code.unwrap().as_str(), "77311");
    }

    #[tokio::test]
    async fn unparseable_reply_yields_none_without_retry() {
        let chat = ScriptedChat::new(Ok("I do not know".to_string()));
        let use_case = ExtractCpvCodeUseCase::new(chat.clone());

        let code = use_case.execute("Park maintenance", "test-key").await;

        assert!(code.is_none());
        assert_eq!(chat.calls(), 1);
    }

    // start_paused makes the 30-second retry waits advance instantly.
    #[tokio::test(start_paused = true)]
    async fn persistent_rate_limit_makes_exactly_three_attempts() {
        let chat = ScriptedChat::new(Err(ChatError::rate_limited("rate_limit_exceeded")));
        let use_case = ExtractCpvCodeUseCase::new(chat.clone());

        let code = use_case.execute("Park maintenance", "test-key").await;

        assert!(code.is_none());
        assert_eq!(chat.calls(), MAX_ATTEMPTS);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_waits_the_configured_duration_between_attempts() {
        let chat = ScriptedChat::new(Err(ChatError::rate_limited("rate_limit_exceeded")));
        let use_case = ExtractCpvCodeUseCase::new(chat.clone());

        let started = tokio::time::Instant::now();
        use_case.execute("Park maintenance", "test-key").await;

        // One wait after each of the three failed attempts.
        assert_eq!(started.elapsed(), 3 * RETRY_WAIT);
    }

    #[tokio::test]
    async fn other_failure_short_circuits_after_one_attempt() {
        let chat = ScriptedChat::new(Err(ChatError::other("invalid api key")));
        let use_case = ExtractCpvCodeUseCase::new(chat.clone());

        let code = use_case.execute("Park maintenance", "test-key").await;

        assert!(code.is_none());
        assert_eq!(chat.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_policy_override_is_honored() {
        let chat = ScriptedChat::new(Err(ChatError::rate_limited("rate_limit_exceeded")));
        let use_case = ExtractCpvCodeUseCase::new(chat.clone()).with_retry_policy(RetryPolicy {
            max_attempts: 5,
            wait: Duration::from_secs(1),
        });

        let code = use_case.execute("Park maintenance", "test-key").await;

        assert!(code.is_none());
        assert_eq!(chat.calls(), 5);
    }

    #[tokio::test]
    async fn empty_text_is_passed_through_unmodified() {
        let chat = ScriptedChat::new(Ok("77311".to_string()));
        let use_case = ExtractCpvCodeUseCase::new(chat.clone());

        let code = use_case.execute("", "test-key").await;

        assert_eq!(code.unwrap().as_str(), "77311");
        assert_eq!(chat.calls(), 1);
    }
}
