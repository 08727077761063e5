use std::sync::Arc;

use tracing::debug;

use crate::application::{ChatClient, ExtractCpvCodeUseCase, PredictBatchUseCase};
use crate::connector::adapter::{MockChatClient, OpenAiChatClient};

pub struct ContainerConfig {
    /// Chat model requested from the provider.
    pub model: String,
    /// Base URL of the chat-completions API.
    pub base_url: String,
    /// Fabricate deterministic predictions instead of calling the provider.
    pub mock_model: bool,
}

/// Wires the chat client into the use cases.
///
/// The only shared state is the chat client itself, which holds no
/// credential: API keys stay per-request all the way down.
pub struct Container {
    chat_client: Arc<dyn ChatClient>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let chat_client: Arc<dyn ChatClient> = if config.mock_model {
            debug!("Using mock chat client");
            Arc::new(MockChatClient::new())
        } else {
            debug!(
                "Using OpenAI chat client at {} (model {})",
                config.base_url, config.model
            );
            Arc::new(OpenAiChatClient::new(&config.model, &config.base_url))
        };
        Self { chat_client }
    }

    /// Build a container around an explicit [`ChatClient`], bypassing
    /// provider selection. Tests use this to inject scripted clients.
    pub fn with_chat_client(chat_client: Arc<dyn ChatClient>) -> Self {
        Self { chat_client }
    }

    pub fn predict_use_case(&self) -> PredictBatchUseCase {
        let extractor = Arc::new(ExtractCpvCodeUseCase::new(self.chat_client.clone()));
        PredictBatchUseCase::new(extractor)
    }
}
