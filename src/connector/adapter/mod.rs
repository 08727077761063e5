mod mock_chat;
mod openai_client;

pub use mock_chat::*;
pub use openai_client::*;
