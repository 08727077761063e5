pub mod application;
pub mod connector;
pub mod domain;
pub mod logging;

pub use application::{
    ChatClient, ExtractCpvCodeUseCase, PredictBatchUseCase, RetryPolicy, MAX_ATTEMPTS, RETRY_WAIT,
};

pub use connector::{
    build_router, Container, ContainerConfig, MockChatClient, OpenAiChatClient,
    MISSING_FIELDS_ERROR,
};

pub use domain::{ChatError, CpvCode, Prediction};
