//! ModelClient trait - the single seam between pipeline and remote model

use crate::types::CompletionRequest;

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Transport-level model errors
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("timed out after {0}s")]
    TimedOut(u64),

    #[error("unrecognized reply shape: {0}")]
    MalformedReply(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// A remote model, reduced to one operation.
///
/// Each call carries the full conversation; the client itself holds no
/// per-conversation state, so one client instance can back any number
/// of agents.
#[async_trait::async_trait]
pub trait ModelClient: Send + Sync {
    fn name(&self) -> &str;

    /// Run one completion and return the reply text. Bounded by the
    /// configured request timeout; a timeout is terminal, not retried.
    async fn complete(&self, request: CompletionRequest) -> ModelResult<String>;
}
