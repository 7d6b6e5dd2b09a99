//! Error types for the accessibility pipeline
//!
//! Every variant is unrecoverable for the current run: the pipeline
//! surfaces the first error, moves to its failed state, and the HTTP
//! trigger translates it into a response. Nothing is retried and no
//! error is ever replaced by a placeholder success.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("source is not valid utf-8: {0}")]
    Encoding(String),

    #[error("persona resource unreadable: {path}: {reason}")]
    PersonaLoad { path: String, reason: String },

    #[error("ANTHROPIC_API_KEY is not set")]
    CredentialMissing,

    #[error("model request failed: {0}")]
    ModelRequest(String),

    #[error("model call exceeded the {0}s timeout")]
    ModelTimeout(u64),

    #[error("unrecognized model reply shape: {0}")]
    MalformedResponse(String),

    #[error("{artifact} is not available in state {state}")]
    State { artifact: &'static str, state: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn persona_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PersonaLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn state(artifact: &'static str, state: impl Into<String>) -> Self {
        Self::State {
            artifact,
            state: state.into(),
        }
    }
}
