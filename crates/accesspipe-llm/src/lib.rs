//! Accesspipe LLM - the injectable remote-model capability
//!
//! The pipeline core only ever sees the [`ModelClient`] trait; the
//! Anthropic adapter lives behind it so tests can swap in a stub.

pub mod anthropic;
pub mod client;
pub mod types;

pub use anthropic::{normalize_reply, AnthropicClient};
pub use client::{ModelClient, ModelError, ModelResult};
pub use types::{ChatTurn, CompletionRequest, Role};
