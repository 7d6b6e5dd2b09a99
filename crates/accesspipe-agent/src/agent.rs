//! PipelineAgent: one persona, one private memory, one model client

use crate::memory::ConversationMemory;
use crate::persona::AgentPersona;
use accesspipe_core::{Error, Result};
use accesspipe_llm::{ChatTurn, CompletionRequest, ModelClient, ModelError};
use std::sync::Arc;
use tracing::debug;

/// A callable unit over the remote model. Each `invoke` accumulates
/// the exchange into the agent's own memory; it has no effect on any
/// other agent.
pub struct PipelineAgent {
    persona: AgentPersona,
    memory: ConversationMemory,
    client: Arc<dyn ModelClient>,
}

impl std::fmt::Debug for PipelineAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineAgent")
            .field("persona", &self.persona)
            .field("memory", &self.memory)
            .field("client", &self.client.name())
            .finish()
    }
}

impl PipelineAgent {
    pub fn new(persona: AgentPersona, client: Arc<dyn ModelClient>) -> Self {
        Self {
            persona,
            memory: ConversationMemory::new(),
            client,
        }
    }

    /// Send `user_input` to the model with the persona and the full
    /// turn history, record both sides of the exchange, and return the
    /// reply text.
    pub async fn invoke(&mut self, user_input: &str) -> Result<String> {
        self.memory.push(ChatTurn::user(user_input));

        let mut request =
            CompletionRequest::new(self.persona.model(), self.persona.system_prompt());
        request.messages = self.memory.turns().to_vec();

        debug!(
            model = %self.persona.model(),
            turns = self.memory.len(),
            "agent invoke"
        );

        let reply = self
            .client
            .complete(request)
            .await
            .map_err(map_model_error)?;

        self.memory.push(ChatTurn::assistant(reply.clone()));
        Ok(reply)
    }

    pub fn persona(&self) -> &AgentPersona {
        &self.persona
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }
}

fn map_model_error(e: ModelError) -> Error {
    match e {
        ModelError::TimedOut(secs) => Error::ModelTimeout(secs),
        ModelError::MalformedReply(detail) => Error::MalformedResponse(detail),
        ModelError::AuthFailed(detail) => Error::ModelRequest(format!("auth: {detail}")),
        ModelError::RequestFailed(detail) => Error::ModelRequest(detail),
        ModelError::Network(e) => Error::ModelRequest(e.to_string()),
    }
}
