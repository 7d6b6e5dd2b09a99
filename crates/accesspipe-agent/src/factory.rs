//! Build pipeline agents from persona resources

use crate::agent::PipelineAgent;
use crate::persona::AgentPersona;
use accesspipe_core::Result;
use accesspipe_llm::ModelClient;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Assembles agents around an injected model client. The client holds
/// no conversation state, so one factory can build any number of
/// agents; each gets its own persona and fresh, empty memory.
pub struct AgentFactory {
    client: Arc<dyn ModelClient>,
}

impl AgentFactory {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Read the persona resource at `persona_path` and build an agent
    /// bound to `model`. The persona text becomes the fixed system
    /// segment; user content only ever enters through `invoke`.
    pub fn build(&self, persona_path: &Path, model: &str) -> Result<PipelineAgent> {
        let persona = AgentPersona::load(persona_path, model)?;
        info!(
            persona = %persona_path.display(),
            model,
            provider = self.client.name(),
            "agent built"
        );
        Ok(PipelineAgent::new(persona, Arc::clone(&self.client)))
    }
}
