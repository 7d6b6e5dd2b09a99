//! Persona definitions: fixed system instruction + model binding

use accesspipe_core::{Error, Result};
use std::path::Path;

/// The system-level instruction text and model identifier that define
/// an agent's behavior for every call it makes. Loaded once at agent
/// construction, immutable thereafter.
#[derive(Clone, Debug)]
pub struct AgentPersona {
    system_prompt: String,
    model: String,
}

impl AgentPersona {
    /// Read a persona definition from disk.
    pub fn load(path: &Path, model: impl Into<String>) -> Result<Self> {
        let system_prompt = std::fs::read_to_string(path)
            .map_err(|e| Error::persona_load(path.display().to_string(), e.to_string()))?;
        Ok(Self {
            system_prompt,
            model: model.into(),
        })
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}
