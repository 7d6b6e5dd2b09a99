//! Process-wide configuration, loaded once at startup and never mutated.

use crate::error::{Error, Result};
use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "claude-haiku-4-5-20251001";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Read-only configuration shared by every pipeline run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Anthropic API credential. Checked at startup, not at first call.
    pub api_key: String,
    pub model: String,
    /// Per-call request timeout. The only cancellation mechanism.
    pub timeout_secs: u64,
    /// Directory holding the two persona resources.
    pub personas_dir: PathBuf,
    /// Directory persisted artifacts are written under.
    pub output_dir: PathBuf,
    /// Directory uploaded files are placed in.
    pub uploads_dir: PathBuf,
}

impl Config {
    /// Load from the environment. Fails fast with `CredentialMissing`
    /// if the API key is absent or blank.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(Error::CredentialMissing)?;

        let timeout_secs = std::env::var("ACCESSPIPE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            api_key,
            model: std::env::var("ACCESSPIPE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            timeout_secs,
            personas_dir: env_path("ACCESSPIPE_PERSONAS_DIR", "personas"),
            output_dir: env_path("ACCESSPIPE_OUTPUT_DIR", "updated_html_files"),
            uploads_dir: env_path("ACCESSPIPE_UPLOADS_DIR", "uploads"),
        })
    }

    pub fn analysis_persona_path(&self) -> PathBuf {
        self.personas_dir.join("wcag_compliance.txt")
    }

    pub fn summary_persona_path(&self) -> PathBuf {
        self.personas_dir.join("update_summarizer.txt")
    }
}

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var(var).map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(default))
}
