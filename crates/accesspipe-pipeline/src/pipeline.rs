//! Orchestrator: load -> analyze -> summarize, strictly in order

use crate::document::{Document, DocumentStore};
use crate::sink::ArtifactSink;
use accesspipe_core::{Error, Result};
use accesspipe_agent::{AgentFactory, PipelineAgent};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub const UPDATED_PAGE_NAME: &str = "updated_page.html";
pub const CHANGES_SUMMARY_NAME: &str = "changes_summary.html";

/// Where a failed run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    BuildAgents,
    Load,
    Analyze,
    Summarize,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::BuildAgents => "build_agents",
            Stage::Load => "load",
            Stage::Analyze => "analyze",
            Stage::Summarize => "summarize",
        };
        f.write_str(name)
    }
}

/// Pipeline lifecycle. Strictly linear; `Failed` is terminal and is
/// reachable from any state.
#[derive(Debug, PartialEq, Eq)]
enum State {
    Created,
    AgentsReady,
    Loaded,
    Analyzed,
    Summarized,
    Failed(Stage),
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            State::Created => "created",
            State::AgentsReady => "agents_ready",
            State::Loaded => "loaded",
            State::Analyzed => "analyzed",
            State::Summarized => "summarized",
            State::Failed(_) => "failed",
        }
    }
}

/// Persona resources for the two agents of a run.
#[derive(Clone, Debug)]
pub struct PersonaPaths {
    pub analysis: PathBuf,
    pub summary: PathBuf,
}

/// The two ways the original service drove this pipeline, unified as
/// flags: a batch caller that writes artifacts, and an HTTP caller
/// that wants the original markup back in the response.
#[derive(Clone, Copy, Debug)]
pub struct PipelineOptions {
    pub persist_artifacts: bool,
    pub return_original: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            persist_artifacts: false,
            return_original: true,
        }
    }
}

/// Caller-facing result of a successful run.
#[derive(Clone, Debug, Serialize)]
pub struct PipelineOutput {
    pub original_markup: Option<String>,
    pub updated_markup: String,
    pub summary: String,
}

/// Sequences the document store and the two agents over one document.
/// One value per run; constructed fresh for each request and discarded
/// with it.
pub struct AccessibilityPipeline {
    options: PipelineOptions,
    state: State,
    analyzer: Option<PipelineAgent>,
    summarizer: Option<PipelineAgent>,
    original: Option<Document>,
    rewritten: Option<Document>,
    summary: Option<String>,
}

impl AccessibilityPipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            options,
            state: State::Created,
            analyzer: None,
            summarizer: None,
            original: None,
            rewritten: None,
            summary: None,
        }
    }

    /// CREATED -> AGENTS_READY. One missing persona fails the run.
    pub fn build_agents(
        &mut self,
        factory: &AgentFactory,
        personas: &PersonaPaths,
        model: &str,
    ) -> Result<()> {
        if self.state != State::Created {
            return Err(Error::state("build_agents", self.state.name()));
        }

        let analyzer = match factory.build(&personas.analysis, model) {
            Ok(agent) => agent,
            Err(e) => return self.fail(Stage::BuildAgents, e),
        };
        let summarizer = match factory.build(&personas.summary, model) {
            Ok(agent) => agent,
            Err(e) => return self.fail(Stage::BuildAgents, e),
        };

        self.analyzer = Some(analyzer);
        self.summarizer = Some(summarizer);
        self.state = State::AgentsReady;
        Ok(())
    }

    /// AGENTS_READY -> LOADED. Reads and parses the input document.
    pub fn load(&mut self, source: &Path) -> Result<()> {
        if self.state != State::AgentsReady {
            return Err(Error::state("load", self.state.name()));
        }

        match DocumentStore::load(source) {
            Ok(doc) => {
                info!(source = %source.display(), bytes = doc.raw_markup().len(), "document loaded");
                self.original = Some(doc);
                self.state = State::Loaded;
                Ok(())
            }
            Err(e) => self.fail(Stage::Load, e),
        }
    }

    /// LOADED -> ANALYZED. Sends the serialized original to the
    /// analyzer and parses its reply into the rewritten document.
    pub async fn analyze(&mut self) -> Result<()> {
        if self.state != State::Loaded {
            return Err(Error::state("analyze", self.state.name()));
        }

        let (input, source) = match &self.original {
            Some(doc) => (doc.markup().to_string(), doc.source().to_path_buf()),
            None => return Err(Error::state("analyze", self.state.name())),
        };

        let analyzer = match self.analyzer.as_mut() {
            Some(agent) => agent,
            None => return Err(Error::state("analyze", self.state.name())),
        };

        let reply = match analyzer.invoke(&input).await {
            Ok(reply) => reply,
            Err(e) => return self.fail(Stage::Analyze, e),
        };

        // The parser is tolerant, so the only reply it cannot turn
        // into a structure is one with no markup at all.
        if reply.trim().is_empty() {
            return self.fail(
                Stage::Analyze,
                Error::MalformedResponse("analyzer returned empty markup".into()),
            );
        }

        self.rewritten = Some(DocumentStore::from_markup(reply, &source));
        self.state = State::Analyzed;
        Ok(())
    }

    /// ANALYZED -> SUMMARIZED. One combined input string over both
    /// serialized documents, one independent summarizer call.
    pub async fn summarize(&mut self) -> Result<()> {
        if self.state != State::Analyzed {
            return Err(Error::state("summarize", self.state.name()));
        }

        let input = match (&self.original, &self.rewritten) {
            (Some(original), Some(rewritten)) => format!(
                "Original HTML: {}\nUpdated HTML: {}",
                original.markup(),
                rewritten.markup()
            ),
            _ => return Err(Error::state("summarize", self.state.name())),
        };

        let summarizer = match self.summarizer.as_mut() {
            Some(agent) => agent,
            None => return Err(Error::state("summarize", self.state.name())),
        };

        match summarizer.invoke(&input).await {
            Ok(summary) => {
                self.summary = Some(summary);
                self.state = State::Summarized;
                Ok(())
            }
            Err(e) => self.fail(Stage::Summarize, e),
        }
    }

    /// Run every stage in order and assemble the caller-facing result.
    pub async fn run(
        &mut self,
        factory: &AgentFactory,
        personas: &PersonaPaths,
        model: &str,
        source: &Path,
        output_dir: &Path,
    ) -> Result<PipelineOutput> {
        self.build_agents(factory, personas, model)?;
        self.load(source)?;
        self.analyze().await?;
        self.summarize().await?;

        if self.options.persist_artifacts {
            let sink = ArtifactSink::new(output_dir);
            // Artifact writes never fail a run that already succeeded.
            for (name, content) in [
                (UPDATED_PAGE_NAME, self.rewritten_markup()?),
                (CHANGES_SUMMARY_NAME, self.summary()?),
            ] {
                if let Err(e) = sink.persist(content, name) {
                    warn!(artifact = name, error = %e, "artifact persist failed");
                }
            }
        }

        Ok(PipelineOutput {
            original_markup: if self.options.return_original {
                Some(self.original_markup()?.to_string())
            } else {
                None
            },
            updated_markup: self.rewritten_markup()?.to_string(),
            summary: self.summary()?.to_string(),
        })
    }

    /// Pristine input markup; valid once LOADED.
    pub fn original_markup(&self) -> Result<&str> {
        match self.state {
            State::Loaded | State::Analyzed | State::Summarized => {
                Ok(self.original.as_ref().map(Document::raw_markup).unwrap_or(""))
            }
            _ => Err(Error::state("original_markup", self.state.name())),
        }
    }

    /// Analyzer output, parsed and re-serialized; valid once ANALYZED.
    pub fn rewritten_markup(&self) -> Result<&str> {
        match self.state {
            State::Analyzed | State::Summarized => {
                Ok(self.rewritten.as_ref().map(Document::markup).unwrap_or(""))
            }
            _ => Err(Error::state("rewritten_markup", self.state.name())),
        }
    }

    /// Summarizer output; valid once SUMMARIZED.
    pub fn summary(&self) -> Result<&str> {
        match self.state {
            State::Summarized => Ok(self.summary.as_deref().unwrap_or("")),
            _ => Err(Error::state("summary", self.state.name())),
        }
    }

    /// The stage a failed run stopped at, if any.
    pub fn failed_stage(&self) -> Option<Stage> {
        match self.state {
            State::Failed(stage) => Some(stage),
            _ => None,
        }
    }

    fn fail<T>(&mut self, stage: Stage, err: Error) -> Result<T> {
        error!(stage = %stage, error = %err, "pipeline run failed");
        self.state = State::Failed(stage);
        Err(err)
    }
}
