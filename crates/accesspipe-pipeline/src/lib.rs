//! Accesspipe Pipeline - load, rewrite, and summarize HTML documents

pub mod document;
pub mod pipeline;
pub mod sink;

pub use document::{Document, DocumentStore};
pub use pipeline::{
    AccessibilityPipeline, PersonaPaths, PipelineOptions, PipelineOutput, Stage,
    CHANGES_SUMMARY_NAME, UPDATED_PAGE_NAME,
};
pub use sink::ArtifactSink;
