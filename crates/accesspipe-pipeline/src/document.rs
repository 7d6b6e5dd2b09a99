//! Tolerant HTML loading, parsing, and serialization

use accesspipe_core::{Error, Result};
use scraper::Html;
use std::path::{Path, PathBuf};

/// A loaded markup document.
///
/// `raw_markup` is immutable once loaded; the parse tree is always
/// re-derivable from it by a deterministic parse, so a rewritten
/// document is a new `Document` value, never an in-place edit. The
/// tree itself is parsed on demand (scraper trees are not `Send`, so
/// they stay inside synchronous scopes).
#[derive(Clone, Debug)]
pub struct Document {
    raw_markup: String,
    markup: String,
    source: PathBuf,
}

impl Document {
    /// The pristine text as it came off disk or out of the model.
    pub fn raw_markup(&self) -> &str {
        &self.raw_markup
    }

    /// Normalized serialization of the parse tree. Whitespace and
    /// attribute order may differ from the raw text; element,
    /// attribute, and text content do not.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Re-derive the parse tree.
    pub fn tree(&self) -> Html {
        DocumentStore::parse(&self.raw_markup)
    }
}

/// Loads and re-parses documents. The parser is best-effort: broken,
/// accessibility-impaired markup is exactly the expected input, so
/// well-formedness is never validated.
pub struct DocumentStore;

impl DocumentStore {
    /// Read and parse the document at `path`.
    pub fn load(path: &Path) -> Result<Document> {
        let bytes = std::fs::read(path)?;
        let raw_markup = String::from_utf8(bytes)
            .map_err(|e| Error::Encoding(format!("{}: {}", path.display(), e)))?;
        Ok(Self::from_markup(raw_markup, path))
    }

    /// Build a document from markup already in hand, e.g. a model reply.
    pub fn from_markup(raw_markup: String, source: &Path) -> Document {
        let markup = Self::serialize(&Self::parse(&raw_markup));
        Document {
            raw_markup,
            markup,
            source: source.to_path_buf(),
        }
    }

    /// Deterministic, tolerant parse. Pure.
    pub fn parse(text: &str) -> Html {
        Html::parse_document(text)
    }

    /// Serialize a tree back to markup. Not byte-identical to the
    /// input (html5ever normalizes structure and drops the doctype),
    /// but re-parsing the output yields an equivalent tree.
    pub fn serialize(tree: &Html) -> String {
        // parse_document always produces an <html> root, even for
        // empty input.
        tree.root_element().html()
    }
}
