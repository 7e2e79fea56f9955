//! Editor documents
//!
//! A schema-agnostic view of the editor's content tree: metadata parts are
//! found by role tag, references by the attribute names in [`SchemaHints`].

mod node;
mod references;

pub use node::{ContentNode, SchemaHints, ABSTRACT_ROLE, AUTHORS_ROLE};
pub use references::{citation_keys, image_ids};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Source of the document being submitted
pub trait DocumentSource: Send + Sync {
    /// Stable document id
    fn document_id(&self) -> u64;

    /// Document title
    fn title(&self) -> &str;

    /// Root of the content tree
    fn content(&self) -> &ContentNode;

    /// Immutable copy of the document at this instant
    fn snapshot(&self) -> Document {
        Document {
            id: self.document_id(),
            title: self.title().to_string(),
            content: self.content().clone(),
        }
    }
}

/// A document as exported by the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document id
    pub id: u64,
    /// Title
    pub title: String,
    /// Content tree
    pub content: ContentNode,
}

impl Document {
    /// Load an exported document from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl DocumentSource for Document {
    fn document_id(&self) -> u64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn content(&self) -> &ContentNode {
        &self.content
    }
}
