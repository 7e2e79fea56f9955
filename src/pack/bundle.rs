//! Bundle packaging
//!
//! Turns a document snapshot into the payload sent to the journal service:
//! 1. Minimize images - look up only the images the document uses
//! 2. Minimize bibliography - look up only the cited entries, keys unchanged
//! 3. Redact authors - empty the authors part for blind review
//! 4. Serialize - JSON content and bibliography, sorted image ids

use crate::document::{citation_keys, image_ids, DocumentSource, SchemaHints, AUTHORS_ROLE};
use crate::error::{PackagingError, Result};
use crate::form::SubmissionDraft;
use crate::pack::{BibEntry, BibliographyStore, ImageStore};
use crate::workflow::SubmissionAction;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Submission metadata that travels next to the document body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleMetadata {
    /// Editor document id
    #[serde(rename = "doc_id")]
    pub document_id: u64,
    /// Document title
    pub title: String,
    /// Abstract, omitted when empty
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    /// Target journal
    pub journal_id: u64,
    /// Corresponding author first name
    pub firstname: String,
    /// Corresponding author last name
    pub lastname: String,
    /// Corresponding author affiliation
    pub affiliation: String,
    /// Corresponding author web page
    pub author_url: String,
}

/// The minimized, serialized payload of one submission attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackagedBundle {
    /// JSON of the (possibly redacted) content tree
    #[serde(rename = "content")]
    pub serialized_content: String,
    /// JSON object of the cited bibliography entries
    #[serde(rename = "bibliography")]
    pub serialized_bibliography: String,
    /// Ids of the images the document uses, ascending
    pub image_ids: Vec<String>,
    /// Title, abstract, journal and corresponding author
    #[serde(flatten)]
    pub metadata: BundleMetadata,
}

/// Builds bundles according to a set of schema hints
#[derive(Debug, Clone, Default)]
pub struct Packager {
    hints: SchemaHints,
}

impl Packager {
    /// Packager for a particular editor schema
    pub const fn new(hints: SchemaHints) -> Self {
        Self { hints }
    }

    /// Schema hints in use
    pub const fn hints(&self) -> &SchemaHints {
        &self.hints
    }

    /// Package a document for `action`
    ///
    /// Reads a snapshot of the document taken at call time. Fails without
    /// producing anything if a referenced image or citation is missing.
    pub async fn pack(
        &self,
        document: &dyn DocumentSource,
        images: &dyn ImageStore,
        bibliography: &dyn BibliographyStore,
        draft: &SubmissionDraft,
        action: SubmissionAction,
    ) -> Result<PackagedBundle> {
        let snapshot = document.snapshot();

        let wanted_images = image_ids(&snapshot.content, &self.hints);
        debug!("Document {} uses {} images", snapshot.id, wanted_images.len());
        let found_images = images.lookup(&wanted_images).await?;
        if let Some(missing) = first_missing(&wanted_images, |id| found_images.contains_key(id)) {
            return Err(PackagingError::MissingImage(missing).into());
        }

        let wanted_keys = citation_keys(&snapshot.content, &self.hints);
        debug!("Document {} cites {} entries", snapshot.id, wanted_keys.len());
        let found_entries = bibliography.lookup(&wanted_keys).await?;
        if let Some(missing) = first_missing(&wanted_keys, |key| found_entries.contains_key(key)) {
            return Err(PackagingError::MissingCitation(missing).into());
        }
        // Stores may answer with more than was asked; keep exactly the cited keys.
        let shrunk_bibliography: BTreeMap<&String, &BibEntry> = wanted_keys
            .iter()
            .filter_map(|key| found_entries.get(key).map(|entry| (key, entry)))
            .collect();

        let mut content = snapshot.content;
        if action.redacts_authors() {
            let cleared = content.clear_parts(AUTHORS_ROLE, &self.hints);
            debug!("Redacted {cleared} author parts for blind review");
        }

        let serialized_content = serde_json::to_string(&content)
            .map_err(|e| PackagingError::Serialize(e.to_string()))?;
        let serialized_bibliography = serde_json::to_string(&shrunk_bibliography)
            .map_err(|e| PackagingError::Serialize(e.to_string()))?;

        Ok(PackagedBundle {
            serialized_content,
            serialized_bibliography,
            image_ids: wanted_images.into_iter().collect(),
            metadata: BundleMetadata {
                document_id: snapshot.id,
                title: snapshot.title,
                abstract_text: Some(draft.abstract_text.clone()).filter(|a| !a.is_empty()),
                journal_id: draft.journal_id,
                firstname: draft.firstname.clone(),
                lastname: draft.lastname.clone(),
                affiliation: draft.affiliation.clone(),
                author_url: draft.author_url.clone(),
            },
        })
    }
}

/// Package a document using the default schema hints
pub async fn pack_document(
    document: &dyn DocumentSource,
    images: &dyn ImageStore,
    bibliography: &dyn BibliographyStore,
    draft: &SubmissionDraft,
    action: SubmissionAction,
) -> Result<PackagedBundle> {
    Packager::default()
        .pack(document, images, bibliography, draft, action)
        .await
}

fn first_missing(wanted: &BTreeSet<String>, present: impl Fn(&String) -> bool) -> Option<String> {
    wanted.iter().find(|id| !present(*id)).cloned()
}
