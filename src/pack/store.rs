//! Image and bibliography stores
//!
//! Read-only lookups the packager uses to resolve the references a document
//! makes. Stores answer only for the ids they hold; absent ids are simply
//! left out of the result and the caller decides what that means.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// An image held by the user's image database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Image id
    pub id: String,
    /// Image title
    #[serde(default)]
    pub title: String,
    /// URL of the image file
    #[serde(default)]
    pub image: String,
    /// MIME type
    #[serde(default)]
    pub file_type: String,
}

/// A bibliography entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BibEntry {
    /// Citation key shown to the user
    pub entry_key: String,
    /// Entry type (article, book, ...)
    pub bib_type: String,
    /// Category ids
    #[serde(default)]
    pub cats: Vec<Value>,
    /// Entry fields
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// Image database lookup
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Records for the requested ids that the store holds
    async fn lookup(&self, ids: &BTreeSet<String>) -> Result<BTreeMap<String, ImageRecord>>;
}

/// Bibliography database lookup
#[async_trait]
pub trait BibliographyStore: Send + Sync {
    /// Entries for the requested keys that the store holds
    async fn lookup(&self, keys: &BTreeSet<String>) -> Result<BTreeMap<String, BibEntry>>;
}

/// Image store backed by an in-memory map
#[derive(Debug, Clone, Default)]
pub struct MemoryImageStore {
    images: BTreeMap<String, ImageRecord>,
}

impl MemoryImageStore {
    /// Store holding `images`
    pub fn new(images: impl IntoIterator<Item = ImageRecord>) -> Self {
        Self {
            images: images.into_iter().map(|i| (i.id.clone(), i)).collect(),
        }
    }

    /// Load a JSON object mapping ids to image records
    ///
    /// Every key must equal the `id` of its record.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let images: BTreeMap<String, ImageRecord> = serde_json::from_str(&raw)?;
        if let Some((key, record)) = images.iter().find(|(key, record)| **key != record.id) {
            return Err(Error::Parse(format!(
                "image stored under {key} has id {}",
                record.id
            )));
        }
        Ok(Self { images })
    }
}

#[async_trait]
impl ImageStore for MemoryImageStore {
    async fn lookup(&self, ids: &BTreeSet<String>) -> Result<BTreeMap<String, ImageRecord>> {
        Ok(pick(&self.images, ids))
    }
}

/// Bibliography store backed by an in-memory map
#[derive(Debug, Clone, Default)]
pub struct MemoryBibliographyStore {
    entries: BTreeMap<String, BibEntry>,
}

impl MemoryBibliographyStore {
    /// Store holding `entries` under their keys
    pub fn new(entries: impl IntoIterator<Item = (String, BibEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Load a JSON object mapping keys to entries
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let entries: BTreeMap<String, BibEntry> = serde_json::from_str(&raw)?;
        Ok(Self { entries })
    }
}

#[async_trait]
impl BibliographyStore for MemoryBibliographyStore {
    async fn lookup(&self, keys: &BTreeSet<String>) -> Result<BTreeMap<String, BibEntry>> {
        Ok(pick(&self.entries, keys))
    }
}

fn pick<T: Clone>(all: &BTreeMap<String, T>, wanted: &BTreeSet<String>) -> BTreeMap<String, T> {
    wanted
        .iter()
        .filter_map(|k| all.get(k).map(|v| (k.clone(), v.clone())))
        .collect()
}
