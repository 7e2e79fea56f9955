//! Document packaging
//!
//! Produces the minimal, privacy-safe payload for one submission attempt.

mod bundle;
mod store;

pub use bundle::{pack_document, BundleMetadata, PackagedBundle, Packager};
pub use store::{
    BibEntry, BibliographyStore, ImageRecord, ImageStore, MemoryBibliographyStore,
    MemoryImageStore,
};
