//! Error types for journal-bridge

use std::fmt;
use thiserror::Error;

/// A dialog field that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    /// Target journal selection
    JournalId,
    /// Corresponding author first name
    Firstname,
    /// Corresponding author last name
    Lastname,
    /// Article abstract
    Abstract,
    /// Reviewer message for the editor only
    EditorMessage,
    /// Reviewer message for editor and authors
    EditorAuthorMessage,
    /// Reviewer recommendation
    Recommendation,
    /// Journal name on registration
    JournalName,
    /// Editor user id on registration
    EditorId,
    /// Base URL of the journal service on registration
    ServiceUrl,
    /// API key of the journal service on registration
    ServiceKey,
}

impl Field {
    /// Form name of the field, as the dialogs label it
    pub const fn name(self) -> &'static str {
        match self {
            Self::JournalId => "journal_id",
            Self::Firstname => "firstname",
            Self::Lastname => "lastname",
            Self::Abstract => "abstract",
            Self::EditorMessage => "editor_message",
            Self::EditorAuthorMessage => "editor_author_message",
            Self::Recommendation => "recommendation",
            Self::JournalName => "name",
            Self::EditorId => "editor_id",
            Self::ServiceUrl => "service_url",
            Self::ServiceKey => "service_key",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Missing or invalid user-entered fields
///
/// Always names every offending field, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing or invalid fields: {}", join_fields(.fields))]
pub struct ValidationError {
    /// Offending fields
    pub fields: Vec<Field>,
}

impl ValidationError {
    /// Whether `field` is among the rejected fields
    pub fn names(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Local document state cannot be packaged
///
/// Never retried: the document references something the stores do not hold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackagingError {
    /// A referenced image is absent from the image store
    #[error("image not found in image store: {0}")]
    MissingImage(String),

    /// A referenced citation key is absent from the bibliography store
    #[error("citation not found in bibliography: {0}")]
    MissingCitation(String),

    /// Content could not be encoded
    #[error("failed to serialize bundle: {0}")]
    Serialize(String),
}

/// Errors that can occur in journal-bridge operations
#[derive(Error, Debug)]
pub enum Error {
    /// Dialog fields rejected before packaging
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Packaging failed
    #[error(transparent)]
    Packaging(#[from] PackagingError),

    /// The service reported failure for a submission
    #[error("submission failed: {0}")]
    Transport(String),

    /// The resolved action is not enabled for this user
    #[error("action not available: {0}")]
    ActionDisabled(String),

    /// Another submit for the same document has not finished yet
    #[error("a submission for document {0} is already in progress")]
    SubmissionInFlight(u64),

    /// Version token is not a dotted four-segment token
    #[error("invalid version token: {0}")]
    InvalidVersion(String),

    /// Unknown value for an enumerated field
    #[error("parse error: {0}")]
    Parse(String),

    /// Missing or malformed service configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding/decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for journal-bridge operations
pub type Result<T> = std::result::Result<T, Error>;
