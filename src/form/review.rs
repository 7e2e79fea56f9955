//! Reviewer recommendation form

use crate::error::{Error, Field, ValidationError};
use crate::form::draft::required;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Reviewer recommendation, serialized as the service's numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recommendation {
    /// Accept submission
    Accept,
    /// Revisions required
    RevisionsRequired,
    /// Resubmit for review
    ResubmitForReview,
    /// Resubmit elsewhere
    ResubmitElsewhere,
    /// Decline submission
    Decline,
    /// See comments
    SeeComments,
}

impl Recommendation {
    /// All recommendations in code order
    pub const ALL: [Self; 6] = [
        Self::Accept,
        Self::RevisionsRequired,
        Self::ResubmitForReview,
        Self::ResubmitElsewhere,
        Self::Decline,
        Self::SeeComments,
    ];

    /// Numeric code used by the service
    pub const fn code(self) -> u8 {
        match self {
            Self::Accept => 1,
            Self::RevisionsRequired => 2,
            Self::ResubmitForReview => 3,
            Self::ResubmitElsewhere => 4,
            Self::Decline => 5,
            Self::SeeComments => 6,
        }
    }

    /// Command-line name
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::RevisionsRequired => "revisions-required",
            Self::ResubmitForReview => "resubmit-for-review",
            Self::ResubmitElsewhere => "resubmit-elsewhere",
            Self::Decline => "decline",
            Self::SeeComments => "see-comments",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Accept => "Accept Submission",
            Self::RevisionsRequired => "Revisions Required",
            Self::ResubmitForReview => "Resubmit for Review",
            Self::ResubmitElsewhere => "Resubmit Elsewhere",
            Self::Decline => "Decline Submission",
            Self::SeeComments => "See Comments",
        };
        f.write_str(label)
    }
}

impl FromStr for Recommendation {
    type Err = Error;

    /// Accepts the numeric code or the command-line name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|r| s == r.slug() || s.parse::<u8>().is_ok_and(|c| c == r.code()))
            .ok_or_else(|| Error::Parse(format!("unknown recommendation: {s}")))
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Raw reviewer dialog fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewForm {
    /// Message visible to the editor only
    pub editor_message: String,
    /// Message visible to editor and authors
    pub editor_author_message: String,
    /// Recommendation code or name
    pub recommendation: String,
}

/// Validated reviewer submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewSubmission {
    /// Message visible to the editor only
    pub editor_message: String,
    /// Message visible to editor and authors
    pub editor_author_message: String,
    /// Recommendation
    pub recommendation: Recommendation,
}

impl ReviewForm {
    /// All three fields are obligatory
    pub fn validate(&self) -> Result<ReviewSubmission, ValidationError> {
        let mut fields = Vec::new();
        let editor_message = required(&self.editor_message, Field::EditorMessage, &mut fields);
        let editor_author_message = required(
            &self.editor_author_message,
            Field::EditorAuthorMessage,
            &mut fields,
        );
        let recommendation = self.recommendation.parse::<Recommendation>().ok();
        if recommendation.is_none() {
            fields.push(Field::Recommendation);
        }

        match recommendation {
            Some(recommendation) if fields.is_empty() => Ok(ReviewSubmission {
                editor_message,
                editor_author_message,
                recommendation,
            }),
            _ => Err(ValidationError { fields }),
        }
    }
}
