//! First submission form

use crate::document::{ABSTRACT_ROLE, AUTHORS_ROLE, DocumentSource, SchemaHints};
use crate::error::{Field, ValidationError};
use crate::types::Journal;
use serde::{Deserialize, Serialize};

/// The local user, used when the document names no author
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalUser {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
}

/// Raw first-submission dialog fields, exactly as entered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftForm {
    /// Selected journal, as typed or selected
    pub journal_id: String,
    /// Corresponding author first name
    pub firstname: String,
    /// Corresponding author last name
    pub lastname: String,
    /// Corresponding author affiliation
    pub affiliation: String,
    /// Corresponding author web page
    pub author_url: String,
    /// Article abstract
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

/// Validated first-submission fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionDraft {
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
    /// Article abstract
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}

impl DraftForm {
    /// Prefill the dialog from the document
    ///
    /// The first author listed in the authors part supplies the name and
    /// affiliation, falling back to the local user's name. The abstract part
    /// supplies the abstract unless it is hidden. The first journal is
    /// preselected.
    pub fn prefill(
        document: &dyn DocumentSource,
        hints: &SchemaHints,
        user: &LocalUser,
        journals: &[Journal],
    ) -> Self {
        let content = document.content();
        let author = content
            .find_part(AUTHORS_ROLE, hints)
            .and_then(|part| part.children().first());
        let abstract_text = content
            .find_part(ABSTRACT_ROLE, hints)
            .filter(|part| !part.is_hidden(hints))
            .map(|part| part.text_content())
            .unwrap_or_default();

        let (firstname, lastname, affiliation) = match author {
            Some(node) => (
                node.attr_str("firstname").unwrap_or_default().to_string(),
                node.attr_str("lastname").unwrap_or_default().to_string(),
                node.attr_str("institution").unwrap_or_default().to_string(),
            ),
            None => (user.first_name.clone(), user.last_name.clone(), String::new()),
        };

        Self {
            journal_id: journals
                .first()
                .map(|j| j.id.to_string())
                .unwrap_or_default(),
            firstname,
            lastname,
            affiliation,
            author_url: String::new(),
            abstract_text,
        }
    }

    /// Trim every field and check the obligatory ones
    pub fn validate(&self) -> Result<SubmissionDraft, ValidationError> {
        let mut fields = Vec::new();

        let journal_id = match self.journal_id.trim().parse::<u64>() {
            Ok(id) if id > 0 => id,
            _ => {
                fields.push(Field::JournalId);
                0
            }
        };

        let firstname = required(&self.firstname, Field::Firstname, &mut fields);
        let lastname = required(&self.lastname, Field::Lastname, &mut fields);
        let abstract_text = required(&self.abstract_text, Field::Abstract, &mut fields);

        if !fields.is_empty() {
            return Err(ValidationError { fields });
        }

        Ok(SubmissionDraft {
            journal_id,
            firstname,
            lastname,
            affiliation: self.affiliation.trim().to_string(),
            author_url: self.author_url.trim().to_string(),
            abstract_text,
        })
    }
}

impl DraftForm {
    /// Draft for a revision of an existing submission
    ///
    /// The journal is already fixed by the submission and no field is
    /// obligatory; whatever was entered is trimmed and passed along.
    pub fn revision_draft(&self, journal_id: u64) -> SubmissionDraft {
        SubmissionDraft {
            journal_id,
            firstname: self.firstname.trim().to_string(),
            lastname: self.lastname.trim().to_string(),
            affiliation: self.affiliation.trim().to_string(),
            author_url: self.author_url.trim().to_string(),
            abstract_text: self.abstract_text.trim().to_string(),
        }
    }
}

pub(crate) fn required(value: &str, field: Field, missing: &mut Vec<Field>) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        missing.push(field);
    }
    trimmed.to_string()
}
