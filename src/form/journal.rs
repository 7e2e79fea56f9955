//! Journal registration form

use crate::error::{Field, ValidationError};
use crate::form::draft::required;
use serde::Serialize;
use url::Url;

/// Raw registration fields from the admin page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    /// Base URL of the journal service
    pub service_url: String,
    /// API key of the journal service
    pub service_key: String,
    /// Journal id on the service
    pub journal_id: u64,
    /// Display name
    pub name: String,
    /// Local user id of the journal editor
    pub editor_id: String,
}

/// A validated journal registration
///
/// Serializes with the field names the journal admin endpoint reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalRegistration {
    /// Base URL of the journal service
    #[serde(rename = "ojs_url")]
    pub service_url: String,
    /// API key of the journal service
    #[serde(rename = "ojs_key")]
    pub service_key: String,
    /// Journal id on the service
    #[serde(rename = "ojs_jid")]
    pub journal_id: u64,
    /// Display name
    pub name: String,
    /// Local user id of the journal editor
    pub editor_id: u64,
}

impl RegistrationForm {
    /// URL, key, name and an integer editor id are required
    pub fn validate(&self) -> Result<JournalRegistration, ValidationError> {
        let mut fields = Vec::new();

        let service_url = required(&self.service_url, Field::ServiceUrl, &mut fields);
        if !service_url.is_empty() && Url::parse(&service_url).is_err() {
            fields.push(Field::ServiceUrl);
        }
        let service_key = required(&self.service_key, Field::ServiceKey, &mut fields);
        let name = required(&self.name, Field::JournalName, &mut fields);
        let editor_id = self.editor_id.trim().parse::<u64>().ok();
        if editor_id.is_none() {
            fields.push(Field::EditorId);
        }

        match editor_id {
            Some(editor_id) if fields.is_empty() => Ok(JournalRegistration {
                service_url,
                service_key,
                journal_id: self.journal_id,
                name,
                editor_id,
            }),
            _ => Err(ValidationError { fields }),
        }
    }
}
