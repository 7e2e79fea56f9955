//! Journal administration
//!
//! Lists the journals of a remote journal service, matches their contact
//! emails to local users, and registers journals with the bridge.

use crate::error::{Error, Field, Result, ValidationError};
use crate::form::RegistrationForm;
use crate::service::{EndpointKind, JournalService, Payload, Transport, UserDirectory};
use crate::types::Journal;
use serde_json::Value;
use tracing::{debug, warn};

/// Result of registering a journal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The journal was saved
    Created,
    /// The journal was already registered
    AlreadyPresent,
}

/// Fetch the journals of a remote service, sorted by id, with contacts matched
pub async fn fetch_journals(
    service: &dyn JournalService,
    users: &dyn UserDirectory,
    service_url: &str,
    key: &str,
) -> Result<Vec<Journal>> {
    let mut fields = Vec::new();
    if service_url.trim().is_empty() {
        fields.push(Field::ServiceUrl);
    }
    if key.trim().is_empty() {
        fields.push(Field::ServiceKey);
    }
    if !fields.is_empty() {
        return Err(ValidationError { fields }.into());
    }

    let journals = service.list_journals(service_url.trim(), key.trim()).await?;
    Ok(match_contacts(journals, users).await)
}

/// Sort journals by id and attach the local user owning each contact email
///
/// A failed lookup leaves the journal unmatched.
pub async fn match_contacts(mut journals: Vec<Journal>, users: &dyn UserDirectory) -> Vec<Journal> {
    journals.sort_by_key(|j| j.id);

    for journal in &mut journals {
        let Some(email) = journal.contact_email.as_deref().filter(|e| !e.is_empty()) else {
            continue;
        };
        match users.find_by_email(email).await {
            Ok(Some(user)) => {
                debug!("Journal {} contact {email} is user {}", journal.id, user.user_id);
                journal.matched_user_id = Some(user.user_id);
                journal.matched_user_name = Some(user.user_name);
            }
            Ok(None) => debug!("No local user for contact {email}"),
            Err(e) => warn!("Cannot look up user for contact {email}: {e}"),
        }
    }

    journals
}

/// Registration form prefilled from a listed journal
pub fn registration_form(journal: &Journal, service_url: &str, key: &str) -> RegistrationForm {
    RegistrationForm {
        service_url: service_url.to_string(),
        service_key: key.to_string(),
        journal_id: journal.id,
        name: journal.name.clone(),
        editor_id: journal
            .matched_user_id
            .map(|id| id.to_string())
            .unwrap_or_default(),
    }
}

/// Validate and register a journal
pub async fn register_journal(
    transport: &dyn Transport,
    form: &RegistrationForm,
) -> Result<RegistrationOutcome> {
    let registration = form.validate()?;
    let response = transport
        .submit(
            EndpointKind::JournalRegistration,
            &Payload::Registration(registration),
        )
        .await
        .into_result()
        .map_err(|e| match e {
            Error::Transport(reason) => Error::Transport(format!("could not save journal: {reason}")),
            other => other,
        })?;

    let created = response
        .get("created")
        .and_then(Value::as_bool)
        .unwrap_or(true);
    Ok(if created {
        RegistrationOutcome::Created
    } else {
        RegistrationOutcome::AlreadyPresent
    })
}
