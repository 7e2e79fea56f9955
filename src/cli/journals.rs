//! Journals and register commands - journal administration

use crate::cli::style::{bullet, check, Stylize};
use anstream::println;
use journal_bridge::error::Result;
use journal_bridge::form::RegistrationForm;
use journal_bridge::journals::{fetch_journals, register_journal, RegistrationOutcome};
use journal_bridge::service::create_service;

/// Run the journals command
pub async fn run_journals(
    url: Option<&str>,
    token: Option<&str>,
    service_url: &str,
    key: &str,
) -> Result<()> {
    let service = create_service(url, token)?;
    let journals = fetch_journals(&service, &service, service_url, key).await?;

    if journals.is_empty() {
        println!("{}", "The journal service lists no journals".muted());
        return Ok(());
    }

    println!("{}", "Journals".emphasis());
    for journal in &journals {
        let editor = match (&journal.matched_user_id, &journal.matched_user_name) {
            (Some(id), Some(name)) => format!("editor {name} ({id})"),
            _ => "no matching user".to_string(),
        };
        println!(
            "  {} {} {} {}",
            bullet(),
            journal.id.accent(),
            journal.name,
            editor.muted()
        );
    }
    Ok(())
}

/// Run the register command
pub async fn run_register(
    url: Option<&str>,
    token: Option<&str>,
    service_url: &str,
    key: &str,
    journal_id: u64,
    name: &str,
    editor_id: &str,
) -> Result<()> {
    let service = create_service(url, token)?;
    let form = RegistrationForm {
        service_url: service_url.to_string(),
        service_key: key.to_string(),
        journal_id,
        name: name.to_string(),
        editor_id: editor_id.to_string(),
    };

    match register_journal(&service, &form).await? {
        RegistrationOutcome::Created => {
            println!("{} Journal {} saved", check(), name.accent());
        }
        RegistrationOutcome::AlreadyPresent => {
            let notice = format!("Journal {name} already present on server");
            println!("{}", notice.warn());
        }
    }
    Ok(())
}
