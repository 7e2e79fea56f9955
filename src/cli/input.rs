//! Loading documents and collecting dialog fields

use crate::cli::style::Stylize;
use crate::{DocumentArgs, DraftArgs};
use anstream::println;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use journal_bridge::document::Document;
use journal_bridge::error::{Error, Result};
use journal_bridge::form::{DraftForm, Recommendation, ReviewForm};
use journal_bridge::pack::{MemoryBibliographyStore, MemoryImageStore};
use journal_bridge::types::Journal;
use std::io::IsTerminal;

/// Reviewer fields from the command line
pub struct ReviewArgs {
    /// Recommendation code or name
    pub recommendation: Option<String>,
    /// Message for the editor only
    pub editor_message: Option<String>,
    /// Message for editor and authors
    pub editor_author_message: Option<String>,
}

/// A document with its image and bibliography stores
pub struct LoadedDocument {
    /// Exported document
    pub document: Document,
    /// Image database, empty unless given
    pub images: MemoryImageStore,
    /// Bibliography, empty unless given
    pub bibliography: MemoryBibliographyStore,
}

/// Load the document and whichever store exports were given
pub fn load_document(input: &DocumentArgs) -> Result<LoadedDocument> {
    let document = Document::from_file(&input.document)?;
    let images = match &input.images {
        Some(path) => MemoryImageStore::from_file(path)?,
        None => MemoryImageStore::default(),
    };
    let bibliography = match &input.bibliography {
        Some(path) => MemoryBibliographyStore::from_file(path)?,
        None => MemoryBibliographyStore::default(),
    };
    Ok(LoadedDocument {
        document,
        images,
        bibliography,
    })
}

/// Overlay flag values on a prefilled form
pub fn apply_draft_args(mut form: DraftForm, fields: &DraftArgs) -> DraftForm {
    let overlay = [
        (&mut form.journal_id, &fields.journal_id),
        (&mut form.firstname, &fields.firstname),
        (&mut form.lastname, &fields.lastname),
        (&mut form.affiliation, &fields.affiliation),
        (&mut form.author_url, &fields.author_url),
        (&mut form.abstract_text, &fields.abstract_text),
    ];
    for (slot, value) in overlay {
        if let Some(value) = value {
            slot.clone_from(value);
        }
    }
    form
}

/// Whether prompts can be shown
pub fn interactive(no_input: bool) -> bool {
    !no_input && std::io::stdin().is_terminal()
}

fn prompt_error(e: dialoguer::Error) -> Error {
    Error::Internal(format!("prompt failed: {e}"))
}

fn prompt_text(label: &str, initial: &str, required: bool) -> Result<String> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(label)
        .with_initial_text(initial)
        .allow_empty(!required)
        .interact_text()
        .map_err(prompt_error)
}

/// Ask for the first-submission fields, starting from the prefilled values
pub fn prompt_draft(form: &mut DraftForm, journals: &[Journal]) -> Result<()> {
    if !journals.is_empty() {
        let labels: Vec<String> = journals
            .iter()
            .map(|j| format!("{} ({})", j.name, j.id))
            .collect();
        let current = journals
            .iter()
            .position(|j| j.id.to_string() == form.journal_id.trim())
            .unwrap_or(0);
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Journal")
            .items(&labels)
            .default(current)
            .interact()
            .map_err(prompt_error)?;
        form.journal_id = journals[choice].id.to_string();
    }

    println!("{}", "Corresponding author".emphasis());
    form.firstname = prompt_text("First name", &form.firstname, true)?;
    form.lastname = prompt_text("Last name", &form.lastname, true)?;
    form.affiliation = prompt_text("Affiliation", &form.affiliation, false)?;
    form.author_url = prompt_text("Web page", &form.author_url, false)?;
    form.abstract_text = prompt_text("Abstract", &form.abstract_text, true)?;
    Ok(())
}

/// Reviewer form from flags, prompting for what is missing
pub fn review_form(fields: ReviewArgs, prompt: bool) -> Result<ReviewForm> {
    let mut form = ReviewForm {
        editor_message: fields.editor_message.unwrap_or_default(),
        editor_author_message: fields.editor_author_message.unwrap_or_default(),
        recommendation: fields.recommendation.unwrap_or_default(),
    };
    if !prompt {
        return Ok(form);
    }

    if form.editor_message.trim().is_empty() {
        form.editor_message = prompt_text("Message for the editor", "", true)?;
    }
    if form.editor_author_message.trim().is_empty() {
        form.editor_author_message = prompt_text("Message for editor and authors", "", true)?;
    }
    if form.recommendation.parse::<Recommendation>().is_err() {
        let labels: Vec<String> = Recommendation::ALL.iter().map(ToString::to_string).collect();
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Recommendation")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(prompt_error)?;
        form.recommendation = Recommendation::ALL[choice].code().to_string();
    }
    Ok(form)
}
