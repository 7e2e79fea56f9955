//! Pack command - print the bundle a submission would send

use crate::cli::input::{apply_draft_args, load_document};
use crate::{DocumentArgs, DraftArgs};
use journal_bridge::error::{Field, Result, ValidationError};
use journal_bridge::form::{DraftForm, LocalUser};
use journal_bridge::pack::Packager;
use journal_bridge::workflow::SubmissionAction;

/// Run the pack command
///
/// No network access: fields come from the document and the flags only.
pub async fn run_pack(input: &DocumentArgs, fields: &DraftArgs, copyedit: bool) -> Result<()> {
    let loaded = load_document(input)?;
    let packager = Packager::default();
    let prefill = DraftForm::prefill(
        &loaded.document,
        packager.hints(),
        &LocalUser::default(),
        &[],
    );
    let form = apply_draft_args(prefill, fields);

    let (action, draft) = if copyedit {
        let journal_id = form
            .journal_id
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|&id| id > 0)
            .ok_or(ValidationError {
                fields: vec![Field::JournalId],
            })?;
        (SubmissionAction::CopyeditDraftUpdate, form.revision_draft(journal_id))
    } else {
        (SubmissionAction::FirstSubmission, form.validate()?)
    };

    let bundle = packager
        .pack(
            &loaded.document,
            &loaded.images,
            &loaded.bibliography,
            &draft,
            action,
        )
        .await?;
    println!("{}", serde_json::to_string_pretty(&bundle)?);
    Ok(())
}
