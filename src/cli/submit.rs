//! Submit and review commands - send a document or a recommendation

use crate::cli::input::{
    apply_draft_args, interactive, load_document, prompt_draft, review_form, LoadedDocument,
    ReviewArgs,
};
use crate::cli::progress::CliProgress;
use crate::cli::style::{arrow, hyperlink, Stylize};
use crate::{DocumentArgs, DraftArgs};
use anstream::println;
use journal_bridge::document::DocumentSource;
use journal_bridge::error::{Error, Result};
use journal_bridge::form::{DraftForm, LocalUser};
use journal_bridge::pack::Packager;
use journal_bridge::service::{create_service, DocumentRoles, HttpService, JournalService};
use journal_bridge::submit::{create_submission_plan, Submitter};
use journal_bridge::types::{AccessRight, Submission};
use journal_bridge::workflow::SubmissionAction;

/// Run the submit command
pub async fn run_submit(
    url: Option<&str>,
    token: Option<&str>,
    input: &DocumentArgs,
    fields: &DraftArgs,
    access: AccessRight,
    no_input: bool,
    dry_run: bool,
) -> Result<()> {
    let loaded = load_document(input)?;
    let document_id = loaded.document.document_id();
    let service = create_service(url, token)?;

    let info = service.doc_info(document_id).await?;
    if !info.offers_submission() {
        return Err(Error::ActionDisabled(
            "no journals are configured on this installation".to_string(),
        ));
    }

    let packager = Packager::default();
    let prefill = DraftForm::prefill(
        &loaded.document,
        packager.hints(),
        &LocalUser::default(),
        &info.journals,
    );
    let mut form = apply_draft_args(prefill, fields);

    let resolved = info.submission.resolve(access);
    println!(
        "{} {} {}",
        arrow(),
        resolved.action.accent(),
        format!("({})", loaded.document.title()).muted()
    );
    if resolved.enabled
        && resolved.action == SubmissionAction::FirstSubmission
        && interactive(no_input)
    {
        prompt_draft(&mut form, &info.journals)?;
    }

    if dry_run {
        return report_dry_run(&service, &loaded, &info.submission, access, &form, &packager).await;
    }

    let roles = DocumentRoles::new(document_id, access, &service);
    let submitter = Submitter::with_packager(&service, packager);
    let result = submitter
        .submit_document(
            &loaded.document,
            &roles,
            &form,
            &loaded.images,
            &loaded.bibliography,
            &CliProgress::new(),
        )
        .await?;

    println!(
        "  {} sent to {}",
        result.action.emphasis(),
        hyperlink(service.base_url().as_str())
    );
    Ok(())
}

async fn report_dry_run(
    service: &HttpService,
    loaded: &LoadedDocument,
    submission: &Submission,
    access: AccessRight,
    form: &DraftForm,
    packager: &Packager,
) -> Result<()> {
    let plan = create_submission_plan(loaded.document.document_id(), submission, access, form)?;
    let bundle = packager
        .pack(
            &loaded.document,
            &loaded.images,
            &loaded.bibliography,
            &plan.draft,
            plan.action,
        )
        .await?;

    println!("{}", "Dry run - nothing will be sent".muted());
    println!(
        "  Would send {} to {}",
        plan.action.accent(),
        HttpService::endpoint_path(plan.endpoint).accent()
    );
    println!("  Journal:  {}", plan.draft.journal_id);
    println!(
        "  Author:   {} {}",
        plan.draft.firstname, plan.draft.lastname
    );
    println!("  Images:   {}", bundle.image_ids.join(", "));
    println!(
        "  Content:  {} bytes, bibliography {} bytes",
        bundle.serialized_content.len(),
        bundle.serialized_bibliography.len()
    );
    println!("  Service:  {}", service.base_url().muted());
    Ok(())
}

/// Run the review command
pub async fn run_review(
    url: Option<&str>,
    token: Option<&str>,
    document_id: u64,
    access: AccessRight,
    fields: ReviewArgs,
    no_input: bool,
) -> Result<()> {
    let service = create_service(url, token)?;
    let form = review_form(fields, interactive(no_input))?;

    let roles = DocumentRoles::new(document_id, access, &service);
    let submitter = Submitter::new(&service);
    let result = submitter
        .submit_review(document_id, &roles, &form, &CliProgress::new())
        .await?;

    println!("  {} for document {}", result.action.emphasis(), document_id);
    Ok(())
}
