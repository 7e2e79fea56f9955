//! Resolve and status commands - show which submit action a user gets

use crate::cli::style::{arrow, bullet, check, cross, Stylize};
use anstream::println;
use journal_bridge::error::Result;
use journal_bridge::service::{create_service, JournalService};
use journal_bridge::types::{AccessRight, Submission, SubmissionStatus, WorkflowRole};
use journal_bridge::workflow::{resolve_action, ResolvedAction, VersionToken};

/// Run the resolve command
///
/// Purely local: builds a submission record from the flags and prints the
/// decision table's answer.
pub fn run_resolve(
    status: SubmissionStatus,
    version: Option<&str>,
    role: Option<WorkflowRole>,
    access: AccessRight,
) -> Result<()> {
    let submission = Submission {
        status,
        version: version.map(str::parse::<VersionToken>).transpose()?,
        user_role: role,
        submission_id: None,
        journal_id: None,
    };
    print_resolved(&resolve_action(&submission, role, access));
    Ok(())
}

/// Run the status command
pub async fn run_status(
    url: Option<&str>,
    token: Option<&str>,
    document_id: u64,
    access: AccessRight,
) -> Result<()> {
    let service = create_service(url, token)?;
    let info = service.doc_info(document_id).await?;
    let submission = &info.submission;

    println!("{}", format!("Document {document_id}").emphasis());
    println!("  Status:  {:?}", submission.status);
    if let Some(version) = submission.effective_version() {
        println!("  Version: {}", version.accent());
    }
    if let Some(role) = submission.effective_role() {
        println!("  Role:    {}", role.accent());
    }
    println!();

    if !info.offers_submission() {
        println!("{}", "No journals are configured on this installation".muted());
        return Ok(());
    }

    print_resolved(&submission.resolve(access));
    println!();
    println!("{}", "Journals".emphasis());
    for journal in &info.journals {
        println!("  {} {} {}", bullet(), journal.name, format!("({})", journal.id).muted());
    }
    Ok(())
}

fn print_resolved(resolved: &ResolvedAction) {
    if resolved.enabled {
        println!("{} {} {}", check(), resolved.action.accent(), "available".success());
    } else {
        println!("{} {} {}", cross(), resolved.action.accent(), "disabled".warn());
    }
    if let Some(reason) = resolved.reason {
        println!("  {} {}", arrow(), reason.to_string().muted());
    }
}
