//! jbridge - submit editor documents to a journal
//!
//! CLI binary for the journal-bridge library.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use journal_bridge::types::{AccessRight, SubmissionStatus, WorkflowRole};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "jbridge")]
#[command(about = "Submit editor documents to a journal management service")]
#[command(version)]
struct Cli {
    /// Base URL of the journal service (or JBRIDGE_URL)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Session token sent with every request (or JBRIDGE_SESSION_TOKEN)
    #[arg(long, global = true)]
    session_token: Option<String>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide the submit action offline from a submission record
    Resolve {
        /// Submission status
        #[arg(long, value_parser = parse_status, default_value = "not_submitted")]
        status: SubmissionStatus,

        /// Workflow version token, e.g. 3.0.0.1
        #[arg(long)]
        version: Option<String>,

        /// Workflow role of the viewing user
        #[arg(long)]
        role: Option<WorkflowRole>,

        /// Local access right
        #[arg(long)]
        access: AccessRight,
    },

    /// Fetch the submission record of a document and resolve its action
    Status {
        /// Editor document id
        document_id: u64,

        /// Local access right
        #[arg(long, default_value = "write")]
        access: AccessRight,
    },

    /// Package a document and print the bundle, without sending it
    Pack {
        #[command(flatten)]
        input: DocumentArgs,

        #[command(flatten)]
        fields: DraftArgs,

        /// Package for a copyedit draft update (keeps author names)
        #[arg(long)]
        copyedit: bool,
    },

    /// Submit a document to a journal
    Submit {
        #[command(flatten)]
        input: DocumentArgs,

        #[command(flatten)]
        fields: DraftArgs,

        /// Local access right
        #[arg(long, default_value = "write")]
        access: AccessRight,

        /// Never prompt; fail on missing fields instead
        #[arg(long)]
        no_input: bool,

        /// Dry run - show what would be sent without sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Send a reviewer recommendation
    Review {
        /// Editor document id
        document_id: u64,

        /// Local access right
        #[arg(long, default_value = "review")]
        access: AccessRight,

        /// Recommendation code (1-6) or name
        #[arg(long)]
        recommendation: Option<String>,

        /// Message for the editor only
        #[arg(long)]
        editor_message: Option<String>,

        /// Message for the editor and the authors
        #[arg(long)]
        editor_author_message: Option<String>,

        /// Never prompt; fail on missing fields instead
        #[arg(long)]
        no_input: bool,
    },

    /// List the journals of a journal service
    Journals {
        /// Base URL of the journal service
        #[arg(long)]
        service_url: String,

        /// API key of the journal service
        #[arg(long)]
        key: String,
    },

    /// Register a journal of a journal service
    Register {
        /// Base URL of the journal service
        #[arg(long)]
        service_url: String,

        /// API key of the journal service
        #[arg(long)]
        key: String,

        /// Journal id on the service
        #[arg(long)]
        journal_id: u64,

        /// Display name
        #[arg(long)]
        name: String,

        /// Local user id of the journal editor
        #[arg(long)]
        editor_id: String,
    },
}

/// Document and store files
#[derive(Args)]
pub struct DocumentArgs {
    /// Exported document (JSON)
    #[arg(long)]
    document: PathBuf,

    /// Image database export (JSON object keyed by id)
    #[arg(long)]
    images: Option<PathBuf>,

    /// Bibliography export (JSON object keyed by id)
    #[arg(long)]
    bibliography: Option<PathBuf>,
}

/// First-submission dialog fields
#[derive(Args, Default)]
pub struct DraftArgs {
    /// Target journal id
    #[arg(long)]
    journal_id: Option<String>,

    /// Corresponding author first name
    #[arg(long)]
    firstname: Option<String>,

    /// Corresponding author last name
    #[arg(long)]
    lastname: Option<String>,

    /// Corresponding author affiliation
    #[arg(long)]
    affiliation: Option<String>,

    /// Corresponding author web page
    #[arg(long)]
    author_url: Option<String>,

    /// Article abstract
    #[arg(long = "abstract")]
    abstract_text: Option<String>,
}

fn parse_status(raw: &str) -> Result<SubmissionStatus, String> {
    match raw {
        "unknown" => Ok(SubmissionStatus::Unknown),
        "not_submitted" | "unsubmitted" => Ok(SubmissionStatus::NotSubmitted),
        "submitted" => Ok(SubmissionStatus::Submitted),
        other => Err(format!("unknown status: {other}")),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "journal_bridge=debug,jbridge=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let url = cli.url.as_deref();
    let token = cli.session_token.as_deref();

    match cli.command {
        Commands::Resolve {
            status,
            version,
            role,
            access,
        } => {
            cli::run_resolve(status, version.as_deref(), role, access)?;
        }
        Commands::Status {
            document_id,
            access,
        } => {
            cli::run_status(url, token, document_id, access).await?;
        }
        Commands::Pack {
            input,
            fields,
            copyedit,
        } => {
            cli::run_pack(&input, &fields, copyedit).await?;
        }
        Commands::Submit {
            input,
            fields,
            access,
            no_input,
            dry_run,
        } => {
            cli::run_submit(url, token, &input, &fields, access, no_input, dry_run).await?;
        }
        Commands::Review {
            document_id,
            access,
            recommendation,
            editor_message,
            editor_author_message,
            no_input,
        } => {
            let fields = cli::ReviewArgs {
                recommendation,
                editor_message,
                editor_author_message,
            };
            cli::run_review(url, token, document_id, access, fields, no_input).await?;
        }
        Commands::Journals { service_url, key } => {
            cli::run_journals(url, token, &service_url, &key).await?;
        }
        Commands::Register {
            service_url,
            key,
            journal_id,
            name,
            editor_id,
        } => {
            cli::run_register(url, token, &service_url, &key, journal_id, &name, &editor_id)
                .await?;
        }
    }

    Ok(())
}
