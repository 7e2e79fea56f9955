//! Test data factories for journal-bridge types
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use journal_bridge::document::{ContentNode, Document};
use journal_bridge::form::DraftForm;
use journal_bridge::pack::{BibEntry, ImageRecord};
use journal_bridge::types::{DocInfo, Journal, Submission, WorkflowRole};
use serde_json::{json, Map};

/// An article with an authors part, an abstract and a body referencing
/// images `a` and `b` and citation `k1`
pub fn make_document(id: u64) -> Document {
    Document {
        id,
        title: "A Study of Submissions".to_string(),
        content: ContentNode::new("article").with_children(vec![
            ContentNode::new("heading_part")
                .with_attr("metadata", "title")
                .with_children(vec![ContentNode::text("A Study of Submissions")]),
            ContentNode::new("contributors_part")
                .with_attr("metadata", "authors")
                .with_children(vec![
                    ContentNode::new("contributor")
                        .with_attr("firstname", "Ada")
                        .with_attr("lastname", "Lovelace")
                        .with_attr("institution", "Analytical Society"),
                    ContentNode::new("contributor")
                        .with_attr("firstname", "Charles")
                        .with_attr("lastname", "Babbage"),
                ]),
            ContentNode::new("richtext_part")
                .with_attr("metadata", "abstract")
                .with_children(vec![ContentNode::new("paragraph")
                    .with_children(vec![ContentNode::text("We study engines.")])]),
            ContentNode::new("richtext_part")
                .with_attr("metadata", "body")
                .with_children(vec![
                    ContentNode::new("figure").with_attr("image", "b"),
                    ContentNode::new("paragraph").with_children(vec![
                        ContentNode::text("As shown before "),
                        ContentNode::new("citation")
                            .with_attr("references", vec![json!({"id": "k1"})]),
                    ]),
                    ContentNode::new("figure").with_attr("image", "a"),
                ]),
        ]),
    }
}

/// Image record for `id`
pub fn make_image(id: &str) -> ImageRecord {
    ImageRecord {
        id: id.to_string(),
        title: format!("Figure {id}"),
        image: format!("/media/images/{id}.png"),
        file_type: "image/png".to_string(),
    }
}

/// Bibliography entry stored under `key`
pub fn make_entry(key: &str) -> (String, BibEntry) {
    let mut fields = Map::new();
    fields.insert("title".to_string(), json!(format!("Work {key}")));
    (
        key.to_string(),
        BibEntry {
            entry_key: format!("{key}2024"),
            bib_type: "article".to_string(),
            cats: vec![],
            fields,
        },
    )
}

/// Journal with a contact email
pub fn make_journal(id: u64, name: &str, contact: Option<&str>) -> Journal {
    Journal {
        id,
        name: name.to_string(),
        contact_email: contact.map(ToString::to_string),
        matched_user_id: None,
        matched_user_name: None,
    }
}

/// Complete first-submission form
pub fn make_form(journal_id: u64) -> DraftForm {
    DraftForm {
        journal_id: journal_id.to_string(),
        firstname: " Ada ".to_string(),
        lastname: "Lovelace ".to_string(),
        affiliation: "Analytical Society".to_string(),
        author_url: "https://example.org/ada".to_string(),
        abstract_text: "We study engines.".to_string(),
    }
}

/// Submitted record at `version` seen by `role`
pub fn make_submitted(version: &str, role: Option<WorkflowRole>, journal_id: u64) -> Submission {
    let mut submission = Submission::submitted(version.parse().unwrap(), role);
    submission.submission_id = Some(77);
    submission.journal_id = Some(journal_id);
    submission
}

/// Doc info for a document that was never submitted
pub fn make_unsubmitted_info(journals: Vec<Journal>) -> DocInfo {
    DocInfo {
        submission: Submission::not_submitted(),
        journals,
    }
}
