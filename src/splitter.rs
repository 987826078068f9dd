// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Splitting an export into one file per conversation.
//!
//! Each conversation is written as `<sanitized title>.json` holding its header
//! fields and the untouched response records. An `INDEX.json` manifest lists
//! every file in input order.
//!
//! # Example
//!
//! ```
//! use grok_export::loader::parse_export;
//! use grok_export::splitter::{normalize, sanitize_filename};
//!
//! let doc = parse_export(r#"{
//!     "conversations": [{
//!         "conversation": { "id": "c1", "title": "What is Rust?" },
//!         "responses": [{ "response": { "sender": "human", "message": "hi" } }]
//!     }]
//! }"#).unwrap();
//!
//! let normalized = normalize(&doc.conversations[0]);
//! assert_eq!(normalized.title, "What is Rust?");
//! assert_eq!(sanitize_filename(&normalized.title), "What_is_Rust_");
//! ```

use crate::export::{ConversationEntry, ExportDocument};
use crate::writer::{self, WriteError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Name of the manifest written alongside the conversation files.
pub const INDEX_FILE: &str = "INDEX.json";

/// Characters that are replaced with `_` in filenames.
const INVALID_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// One conversation as written to its own file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedConversation<'a> {
    /// Conversation id as found in the export, or `"unknown"`.
    pub conversation_id: Value,
    /// Title, or `Conversation_{id}` when absent.
    pub title: String,
    /// Creation time exactly as found in the export, or `""`.
    pub create_time: Value,
    /// Response records, unmodified.
    pub responses: &'a [Value],
}

/// One line of the `INDEX.json` manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Conversation id.
    pub id: Value,
    /// Conversation title.
    pub title: String,
    /// Filename (not path) of the conversation file.
    pub file: String,
    /// Number of response records in the conversation.
    pub messages: usize,
}

/// Cleans a conversation title into a filename stem.
///
/// Replaces `< > : " / \ | ? *` with `_`, trims surrounding whitespace, then
/// turns the remaining spaces into `_`. Distinct titles may collide.
#[must_use]
pub fn sanitize_filename(name: &str) -> String {
    name.replace(INVALID_CHARS, "_").trim().replace(' ', "_")
}

/// Builds the per-conversation record for `entry`.
#[must_use]
pub fn normalize(entry: &ConversationEntry) -> NormalizedConversation<'_> {
    let header = entry.header();
    let title = header
        .title
        .clone()
        .unwrap_or_else(|| format!("Conversation_{}", header.id_text()));

    NormalizedConversation {
        conversation_id: header.id,
        title,
        create_time: header.create_time.unwrap_or_else(|| Value::from("")),
        responses: &entry.responses,
    }
}

/// Writes one conversation into `out_dir` and returns its index entry.
///
/// # Errors
///
/// Returns a [`WriteError`] if the file cannot be written.
pub fn save_conversation(entry: &ConversationEntry, out_dir: &Path) -> Result<IndexEntry, WriteError> {
    let record = normalize(entry);
    let file = format!("{}.json", sanitize_filename(&record.title));

    writer::write_json(&out_dir.join(&file), &record)?;

    Ok(IndexEntry {
        id: record.conversation_id,
        title: record.title,
        file,
        messages: record.responses.len(),
    })
}

/// Splits `doc` into `out_dir`, creating the directory if needed.
///
/// Existing files with the same names are overwritten; nothing else in the
/// directory is touched. Returns the index in input order.
///
/// # Errors
///
/// Returns a [`WriteError`] on the first file that cannot be written.
pub fn split_export(doc: &ExportDocument, out_dir: &Path) -> Result<Vec<IndexEntry>, WriteError> {
    writer::ensure_dir(out_dir)?;

    let index = doc
        .conversations
        .iter()
        .map(|entry| save_conversation(entry, out_dir))
        .collect::<Result<Vec<_>, _>>()?;

    writer::write_json(&out_dir.join(INDEX_FILE), &index)?;
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(conversation: Value, responses: Vec<Value>) -> ConversationEntry {
        ConversationEntry {
            conversation,
            responses,
        }
    }

    #[test]
    fn sanitizes_invalid_characters() {
        assert_eq!(sanitize_filename(r#"a<b>c:d"e/f\g|h?i*j"#), "a_b_c_d_e_f_g_h_i_j");
    }

    #[test]
    fn sanitize_trims_then_replaces_spaces() {
        assert_eq!(sanitize_filename("  hello world  "), "hello_world");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for title in ["  What is 2 * 3?  ", "a/b\\c", "", "日本語 タイトル", "\ttabbed\n"] {
            let once = sanitize_filename(title);
            assert_eq!(sanitize_filename(&once), once, "title {title:?}");
        }
    }

    #[test]
    fn sanitize_keeps_non_ascii() {
        assert_eq!(sanitize_filename("Café crème"), "Café_crème");
    }

    #[test]
    fn normalize_defaults_title_from_id() {
        let e = entry(json!({ "id": "abc" }), vec![]);
        let record = normalize(&e);

        assert_eq!(record.conversation_id, "abc");
        assert_eq!(record.title, "Conversation_abc");
        assert_eq!(record.create_time, "");
    }

    #[test]
    fn normalize_keeps_numeric_id() {
        let e = entry(json!({ "id": 42 }), vec![]);
        let record = normalize(&e);

        assert_eq!(record.conversation_id, json!(42));
        assert_eq!(record.title, "Conversation_42");
    }

    #[test]
    fn normalize_passes_create_time_through() {
        let numeric = entry(json!({ "id": "c", "create_time": 1_714_557_600 }), vec![]);
        assert_eq!(normalize(&numeric).create_time, json!(1_714_557_600));

        let null = entry(json!({ "id": "c", "create_time": null }), vec![]);
        assert_eq!(normalize(&null).create_time, Value::Null);
    }

    #[test]
    fn split_numeric_ids_get_separate_files() {
        let dir = tempfile::tempdir().unwrap();
        let doc = ExportDocument {
            conversations: vec![
                entry(json!({ "id": 42 }), vec![json!({})]),
                entry(json!({ "id": 43 }), vec![]),
            ],
        };

        let index = split_export(&doc, dir.path()).unwrap();

        assert_eq!(index[0].id, json!(42));
        assert_eq!(index[0].file, "Conversation_42.json");
        assert_eq!(index[1].file, "Conversation_43.json");

        let body: Value = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("Conversation_42.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(body["conversation_id"], 42);
    }

    #[test]
    fn normalize_defaults_everything() {
        let e = entry(Value::Null, vec![]);
        let record = normalize(&e);

        assert_eq!(record.conversation_id, "unknown");
        assert_eq!(record.title, "Conversation_unknown");
    }

    #[test]
    fn normalize_passes_responses_through() {
        let responses = vec![
            json!({ "response": { "sender": "human", "message": "  keep  ", "extra": [1] } }),
            json!({ "response": {} }),
        ];
        let e = entry(json!({ "id": "c1", "title": "T" }), responses.clone());

        assert_eq!(normalize(&e).responses, responses.as_slice());
    }

    #[test]
    fn normalized_field_order() {
        let e = entry(json!({ "id": "c1", "title": "T", "create_time": "2024" }), vec![]);
        let out = writer::to_pretty_json(&normalize(&e)).unwrap();

        assert_eq!(
            out,
            "{\n  \"conversation_id\": \"c1\",\n  \"title\": \"T\",\n  \"create_time\": \"2024\",\n  \"responses\": []\n}"
        );
    }

    #[test]
    fn save_conversation_writes_file_and_counts_all_responses() {
        let dir = tempfile::tempdir().unwrap();
        let e = entry(
            json!({ "id": "c1", "title": "My chat" }),
            vec![json!({ "response": {} }), json!({}), json!({ "response": { "message": "x" } })],
        );

        let index = save_conversation(&e, dir.path()).unwrap();

        assert_eq!(
            index,
            IndexEntry {
                id: "c1".into(),
                title: "My chat".into(),
                file: "My_chat.json".into(),
                messages: 3,
            }
        );
        assert!(dir.path().join("My_chat.json").is_file());
    }

    #[test]
    fn split_writes_one_file_per_conversation_and_index() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out");
        let doc = ExportDocument {
            conversations: vec![
                entry(json!({ "id": "1", "title": "First" }), vec![json!({})]),
                entry(json!({ "id": "2", "title": "Second" }), vec![]),
            ],
        };

        let index = split_export(&doc, &out).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index[0].file, "First.json");
        assert_eq!(index[1].file, "Second.json");
        assert!(out.join("First.json").is_file());
        assert!(out.join("Second.json").is_file());

        let written: Vec<IndexEntry> =
            serde_json::from_str(&std::fs::read_to_string(out.join(INDEX_FILE)).unwrap()).unwrap();
        assert_eq!(written, index);
    }

    #[test]
    fn split_colliding_titles_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let doc = ExportDocument {
            conversations: vec![
                entry(json!({ "id": "1", "title": "a/b" }), vec![]),
                entry(json!({ "id": "2", "title": "a?b" }), vec![]),
            ],
        };

        let index = split_export(&doc, dir.path()).unwrap();
        assert_eq!(index.len(), 2);

        let body: Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("a_b.json")).unwrap()).unwrap();
        assert_eq!(body["conversation_id"], "2");
    }

    #[test]
    fn split_empty_export_writes_empty_index() {
        let dir = tempfile::tempdir().unwrap();
        let index = split_export(&ExportDocument::default(), dir.path()).unwrap();

        assert!(index.is_empty());
        assert_eq!(std::fs::read_to_string(dir.path().join(INDEX_FILE)).unwrap(), "[]");
    }
}
