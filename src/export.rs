// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Typed view of a Grok backend export.
//!
//! The export is only loosely structured, so most of the document stays as
//! [`serde_json::Value`] and fields are pulled out with fallbacks rather than
//! failing on missing or oddly typed data.
//!
//! # Format Overview
//!
//! ```text
//! {
//!   "conversations": [
//!     {
//!       "conversation": { "id": "...", "title": "...", "create_time": "..." },
//!       "responses": [
//!         { "response": { "sender": "human", "message": "...",
//!                         "create_time": { "$date": { "$numberLong": "..." } } } }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde::Deserialize;
use serde_json::Value;

/// Identifier used when a conversation carries no `id`.
pub const UNKNOWN_ID: &str = "unknown";

/// The root of a Grok export.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExportDocument {
    /// Conversations in export order. Missing means empty.
    #[serde(default)]
    pub conversations: Vec<ConversationEntry>,
}

/// One conversation: its header object and the raw response records.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConversationEntry {
    /// The raw `conversation` object. Read through [`ConversationEntry::header`].
    #[serde(default)]
    pub conversation: Value,

    /// Response records, kept verbatim so they can be passed through untouched.
    #[serde(default)]
    pub responses: Vec<Value>,
}

impl ConversationEntry {
    /// Extracts the header fields, applying defaults for anything missing.
    #[must_use]
    pub fn header(&self) -> ConversationHeader {
        ConversationHeader::from_value(&self.conversation)
    }
}

/// Identifying metadata for one conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationHeader {
    /// Conversation id as found in the export, or [`UNKNOWN_ID`].
    ///
    /// Kept as JSON so a numeric id is written back as a number.
    pub id: Value,

    /// Title as found in the export.
    ///
    /// `None` when absent; each tool substitutes its own placeholder.
    pub title: Option<String>,

    /// Creation time as found in the export, normally an ISO-8601 string.
    pub create_time: Option<Value>,
}

impl ConversationHeader {
    /// Reads a header out of a `conversation` object.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: get(value, &["id"])
                .filter(|id| !id.is_null())
                .cloned()
                .unwrap_or_else(|| Value::from(UNKNOWN_ID)),
            title: get_string(value, &["title"]),
            create_time: get(value, &["create_time"]).cloned(),
        }
    }

    /// The id as plain text, for filenames and synthetic message ids.
    #[must_use]
    pub fn id_text(&self) -> String {
        scalar_text(&self.id)
    }
}

/// A single message unwrapped from a response record.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Who sent the message (`"human"`, `"assistant"`, ...), if recorded.
    pub sender: Option<String>,

    /// The message body, untrimmed.
    pub text: String,

    /// The value at `create_time.$date.$numberLong`, if any.
    pub timestamp: Option<Value>,
}

impl Message {
    /// Unwraps the `response` object of a response record.
    ///
    /// Returns `None` when the record has no usable message: the `response`
    /// key is missing, `null`, not an object, or an empty object.
    #[must_use]
    pub fn from_record(record: &Value) -> Option<Self> {
        let msg = get(record, &["response"])?.as_object()?;
        if msg.is_empty() {
            return None;
        }

        Some(Self {
            sender: msg.get("sender").and_then(Value::as_str).map(str::to_owned),
            text: msg
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned(),
            timestamp: msg
                .get("create_time")
                .and_then(|t| get(t, &["$date", "$numberLong"]))
                .cloned(),
        })
    }
}

/// Navigates a JSON path and returns the value at the end.
///
/// # Arguments
///
/// * `value` - The root JSON value to navigate from
/// * `path` - A sequence of object keys to follow
#[must_use]
pub fn get<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for key in path {
        current = current.get(*key)?;
    }
    Some(current)
}

/// Like [`get`] but only yields string values.
#[must_use]
pub fn get_str<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    get(value, path)?.as_str()
}

/// Like [`get_str`] but returns an owned `String`.
#[must_use]
pub fn get_string(value: &Value, path: &[&str]) -> Option<String> {
    get_str(value, path).map(str::to_owned)
}

/// Renders a scalar as text: strings as-is, `null` as empty, others as JSON.
#[must_use]
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
