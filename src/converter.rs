// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Converting an export into a ChatGPT-style conversation tree.
//!
//! The output is a single document that archive viewers built for ChatGPT
//! exports can open. Every conversation becomes an object with a `mapping`
//! of messages keyed by `"{conversation_id}-{n}"`.
//!
//! # Output Format
//!
//! ```text
//! {
//!   "conversations": [{
//!     "id": "c1",
//!     "title": "...",
//!     "create_time": "2024-05-01",
//!     "mapping": {
//!       "c1-0": {
//!         "id": "c1-0",
//!         "message": {
//!           "author": { "role": "user" },
//!           "create_time": "1714557600000",
//!           "content": { "parts": ["hello"] }
//!         }
//!       }
//!     }
//!   }]
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use grok_export::converter::convert_export;
//! use grok_export::loader::parse_export;
//!
//! let doc = parse_export(r#"{
//!     "conversations": [{
//!         "conversation": { "id": "c1", "create_time": "2024-05-01T10:00:00Z" },
//!         "responses": [
//!             { "response": { "sender": "human", "message": "  hello  " } },
//!             { "response": { "sender": "assistant", "message": "Hi!" } }
//!         ]
//!     }]
//! }"#).unwrap();
//!
//! let converted = convert_export(&doc);
//! let conv = &converted.conversations[0];
//! assert_eq!(conv.create_time, "2024-05-01");
//! assert_eq!(conv.mapping["c1-0"].message.content.parts, ["hello"]);
//! ```

use crate::export::{ConversationEntry, ExportDocument, Message, scalar_text};
use crate::writer::{self, WriteError};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// Title used when a conversation has none.
pub const UNTITLED: &str = "Untitled Conversation";

/// The complete converted document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConvertedExport {
    /// Converted conversations in input order.
    pub conversations: Vec<TranslatedConversation>,
}

/// A single conversation in the viewer's schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslatedConversation {
    /// Conversation id as found in the export, or `"unknown"`.
    pub id: Value,
    /// Title, or [`UNTITLED`].
    pub title: String,
    /// Date portion of the creation time (`YYYY-MM-DD`), or empty.
    pub create_time: String,
    /// Messages keyed by synthetic id, in conversation order.
    pub mapping: IndexMap<String, TranslatedMessage>,
}

/// One node of the conversation mapping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslatedMessage {
    /// Synthetic id, same as the mapping key.
    pub id: String,
    /// The message payload.
    pub message: MessageBody,
}

/// Author, timestamp and content of a converted message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageBody {
    /// Who wrote the message.
    pub author: Author,
    /// Raw `$numberLong` timestamp from the export, or `""`.
    pub create_time: Value,
    /// The message text.
    pub content: Content,
}

/// Message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Author {
    /// The author's role.
    pub role: Role,
}

/// Message content as a list of text parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Content {
    /// Always exactly one element: the trimmed message text.
    pub parts: Vec<String>,
}

/// Author role in the converted output.
///
/// Only two roles exist: anything not sent by `"human"` is the assistant,
/// including system or tool senders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A message written by the person chatting.
    User,
    /// Everything else.
    Assistant,
}

/// Maps a sender label to a role. Case-insensitive; missing means assistant.
#[must_use]
pub fn role_for_sender(sender: Option<&str>) -> Role {
    match sender {
        Some(s) if s.to_lowercase() == "human" => Role::User,
        _ => Role::Assistant,
    }
}

/// Returns everything before the first `T` of an ISO-8601 timestamp.
///
/// A value with no `T` is returned whole.
#[must_use]
pub fn date_part(create_time: &str) -> &str {
    create_time
        .split_once('T')
        .map_or(create_time, |(date, _)| date)
}

/// Date portion of a header creation time.
///
/// Falsy values (`null`, `false`, `0`, `""`, empty containers) give an empty
/// date; anything else is rendered as text and cut at the first `T`.
#[allow(clippy::float_cmp)]
fn header_date(create_time: Option<&Value>) -> String {
    let Some(value) = create_time else {
        return String::new();
    };

    let falsy = match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    };
    if falsy {
        return String::new();
    }

    date_part(&scalar_text(value)).to_owned()
}

/// Converts one response message into a mapping node with the given id.
fn translate_message(id: String, msg: Message) -> TranslatedMessage {
    TranslatedMessage {
        id,
        message: MessageBody {
            author: Author {
                role: role_for_sender(msg.sender.as_deref()),
            },
            create_time: msg.timestamp.unwrap_or_else(|| Value::String(String::new())),
            content: Content {
                parts: vec![msg.text.trim().to_owned()],
            },
        },
    }
}

/// Converts a single conversation.
///
/// Response records without a message are skipped and do not consume a
/// synthetic id, so ids are always `{id}-0 .. {id}-(n-1)`.
#[must_use]
pub fn convert_conversation(entry: &ConversationEntry) -> TranslatedConversation {
    let header = entry.header();
    let id_text = header.id_text();

    let mut mapping = IndexMap::new();
    for msg in entry.responses.iter().filter_map(Message::from_record) {
        let message_id = format!("{id_text}-{}", mapping.len());
        mapping.insert(message_id.clone(), translate_message(message_id, msg));
    }

    TranslatedConversation {
        create_time: header_date(header.create_time.as_ref()),
        title: header.title.unwrap_or_else(|| UNTITLED.to_owned()),
        id: header.id,
        mapping,
    }
}

/// Converts every conversation in `doc`.
#[must_use]
pub fn convert_export(doc: &ExportDocument) -> ConvertedExport {
    ConvertedExport {
        conversations: doc.conversations.iter().map(convert_conversation).collect(),
    }
}

/// Converts `doc` and writes the result to `path`, creating its parent
/// directory if needed.
///
/// # Errors
///
/// Returns a [`WriteError`] if the output file cannot be written.
pub fn write_converted(doc: &ExportDocument, path: &Path) -> Result<ConvertedExport, WriteError> {
    let converted = convert_export(doc);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        writer::ensure_dir(parent)?;
    }
    writer::write_json(path, &converted)?;
    Ok(converted)
}
