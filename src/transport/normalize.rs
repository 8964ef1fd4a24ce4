//! Reduction of raw backend output to the human-facing reply.
//!
//! Backends either print plain text or stream one JSON object per line in
//! their own event vocabulary. Each parsed object is decoded by trying the
//! known event shapes in turn and falling back to probing common field
//! names. Reasoning and tool traces are dropped. When nothing usable comes
//! out, the raw output is returned untouched.

use serde_json::{Map, Value};
use tracing::debug;

/// Field names probed, in order, on records of unknown shape.
const GENERIC_FIELDS: [&str; 8] = [
    "output_text",
    "text",
    "message",
    "content",
    "delta",
    "result",
    "output",
    "final",
];

/// Field names probed, in order, when flattening a nested object.
const NESTED_FIELDS: [&str; 5] = ["text", "content", "message", "output_text", "delta"];

const REPLY_ITEM_KINDS: [&str; 3] = ["agent_message", "assistant_message", "message"];
const OUTPUT_TEXT_EVENTS: [&str; 3] = [
    "response.output_text.delta",
    "response.output_text",
    "response.output_text.done",
];
const LIFECYCLE_EVENTS: [&str; 7] = [
    "thread.started",
    "turn.started",
    "turn.completed",
    "stream.started",
    "stream.completed",
    "message_start",
    "system",
];
const TEXT_CONTENT_KINDS: [&str; 2] = ["text", "output_text"];

type Object = Map<String, Value>;

/// A structured output line decoded into the shape that governs it.
#[derive(Debug)]
enum Record<'a> {
    /// A completed agent/assistant message item.
    ReplyItem(&'a Object),
    /// A completed item holding reasoning or tool traffic.
    HiddenItem,
    /// A streaming delta or final output-text event.
    OutputText(&'a Object),
    /// A stream or turn lifecycle marker.
    Lifecycle,
    /// A chat message carrying a list of typed content blocks.
    ChatMessage(&'a [Value]),
    /// A final result event.
    FinalResult(&'a Value),
    /// Anything else.
    Generic(&'a Object),
}

impl<'a> Record<'a> {
    fn decode(object: &'a Object) -> Self {
        let kind = object.get("type").and_then(Value::as_str);

        match kind {
            Some("item.completed") => {
                if let Some(item) = object.get("item").and_then(Value::as_object) {
                    let item_kind = item.get("type").and_then(Value::as_str).unwrap_or_default();
                    return if REPLY_ITEM_KINDS.contains(&item_kind) {
                        Self::ReplyItem(item)
                    } else {
                        Self::HiddenItem
                    };
                }
            }
            Some(event) if OUTPUT_TEXT_EVENTS.contains(&event) => return Self::OutputText(object),
            Some(event) if LIFECYCLE_EVENTS.contains(&event) => return Self::Lifecycle,
            Some("result") => {
                if let Some(result) = object.get("result") {
                    return Self::FinalResult(result);
                }
            }
            _ => {}
        }

        let blocks = object
            .get("message")
            .and_then(Value::as_object)
            .and_then(|message| message.get("content"))
            .and_then(Value::as_array);
        match blocks {
            Some(content) => Self::ChatMessage(content),
            None => Self::Generic(object),
        }
    }

    fn text(&self) -> String {
        match self {
            Self::ReplyItem(item) => first_text(item, &["text", "content"]),
            Self::OutputText(event) => first_text(event, &["delta", "text", "output_text"]),
            Self::HiddenItem | Self::Lifecycle => String::new(),
            Self::ChatMessage(blocks) => join_non_empty(
                blocks
                    .iter()
                    .filter_map(Value::as_object)
                    .filter(|block| {
                        block
                            .get("type")
                            .and_then(Value::as_str)
                            .is_some_and(|kind| TEXT_CONTENT_KINDS.contains(&kind))
                    })
                    .map(|block| first_text(block, &["text", "output_text"])),
            ),
            Self::FinalResult(result) => flatten(result),
            Self::Generic(object) => join_non_empty(
                GENERIC_FIELDS
                    .iter()
                    .filter_map(|field| object.get(*field))
                    .map(flatten),
            ),
        }
    }
}

/// Reduces raw backend output to reply text.
///
/// Plain-text output is returned as is. For line-delimited JSON, the text
/// recovered from each record is kept in order, with blank and repeated
/// fragments dropped.
#[must_use]
pub fn normalize_output(raw: &str) -> String {
    let objects: Vec<Object> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(object)) => Some(object),
            _ => None,
        })
        .collect();

    if objects.is_empty() {
        return raw.to_owned();
    }

    let mut fragments: Vec<String> = Vec::new();
    for object in &objects {
        let text = Record::decode(object).text();
        let fragment = text.trim();
        if !fragment.is_empty() && !fragments.iter().any(|seen| seen == fragment) {
            fragments.push(fragment.to_owned());
        }
    }

    if fragments.is_empty() {
        debug!(
            records = objects.len(),
            "no reply text recovered from structured output; keeping raw output"
        );
        return raw.to_owned();
    }

    fragments.join("\n")
}

/// Flattens a JSON value to text.
///
/// Strings are trimmed, arrays join their non-empty elements with newlines
/// and objects yield the first non-empty preferred field, then the first
/// non-empty value of any field. Other scalars carry no text.
fn flatten(value: &Value) -> String {
    match value {
        Value::String(text) => text.trim().to_owned(),
        Value::Array(items) => join_non_empty(items.iter().map(flatten)),
        Value::Object(object) => {
            let preferred = first_text(object, &NESTED_FIELDS);
            if preferred.is_empty() {
                object
                    .values()
                    .map(flatten)
                    .find(|text| !text.is_empty())
                    .unwrap_or_default()
            } else {
                preferred
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => String::new(),
    }
}

fn first_text(object: &Object, fields: &[&str]) -> String {
    fields
        .iter()
        .filter_map(|field| object.get(*field))
        .map(flatten)
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

fn join_non_empty(parts: impl Iterator<Item = String>) -> String {
    parts
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
