//! Best-effort extraction of structured values from free-form model output.
//!
//! The model is asked for JSON but routinely wraps it in prose, code fences,
//! or Python-flavored single quotes. Each shape is recovered in a fixed
//! order: direct JSON parse, then a relaxed re-parse of the same text, then
//! the same two passes over the outermost bracketed slice. Anything that
//! still fails parses to the documented default; no parse error ever reaches
//! the caller. Untrusted text is only ever fed to serde_json, never
//! evaluated.

use serde_json::Value;
use tracing::warn;

use crate::models::{ActionItem, WeightedTag};

/// Parse model output expected to contain a list of strings.
///
/// Elements are trimmed; non-string elements are kept via their JSON
/// rendering. Unparseable input yields an empty list.
pub fn parse_string_list(text: &str) -> Vec<String> {
    let Some(items) = parse_array(text) else {
        warn!("Could not recover a list from model output, defaulting to empty");
        return Vec::new();
    };

    items.iter().map(display_string).collect()
}

/// Parse model output expected to contain a list of action-item objects.
///
/// Accepts the key variants `action`/`task`/`item` and
/// `assignee`/`owner`/`person`; elements that are not objects are dropped.
/// Unparseable input yields an empty list.
pub fn parse_action_items(text: &str) -> Vec<ActionItem> {
    let Some(items) = parse_array(text) else {
        warn!("Could not recover action items from model output, defaulting to empty");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let map = item.as_object()?;
            let action = first_of(map, &["action", "task", "item"]);
            let assignee = first_of(map, &["assignee", "owner", "person"]);
            Some(ActionItem::new(action, assignee))
        })
        .collect()
}

/// Parse model output expected to contain `{"tags": [{"tag", "weight"}, ..]}`
/// or a bare array of the same objects.
///
/// Unparseable input yields the single default tag `general` with weight 1.
pub fn parse_tags(text: &str) -> Vec<WeightedTag> {
    if let Some(tags) = try_parse_tags(text) {
        return tags;
    }

    warn!("Could not recover tags from model output, defaulting to 'general'");
    vec![WeightedTag::new("general", 1.0)]
}

fn try_parse_tags(text: &str) -> Option<Vec<WeightedTag>> {
    let value = parse_json(text)
        .or_else(|| bracketed(text, '{', '}').and_then(parse_json))
        .or_else(|| bracketed(text, '[', ']').and_then(parse_json))?;

    let array = match &value {
        Value::Object(map) => map.get("tags")?.as_array()?,
        Value::Array(items) => items,
        _ => return None,
    };

    let tags: Vec<WeightedTag> = array
        .iter()
        .filter_map(|item| {
            let map = item.as_object()?;
            let tag = display_string(map.get("tag")?);
            let weight = map.get("weight").and_then(Value::as_f64).unwrap_or(0.0);
            Some(WeightedTag::new(tag, weight))
        })
        .collect();

    // A wrapper that parsed but held no usable tag objects is still a miss.
    if tags.is_empty() && !array.is_empty() {
        return None;
    }

    Some(tags)
}

/// Recover a JSON array from the text, falling back to the outermost
/// `[..]` slice when the text as a whole does not parse.
fn parse_array(text: &str) -> Option<Vec<Value>> {
    let whole = parse_json(text).and_then(into_array);
    if whole.is_some() {
        return whole;
    }

    bracketed(text, '[', ']')
        .and_then(parse_json)
        .and_then(into_array)
}

fn into_array(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        _ => None,
    }
}

/// Strict parse first, then a relaxed re-parse of the same text.
fn parse_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str(trimmed) {
        return Some(value);
    }

    serde_json::from_str(&relax(trimmed)).ok()
}

/// Slice from the first `open` to the last `close`, if both exist in order.
fn bracketed(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

/// Rewrite near-JSON into JSON: drop Markdown code fences and convert
/// single-quoted string literals to double-quoted ones.
fn relax(text: &str) -> String {
    let text = strip_code_fences(text);

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    let mut in_double = false;
    let mut in_single = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' if in_single => match chars.next() {
                // \' inside a single-quoted literal is just a quote
                Some('\'') => out.push('\''),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            '\\' if in_double => {
                out.push('\\');
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            '"' if in_single => out.push_str("\\\""),
            '"' => {
                in_double = !in_double;
                out.push('"');
            }
            '\'' if !in_double => {
                in_single = !in_single;
                out.push('"');
            }
            _ => out.push(c),
        }
    }

    out
}

fn strip_code_fences(text: &str) -> String {
    if !text.contains("```") {
        return text.to_string();
    }

    text.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn first_of(map: &serde_json::Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| map.get(*key))
        .map(|value| display_string(value))
        .unwrap_or_default()
}
