//! Item recovery from a completion's text.
//!
//! The model is asked for a JSON array of strings, but answers range from a
//! clean array to fenced code blocks to numbered lists with prices. Recovery
//! tries the strict reading first and degrades to line-by-line cleaning.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::line_clean::{LineCleaner, is_item};

static FENCE_JSON: Lazy<Regex> = Lazy::new(|| Regex::new(r"```json\s*").unwrap());
static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```\s*").unwrap());

/// Recover item names from `content`.
///
/// If the trimmed content starts with `[` and its first JSON value is an
/// array, that array is the answer. Otherwise every line is cleaned with
/// `cleaner` and non-trivial lines are kept. Never fails; order and
/// duplicates are preserved.
pub fn recover_items(content: &str, cleaner: &LineCleaner) -> Vec<String> {
    let trimmed = content.trim();
    if trimmed.starts_with('[') {
        if let Some(items) = parse_json_array(trimmed) {
            debug!(items = items.len(), "Recovered items from JSON array");
            return items;
        }
        debug!("Content looks like a JSON array but does not parse; cleaning lines");
    }
    let items = recover_lines(content, cleaner);
    debug!(items = items.len(), "Recovered items from text lines");
    items
}

/// Read the first JSON value of `text` as an array of item names.
///
/// Trailing text after the array is ignored. Strings are trimmed; numbers,
/// booleans and null keep their JSON spelling. Objects, arrays and blank
/// strings are skipped.
pub fn parse_json_array(text: &str) -> Option<Vec<String>> {
    let first = serde_json::Deserializer::from_str(text)
        .into_iter::<Value>()
        .next()?
        .ok()?;
    let elements = first.as_array()?;
    let items = elements
        .iter()
        .filter_map(|element| match element {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null => Some("null".to_string()),
            Value::Object(_) | Value::Array(_) => None,
        })
        .filter(|item| !item.is_empty())
        .collect();
    Some(items)
}

/// Strip code fences, then clean and filter each line.
pub fn recover_lines(content: &str, cleaner: &LineCleaner) -> Vec<String> {
    let unfenced = FENCE_JSON.replace_all(content, "");
    let unfenced = FENCE.replace_all(&unfenced, "");
    unfenced
        .split('\n')
        .map(|line| cleaner.clean(line))
        .filter(|line| is_item(line))
        .collect()
}
