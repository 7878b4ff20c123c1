//! Result parsing for raw agent stdout.
//!
//! Agents emit either a JSON envelope (`{"response": ..., "stats": ...}` and
//! variants) or plain text. Both normalize into a [`DispatchResult`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::verifier::stats::{extract_stats, is_truthy, stringify, Stats};

/// Keys checked, in order, for the textual payload of a JSON envelope.
const RESPONSE_KEYS: &[&str] = &["response", "output", "result"];

/// Normalized agent output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchResult {
    /// Best-effort textual payload
    pub response: String,
    /// Execution metrics, when the output carried any
    pub stats: Option<Stats>,
    /// The untouched original input
    pub raw: String,
}

/// Parse raw agent stdout into a [`DispatchResult`].
///
/// Never fails. Surrounding whitespace and a leading byte-order mark are
/// ignored when detecting JSON. Malformed JSON, JSON scalars and arrays are
/// treated as plain text. For a JSON object the response is the first string among
/// `response`, `output`, `result`; when none is present (or it is empty) the
/// full raw input is used instead.
pub fn parse_dispatch_result(raw: &str) -> DispatchResult {
    if raw.is_empty() {
        return DispatchResult {
            response: String::new(),
            stats: None,
            raw: String::new(),
        };
    }

    let body = raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let parsed = serde_json::from_str::<Value>(body).ok();
    let Some(Value::Object(obj)) = parsed else {
        return DispatchResult {
            response: raw.to_string(),
            stats: None,
            raw: raw.to_string(),
        };
    };

    let response = RESPONSE_KEYS
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str))
        .filter(|text| !text.is_empty())
        .unwrap_or(raw);

    DispatchResult {
        response: response.to_string(),
        stats: extract_stats(&obj),
        raw: raw.to_string(),
    }
}

/// Normalize output that arrived as a non-string JSON value.
///
/// Such output carries no response text. Truthy values are kept as compact
/// JSON in `raw` so the fail comment still shows what the agent sent; falsy
/// values (`false`, `0`, `null`) leave it empty.
pub fn parse_non_text(value: &Value) -> DispatchResult {
    let raw = if is_truthy(value) {
        stringify(value)
    } else {
        String::new()
    };
    DispatchResult {
        response: String::new(),
        stats: None,
        raw,
    }
}
