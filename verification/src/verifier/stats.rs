//! Execution stats extraction
//!
//! Agents report metrics under different keys depending on the runtime
//! (Gemini CLI, Codex, Claude Code wrappers). Each metric has a fixed list of
//! candidate keys; the first one present claims the metric.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Execution metrics recovered from structured agent output.
///
/// Never constructed empty: [`extract_stats`] returns `None` instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Wall-clock duration in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Total tokens consumed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<u64>,
    /// Requests issued to the model provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_requests: Option<u64>,
    /// Requests that failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_requests: Option<u64>,
    /// First error message reported by the agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_error: Option<String>,
}

impl Stats {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.duration.is_none()
            && self.tokens.is_none()
            && self.total_requests.is_none()
            && self.failed_requests.is_none()
            && self.primary_error.is_none()
    }
}

/// Extract execution stats from a parsed JSON object.
///
/// Key priority per metric:
/// - duration: `duration` → `durationMs / 1000` → `elapsed`
/// - tokens: `tokens` → `totalTokens` → `usage.total_tokens`
/// - total_requests: `requests` → `totalRequests`
/// - failed_requests: `errors` (unless an array) → `failedRequests`
/// - primary_error: `error` → `errors[0]` → `firstError`
///
/// The first non-null candidate claims the metric. If its value is not
/// usable (`"tokens": 1.5`, `"duration": "12"`) the metric stays absent;
/// lower-priority keys are not consulted.
///
/// An array-valued `errors` is a message list, not a count: it feeds
/// `primary_error` and leaves `failed_requests` to the `failedRequests` key.
pub fn extract_stats(obj: &Map<String, Value>) -> Option<Stats> {
    let stats = Stats {
        duration: first_present([
            (obj.get("duration"), 1.0),
            (obj.get("durationMs"), 1000.0),
            (obj.get("elapsed"), 1.0),
        ])
        .and_then(|(value, divisor)| number(value).map(|n| n / divisor)),
        tokens: first_present([
            (obj.get("tokens"), ()),
            (obj.get("totalTokens"), ()),
            (obj.get("usage").and_then(|u| u.get("total_tokens")), ()),
        ])
        .and_then(|(value, _)| count(value)),
        total_requests: first_present([
            (obj.get("requests"), ()),
            (obj.get("totalRequests"), ()),
        ])
        .and_then(|(value, _)| count(value)),
        failed_requests: first_present([
            (obj.get("errors").filter(|v| !v.is_array()), ()),
            (obj.get("failedRequests"), ()),
        ])
        .and_then(|(value, _)| count(value)),
        primary_error: primary_error(obj),
    };

    if stats.is_empty() {
        None
    } else {
        Some(stats)
    }
}

/// Failed/total request ratio.
///
/// `None` when stats are absent, `total_requests` is absent or zero, or
/// `failed_requests` is absent. Not clamped: inconsistent input can exceed 1.
pub fn calc_error_ratio(stats: Option<&Stats>) -> Option<f64> {
    let stats = stats?;
    let total = stats.total_requests.filter(|&t| t != 0)?;
    let failed = stats.failed_requests?;
    Some(failed as f64 / total as f64)
}

fn primary_error(obj: &Map<String, Value>) -> Option<String> {
    if let Some(error) = obj.get("error").filter(|v| is_truthy(v)) {
        return Some(stringify(error));
    }
    if let Some(first) = obj
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|errors| errors.first())
    {
        return Some(stringify(first));
    }
    obj.get("firstError")
        .filter(|v| is_truthy(v))
        .map(stringify)
}

/// First candidate whose value is present and non-null, with its tag.
fn first_present<'a, T, const N: usize>(
    candidates: [(Option<&'a Value>, T); N],
) -> Option<(&'a Value, T)> {
    candidates
        .into_iter()
        .find_map(|(value, tag)| value.filter(|v| !v.is_null()).map(|v| (v, tag)))
}

fn number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}

/// Non-negative integer, accepting whole floats such as `1200.0`.
fn count(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= u64::MAX as f64)
        .map(|n| n as u64)
}

pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub(crate) fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
