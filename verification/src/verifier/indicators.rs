//! Failure-signature detection for agent output.
//!
//! Matching is case-insensitive substring containment, not whole-word: `429`
//! matches inside `HTTP/1.1 429` as well as `error 4291`.

/// Known failure signatures, in reporting order.
///
/// `rate limit` and `Rate limit` are distinct entries and both report when
/// either spelling appears.
pub const ERROR_INDICATORS: &[&str] = &[
    "429",
    "RESOURCE_EXHAUSTED",
    "MODEL_CAPACITY_EXHAUSTED",
    "rate limit",
    "Rate limit",
    "RateLimitError",
    "quota exceeded",
    "Too Many Requests",
];

/// Indicators from [`ERROR_INDICATORS`] found in `text`, in table order.
pub fn detect_errors(text: &str) -> Vec<String> {
    detect_errors_with(text, ERROR_INDICATORS)
}

/// Indicators from `indicators` found in `text`, in table order.
///
/// Each table entry reports at most once.
pub fn detect_errors_with(text: &str, indicators: &[&str]) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let haystack = text.to_lowercase();
    let mut found: Vec<String> = Vec::new();
    for indicator in indicators {
        if found.iter().any(|f| f == indicator) {
            continue;
        }
        if haystack.contains(&indicator.to_lowercase()) {
            found.push((*indicator).to_string());
        }
    }
    found
}
