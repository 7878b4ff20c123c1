//! Substantive word counting
//!
//! A proxy for "real prose vs. structured noise": lines that look like stack
//! frames, JSON structure, tracebacks or dependency paths contribute nothing.

use regex::Regex;
use std::sync::LazyLock;

/// A line shape excluded from content scoring.
pub struct NoisePattern {
    /// Short label used in logs and tests
    pub name: &'static str,
    /// Compiled matcher, applied to the trimmed line
    pub regex: Regex,
}

/// Line-shape table, compiled once.
pub static NOISE_PATTERNS: LazyLock<Vec<NoisePattern>> = LazyLock::new(|| {
    [
        ("stack_frame", r"^\s*at\s+"),
        ("line_number", r"^\s*\d+\s*\|"),
        ("json_punctuation", r"^[{}\[\],]*$"),
        ("json_property", r#"^\s*"[a-zA-Z_]+"\s*:"#),
        ("error_preamble", r"^\s*Error:"),
        ("traceback", r"^\s*Traceback"),
        ("dependency_path", r"node_modules/"),
    ]
    .into_iter()
    .map(|(name, pattern)| NoisePattern {
        name,
        regex: Regex::new(pattern).unwrap(),
    })
    .collect()
});

/// Count substantive words using [`NOISE_PATTERNS`].
pub fn count_substantive_words(text: &str) -> usize {
    count_substantive_words_with(text, &NOISE_PATTERNS)
}

/// Count whitespace-delimited tokens longer than one character, skipping
/// blank lines and every line matched by `patterns`.
pub fn count_substantive_words_with(text: &str, patterns: &[NoisePattern]) -> usize {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| noise_match(line, patterns).is_none())
        .map(|line| {
            line.split_whitespace()
                .filter(|word| word.chars().count() > 1)
                .count()
        })
        .sum()
}

/// Name of the first pattern matching `line`, if any.
pub fn noise_match(line: &str, patterns: &[NoisePattern]) -> Option<&'static str> {
    patterns
        .iter()
        .find(|p| p.regex.is_match(line))
        .map(|p| p.name)
}
