//! Verification pipeline: parse → quality gate → comment.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::verifier::gate::{quality_check, CheckDetails};
use crate::verifier::parse::{parse_dispatch_result, parse_non_text, DispatchResult};
use crate::verifier::report::{format_fail_comment, format_pass_comment};

/// Result of verifying one dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub pass: bool,
    /// `"OK"` on pass, otherwise the rule that rejected the output
    pub reason: String,
    /// Formatted comment, never empty
    pub comment: String,
    pub details: CheckDetails,
}

impl VerificationOutcome {
    /// Compact one-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "[{}] {} ({} words, {} indicators)",
            if self.pass { "PASS" } else { "FAIL" },
            self.reason,
            self.details.word_count,
            self.details.error_indicators.len(),
        )
    }
}

/// Verify raw agent output for `identifier` and render its comment.
///
/// Deterministic: identical inputs produce byte-identical outcomes.
pub fn verify_and_format(identifier: &str, raw_output: &str) -> VerificationOutcome {
    verify_result(identifier, &parse_dispatch_result(raw_output))
}

/// Verify output that arrived as a JSON value rather than text.
///
/// Strings go through [`verify_and_format`]. Any other value has no
/// response text and fails the gate, with the value shown in the log block.
pub fn verify_and_format_value(identifier: &str, output: &Value) -> VerificationOutcome {
    match output {
        Value::String(text) => verify_and_format(identifier, text),
        other => verify_result(identifier, &parse_non_text(other)),
    }
}

fn verify_result(identifier: &str, result: &DispatchResult) -> VerificationOutcome {
    let check = quality_check(result);

    let comment = if check.pass {
        format_pass_comment(identifier, result)
    } else {
        format_fail_comment(identifier, result, &check)
    };

    VerificationOutcome {
        pass: check.pass,
        reason: check.reason,
        comment,
        details: check.details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_output_fails_with_comment() {
        let outcome = verify_and_format("CIA-1", "");
        assert!(!outcome.pass);
        assert!(!outcome.comment.is_empty());
        assert!(outcome.comment.contains("(empty)"));
        assert_eq!(outcome.details.word_count, 0);
    }

    #[test]
    fn test_summary_line() {
        let outcome = verify_and_format("CIA-1", "429 Too Many Requests");
        assert_eq!(
            outcome.summary(),
            "[FAIL] Insufficient content: 4 substantive words (minimum 100) (4 words, 2 indicators)"
        );
    }

    #[test]
    fn test_pass_uses_pass_comment() {
        let outcome = verify_and_format("CIA-1", &"finding ".repeat(100));
        assert!(outcome.pass);
        assert!(outcome.comment.starts_with("## Dispatch Results — CIA-1\n\n"));
    }

    #[test]
    fn test_value_output_string_matches_text_path() {
        let text = "finding ".repeat(120);
        let from_value = verify_and_format_value("CIA-1", &Value::String(text.clone()));
        assert_eq!(from_value, verify_and_format("CIA-1", &text));
    }

    #[test]
    fn test_value_output_object_shown_in_log() {
        let outcome = verify_and_format_value("CIA-1", &serde_json::json!({"response": "nested"}));
        assert!(!outcome.pass);
        assert_eq!(outcome.details.word_count, 0);
        assert!(outcome.comment.contains("```\n{\"response\":\"nested\"}\n```"));
        assert!(!outcome.comment.contains("(empty)"));
    }

    #[test]
    fn test_value_output_falsy_is_empty_log() {
        let outcome = verify_and_format_value("CIA-1", &serde_json::json!(false));
        assert!(!outcome.pass);
        assert!(outcome.comment.contains("(empty)"));
    }
}
