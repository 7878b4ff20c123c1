//! Comment rendering for verified dispatches.
//!
//! Pass comments carry the agent's response verbatim with an optional stats
//! block. Fail comments lead with the failure summary and fold the full raw
//! log into a collapsible block so nothing the agent printed is lost.

use std::fmt::Display;

use crate::verifier::gate::QualityCheckResult;
use crate::verifier::parse::DispatchResult;

const FAIL_STATUS: &str = "Agent executed but did not produce usable findings.";
const FAIL_RECOMMENDATION: &str = "Re-dispatch to Tembo or execute manually.";

/// Render the comment for a dispatch that passed the gate.
///
/// The stats block lists only the metrics that are present.
pub fn format_pass_comment(identifier: &str, result: &DispatchResult) -> String {
    let mut comment = format!("## Dispatch Results — {}\n\n", identifier);
    comment.push_str(result.response.trim());

    if let Some(stats) = &result.stats {
        comment.push_str("\n\n<details>\n<summary>Execution stats</summary>\n\n");
        if let Some(duration) = stats.duration {
            comment.push_str(&format!("- **Duration:** {}s\n", duration));
        }
        if let Some(tokens) = stats.tokens {
            comment.push_str(&format!("- **Tokens:** {}\n", tokens));
        }
        if let Some(total) = stats.total_requests {
            comment.push_str(&format!("- **Requests:** {}\n", total));
        }
        if let Some(failed) = stats.failed_requests {
            comment.push_str(&format!("- **Errors:** {}\n", failed));
        }
        comment.push_str("\n</details>");
    }

    comment
}

/// Render the comment for a dispatch that failed the gate.
///
/// Absent metrics render as `?`. The primary error is the agent-reported
/// error, else the first detected indicator, else `Unknown`.
pub fn format_fail_comment(
    identifier: &str,
    result: &DispatchResult,
    check: &QualityCheckResult,
) -> String {
    let stats = result.stats.as_ref();
    let duration = or_unknown(stats.and_then(|s| s.duration));
    let tokens = or_unknown(stats.and_then(|s| s.tokens));
    let failed = or_unknown(stats.and_then(|s| s.failed_requests));
    let total = or_unknown(stats.and_then(|s| s.total_requests));
    let primary_error = stats
        .and_then(|s| s.primary_error.as_deref())
        .filter(|e| !e.is_empty())
        .or_else(|| check.details.error_indicators.first().map(String::as_str))
        .unwrap_or("Unknown");
    let log = if result.raw.is_empty() {
        "(empty)"
    } else {
        result.raw.as_str()
    };

    let mut comment = format!("## ⚠️ Dispatch Failed — {}\n\n", identifier);
    comment.push_str(&format!("**Status:** {}\n", FAIL_STATUS));
    comment.push_str(&format!(
        "**Duration:** {}s | **Tokens:** {} | **Errors:** {} of {} requests failed\n",
        duration, tokens, failed, total
    ));
    comment.push_str(&format!("**Primary error:** {}\n\n", primary_error));
    comment.push_str(&format!("**Recommendation:** {}\n", FAIL_RECOMMENDATION));
    comment.push_str("\n<details>\n<summary>Full execution log</summary>\n\n");
    comment.push_str(&format!("```\n{}\n```\n", log));
    comment.push_str("\n</details>");

    comment
}

fn or_unknown<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}
