//! Quality Gate — ordered pass/fail policy for dispatch output
//!
//! Three rules are evaluated in order over an immutable [`GateInput`]; the
//! first one that fires decides the verdict. If none fires the dispatch
//! passes with reason `"OK"`.
//!
//! ```text
//! word_count < 100  →  error_ratio ≥ 0.5  →  indicators ∧ word_count < 200  →  pass
//! ```
//!
//! Rule order is part of the contract: a long report that merely discusses a
//! rate limit (≥ 200 substantive words) passes, while the same indicator in a
//! short output fails.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::verifier::indicators::detect_errors;
use crate::verifier::parse::DispatchResult;
use crate::verifier::scoring::count_substantive_words;
use crate::verifier::stats::{calc_error_ratio, Stats};

/// Minimum substantive words for a dispatch to count as a real result.
pub const MIN_SUBSTANTIVE_WORDS: usize = 100;

/// Failed/total request ratio at which a dispatch fails.
pub const MAX_ERROR_RATIO: f64 = 0.5;

/// Word count at or above which error indicators are tolerated.
pub const INDICATOR_EXEMPT_WORDS: usize = MIN_SUBSTANTIVE_WORDS * 2;

/// Signals the gate decides on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateInput<'a> {
    pub word_count: usize,
    pub error_indicators: &'a [String],
    pub error_ratio: Option<f64>,
}

/// Rules of the gate, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateRule {
    /// Too few substantive words
    InsufficientContent,
    /// Too many failed requests
    HighErrorRatio,
    /// Failure signatures in a short output
    ErrorIndicators,
}

impl GateRule {
    /// Every rule, in the order the gate evaluates them.
    pub const ORDER: [GateRule; 3] = [
        GateRule::InsufficientContent,
        GateRule::HighErrorRatio,
        GateRule::ErrorIndicators,
    ];

    /// Reason string if this rule fires for `input`.
    pub fn check(self, input: &GateInput<'_>) -> Option<String> {
        match self {
            Self::InsufficientContent => insufficient_content(input),
            Self::HighErrorRatio => high_error_ratio(input),
            Self::ErrorIndicators => error_indicators(input),
        }
    }
}

impl std::fmt::Display for GateRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientContent => write!(f, "insufficient_content"),
            Self::HighErrorRatio => write!(f, "high_error_ratio"),
            Self::ErrorIndicators => write!(f, "error_indicators"),
        }
    }
}

/// The rule that rejected a dispatch and its human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateFailure {
    pub rule: GateRule,
    pub reason: String,
}

/// Signals gathered while checking a dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckDetails {
    /// Substantive words in the response
    pub word_count: usize,
    /// Failure signatures found, in indicator-table order
    pub error_indicators: Vec<String>,
    /// Failed/total request ratio, when computable
    pub error_ratio: Option<f64>,
    /// Stats recovered by the parser
    pub stats: Option<Stats>,
}

impl CheckDetails {
    /// View of the details as gate input.
    pub fn gate_input(&self) -> GateInput<'_> {
        GateInput {
            word_count: self.word_count,
            error_indicators: &self.error_indicators,
            error_ratio: self.error_ratio,
        }
    }
}

/// Verdict of the quality gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityCheckResult {
    pub pass: bool,
    /// `"OK"` exactly when `pass` is true
    pub reason: String,
    pub details: CheckDetails,
}

/// Evaluate the rules in [`GateRule::ORDER`]; first match wins.
pub fn evaluate_gate(input: &GateInput<'_>) -> Option<GateFailure> {
    GateRule::ORDER.into_iter().find_map(|rule| {
        rule.check(input)
            .map(|reason| GateFailure { rule, reason })
    })
}

/// Score, scan and gate a parsed dispatch result.
pub fn quality_check(result: &DispatchResult) -> QualityCheckResult {
    let details = CheckDetails {
        word_count: count_substantive_words(&result.response),
        error_indicators: detect_errors(&result.response),
        error_ratio: calc_error_ratio(result.stats.as_ref()),
        stats: result.stats.clone(),
    };

    match evaluate_gate(&details.gate_input()) {
        Some(failure) => {
            debug!(
                rule = %failure.rule,
                word_count = details.word_count,
                error_ratio = ?details.error_ratio,
                indicators = details.error_indicators.len(),
                "Dispatch rejected by quality gate"
            );
            QualityCheckResult {
                pass: false,
                reason: failure.reason,
                details,
            }
        }
        None => {
            debug!(word_count = details.word_count, "Dispatch passed quality gate");
            QualityCheckResult {
                pass: true,
                reason: "OK".to_string(),
                details,
            }
        }
    }
}

fn insufficient_content(input: &GateInput<'_>) -> Option<String> {
    (input.word_count < MIN_SUBSTANTIVE_WORDS).then(|| {
        format!(
            "Insufficient content: {} substantive words (minimum {})",
            input.word_count, MIN_SUBSTANTIVE_WORDS
        )
    })
}

fn high_error_ratio(input: &GateInput<'_>) -> Option<String> {
    let ratio = input.error_ratio.filter(|r| *r >= MAX_ERROR_RATIO)?;
    Some(format!(
        "High error ratio: {}% of requests failed (threshold {}%)",
        (ratio * 100.0).round(),
        MAX_ERROR_RATIO * 100.0
    ))
}

fn error_indicators(input: &GateInput<'_>) -> Option<String> {
    (!input.error_indicators.is_empty() && input.word_count < INDICATOR_EXEMPT_WORDS).then(|| {
        format!(
            "Error indicators detected: {}",
            input.error_indicators.join(", ")
        )
    })
}
