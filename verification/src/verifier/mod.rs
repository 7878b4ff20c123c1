//! Verifier Module — Deterministic Delivery Gates
//!
//! Classifies agent dispatch output using structural and statistical signals
//! only. Nothing here judges whether the findings are correct; it only decides
//! whether the output is worth posting.
//!
//! # Stages
//!
//! - [`parse`]: normalize stdout (JSON or plain text) into a [`DispatchResult`]
//! - [`stats`]: pull execution metrics out of heterogeneous JSON shapes
//! - [`scoring`]: count substantive words, skipping stack traces and JSON noise
//! - [`indicators`]: find known failure signatures (429, quota, rate limit)
//! - [`gate`]: ordered pass/fail policy
//! - [`report`]: pass and fail comment rendering
//! - [`pipeline`]: the single verify-and-format entry point

pub mod gate;
pub mod indicators;
pub mod parse;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod stats;

pub use gate::{
    evaluate_gate, quality_check, CheckDetails, GateFailure, GateInput, GateRule,
    QualityCheckResult,
};
pub use indicators::detect_errors;
pub use parse::{parse_dispatch_result, parse_non_text, DispatchResult};
pub use pipeline::{verify_and_format, verify_and_format_value, VerificationOutcome};
pub use report::{format_fail_comment, format_pass_comment};
pub use scoring::count_substantive_words;
pub use stats::{calc_error_ratio, extract_stats, Stats};
