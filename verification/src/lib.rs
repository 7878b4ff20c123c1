//! Dispatch Verification Library
//!
//! Decides whether the raw output of an agent dispatch is a usable result or
//! a failed run (rate-limited, empty, error-dominated) and renders the comment
//! that should be posted for it.
//!
//! # Pipeline
//!
//! ```text
//! raw stdout → parse (response + stats) → score / detect / ratio → quality gate → comment
//! ```
//!
//! # Usage
//!
//! ```rust
//! use verification::verify_and_format;
//!
//! let outcome = verify_and_format("CIA-718", "429 Too Many Requests");
//! assert!(!outcome.pass);
//! assert!(outcome.comment.contains("Dispatch Failed"));
//! ```
//!
//! Every function in this crate is total over its input: malformed JSON,
//! empty strings and binary-looking text all produce a verdict, never an error.

#![allow(clippy::uninlined_format_args)]

pub mod verifier;

pub use verifier::{
    calc_error_ratio, count_substantive_words, detect_errors, extract_stats, format_fail_comment,
    format_pass_comment, parse_dispatch_result, parse_non_text, quality_check, verify_and_format,
    verify_and_format_value, CheckDetails, DispatchResult, GateFailure, GateInput, GateRule,
    QualityCheckResult, Stats, VerificationOutcome,
};
