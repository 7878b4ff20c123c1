//! Dispatch relay HTTP surface.
//!
//! A thin axum layer over [`verification::verify_and_format`]: it frames
//! requests, logs verdicts and returns the comment text. Posting the comment
//! to the issue tracker is left to the caller.

#![allow(clippy::uninlined_format_args)]

pub mod config;
pub mod error;
pub mod routes;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use routes::{router, router_with_body_limit};
