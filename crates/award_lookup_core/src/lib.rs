//! Shared award lookup domain primitives.
//!
//! This crate owns the request/response contracts and query parameter
//! validation. It intentionally excludes AWS SDK and Lambda runtime concerns,
//! which live in `award_lookup_lambda`.

pub mod contract;
pub mod query_params;
