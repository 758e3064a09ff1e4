//! AWS-oriented adapters and handlers for the award lookup Lambda.
//!
//! This crate owns runtime integration details (the Lambda handler, the
//! DynamoDB record store, configuration and logging). Contracts and query
//! parameter validation come from `award_lookup_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
