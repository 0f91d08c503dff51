//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (timestamps, ids, errors, state machine)
//! - `conversation` - Canonical conversation and message records
//! - `export` - Formatting, filtering, categorizing, caching and reporting

pub mod conversation;
pub mod export;
pub mod foundation;
