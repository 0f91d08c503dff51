//! Chat Export - incremental export of support conversations.
//!
//! Pulls conversations and their messages from a support platform API,
//! caches them locally so interrupted runs resume, and writes a JSON report
//! plus a CSV summary with a keyword-based category per conversation.

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod ports;
