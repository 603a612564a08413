//! sql-intellisense - context-aware SQL completion for workflow scripts.
//!
//! This library exposes the completion engine, catalog and document analysis
//! for hosts and integration tests; the `sqlsense` binary wraps it.

pub mod analysis;
pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod logging;
