//! Completion engine integration tests.
//!
//! Exercise the public engine API against a small HR/SALES catalog.

pub mod common;
pub mod concurrency_test;
pub mod scenarios_test;
