//! Tests for the `sqlsense` binary.

pub mod cli_test;
pub mod common;
