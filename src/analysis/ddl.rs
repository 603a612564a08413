//! Guard against DDL in workflow scripts.
//!
//! Scripts are expected to hold queries and DML only. Each `CREATE`, `ALTER`
//! or `DROP` keyword is reported as a warning.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static DDL_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(CREATE|ALTER|DROP)\b").expect("valid regex"));

pub const DDL_MESSAGE: &str = "DDL not allowed";

/// One DDL keyword occurrence. Positions are 0-based and counted in chars;
/// `end_column` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DdlFinding {
    pub line: usize,
    pub start_column: usize,
    pub end_column: usize,
    /// The keyword as written.
    pub keyword: String,
    pub message: &'static str,
}

/// Scans document lines for DDL keywords.
pub fn ddl_findings<S: AsRef<str>>(lines: &[S]) -> Vec<DdlFinding> {
    let mut findings = Vec::new();

    for (line_no, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        for m in DDL_KEYWORD.find_iter(line) {
            let start_column = line[..m.start()].chars().count();
            findings.push(DdlFinding {
                line: line_no,
                start_column,
                end_column: start_column + m.as_str().chars().count(),
                keyword: m.as_str().to_string(),
                message: DDL_MESSAGE,
            });
        }
    }

    findings
}
