//! Common utilities for running the sqlsense binary.

use std::io::Write;
use std::process::Command;

use tempfile::NamedTempFile;

/// Runs sqlsense with the given arguments.
pub fn run_sqlsense(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_sqlsense"))
        .args(args)
        .env("RUST_LOG", "warn")
        .env_remove("SQLSENSE_CONFIG")
        .output()
        .expect("Failed to execute sqlsense");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}

/// Writes a JSON config in the host editor's field names.
pub fn json_config() -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("Failed to create config file");
    write!(
        file,
        r#"{{
  "dbType": "oracle",
  "metadata": [
    {{"name": "HR", "tables": [{{"name": "EMP", "columns": ["ID", "NAME"]}}]}}
  ],
  "dbBuiltins": {{
    "oracle": [{{"name": "NVL", "description": "Replaces null with a value", "sample": "NVL(a, 0)"}}]
  }},
  "workflowVars": [{{"scope": "JOB", "variableKey": "RUN_ID"}}]
}}"#
    )
    .expect("Failed to write config file");
    file
}
