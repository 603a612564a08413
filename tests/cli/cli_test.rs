//! Integration tests for the sqlsense command line.

use super::common::{json_config, run_sqlsense};

#[test]
fn test_complete_text_output() {
    let config = json_config();
    let config_path = config.path().to_str().unwrap();

    let (code, stdout, _) = run_sqlsense(&[
        "--config",
        config_path,
        "complete",
        "--sql",
        "SELECT * FROM ",
    ]);

    assert_eq!(code, 0);
    assert!(stdout.contains("sch  HR"), "Got: {stdout}");
    assert!(stdout.contains("tbl  HR.EMP  (2 columns)"), "Got: {stdout}");
}

#[test]
fn test_complete_json_with_cursor() {
    let config = json_config();
    let config_path = config.path().to_str().unwrap();

    let (code, stdout, _) = run_sqlsense(&[
        "--config",
        config_path,
        "--output",
        "json",
        "complete",
        "--sql",
        "SELECT e. FROM HR.EMP e",
        "--cursor",
        "9",
    ]);

    assert_eq!(code, 0);
    let candidates: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let labels: Vec<&str> = candidates
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["e.ID", "e.NAME"]);
    assert_eq!(candidates[0]["insertText"], "ID");
    assert_eq!(candidates[0]["kind"], "Field");
}

#[test]
fn test_complete_cursor_out_of_range() {
    let (code, _, stderr) = run_sqlsense(&["complete", "--sql", "SELECT ", "--cursor", "99"]);

    assert_eq!(code, 1);
    assert!(stderr.contains("Input Error"), "Got: {stderr}");
}

#[test]
fn test_complete_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let sql_path = dir.path().join("query.sql");
    std::fs::write(&sql_path, "SELECT * FROM HR.EMP WHERE x = ${").unwrap();
    let config = json_config();

    let (code, stdout, _) = run_sqlsense(&[
        "--config",
        config.path().to_str().unwrap(),
        "complete",
        "--file",
        sql_path.to_str().unwrap(),
    ]);

    assert_eq!(code, 0);
    assert_eq!(stdout, "var  JOB  (workflow scope)\n");
}

#[test]
fn test_hover_builtin() {
    let config = json_config();
    let (code, stdout, _) = run_sqlsense(&["--config", config.path().to_str().unwrap(), "hover", "nvl"]);

    assert_eq!(code, 0);
    assert_eq!(
        stdout,
        "**NVL**\n\nReplaces null with a value\n\nExample: `NVL(a, 0)`\n"
    );
}

#[test]
fn test_database_type_override_hides_builtins() {
    let config = json_config();
    let (code, stdout, _) = run_sqlsense(&[
        "--config",
        config.path().to_str().unwrap(),
        "--database-type",
        "postgres",
        "hover",
        "NVL",
    ]);

    assert_eq!(code, 0);
    assert_eq!(stdout, "");
}

#[test]
fn test_tokens() {
    let config = json_config();
    let (code, stdout, _) = run_sqlsense(&[
        "--config",
        config.path().to_str().unwrap(),
        "tokens",
        "--sql",
        "SELECT NAME\nFROM HR.EMP",
    ]);

    assert_eq!(code, 0);
    assert_eq!(stdout, "1:8 4 column\n2:6 2 schema\n2:9 3 table\n");
}

#[test]
fn test_lint_reports_ddl() {
    let (code, stdout, _) = run_sqlsense(&["lint", "--sql", "SELECT 1;\nDROP TABLE t;"]);

    assert_eq!(code, 2);
    assert_eq!(stdout, "2:1-5 DROP: DDL not allowed\n");
}

#[test]
fn test_lint_clean_script() {
    let (code, stdout, _) = run_sqlsense(&["lint", "--sql", "SELECT created_at FROM t"]);

    assert_eq!(code, 0);
    assert_eq!(stdout, "");
}

#[test]
fn test_invalid_config_fails() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    std::io::Write::write_all(&mut file, b"schemas = 3").unwrap();

    let (code, _, stderr) = run_sqlsense(&[
        "--config",
        file.path().to_str().unwrap(),
        "hover",
        "X",
    ]);

    assert_eq!(code, 1);
    assert!(stderr.contains("Configuration Error"), "Got: {stderr}");
}
