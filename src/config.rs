//! Configuration management for sql-intellisense.
//!
//! Handles loading the catalog and lexical tables from TOML or JSON files.
//! JSON input may use the host editor's camelCase field names.

use crate::catalog::{BuiltinFunction, Schema, WorkflowVariable};
use crate::error::{IntellisenseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default SQL keywords offered in keyword positions.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "GROUP BY", "ORDER BY", "HAVING", "JOIN", "LEFT JOIN",
    "RIGHT JOIN", "FULL JOIN", "INNER JOIN", "OUTER JOIN", "ON", "INSERT", "INTO", "VALUES",
    "UPDATE", "SET", "DELETE", "DISTINCT", "AS", "AND", "OR", "NOT", "IN", "EXISTS", "LIKE",
    "BETWEEN", "IS", "NULL", "UNION", "UNION ALL", "INTERSECT", "MINUS", "CASE", "WHEN", "THEN",
    "ELSE", "END", "WITH", "LIMIT", "OFFSET", "FETCH", "FIRST", "ROWS", "ONLY", "OVER",
    "PARTITION BY",
];

/// Default SQL operators.
pub const DEFAULT_OPERATORS: &[&str] = &[
    "=", "!=", "<>", ">", ">=", "<", "<=", "+", "-", "*", "/", "%", "||", "(", ")", ",", ".",
    ";",
];

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntellisenseConfig {
    /// Database type selecting the builtin function list (e.g. "oracle").
    #[serde(
        default = "default_database_type",
        alias = "databaseType",
        alias = "dbType"
    )]
    pub database_type: String,

    /// Schema metadata.
    #[serde(default, alias = "metadata")]
    pub schemas: Vec<Schema>,

    /// Builtin functions keyed by database type.
    #[serde(default, alias = "dbBuiltins")]
    pub builtins: HashMap<String, Vec<BuiltinFunction>>,

    #[serde(default = "default_keywords", alias = "sqlKeywords")]
    pub keywords: Vec<String>,

    #[serde(default = "default_operators", alias = "sqlOperators")]
    pub operators: Vec<String>,

    /// Workflow variables available as `${scope.key}`.
    #[serde(
        default,
        alias = "workflowVars",
        alias = "workflowVariables",
        alias = "workflow_vars"
    )]
    pub workflow_variables: Vec<WorkflowVariable>,
}

fn default_database_type() -> String {
    "oracle".to_string()
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

fn default_operators() -> Vec<String> {
    DEFAULT_OPERATORS.iter().map(|o| o.to_string()).collect()
}

impl Default for IntellisenseConfig {
    fn default() -> Self {
        Self {
            database_type: default_database_type(),
            schemas: Vec::new(),
            builtins: HashMap::new(),
            keywords: default_keywords(),
            operators: default_operators(),
            workflow_variables: Vec::new(),
        }
    }
}

impl IntellisenseConfig {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sql-intellisense")
            .join("config.toml")
    }

    /// Loads configuration from a file.
    ///
    /// `.json` files are parsed as JSON, anything else as TOML. A missing file
    /// yields the default configuration.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| IntellisenseError::config(format!("Failed to read config file: {e}")))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::parse_json(&content, path)
        } else {
            Self::parse_toml(&content, path)
        }
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            IntellisenseError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Parses configuration from a JSON string.
    fn parse_json(content: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            IntellisenseError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Builtins for the configured database type.
    ///
    /// Exact key first, then a case-insensitive match.
    pub fn active_builtins(&self) -> &[BuiltinFunction] {
        self.builtins
            .get(&self.database_type)
            .or_else(|| {
                self.builtins
                    .iter()
                    .find(|(db, _)| db.eq_ignore_ascii_case(&self.database_type))
                    .map(|(_, functions)| functions)
            })
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
