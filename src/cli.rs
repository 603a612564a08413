//! Command-line argument parsing for sqlsense.
//!
//! Uses clap to parse the global options and the `complete`, `hover`,
//! `tokens` and `lint` subcommands, plus the plain-text renderers for their
//! results.

use crate::analysis::{DdlFinding, Hover, SemanticToken};
use crate::completion::CompletionCandidate;
use crate::error::{IntellisenseError, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One line per item.
    #[default]
    Text,
    /// A JSON array or object.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s}. Expected: text or json")),
        }
    }
}

/// Context-aware SQL completion for workflow scripts.
#[derive(Parser, Debug)]
#[command(name = "sqlsense")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path (TOML, or JSON with a .json extension)
    #[arg(long, global = true, value_name = "PATH", env = "SQLSENSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Database type selecting builtin functions (overrides config)
    #[arg(long, global = true, value_name = "TYPE")]
    pub database_type: Option<String>,

    /// Output format: text or json
    #[arg(long, global = true, value_name = "FORMAT", default_value = "text")]
    pub output: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Suggest completions at a cursor position
    Complete {
        #[command(flatten)]
        input: SqlInput,

        /// Cursor byte offset (defaults to the end of the input)
        #[arg(long, value_name = "OFFSET")]
        cursor: Option<usize>,
    },

    /// Show hover text for a word
    Hover {
        /// Builtin function, schema or table name
        #[arg(value_name = "WORD")]
        word: String,
    },

    /// List schema, table and column occurrences
    Tokens {
        #[command(flatten)]
        input: SqlInput,

        /// Print the relative u32 stream instead of one token per line
        #[arg(long)]
        encoded: bool,
    },

    /// Report DDL statements (exits with status 2 when any are found)
    Lint {
        #[command(flatten)]
        input: SqlInput,
    },
}

/// Where the SQL text comes from.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlInput {
    /// SQL text
    #[arg(long, value_name = "SQL", conflicts_with = "file")]
    pub sql: Option<String>,

    /// Read SQL from a file ("-" for stdin)
    #[arg(short = 'f', long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

impl SqlInput {
    /// Reads the SQL text from `--sql`, `--file` or stdin (`--file -`).
    pub fn read(&self) -> Result<String> {
        if let Some(sql) = &self.sql {
            return Ok(sql.clone());
        }

        match &self.file {
            Some(path) if path.as_os_str() == "-" => {
                let mut sql = String::new();
                std::io::stdin()
                    .read_to_string(&mut sql)
                    .map_err(|e| IntellisenseError::io(format!("Failed to read stdin: {e}")))?;
                Ok(sql)
            }
            Some(path) => std::fs::read_to_string(path).map_err(|e| {
                IntellisenseError::io(format!("Failed to read {}: {e}", path.display()))
            }),
            None => Err(IntellisenseError::input("Provide SQL with --sql or --file")),
        }
    }
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::IntellisenseConfig::default_path)
    }

    /// Parses the output format from the --output argument.
    pub fn parse_output_format(&self) -> Result<OutputFormat> {
        self.output.parse().map_err(IntellisenseError::input)
    }
}

/// Checks that a cursor offset lies within the text and on a char boundary.
pub fn validate_cursor(sql: &str, cursor: Option<usize>) -> Result<usize> {
    let cursor = cursor.unwrap_or(sql.len());
    if cursor > sql.len() {
        return Err(IntellisenseError::input(format!(
            "Cursor {cursor} is past the end of the input ({} bytes)",
            sql.len()
        )));
    }
    if !sql.is_char_boundary(cursor) {
        return Err(IntellisenseError::input(format!(
            "Cursor {cursor} is inside a multi-byte character"
        )));
    }
    Ok(cursor)
}

/// One candidate per line: kind, label, then insert text and detail when
/// they add information.
pub fn render_candidates(candidates: &[CompletionCandidate]) -> String {
    let mut out = String::new();
    for candidate in candidates {
        out.push_str(&format!("{:<4} {}", candidate.kind.short_label(), candidate.label));
        if candidate.insert_text != candidate.label {
            out.push_str(&format!("  => {}", candidate.render_snippet().escape_debug()));
        }
        if let Some(detail) = &candidate.detail {
            out.push_str(&format!("  ({detail})"));
        }
        out.push('\n');
    }
    out
}

pub fn render_hover(hover: Option<&Hover>) -> String {
    match hover {
        Some(hover) => format!("{}\n", hover.to_markdown()),
        None => String::new(),
    }
}

/// `line:start len kind` per token, 1-based line and column.
pub fn render_tokens(tokens: &[SemanticToken]) -> String {
    tokens
        .iter()
        .map(|t| {
            format!(
                "{}:{} {} {}\n",
                t.line + 1,
                t.start + 1,
                t.length,
                t.kind.as_str()
            )
        })
        .collect()
}

/// `line:column-end keyword: message` per finding, 1-based.
pub fn render_findings(findings: &[DdlFinding]) -> String {
    findings
        .iter()
        .map(|f| {
            format!(
                "{}:{}-{} {}: {}\n",
                f.line + 1,
                f.start_column + 1,
                f.end_column + 1,
                f.keyword,
                f.message
            )
        })
        .collect()
}
