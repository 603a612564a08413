//! sqlsense - context-aware SQL completion for workflow scripts.

use sql_intellisense::analysis::{ddl_findings, tokens};
use sql_intellisense::cli::{self, Cli, Command, OutputFormat};
use sql_intellisense::completion::{CompletionEngine, CompletionRequest};
use sql_intellisense::config::IntellisenseConfig;
use sql_intellisense::error::{IntellisenseError, Result};
use sql_intellisense::logging;
use serde::Serialize;
use tracing::{debug, error, info};

/// Exit status when `lint` finds DDL.
const EXIT_FINDINGS: i32 = 2;

fn main() {
    let cli = Cli::parse_args();

    match &cli.log_file {
        Some(path) => logging::init_file_logging(Some(path)),
        None => logging::init_stderr_logging(),
    }

    match run(cli) {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{}: {}", e.category(), e);
            eprintln!("{}: {}", e.category(), e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let format = cli.parse_output_format()?;

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = IntellisenseConfig::load_from_file(&config_path)?;
    if let Some(database_type) = &cli.database_type {
        config.database_type = database_type.clone();
    }

    let engine = CompletionEngine::new(&config);

    match &cli.command {
        Command::Complete { input, cursor } => {
            let sql = input.read()?;
            let cursor = cli::validate_cursor(&sql, *cursor)?;
            let request = CompletionRequest::at_offset(&sql, cursor);
            let candidates = engine.complete(&request);
            debug!(count = candidates.len(), "Completed");
            emit(format, &candidates, || cli::render_candidates(&candidates))?;
        }
        Command::Hover { word } => {
            let hover = engine.hover(word);
            emit(format, &hover, || cli::render_hover(hover.as_ref()))?;
        }
        Command::Tokens { input, encoded } => {
            let sql = input.read()?;
            let lines: Vec<&str> = sql.lines().collect();
            let found = engine.semantic_tokens(&lines);
            if *encoded {
                let data = tokens::encode(&found);
                emit(format, &data, || {
                    let words: Vec<String> = data.iter().map(u32::to_string).collect();
                    format!("{}\n", words.join(" "))
                })?;
            } else {
                emit(format, &found, || cli::render_tokens(&found))?;
            }
        }
        Command::Lint { input } => {
            let sql = input.read()?;
            let lines: Vec<&str> = sql.lines().collect();
            let findings = ddl_findings(&lines);
            emit(format, &findings, || cli::render_findings(&findings))?;
            if !findings.is_empty() {
                return Ok(EXIT_FINDINGS);
            }
        }
    }

    Ok(0)
}

/// Prints `value` as JSON, or the text rendering.
fn emit<T, F>(format: OutputFormat, value: &T, render_text: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce() -> String,
{
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)
                .map_err(|e| IntellisenseError::internal(format!("Failed to encode JSON: {e}")))?;
            println!("{json}");
        }
        OutputFormat::Text => print!("{}", render_text()),
    }
    Ok(())
}
