//! Semantic tokens for catalog names found in a document.
//!
//! Every whole-word occurrence of a schema, table or column name is reported.
//! Matching is case-sensitive; when a word names several kinds of object, the
//! first of schema, table, column wins.

use std::collections::HashMap;

use serde::Serialize;

use crate::catalog::CatalogIndex;

/// Token type, numbered in legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Schema = 0,
    Table = 1,
    Column = 2,
}

impl TokenKind {
    /// Token type names, indexed by `TokenKind as u32`.
    pub const LEGEND: [&'static str; 3] = ["schema", "table", "column"];

    pub fn as_str(&self) -> &'static str {
        Self::LEGEND[*self as usize]
    }
}

/// One token span. Positions are 0-based and counted in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SemanticToken {
    pub line: u32,
    pub start: u32,
    pub length: u32,
    pub kind: TokenKind,
}

/// Finds catalog names in the document, ordered by line then column.
pub fn semantic_tokens<S: AsRef<str>>(index: &CatalogIndex, lines: &[S]) -> Vec<SemanticToken> {
    let kinds = name_kinds(index);
    if kinds.is_empty() {
        return Vec::new();
    }

    let mut tokens = Vec::new();
    for (line_no, line) in lines.iter().enumerate() {
        for (start, word) in word_spans(line.as_ref()) {
            if let Some(&kind) = kinds.get(word) {
                tokens.push(SemanticToken {
                    line: line_no as u32,
                    start: start as u32,
                    length: word.chars().count() as u32,
                    kind,
                });
            }
        }
    }
    tokens
}

/// Encodes tokens as the relative `u32` stream editors consume:
/// `deltaLine, deltaStart, length, tokenType, modifiers` per token.
pub fn encode(tokens: &[SemanticToken]) -> Vec<u32> {
    let mut data = Vec::with_capacity(tokens.len() * 5);
    let mut last_line = 0;
    let mut last_start = 0;

    for token in tokens {
        let delta_line = token.line - last_line;
        let delta_start = if delta_line == 0 {
            token.start - last_start
        } else {
            token.start
        };
        data.extend([delta_line, delta_start, token.length, token.kind as u32, 0]);
        last_line = token.line;
        last_start = token.start;
    }

    data
}

fn name_kinds(index: &CatalogIndex) -> HashMap<&str, TokenKind> {
    let mut kinds = HashMap::new();
    for schema in index.schemas() {
        kinds.entry(schema.name.as_str()).or_insert(TokenKind::Schema);
    }
    for schema in index.schemas() {
        for table in &schema.tables {
            kinds.entry(table.name.as_str()).or_insert(TokenKind::Table);
        }
    }
    for schema in index.schemas() {
        for table in &schema.tables {
            for column in &table.columns {
                kinds.entry(column.as_str()).or_insert(TokenKind::Column);
            }
        }
    }
    kinds
}

/// Identifier runs with their starting char column.
fn word_spans(line: &str) -> Vec<(usize, &str)> {
    let mut spans = Vec::new();
    let mut start: Option<(usize, usize)> = None;

    for (column, (pos, ch)) in line.char_indices().enumerate() {
        let is_word = ch.is_alphanumeric() || ch == '_';
        match (is_word, start) {
            (true, None) => start = Some((column, pos)),
            (false, Some((col, s))) => {
                spans.push((col, &line[s..pos]));
                start = None;
            }
            _ => {}
        }
    }
    if let Some((col, s)) = start {
        spans.push((col, &line[s..]));
    }

    spans
}
