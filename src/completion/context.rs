//! Clause classification for the cursor position.
//!
//! The scope text is reduced to a sequence of clause markers (`SELECT`,
//! `FROM`, `ORDER BY`, ...). A context applies when its marker is the last one
//! in the scope; the rule table is walked in priority order and the first
//! matching rule wins.

use serde::Serialize;
use std::fmt;

/// SQL clause the cursor is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClauseContext {
    None,
    Select,
    From,
    Join,
    On,
    Where,
    Update,
    Set,
    Delete,
    Insert,
    Into,
    Values,
    /// After `GROUP BY`.
    Group,
    /// After `ORDER BY`.
    Order,
    Having,
    /// Inside the column list of `INSERT INTO <target> (`.
    InsertCols,
}

impl ClauseContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Join => "JOIN",
            Self::On => "ON",
            Self::Where => "WHERE",
            Self::Update => "UPDATE",
            Self::Set => "SET",
            Self::Delete => "DELETE",
            Self::Insert => "INSERT",
            Self::Into => "INTO",
            Self::Values => "VALUES",
            Self::Group => "GROUP",
            Self::Order => "ORDER",
            Self::Having => "HAVING",
            Self::InsertCols => "INSERT_COLS",
        }
    }
}

impl fmt::Display for ClauseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A clause-introducing keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Select,
    From,
    Join,
    On,
    Where,
    GroupBy,
    OrderBy,
    Having,
    Update,
    Set,
    Delete,
    Insert,
    Into,
    Values,
    Limit,
    Offset,
    Fetch,
    SetOperation,
    Returning,
}

/// One entry of the classification table.
struct ClauseRule {
    marker: Marker,
    /// Another marker that must appear somewhere in the scope.
    requires: Option<Marker>,
}

const fn rule(marker: Marker) -> ClauseRule {
    ClauseRule {
        marker,
        requires: None,
    }
}

/// Priority order: most specific first.
const RULES: &[(ClauseContext, ClauseRule)] = &[
    (
        ClauseContext::Set,
        ClauseRule {
            marker: Marker::Set,
            requires: Some(Marker::Update),
        },
    ),
    (ClauseContext::Where, rule(Marker::Where)),
    (ClauseContext::Having, rule(Marker::Having)),
    (ClauseContext::Order, rule(Marker::OrderBy)),
    (ClauseContext::Group, rule(Marker::GroupBy)),
    (
        ClauseContext::On,
        ClauseRule {
            marker: Marker::On,
            requires: Some(Marker::Join),
        },
    ),
    (ClauseContext::Join, rule(Marker::Join)),
    (ClauseContext::From, rule(Marker::From)),
    (ClauseContext::Update, rule(Marker::Update)),
    (ClauseContext::Delete, rule(Marker::Delete)),
    (ClauseContext::Insert, rule(Marker::Insert)),
    (ClauseContext::Into, rule(Marker::Into)),
    (ClauseContext::Values, rule(Marker::Values)),
    (ClauseContext::Select, rule(Marker::Select)),
];

/// Classifies a masked scope.
///
/// `enclosing` is the statement text before the scope (ending with the `(`
/// that opened it, if any); it is only consulted for the INSERT column list.
pub fn classify(scope: &str, enclosing: &str) -> ClauseContext {
    if is_insert_column_list(enclosing) {
        return ClauseContext::InsertCols;
    }

    let markers = clause_markers(scope);
    let Some(&last) = markers.last() else {
        return ClauseContext::None;
    };

    RULES
        .iter()
        .find(|(_, rule)| {
            rule.marker == last
                && rule
                    .requires
                    .map_or(true, |needed| markers.contains(&needed))
        })
        .map(|(context, _)| *context)
        .unwrap_or(ClauseContext::None)
}

/// Returns true when the scope contains any clause keyword.
///
/// A parenthesised group without one is an expression or argument list, not a
/// subquery.
pub fn has_clause_keyword(scope: &str) -> bool {
    !clause_markers(scope).is_empty()
}

/// True when `enclosing` ends with `INSERT INTO <name> (`.
fn is_insert_column_list(enclosing: &str) -> bool {
    let Some(before_paren) = enclosing.trim_end().strip_suffix('(') else {
        return false;
    };
    let words = words(before_paren);
    match words.as_slice() {
        [.., insert, into, target] => {
            insert.eq_ignore_ascii_case("INSERT")
                && into.eq_ignore_ascii_case("INTO")
                && !target.is_empty()
                && !is_clause_word(target)
        }
        _ => false,
    }
}

fn is_clause_word(word: &str) -> bool {
    marker_for(&word.to_uppercase(), None).is_some()
}

/// Maps a word (and the word following it) to a clause marker.
fn marker_for(word: &str, next: Option<&str>) -> Option<Marker> {
    let followed_by_by = next.is_some_and(|n| n.eq_ignore_ascii_case("BY"));
    Some(match word {
        "SELECT" => Marker::Select,
        "FROM" => Marker::From,
        "JOIN" => Marker::Join,
        "ON" => Marker::On,
        "WHERE" => Marker::Where,
        "GROUP" if followed_by_by => Marker::GroupBy,
        "ORDER" if followed_by_by => Marker::OrderBy,
        "HAVING" => Marker::Having,
        "UPDATE" => Marker::Update,
        "SET" => Marker::Set,
        "DELETE" => Marker::Delete,
        "INSERT" => Marker::Insert,
        "INTO" => Marker::Into,
        "VALUES" => Marker::Values,
        "LIMIT" => Marker::Limit,
        "OFFSET" => Marker::Offset,
        "FETCH" => Marker::Fetch,
        "UNION" | "INTERSECT" | "EXCEPT" | "MINUS" => Marker::SetOperation,
        "RETURNING" => Marker::Returning,
        _ => return None,
    })
}

/// Clause markers in order of appearance.
fn clause_markers(scope: &str) -> Vec<Marker> {
    let words = words(scope);
    let mut markers = Vec::new();
    let mut i = 0;
    while i < words.len() {
        let upper = words[i].to_uppercase();
        let next = words.get(i + 1).copied();
        if let Some(marker) = marker_for(&upper, next) {
            markers.push(marker);
            if matches!(marker, Marker::GroupBy | Marker::OrderBy) {
                i += 1;
            }
        }
        i += 1;
    }
    markers
}

/// Splits text into identifier-like words (letters, digits, `_`, `.`).
///
/// Everything else separates words. Dotted names such as `HR.EMP` stay a
/// single word so they never read as a keyword.
pub(crate) fn words(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;

    for (pos, ch) in text.char_indices() {
        let is_word = ch.is_alphanumeric() || ch == '_' || ch == '.';
        match (is_word, start) {
            (true, None) => start = Some(pos),
            (false, Some(s)) => {
                out.push(&text[s..pos]);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push(&text[s..]);
    }

    out
}
