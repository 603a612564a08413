//! Table reference resolution within a scope.
//!
//! Scans the depth-isolated scope for `FROM`/`JOIN`, `UPDATE`,
//! `INSERT INTO` and `DELETE FROM` targets and binds aliases and bare table
//! names to resolved references.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use tracing::trace;

/// `FROM|JOIN <name> [AS] [alias]`
static FROM_JOIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:FROM|JOIN)\s+([\w.]+)(?:\s+(?:AS\s+)?(\w+))?").expect("valid regex")
});

/// `FROM|JOIN () [AS] alias`: a derived table after nested-group masking.
static DERIVED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:FROM|JOIN)\s*\(\s*\)\s*(?:AS\s+)?(\w+)").expect("valid regex")
});

static UPDATE_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bUPDATE\s+([\w.]+)(?:\s+(?:AS\s+)?(\w+))?").expect("valid regex")
});

static INSERT_TARGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bINSERT\s+INTO\s+([\w.]+)").expect("valid regex"));

static DELETE_TARGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bDELETE\s+FROM\s+([\w.]+)").expect("valid regex"));

/// Words that follow a table name without being its alias.
const NOT_AN_ALIAS: &[&str] = &[
    "AS", "ON", "USING", "WHERE", "JOIN", "LEFT", "RIGHT", "INNER", "OUTER", "FULL", "CROSS",
    "NATURAL", "GROUP", "ORDER", "HAVING", "LIMIT", "OFFSET", "FETCH", "UNION", "INTERSECT",
    "EXCEPT", "MINUS", "SET", "VALUES", "SELECT", "FROM", "WINDOW", "RETURNING", "FOR",
];

/// A table reference parsed from SQL text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TableRef {
    pub schema: Option<String>,
    pub table: String,
}

impl TableRef {
    /// Splits `SCHEMA.TABLE` (or bare `TABLE`) into a reference.
    ///
    /// With more than one dot the last two parts are used. Returns `None`
    /// for an empty table part (e.g. `HR.` while still typing).
    pub fn parse(name: &str) -> Option<Self> {
        let mut parts = name.rsplit('.');
        let table = parts.next()?.trim();
        if table.is_empty() {
            return None;
        }
        let schema = parts
            .next()
            .map(str::trim)
            .filter(|schema| !schema.is_empty())
            .map(str::to_string);
        Some(Self {
            schema,
            table: table.to_string(),
        })
    }

    /// `SCHEMA.TABLE` or `TABLE`.
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{schema}.{}", self.table),
            None => self.table.clone(),
        }
    }
}

/// Table references active in one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRefs {
    /// Uppercase alias or bare table name -> reference, in first-seen order.
    by_key: IndexMap<String, TableRef>,
    update_target: Option<TableRef>,
    insert_target: Option<TableRef>,
}

impl TableRefs {
    /// Resolves references in a masked scope.
    ///
    /// The scope is upper-cased before scanning. Later matches overwrite
    /// earlier ones under the same key.
    pub fn resolve(scope: &str) -> Self {
        let upper = scope.to_uppercase();
        let mut refs = Self::default();

        // A rejected alias (`FROM a JOIN b`) may itself start the next match,
        // so resume the scan at the rejected word instead of after it.
        let mut at = 0;
        while let Some(caps) = FROM_JOIN.captures_at(&upper, at) {
            let raw_alias = caps.get(2);
            let alias = raw_alias.map(|m| m.as_str()).filter(|a| is_alias(a));
            at = match (raw_alias, alias) {
                (Some(rejected), None) => rejected.start(),
                _ => caps.get(0).map_or(upper.len(), |m| m.end()),
            };

            if let Some(table_ref) = caps.get(1).and_then(|m| TableRef::parse(m.as_str())) {
                refs.bind(alias, table_ref);
            }
        }

        for caps in DERIVED.captures_iter(&upper) {
            if let Some(alias) = caps.get(1).map(|m| m.as_str()).filter(|a| is_alias(a)) {
                refs.by_key.insert(
                    alias.to_string(),
                    TableRef {
                        schema: None,
                        table: alias.to_string(),
                    },
                );
            }
        }

        if let Some(caps) = UPDATE_TARGET.captures(&upper) {
            if let Some(table_ref) = caps.get(1).and_then(|m| TableRef::parse(m.as_str())) {
                refs.bind(caps.get(2).map(|m| m.as_str()), table_ref.clone());
                refs.update_target = Some(table_ref);
            }
        }

        refs.insert_target = INSERT_TARGET
            .captures(&upper)
            .and_then(|caps| caps.get(1))
            .and_then(|m| TableRef::parse(m.as_str()));

        if let Some(table_ref) = DELETE_TARGET
            .captures(&upper)
            .and_then(|caps| caps.get(1))
            .and_then(|m| TableRef::parse(m.as_str()))
        {
            refs.by_key.insert(table_ref.table.clone(), table_ref);
        }

        trace!(keys = ?refs.by_key.keys().collect::<Vec<_>>(), "Resolved table references");
        refs
    }

    /// Registers the alias (when it is one) and the bare table name.
    fn bind(&mut self, alias: Option<&str>, table_ref: TableRef) {
        if let Some(alias) = alias.filter(|a| is_alias(a)) {
            self.by_key.insert(alias.to_string(), table_ref.clone());
        }
        self.by_key.insert(table_ref.table.clone(), table_ref);
    }

    /// Looks up an alias or bare table name, ignoring case.
    pub fn get(&self, key: &str) -> Option<&TableRef> {
        self.by_key
            .get(key)
            .or_else(|| self.by_key.get(&key.to_uppercase()))
    }

    /// Alias/table keys with their references, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TableRef)> {
        self.by_key.iter().map(|(key, table_ref)| (key.as_str(), table_ref))
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn update_target(&self) -> Option<&TableRef> {
        self.update_target.as_ref()
    }

    pub fn insert_target(&self) -> Option<&TableRef> {
        self.insert_target.as_ref()
    }

    /// Sets the INSERT target found in an enclosing scope.
    pub fn set_insert_target(&mut self, target: Option<TableRef>) {
        self.insert_target = target;
    }
}

fn is_alias(word: &str) -> bool {
    !word.is_empty()
        && !word.starts_with(|c: char| c.is_ascii_digit())
        && !NOT_AN_ALIAS.contains(&word)
}
