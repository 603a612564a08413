//! Case-insensitive lookup index over the catalog.
//!
//! A `CatalogIndex` is built in one go from the host's metadata and never
//! mutated afterwards. Rebuilding means constructing a new index and swapping
//! it in (see [`super::CatalogStore`]).

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{info, warn};

use super::{Schema, Table, WorkflowVariable};

/// A table together with the schema that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEntry {
    /// Owning schema name (original casing).
    pub schema: String,
    pub table: Table,
}

impl TableEntry {
    /// Returns `SCHEMA.TABLE` in original casing.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.schema, self.table.name)
    }
}

/// Immutable lookup structure derived from schemas and workflow variables.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    /// Schemas in the order the host supplied them.
    schemas: Vec<Schema>,
    /// Uppercase schema name -> position in `schemas`.
    schema_by_name: HashMap<String, usize>,
    /// Uppercase `SCHEMA.TABLE` and bare `TABLE` -> entry.
    table_by_key: HashMap<String, TableEntry>,
    /// Scope -> sorted unique keys.
    variable_keys_by_scope: BTreeMap<String, Vec<String>>,
}

impl CatalogIndex {
    /// Builds a fresh index.
    ///
    /// A bare table name shared by several schemas maps to the schema indexed
    /// last. Workflow variables with an empty (after trimming) scope or key are
    /// discarded.
    pub fn build(schemas: &[Schema], workflow_variables: &[WorkflowVariable]) -> Self {
        let mut schema_by_name = HashMap::with_capacity(schemas.len());
        let mut table_by_key = HashMap::new();

        for (position, schema) in schemas.iter().enumerate() {
            schema_by_name.insert(schema.name.to_uppercase(), position);

            for table in &schema.tables {
                let entry = TableEntry {
                    schema: schema.name.clone(),
                    table: table.clone(),
                };
                let qualified = format!("{}.{}", schema.name, table.name).to_uppercase();
                table_by_key.insert(qualified, entry.clone());
                table_by_key.insert(table.name.to_uppercase(), entry);
            }
        }

        let mut scopes: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut discarded = 0usize;
        for var in workflow_variables {
            let scope = var.scope.trim();
            let key = var.variable_key.trim();
            if scope.is_empty() || key.is_empty() {
                discarded += 1;
                continue;
            }
            scopes
                .entry(scope.to_string())
                .or_default()
                .insert(key.to_string());
        }
        if discarded > 0 {
            warn!(discarded, "Skipped workflow variables with empty scope or key");
        }

        let variable_keys_by_scope: BTreeMap<String, Vec<String>> = scopes
            .into_iter()
            .map(|(scope, keys)| (scope, keys.into_iter().collect()))
            .collect();

        info!(
            schemas = schemas.len(),
            table_keys = table_by_key.len(),
            variable_scopes = variable_keys_by_scope.len(),
            "Built catalog index"
        );

        Self {
            schemas: schemas.to_vec(),
            schema_by_name,
            table_by_key,
            variable_keys_by_scope,
        }
    }

    /// Returns all schemas in host order.
    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    /// Looks up a schema by name, ignoring case.
    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.schema_by_name
            .get(&name.to_uppercase())
            .and_then(|&position| self.schemas.get(position))
    }

    /// Looks up a table by `SCHEMA.TABLE` or bare `TABLE` key, ignoring case.
    pub fn table(&self, key: &str) -> Option<&TableEntry> {
        self.table_by_key.get(&key.to_uppercase())
    }

    /// Resolves an optional schema plus table name to an entry.
    pub fn resolve_table(&self, schema: Option<&str>, table: &str) -> Option<&TableEntry> {
        match schema {
            Some(schema) => self.table(&format!("{schema}.{table}")),
            None => self.table(table),
        }
    }

    /// Column names for a table, or an empty slice when it is unknown.
    pub fn columns_for(&self, schema: Option<&str>, table: &str) -> &[String] {
        self.resolve_table(schema, table)
            .map(|entry| entry.table.columns.as_slice())
            .unwrap_or(&[])
    }

    /// Workflow scopes in sorted order.
    pub fn variable_scopes(&self) -> impl Iterator<Item = &str> {
        self.variable_keys_by_scope.keys().map(String::as_str)
    }

    /// Sorted variable keys for a scope.
    ///
    /// Tries an exact scope match first and falls back to a case-insensitive
    /// one. Returns the matched scope name alongside its keys.
    pub fn variable_keys(&self, scope: &str) -> Option<(&str, &[String])> {
        if let Some((name, keys)) = self.variable_keys_by_scope.get_key_value(scope) {
            return Some((name.as_str(), keys.as_slice()));
        }
        self.variable_keys_by_scope
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(scope))
            .map(|(name, keys)| (name.as_str(), keys.as_slice()))
    }

    /// Returns true when no schemas and no variables are indexed.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty() && self.variable_keys_by_scope.is_empty()
    }
}
