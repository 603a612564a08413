//! Schema and workflow-variable catalog.
//!
//! Holds the metadata the completion engine suggests from: schemas with their
//! tables and columns, workflow variables grouped by scope, and the builtin
//! function catalog for each database type.

mod index;
mod store;

pub use index::{CatalogIndex, TableEntry};
pub use store::CatalogStore;

use serde::{Deserialize, Serialize};

/// A named namespace containing tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema name as provided by the host (original casing).
    pub name: String,

    /// Tables in declaration order.
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Schema {
    /// Creates a schema with the given tables.
    pub fn new(name: impl Into<String>, tables: Vec<Table>) -> Self {
        Self {
            name: name.into(),
            tables,
        }
    }
}

/// A named relation with an ordered list of column names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name as provided by the host (original casing).
    pub name: String,

    /// Column names in declaration order.
    #[serde(default)]
    pub columns: Vec<String>,
}

impl Table {
    /// Creates a table with the given columns.
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }
}

/// A `${scope.key}` placeholder resolved by the workflow runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowVariable {
    #[serde(default)]
    pub scope: String,

    #[serde(default, alias = "variableKey")]
    pub variable_key: String,
}

impl WorkflowVariable {
    pub fn new(scope: impl Into<String>, variable_key: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            variable_key: variable_key.into(),
        }
    }
}

/// A database-specific function exposed for completion and hover.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltinFunction {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Usage example shown on hover (e.g. `NVL(col, 0)`).
    #[serde(default, alias = "sampleUsage", alias = "sample")]
    pub sample_usage: String,
}

impl BuiltinFunction {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        sample_usage: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            sample_usage: sample_usage.into(),
        }
    }
}
