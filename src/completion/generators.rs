//! Candidate generators, one per completion kind.
//!
//! Every generator is a pure function of the catalog snapshot and the
//! per-request table references.

use std::collections::HashSet;

use crate::catalog::{BuiltinFunction, CatalogIndex, Schema};

use super::tables::{TableRef, TableRefs};
use super::types::{CandidateKind, CompletionCandidate, Snippet};
use super::variables::VariableContext;

/// Most columns a generated multi-column snippet lists.
pub const MAX_SNIPPET_COLUMNS: usize = 25;

/// Comparison and logical keywords offered in predicate clauses.
pub const PREDICATE_KEYWORDS: &[&str] = &[
    "AND", "OR", "NOT", "IN", "EXISTS", "LIKE", "BETWEEN", "IS", "NULL",
];

pub fn schemas(index: &CatalogIndex) -> Vec<CompletionCandidate> {
    index
        .schemas()
        .iter()
        .map(|schema| {
            CompletionCandidate::new(&schema.name, CandidateKind::Module)
                .with_detail(format!("{} tables", schema.tables.len()))
        })
        .collect()
}

/// Every table as `SCHEMA.TABLE`.
pub fn tables(index: &CatalogIndex) -> Vec<CompletionCandidate> {
    index
        .schemas()
        .iter()
        .flat_map(|schema| {
            schema.tables.iter().map(move |table| {
                CompletionCandidate::new(
                    format!("{}.{}", schema.name, table.name),
                    CandidateKind::Class,
                )
                .with_detail(format!("{} columns", table.columns.len()))
            })
        })
        .collect()
}

/// Bare table names of one schema (after `SCHEMA.`).
pub fn tables_in_schema(schema: &Schema) -> Vec<CompletionCandidate> {
    schema
        .tables
        .iter()
        .map(|table| {
            CompletionCandidate::new(&table.name, CandidateKind::Class)
                .with_detail(format!("{} columns", table.columns.len()))
        })
        .collect()
}

/// Columns of one table, labelled `<label_prefix>.COL` and inserting `COL`.
pub fn columns_for_table(
    index: &CatalogIndex,
    schema: Option<&str>,
    table: &str,
    label_prefix: &str,
) -> Vec<CompletionCandidate> {
    let qualified = match schema {
        Some(schema) => format!("{schema}.{table}"),
        None => table.to_string(),
    };
    index
        .columns_for(schema, table)
        .iter()
        .map(|column| {
            CompletionCandidate::new(format!("{label_prefix}.{column}"), CandidateKind::Field)
                .with_insert_text(column)
                .with_detail(format!("{qualified}.{column}"))
        })
        .collect()
}

/// Columns of every active reference.
///
/// Emits `key.COL` for each alias/table key, plus one bare `COL` per distinct
/// column name whose detail is the first dotted form seen.
pub fn columns_from_active_tables(
    index: &CatalogIndex,
    refs: &TableRefs,
) -> Vec<CompletionCandidate> {
    let mut out = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for (key, table_ref) in refs.iter() {
        let Some(entry) = index.resolve_table(table_ref.schema.as_deref(), &table_ref.table)
        else {
            continue;
        };
        let qualified = table_ref.qualified_name();

        for column in &entry.table.columns {
            let dotted = format!("{key}.{column}");
            out.push(
                CompletionCandidate::new(&dotted, CandidateKind::Field)
                    .with_detail(format!("{qualified}.{column}")),
            );
            if seen.insert(column.as_str()) {
                out.push(CompletionCandidate::new(column, CandidateKind::Field).with_detail(dotted));
            }
        }
    }

    out
}

pub fn keywords<S: AsRef<str>>(words: &[S]) -> Vec<CompletionCandidate> {
    words
        .iter()
        .map(|word| CompletionCandidate::new(word.as_ref(), CandidateKind::Keyword))
        .collect()
}

pub fn operators<S: AsRef<str>>(ops: &[S]) -> Vec<CompletionCandidate> {
    ops.iter()
        .map(|op| CompletionCandidate::new(op.as_ref(), CandidateKind::Operator))
        .collect()
}

/// Builtin functions, inserted with an empty argument list.
pub fn builtins(functions: &[BuiltinFunction]) -> Vec<CompletionCandidate> {
    functions
        .iter()
        .map(|function| {
            CompletionCandidate::new(&function.name, CandidateKind::Function)
                .with_insert_text(format!("{}()", function.name))
                .with_detail(&function.description)
        })
        .collect()
}

/// Workflow scopes (no dot typed yet) or keys within the typed scope.
///
/// Filtering by the typed prefix ignores case.
pub fn workflow_variables(
    index: &CatalogIndex,
    context: &VariableContext<'_>,
) -> Vec<CompletionCandidate> {
    let prefix = context.prefix.to_uppercase();
    let matches = |name: &str| prefix.is_empty() || name.to_uppercase().starts_with(&prefix);

    match context.scope {
        None => index
            .variable_scopes()
            .filter(|scope| matches(scope))
            .map(|scope| {
                CompletionCandidate::new(scope, CandidateKind::Variable)
                    .with_detail("workflow scope")
            })
            .collect(),
        Some(scope) => {
            let Some((scope_name, keys)) = index.variable_keys(scope) else {
                return Vec::new();
            };
            keys.iter()
                .filter(|key| matches(key))
                .map(|key| {
                    CompletionCandidate::new(key, CandidateKind::Variable)
                        .with_detail(format!("{scope_name}.{key}"))
                })
                .collect()
        }
    }
}

/// `UPDATE ... SET` assignment snippets.
///
/// One snippet assigning every column (capped at [`MAX_SNIPPET_COLUMNS`],
/// with a `-- ...` marker past the cap), then one `col = value` snippet per
/// column.
pub fn update_set_snippets(index: &CatalogIndex, target: &TableRef) -> Vec<CompletionCandidate> {
    let columns = index.columns_for(target.schema.as_deref(), &target.table);
    if columns.is_empty() {
        return Vec::new();
    }

    let mut all = Snippet::new().text("  ");
    for (i, column) in columns.iter().take(MAX_SNIPPET_COLUMNS).enumerate() {
        if i > 0 {
            all = all.text(",\n  ");
        }
        all = all.text(&format!("{column} = ")).placeholder("value");
    }
    if columns.len() > MAX_SNIPPET_COLUMNS {
        all = all.text(",\n  -- ...");
    }

    let mut out = Vec::with_capacity(columns.len() + 1);
    out.push(
        CompletionCandidate::snippet("SET all columns (snippet)", all)
            .with_detail(format!("{} - generates assignments", target.qualified_name())),
    );
    for column in columns {
        let assign = Snippet::new()
            .text(&format!("{column} = "))
            .placeholder("value");
        out.push(
            CompletionCandidate::snippet(format!("{column} = (snippet)"), assign)
                .with_detail(format!("Assign {column}")),
        );
    }
    out
}

/// Candidates for the open column list of `INSERT INTO <target> (`.
///
/// Plain column fields, a column-list snippet that closes the parenthesis,
/// and a column list followed by a `VALUES` clause with one placeholder per
/// listed column.
pub fn insert_column_snippets(
    index: &CatalogIndex,
    target: &TableRef,
) -> Vec<CompletionCandidate> {
    let columns = index.columns_for(target.schema.as_deref(), &target.table);
    if columns.is_empty() {
        return Vec::new();
    }
    let qualified = target.qualified_name();

    let mut out: Vec<CompletionCandidate> = columns
        .iter()
        .map(|column| {
            CompletionCandidate::new(column, CandidateKind::Field)
                .with_detail(format!("{qualified}.{column}"))
        })
        .collect();

    let listed = &columns[..columns.len().min(MAX_SNIPPET_COLUMNS)];
    let mut column_list = listed.join(", ");
    if columns.len() > MAX_SNIPPET_COLUMNS {
        column_list.push_str(", /*...*/");
    }

    out.push(
        CompletionCandidate::snippet(
            "Columns list (auto-close )",
            Snippet::new().text(&column_list).text(")"),
        )
        .with_detail(format!("{qualified} - column list")),
    );

    let mut with_values = Snippet::new().text(&column_list).text(") VALUES (");
    for i in 0..listed.len() {
        if i > 0 {
            with_values = with_values.text(", ");
        }
        with_values = with_values.placeholder("value");
    }
    with_values = with_values.text(")");
    out.push(
        CompletionCandidate::snippet("Columns + VALUES (snippet)", with_values)
            .with_detail("Generates VALUES placeholders"),
    );

    out
}
