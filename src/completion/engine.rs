//! Completion dispatcher.
//!
//! A request is answered in a fixed order of precedence: an open `${...}`
//! workflow-variable marker, then a dotted path before the cursor, then the
//! clause the cursor is in. The first two paths short-circuit; only the
//! clause path is filtered by the typed word. Every path ends with label
//! de-duplication.

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;
use tracing::debug;

use crate::analysis::{self, Hover, SemanticToken};
use crate::catalog::{BuiltinFunction, CatalogIndex, CatalogStore, Schema, WorkflowVariable};
use crate::config::IntellisenseConfig;

use super::context::{classify, has_clause_keyword, ClauseContext};
use super::dot_path::{word_before_cursor, DotPath};
use super::generators;
use super::postprocess::{dedupe, filter_by_typed_prefix};
use super::scope::{extract_scope, mask_nested_groups, scope_after_cursor};
use super::statement::{current_statement, statement_remainder, strip_string_literals};
use super::tables::TableRefs;
use super::types::CompletionCandidate;
use super::variables::detect_variable_context;

/// One completion request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionRequest {
    /// Document text from the start up to the cursor.
    pub text_before_cursor: String,
    /// Document text after the cursor. Optional; used only to find table
    /// references declared after the cursor (`SELECT e.| FROM HR.EMP e`).
    pub text_after_cursor: String,
    /// Partial identifier being typed at the cursor.
    pub word_prefix: String,
}

impl CompletionRequest {
    /// Creates a request from the text before the cursor.
    ///
    /// The word prefix is the identifier run ending at the cursor.
    pub fn new(text_before_cursor: impl Into<String>) -> Self {
        let text_before_cursor = text_before_cursor.into();
        let word_prefix = word_before_cursor(&text_before_cursor).to_string();
        Self {
            text_before_cursor,
            text_after_cursor: String::new(),
            word_prefix,
        }
    }

    pub fn with_text_after_cursor(mut self, text_after_cursor: impl Into<String>) -> Self {
        self.text_after_cursor = text_after_cursor.into();
        self
    }

    pub fn with_word_prefix(mut self, word_prefix: impl Into<String>) -> Self {
        self.word_prefix = word_prefix.into();
        self
    }

    /// Splits a whole buffer at a byte offset.
    ///
    /// The offset is clamped to the buffer length and moved back to the
    /// nearest char boundary.
    pub fn at_offset(sql: &str, cursor: usize) -> Self {
        let mut cursor = cursor.min(sql.len());
        while !sql.is_char_boundary(cursor) {
            cursor -= 1;
        }
        Self::new(&sql[..cursor]).with_text_after_cursor(&sql[cursor..])
    }

    /// Splits document lines at a 0-based line and char column.
    ///
    /// Out-of-range positions are clamped to the end of the document or line.
    pub fn at_position<S: AsRef<str>>(lines: &[S], line: usize, column: usize) -> Self {
        let Some(last) = lines.len().checked_sub(1) else {
            return Self::default();
        };
        let line = line.min(last);
        let current = lines[line].as_ref();
        let split = current
            .char_indices()
            .nth(column)
            .map_or(current.len(), |(pos, _)| pos);

        let mut before: Vec<&str> = lines[..line].iter().map(AsRef::as_ref).collect();
        before.push(&current[..split]);
        let mut after = vec![&current[split..]];
        after.extend(lines[line + 1..].iter().map(AsRef::as_ref));

        Self::new(before.join("\n")).with_text_after_cursor(after.join("\n"))
    }
}

/// What the engine worked out about the cursor position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorAnalysis {
    pub context: ClauseContext,
    /// Parenthesis depth of the cursor within its statement.
    pub depth: usize,
    /// Masked scope text the context was classified on.
    pub scope: String,
    #[serde(skip)]
    pub tables: TableRefs,
}

/// Classifies the cursor and resolves the table references visible to it.
///
/// A group without any clause keyword (function arguments, an `IN` list) is
/// an expression, so classification widens to the enclosing group until a
/// clause keyword is found. References are resolved on the before-cursor scope
/// plus the part of the statement after the cursor at the same depth.
pub fn analyze_cursor(text_before_cursor: &str, text_after_cursor: &str) -> CursorAnalysis {
    let stripped = strip_string_literals(text_before_cursor);
    let statement = current_statement(&stripped);
    let mut scope = extract_scope(statement);
    let depth = scope.depth;
    let mut masked = mask_nested_groups(scope.text);
    let mut context = classify(&masked, scope.enclosing);

    let mut exits = 0;
    while context != ClauseContext::InsertCols
        && scope.depth > 0
        && !has_clause_keyword(&masked)
    {
        scope = extract_scope(without_open_paren(scope.enclosing));
        masked = mask_nested_groups(scope.text);
        context = classify(&masked, scope.enclosing);
        exits += 1;
    }

    let after = strip_string_literals(text_after_cursor);
    let mut visible = masked.clone();
    visible.push_str(&scope_after_cursor(statement_remainder(&after), exits));
    let mut tables = TableRefs::resolve(&visible);

    if context == ClauseContext::InsertCols {
        let outer = extract_scope(without_open_paren(scope.enclosing));
        let outer_refs = TableRefs::resolve(&mask_nested_groups(outer.text));
        tables.set_insert_target(outer_refs.insert_target().cloned());
    }

    debug!(%context, depth, exits, refs = tables.len(), "Analyzed cursor");
    CursorAnalysis {
        context,
        depth,
        scope: masked,
        tables,
    }
}

fn without_open_paren(enclosing: &str) -> &str {
    enclosing.strip_suffix('(').unwrap_or(enclosing)
}

/// Keywords, operators and builtins for the active database type.
#[derive(Debug, Clone, Default)]
struct Lexicon {
    database_type: String,
    keywords: Vec<String>,
    operators: Vec<String>,
    builtins: Vec<BuiltinFunction>,
}

impl Lexicon {
    fn from_config(config: &IntellisenseConfig) -> Self {
        Self {
            database_type: config.database_type.clone(),
            keywords: config.keywords.clone(),
            operators: config.operators.clone(),
            builtins: config.active_builtins().to_vec(),
        }
    }
}

/// SQL completion engine.
///
/// Cheap to clone; clones share the catalog and lexical settings, so a
/// rebuild through one handle is seen by all of them. Requests run against a
/// snapshot taken when they start.
#[derive(Debug, Clone)]
pub struct CompletionEngine {
    catalog: CatalogStore,
    lexicon: Arc<ArcSwap<Lexicon>>,
}

impl Default for CompletionEngine {
    fn default() -> Self {
        Self::new(&IntellisenseConfig::default())
    }
}

impl CompletionEngine {
    pub fn new(config: &IntellisenseConfig) -> Self {
        let engine = Self {
            catalog: CatalogStore::default(),
            lexicon: Arc::new(ArcSwap::from_pointee(Lexicon::default())),
        };
        engine.apply_config(config);
        engine
    }

    /// Replaces the catalog and lexical settings.
    pub fn apply_config(&self, config: &IntellisenseConfig) {
        self.catalog
            .rebuild(&config.schemas, &config.workflow_variables);
        self.lexicon.store(Arc::new(Lexicon::from_config(config)));
        debug!(database_type = %config.database_type, "Applied configuration");
    }

    /// Replaces only the schema and workflow-variable catalog.
    pub fn rebuild_catalog(&self, schemas: &[Schema], workflow_variables: &[WorkflowVariable]) {
        self.catalog.rebuild(schemas, workflow_variables);
    }

    /// Current catalog snapshot.
    pub fn catalog(&self) -> Arc<CatalogIndex> {
        self.catalog.snapshot()
    }

    pub fn database_type(&self) -> String {
        self.lexicon.load().database_type.clone()
    }

    /// Returns completion candidates for the request.
    pub fn complete(&self, request: &CompletionRequest) -> Vec<CompletionCandidate> {
        let index = self.catalog.snapshot();
        let lexicon = self.lexicon.load();
        let before = request.text_before_cursor.as_str();

        if let Some(variable) = detect_variable_context(before) {
            debug!(scope = ?variable.scope, prefix = variable.prefix, "Variable completion");
            return dedupe(generators::workflow_variables(&index, &variable));
        }

        let cursor = analyze_cursor(before, &request.text_after_cursor);

        if let Some(candidates) = complete_dot_path(&index, &DotPath::before_cursor(before), &cursor.tables)
        {
            return dedupe(candidates);
        }

        let mut candidates = complete_clause(&index, &lexicon, &cursor);
        filter_by_typed_prefix(&mut candidates, &request.word_prefix);
        dedupe(candidates)
    }

    /// Hover text for the word under the cursor.
    pub fn hover(&self, word: &str) -> Option<Hover> {
        let index = self.catalog.snapshot();
        analysis::hover(&index, &self.lexicon.load().builtins, word)
    }

    /// Schema, table and column occurrences in the document.
    pub fn semantic_tokens<S: AsRef<str>>(&self, lines: &[S]) -> Vec<SemanticToken> {
        analysis::semantic_tokens(&self.catalog.snapshot(), lines)
    }
}

/// Completions for `alias.`, `SCHEMA.`, `SCHEMA.TABLE.` and longer paths.
///
/// Returns `None` when the path does not apply, so clause dispatch runs.
fn complete_dot_path(
    index: &CatalogIndex,
    path: &DotPath<'_>,
    tables: &TableRefs,
) -> Option<Vec<CompletionCandidate>> {
    match path.segments.as_slice() {
        [qualifier] if path.ends_with_dot => {
            if let Some(schema) = index.schema(qualifier) {
                debug!(schema = %schema.name, "Schema dot path");
                return Some(generators::tables_in_schema(schema));
            }
            let table_ref = tables.get(qualifier)?;
            debug!(alias = qualifier, table = %table_ref.qualified_name(), "Alias dot path");
            Some(generators::columns_for_table(
                index,
                table_ref.schema.as_deref(),
                &table_ref.table,
                qualifier,
            ))
        }
        [first, second] if path.ends_with_dot => {
            if let Some(table_ref) = tables.get(first) {
                return Some(generators::columns_for_table(
                    index,
                    table_ref.schema.as_deref(),
                    &table_ref.table,
                    first,
                ));
            }
            index.resolve_table(Some(*first), second)?;
            Some(generators::columns_for_table(
                index,
                Some(*first),
                second,
                &format!("{first}.{second}"),
            ))
        }
        [schema, table, _, ..] => Some(generators::columns_for_table(
            index,
            Some(*schema),
            table,
            &format!("{schema}.{table}"),
        )),
        _ => None,
    }
}

fn complete_clause(
    index: &CatalogIndex,
    lexicon: &Lexicon,
    cursor: &CursorAnalysis,
) -> Vec<CompletionCandidate> {
    let tables = &cursor.tables;
    let mut out = Vec::new();

    match cursor.context {
        ClauseContext::InsertCols => match tables.insert_target() {
            Some(target) => out.extend(generators::insert_column_snippets(index, target)),
            None => out.extend(generators::keywords(&lexicon.keywords)),
        },
        ClauseContext::Update => {
            out.extend(generators::tables(index));
            out.extend(generators::keywords(&["UPDATE", "SET", "WHERE"]));
        }
        ClauseContext::Set => {
            if let Some(target) = tables.update_target() {
                out.extend(generators::update_set_snippets(index, target));
                out.extend(generators::columns_for_table(
                    index,
                    target.schema.as_deref(),
                    &target.table,
                    &target.table,
                ));
            } else if !tables.is_empty() {
                out.extend(generators::columns_from_active_tables(index, tables));
            }
            out.extend(generators::operators(&lexicon.operators));
            out.extend(generators::keywords(&["WHERE"]));
        }
        ClauseContext::Delete => {
            out.extend(generators::keywords(&["FROM"]));
            out.extend(generators::keywords(&lexicon.keywords));
        }
        ClauseContext::From | ClauseContext::Join | ClauseContext::Into => {
            out.extend(generators::schemas(index));
            out.extend(generators::tables(index));
        }
        ClauseContext::Where | ClauseContext::Having | ClauseContext::On => {
            out.extend(generators::columns_from_active_tables(index, tables));
            out.extend(generators::operators(&lexicon.operators));
            out.extend(generators::keywords(generators::PREDICATE_KEYWORDS));
        }
        _ => {
            if tables.is_empty() {
                out.extend(generators::schemas(index));
                out.extend(generators::tables(index));
            } else {
                out.extend(generators::columns_from_active_tables(index, tables));
            }
            out.extend(generators::keywords(&lexicon.keywords));
            out.extend(generators::builtins(&lexicon.builtins));
        }
    }

    out
}
