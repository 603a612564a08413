//! End-to-end completion scenarios.

use std::collections::HashSet;

use pretty_assertions::assert_eq;
use sql_intellisense::catalog::{Schema, Table};
use sql_intellisense::completion::{
    analyze_cursor, CandidateKind, ClauseContext, CompletionEngine, CompletionRequest,
};
use sql_intellisense::config::IntellisenseConfig;

use super::common::{complete, engine, labels};

#[test]
fn test_from_offers_schemas_and_tables() {
    assert_eq!(
        analyze_cursor("SELECT * FROM ", "").context,
        ClauseContext::From
    );

    let candidates = complete("SELECT * FROM ");
    assert_eq!(
        labels(&candidates),
        vec!["HR", "SALES", "HR.EMP", "HR.DEPT", "SALES.ORDERS"]
    );
    assert_eq!(candidates[0].kind, CandidateKind::Module);
    assert_eq!(candidates[2].kind, CandidateKind::Class);
}

#[test]
fn test_alias_declared_after_cursor() {
    let request = CompletionRequest::new("SELECT e.").with_text_after_cursor(" FROM HR.EMP e WHERE ");
    let candidates = engine().complete(&request);

    assert_eq!(labels(&candidates), vec!["e.ID", "e.NAME"]);
    let inserts: Vec<&str> = candidates.iter().map(|c| c.insert_text.as_str()).collect();
    assert_eq!(inserts, vec!["ID", "NAME"]);
}

#[test]
fn test_update_set_snippets() {
    let cursor = analyze_cursor("UPDATE HR.EMP SET ", "");
    assert_eq!(cursor.context, ClauseContext::Set);
    assert_eq!(
        cursor.tables.update_target().map(|t| t.qualified_name()),
        Some("HR.EMP".to_string())
    );

    let candidates = complete("UPDATE HR.EMP SET ");
    let labels = labels(&candidates);
    assert_eq!(
        &labels[..3],
        &["SET all columns (snippet)", "ID = (snippet)", "NAME = (snippet)"]
    );
    assert!(labels.contains(&"EMP.ID"));
    assert!(labels.contains(&"="));
    assert!(labels.contains(&"WHERE"));

    let all = &candidates[0];
    assert!(all.is_snippet);
    assert_eq!(all.snippet_placeholders.len(), 2);
    assert_eq!(all.render_snippet(), "  ID = ${1:value},\n  NAME = ${2:value}");
}

#[test]
fn test_insert_column_list() {
    assert_eq!(
        analyze_cursor("INSERT INTO HR.EMP (", "").context,
        ClauseContext::InsertCols
    );

    let candidates = complete("INSERT INTO HR.EMP (");
    assert_eq!(
        labels(&candidates),
        vec![
            "ID",
            "NAME",
            "Columns list (auto-close )",
            "Columns + VALUES (snippet)"
        ]
    );
    assert_eq!(candidates[0].kind, CandidateKind::Field);
    assert!(candidates[2].insert_text.ends_with(')'));

    let values = &candidates[3];
    assert_eq!(values.snippet_placeholders.len(), 2);
    assert_eq!(
        values.render_snippet(),
        "ID, NAME) VALUES (${1:value}, ${2:value})"
    );
}

#[test]
fn test_workflow_variable_keys() {
    let candidates = complete("SELECT * FROM HR.EMP WHERE col = ${SCOPE.");
    assert_eq!(labels(&candidates), vec!["batch", "run_id"]);
    assert!(candidates.iter().all(|c| c.kind == CandidateKind::Variable));
}

#[test]
fn test_workflow_scopes_and_case_insensitive_scope() {
    assert_eq!(labels(&complete("WHERE a = ${")), vec!["ENV", "SCOPE"]);
    assert_eq!(labels(&complete("WHERE a = ${scope.RU")), vec!["run_id"]);
}

#[test]
fn test_nested_query_hides_inner_tables() {
    let cursor = analyze_cursor("SELECT * FROM (SELECT * FROM HR.DEPT) d WHERE ", "");
    assert_eq!(cursor.context, ClauseContext::Where);
    let keys: Vec<&str> = cursor.tables.iter().map(|(key, _)| key).collect();
    assert_eq!(keys, vec!["D"]);

    let candidates = complete("SELECT * FROM (SELECT * FROM HR.DEPT) d WHERE ");
    assert!(!labels(&candidates).contains(&"TITLE"));
    assert!(labels(&candidates).contains(&"AND"));
}

#[test]
fn test_subquery_alias_after_cursor() {
    let request = CompletionRequest::new("SELECT * FROM SALES.ORDERS o WHERE o.ORDER_ID IN (SELECT e.")
        .with_text_after_cursor(" FROM HR.EMP e) AND 1 = 1");
    assert_eq!(labels(&engine().complete(&request)), vec!["e.ID", "e.NAME"]);
}

#[test]
fn test_function_arguments_use_enclosing_clause() {
    let candidates = complete("SELECT * FROM HR.EMP e WHERE NVL(");
    let labels = labels(&candidates);
    assert!(labels.contains(&"E.NAME"));
    assert!(labels.contains(&"BETWEEN"));
}

#[test]
fn test_previous_statement_is_ignored() {
    let candidates = complete("SELECT * FROM SALES.ORDERS o; SELECT * FROM HR.EMP e WHERE ");
    let labels = labels(&candidates);
    assert!(labels.contains(&"E.ID"));
    assert!(!labels.contains(&"ORDER_ID"));
}

#[test]
fn test_semicolon_inside_literal_does_not_split() {
    let candidates = complete("SELECT * FROM HR.EMP e WHERE NAME = 'a; b' AND ");
    assert!(labels(&candidates).contains(&"E.NAME"));
}

#[test]
fn test_select_with_tables_offers_columns_and_builtins() {
    let request = CompletionRequest::new("SELECT ").with_text_after_cursor(" FROM HR.EMP");
    let candidates = engine().complete(&request);
    let labels = labels(&candidates);
    assert!(labels.contains(&"EMP.ID"));
    assert!(labels.contains(&"NAME"));
    assert!(labels.contains(&"DISTINCT"));
    assert!(!labels.contains(&"HR"));

    let nvl = candidates.iter().find(|c| c.label == "NVL").unwrap();
    assert_eq!(nvl.insert_text, "NVL()");
    assert_eq!(nvl.detail.as_deref(), Some("Replaces null with a value"));
}

#[test]
fn test_labels_are_unique() {
    for before in [
        "SELECT * FROM HR.EMP a JOIN HR.EMP b ON ",
        "SELECT ",
        "UPDATE HR.EMP SET ",
        "DELETE ",
    ] {
        let candidates = complete(before);
        let unique: HashSet<&str> = labels(&candidates).into_iter().collect();
        assert_eq!(unique.len(), candidates.len(), "duplicates for {before:?}");
    }
}

#[test]
fn test_typed_prefix_filters_undotted_labels() {
    for (before, prefix) in [
        ("SELECT * FROM HR.EMP e WHERE na", "NA"),
        ("SELECT sy", "SY"),
        ("SELECT * FROM s", "S"),
    ] {
        let candidates = complete(before);
        assert!(!candidates.is_empty(), "no candidates for {before:?}");
        for candidate in &candidates {
            assert!(
                candidate.label.contains('.')
                    || candidate.label.to_uppercase().starts_with(prefix),
                "{} does not match {prefix}",
                candidate.label
            );
        }
    }
}

#[test]
fn test_bare_table_name_last_schema_wins() {
    let config = IntellisenseConfig {
        schemas: vec![
            Schema::new("A", vec![Table::new("T", ["FROM_A"])]),
            Schema::new("B", vec![Table::new("T", ["FROM_B"])]),
        ],
        ..Default::default()
    };
    let engine = CompletionEngine::new(&config);

    let candidates = engine.complete(&CompletionRequest::new("SELECT * FROM T x WHERE "));
    let labels = labels(&candidates);
    assert!(labels.contains(&"X.FROM_B"));
    assert!(!labels.contains(&"X.FROM_A"));
}

#[test]
fn test_empty_catalog_still_offers_keywords() {
    let engine = CompletionEngine::default();
    let candidates = engine.complete(&CompletionRequest::new("SELECT * FROM HR.EMP WHERE "));
    assert!(labels(&candidates).contains(&"AND"));
    assert!(engine.complete(&CompletionRequest::new("SELECT * FROM ")).is_empty());
}

#[test]
fn test_request_at_position_multiline() {
    let lines = ["SELECT e.", "FROM HR.EMP e"];
    let request = CompletionRequest::at_position(&lines, 0, 9);
    assert_eq!(labels(&engine().complete(&request)), vec!["e.ID", "e.NAME"]);
}

#[test]
fn test_hover_and_tokens() {
    let engine = engine();
    assert_eq!(
        engine.hover("nvl").map(|h| h.to_markdown()),
        Some("**NVL**\n\nReplaces null with a value\n\nExample: `NVL(a, 0)`".to_string())
    );
    assert_eq!(
        engine.hover("SALES").map(|h| h.to_markdown()),
        Some("**SALES** - 1 tables".to_string())
    );

    let tokens = engine.semantic_tokens(&["SELECT NAME FROM HR.EMP"]);
    assert_eq!(tokens.len(), 3);
}
