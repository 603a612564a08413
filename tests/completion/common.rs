//! Shared catalog fixture for completion tests.

use sql_intellisense::catalog::{BuiltinFunction, Schema, Table, WorkflowVariable};
use sql_intellisense::completion::{CompletionCandidate, CompletionEngine, CompletionRequest};
use sql_intellisense::config::IntellisenseConfig;

/// HR (EMP, DEPT) and SALES (ORDERS) with a few workflow variables and
/// Oracle builtins.
pub fn config() -> IntellisenseConfig {
    let mut config = IntellisenseConfig {
        schemas: vec![
            Schema::new(
                "HR",
                vec![
                    Table::new("EMP", ["ID", "NAME"]),
                    Table::new("DEPT", ["DEPT_ID", "TITLE"]),
                ],
            ),
            Schema::new("SALES", vec![Table::new("ORDERS", ["ORDER_ID", "AMOUNT"])]),
        ],
        workflow_variables: vec![
            WorkflowVariable::new("SCOPE", "run_id"),
            WorkflowVariable::new("SCOPE", "batch"),
            WorkflowVariable::new("SCOPE", "batch"),
            WorkflowVariable::new("ENV", "REGION"),
        ],
        ..Default::default()
    };
    config.builtins.insert(
        "oracle".to_string(),
        vec![
            BuiltinFunction::new("NVL", "Replaces null with a value", "NVL(a, 0)"),
            BuiltinFunction::new("SYSDATE", "Current date and time", "SYSDATE"),
        ],
    );
    config
}

pub fn engine() -> CompletionEngine {
    CompletionEngine::new(&config())
}

/// Completes with the cursor at the end of `before`.
pub fn complete(before: &str) -> Vec<CompletionCandidate> {
    engine().complete(&CompletionRequest::new(before))
}

pub fn labels(candidates: &[CompletionCandidate]) -> Vec<&str> {
    candidates.iter().map(|c| c.label.as_str()).collect()
}
