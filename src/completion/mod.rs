//! Context-aware SQL completion.
//!
//! The pipeline runs leaf to root: statement isolation and literal stripping,
//! parenthesis-depth scoping, clause classification and table-reference
//! resolution, then the dispatcher in [`engine`] picks generators and
//! post-processes their output.

pub mod context;
pub mod dot_path;
pub mod engine;
pub mod generators;
pub mod postprocess;
pub mod scope;
pub mod statement;
pub mod tables;
pub mod types;
pub mod variables;

pub use context::ClauseContext;
pub use engine::{analyze_cursor, CompletionEngine, CompletionRequest, CursorAnalysis};
pub use tables::{TableRef, TableRefs};
pub use types::{CandidateKind, CompletionCandidate, Snippet, SnippetPlaceholder};

/// Characters after which a host editor should request completions again.
pub const TRIGGER_CHARACTERS: &[char] = &[' ', '.', '(', ')', ',', '$', '{', '}', '=', '>', '<'];
