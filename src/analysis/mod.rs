//! Whole-document analysis: hover text, semantic tokens and the DDL guard.

pub mod ddl;
pub mod hover;
pub mod tokens;

pub use ddl::{ddl_findings, DdlFinding};
pub use hover::{hover, Hover};
pub use tokens::{semantic_tokens, SemanticToken, TokenKind};
