//! Hover text for builtins, schemas and tables.

use serde::Serialize;

use crate::catalog::{BuiltinFunction, CatalogIndex};

/// Markdown hover contents, one paragraph per entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hover {
    pub contents: Vec<String>,
}

impl Hover {
    /// Joins the paragraphs into one markdown string.
    pub fn to_markdown(&self) -> String {
        self.contents.join("\n\n")
    }
}

/// Looks up hover text for a word.
///
/// Builtins of the active database type come first (matched against the
/// upper-cased word), then a schema with exactly that name, then any table
/// key known to the index.
pub fn hover(index: &CatalogIndex, builtins: &[BuiltinFunction], word: &str) -> Option<Hover> {
    let word = word.trim();
    if word.is_empty() {
        return None;
    }

    let upper = word.to_uppercase();
    if let Some(function) = builtins.iter().find(|f| f.name == upper) {
        let mut contents = vec![format!("**{}**", function.name)];
        if !function.description.is_empty() {
            contents.push(function.description.clone());
        }
        if !function.sample_usage.is_empty() {
            contents.push(format!("Example: `{}`", function.sample_usage));
        }
        return Some(Hover { contents });
    }

    if let Some(schema) = index.schemas().iter().find(|s| s.name == word) {
        return Some(Hover {
            contents: vec![format!("**{}** - {} tables", schema.name, schema.tables.len())],
        });
    }

    index.table(word).map(|entry| Hover {
        contents: vec![format!(
            "**{}** - {} columns",
            entry.qualified_name(),
            entry.table.columns.len()
        )],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Schema, Table};

    fn index() -> CatalogIndex {
        CatalogIndex::build(
            &[Schema::new("HR", vec![Table::new("EMP", ["ID", "NAME"])])],
            &[],
        )
    }

    fn builtins() -> Vec<BuiltinFunction> {
        vec![BuiltinFunction::new(
            "NVL",
            "Replaces null with a value",
            "NVL(commission, 0)",
        )]
    }

    #[test]
    fn test_hover_builtin() {
        let hover = hover(&index(), &builtins(), "nvl").unwrap();
        assert_eq!(
            hover.contents,
            vec![
                "**NVL**".to_string(),
                "Replaces null with a value".to_string(),
                "Example: `NVL(commission, 0)`".to_string(),
            ]
        );
    }

    #[test]
    fn test_hover_schema_is_case_sensitive() {
        let hover_text = hover(&index(), &[], "HR").unwrap().to_markdown();
        assert_eq!(hover_text, "**HR** - 1 tables");
        assert!(hover(&index(), &[], "hr").is_none());
    }

    #[test]
    fn test_hover_table() {
        let by_key = hover(&index(), &[], "HR.EMP").unwrap();
        assert_eq!(by_key.to_markdown(), "**HR.EMP** - 2 columns");
        let bare = hover(&index(), &[], "emp").unwrap();
        assert_eq!(bare, by_key);
    }

    #[test]
    fn test_hover_unknown_word() {
        assert!(hover(&index(), &builtins(), "WHATEVER").is_none());
        assert!(hover(&index(), &builtins(), "  ").is_none());
    }
}
