//! Completion candidate value types.
//!
//! Candidates are host-neutral: snippet placeholders are kept as descriptors
//! attached to the candidate, and rendering them into an editor's tab-stop
//! syntax is left to the caller (see [`CompletionCandidate::render_snippet`]).

use serde::Serialize;
use std::fmt;

/// Kind of completion candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CandidateKind {
    Keyword,
    Operator,
    /// A column.
    Field,
    /// A table.
    Class,
    /// A schema.
    Module,
    Function,
    /// A workflow scope or variable key.
    Variable,
    Snippet,
}

impl CandidateKind {
    /// Returns a short label for the candidate kind.
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Keyword => "kw",
            Self::Operator => "op",
            Self::Field => "col",
            Self::Class => "tbl",
            Self::Module => "sch",
            Self::Function => "fn",
            Self::Variable => "var",
            Self::Snippet => "snip",
        }
    }
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_label())
    }
}

/// A placeholder inside a snippet's insert text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetPlaceholder {
    /// Tab-stop index, starting at 1.
    pub index: u32,
    /// Text inserted when the placeholder is accepted as-is.
    pub default_text: String,
    /// Byte offset of `default_text` inside the candidate's insert text.
    pub offset: usize,
}

/// One completion suggestion returned to the host editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionCandidate {
    pub label: String,
    /// Text to insert. For snippets the placeholder defaults appear inline.
    pub insert_text: String,
    pub kind: CandidateKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub is_snippet: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub snippet_placeholders: Vec<SnippetPlaceholder>,
}

impl CompletionCandidate {
    /// Creates a plain candidate whose insert text equals its label.
    pub fn new(label: impl Into<String>, kind: CandidateKind) -> Self {
        let label = label.into();
        Self {
            insert_text: label.clone(),
            label,
            kind,
            detail: None,
            is_snippet: false,
            snippet_placeholders: Vec::new(),
        }
    }

    /// Creates a snippet candidate from a built snippet.
    pub fn snippet(label: impl Into<String>, snippet: Snippet) -> Self {
        Self {
            label: label.into(),
            insert_text: snippet.text,
            kind: CandidateKind::Snippet,
            detail: None,
            is_snippet: true,
            snippet_placeholders: snippet.placeholders,
        }
    }

    /// Overrides the insert text.
    pub fn with_insert_text(mut self, insert_text: impl Into<String>) -> Self {
        self.insert_text = insert_text.into();
        self
    }

    /// Sets the detail shown next to the label.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Renders the insert text using `${n:default}` tab stops.
    ///
    /// `$`, `}` and `\` in literal text are escaped. Non-snippet candidates
    /// return their insert text unchanged.
    pub fn render_snippet(&self) -> String {
        if !self.is_snippet {
            return self.insert_text.clone();
        }

        let mut out = String::with_capacity(self.insert_text.len() + 8);
        let mut cursor = 0;
        for placeholder in &self.snippet_placeholders {
            let start = placeholder.offset.min(self.insert_text.len());
            if start < cursor {
                continue;
            }
            push_escaped(&mut out, &self.insert_text[cursor..start]);
            out.push_str("${");
            out.push_str(&placeholder.index.to_string());
            out.push(':');
            push_escaped(&mut out, &placeholder.default_text);
            out.push('}');
            cursor = (start + placeholder.default_text.len()).min(self.insert_text.len());
        }
        push_escaped(&mut out, &self.insert_text[cursor..]);
        out
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        if matches!(ch, '$' | '}' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
}

/// Insert text with placeholder descriptors, built incrementally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snippet {
    text: String,
    placeholders: Vec<SnippetPlaceholder>,
}

impl Snippet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends literal text.
    pub fn text(mut self, text: &str) -> Self {
        self.text.push_str(text);
        self
    }

    /// Appends a placeholder with the next tab-stop index.
    pub fn placeholder(mut self, default_text: &str) -> Self {
        let index = self.placeholders.len() as u32 + 1;
        self.placeholders.push(SnippetPlaceholder {
            index,
            default_text: default_text.to_string(),
            offset: self.text.len(),
        });
        self.text.push_str(default_text);
        self
    }

    /// Number of placeholders added so far.
    pub fn placeholder_count(&self) -> usize {
        self.placeholders.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_candidate_inserts_label() {
        let candidate = CompletionCandidate::new("SELECT", CandidateKind::Keyword);
        assert_eq!(candidate.insert_text, "SELECT");
        assert!(!candidate.is_snippet);
        assert_eq!(candidate.render_snippet(), "SELECT");
    }

    #[test]
    fn test_snippet_records_placeholder_offsets() {
        let snippet = Snippet::new()
            .text("ID = ")
            .placeholder("value")
            .text(", NAME = ")
            .placeholder("value");
        let candidate = CompletionCandidate::snippet("assign", snippet);

        assert_eq!(candidate.insert_text, "ID = value, NAME = value");
        assert_eq!(candidate.snippet_placeholders.len(), 2);
        assert_eq!(candidate.snippet_placeholders[0].offset, 5);
        assert_eq!(candidate.snippet_placeholders[1].index, 2);
        assert_eq!(
            candidate.render_snippet(),
            "ID = ${1:value}, NAME = ${2:value}"
        );
    }

    #[test]
    fn test_render_snippet_escapes_literal_dollar() {
        let snippet = Snippet::new().text("$x = ").placeholder("v");
        let candidate = CompletionCandidate::snippet("s", snippet);
        assert_eq!(candidate.render_snippet(), "\\$x = ${1:v}");
    }

    #[test]
    fn test_serializes_camel_case() {
        let candidate = CompletionCandidate::new("ID", CandidateKind::Field).with_detail("HR.EMP.ID");
        let json = serde_json::to_string(&candidate).unwrap();
        assert!(json.contains(r#""insertText":"ID""#));
        assert!(json.contains(r#""isSnippet":false"#));
        assert!(!json.contains("snippetPlaceholders"));
    }
}
