//! `${scope.key}` workflow-variable references.

/// An unterminated `${...}` marker ending at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableContext<'a> {
    /// Scope typed before the dot, when there is one.
    pub scope: Option<&'a str>,
    /// Partial scope (no dot yet) or partial key (after the dot).
    pub prefix: &'a str,
}

/// Detects whether the cursor sits inside an open `${...}` marker.
///
/// Uses the last `${` before the cursor; a `}` after it means the marker is
/// already closed.
pub fn detect_variable_context(text_before_cursor: &str) -> Option<VariableContext<'_>> {
    let open = text_before_cursor.rfind("${")?;
    let inside = &text_before_cursor[open + 2..];
    if inside.contains('}') {
        return None;
    }

    Some(match inside.split_once('.') {
        None => VariableContext {
            scope: None,
            prefix: inside,
        },
        Some((scope, rest)) => VariableContext {
            scope: Some(scope.trim()),
            prefix: rest.split('.').next().unwrap_or_default().trim(),
        },
    })
}
