//! Parenthesis-depth scope isolation.
//!
//! All scans here are single passes over characters; nothing backtracks, so
//! deeply nested or unbalanced input stays linear.

/// Net count of unmatched `(` over the whole statement.
///
/// Never negative: a `)` with nothing open is ignored.
pub fn cursor_depth(statement: &str) -> usize {
    let mut depth = 0usize;
    for ch in statement.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    depth
}

/// The part of a statement that shares the cursor's nesting depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorScope<'a> {
    /// Depth of the cursor (end of statement).
    pub depth: usize,
    /// Byte offset where the scope starts.
    pub start: usize,
    /// Text from `start` to the end of the statement.
    pub text: &'a str,
    /// Text before the scope, ending with the `(` that opened it when
    /// `depth > 0`.
    pub enclosing: &'a str,
}

/// Isolates the innermost group the end of `statement` sits in.
///
/// Walks backwards from the end tracking depth and stops at the `(` that
/// takes the running depth below the cursor depth. At depth zero the whole
/// statement is the scope.
pub fn extract_scope(statement: &str) -> CursorScope<'_> {
    let depth = cursor_depth(statement);
    let mut running = depth;
    let mut start = 0;

    for (pos, ch) in statement.char_indices().rev() {
        match ch {
            ')' => running += 1,
            '(' => running = running.saturating_sub(1),
            _ => {}
        }
        if running < depth {
            start = pos + ch.len_utf8();
            break;
        }
    }

    CursorScope {
        depth,
        start,
        text: &statement[start..],
        enclosing: &statement[..start],
    }
}

/// Removes the interior of every closed parenthesised group, leaving `()`.
///
/// Used on an extracted scope so subqueries and function arguments nested
/// below the cursor depth are invisible to clause and table scans.
pub fn mask_nested_groups(scope: &str) -> String {
    let mut out = String::with_capacity(scope.len());
    let mut depth = 0usize;

    for ch in scope.chars() {
        match ch {
            '(' => {
                if depth == 0 {
                    out.push('(');
                }
                depth += 1;
            }
            ')' => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        out.push(')');
                    }
                } else {
                    out.push(')');
                }
            }
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

/// Text after the cursor that belongs to the cursor's group, masked.
///
/// `exit_levels` is how many enclosing groups the before-cursor scope was
/// widened by; that many unmatched `)` are passed over before collecting.
/// Collection stops at the `)` closing the resulting group, and nested groups
/// are reduced to `()` as in [`mask_nested_groups`].
pub fn scope_after_cursor(remainder: &str, exit_levels: usize) -> String {
    let mut out = String::with_capacity(remainder.len());
    let mut pending = exit_levels;
    let mut depth = 0usize;

    for ch in remainder.chars() {
        let collecting = pending == 0;
        match ch {
            '(' => {
                if depth == 0 && collecting {
                    out.push('(');
                }
                depth += 1;
            }
            ')' if depth > 0 => {
                depth -= 1;
                if depth == 0 && collecting {
                    out.push(')');
                }
            }
            ')' if pending > 0 => pending -= 1,
            ')' => break,
            _ if depth == 0 && collecting => out.push(ch),
            _ => {}
        }
    }

    out
}
