//! Statement isolation and string-literal stripping.

/// Returns the statement the cursor is in: everything after the last `;`.
///
/// Without a terminator the whole input is the statement.
pub fn current_statement(text_before_cursor: &str) -> &str {
    match text_before_cursor.rfind(';') {
        Some(pos) => &text_before_cursor[pos + 1..],
        None => text_before_cursor,
    }
}

/// Returns the statement text following the cursor, up to the next `;`.
pub fn statement_remainder(text_after_cursor: &str) -> &str {
    match text_after_cursor.find(';') {
        Some(pos) => &text_after_cursor[..pos],
        None => text_after_cursor,
    }
}

/// Replaces the contents of quoted literals with empty placeholders.
///
/// `'it''s'` becomes `''` and `"a""b"` becomes `""`, so keywords, parentheses
/// and semicolons inside literals do not confuse later scans. An unterminated
/// literal (the cursor is still inside it) is reduced to its opening quote.
pub fn strip_string_literals(statement: &str) -> String {
    let mut out = String::with_capacity(statement.len());
    let mut chars = statement.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\'' && ch != '"' {
            out.push(ch);
            continue;
        }

        let quote = ch;
        out.push(quote);
        let mut closed = false;
        while let Some(inner) = chars.next() {
            if inner == quote {
                if chars.peek() == Some(&quote) {
                    // Doubled quote is an escaped quote character.
                    chars.next();
                    continue;
                }
                closed = true;
                break;
            }
        }
        if closed {
            out.push(quote);
        }
    }

    out
}
