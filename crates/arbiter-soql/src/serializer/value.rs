use super::{Formatter, ToSql};

use arbiter_core::stmt;

/// A literal in single quotes, with its text escaped. `null` stays bare.
pub(super) struct Quoted<'a>(pub(super) &'a stmt::Value);

impl ToSql for Quoted<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self.0.as_text() {
            None => f.dst.push_str("null"),
            Some(text) => {
                f.dst.push('\'');
                f.dst.push_str(&escape(&text));
                f.dst.push('\'');
            }
        }
    }
}

/// Escapes text for use inside a single-quoted SOQL literal.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{8}' => escaped.push_str("\\b"),
            '\u{c}' => escaped.push_str("\\f"),
            ch => escaped.push(ch),
        }
    }

    escaped
}
