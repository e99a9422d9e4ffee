// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Serializer: value tree to dialect text.
//!
//! Output is always block style with two-space indentation and no trailing
//! newline. Strings are written plain when they read back as the same
//! string, as a literal block when they span lines, and double-quoted
//! otherwise.

use log::debug;
use ordermap::OrderMap;

use crate::coerce::coerce_plain;
use crate::value::Value;

const INDENT: usize = 2;

/// Characters that change the meaning of a plain scalar when they lead it.
const INDICATORS: &[char] = &[
    '[', ']', '{', '}', '&', '*', '!', '|', '>', '\'', '"', '%', '@', '`', ',', '?',
];

/// Serialize a value to dialect text.
#[must_use]
pub fn stringify(value: &Value) -> String {
    let mut lines = Vec::new();
    emit_value(value, 0, &mut lines);
    debug!("Serialized {} into {} lines", value.type_name(), lines.len());
    lines.join("\n")
}

/// Serialize several documents separated by `---` lines.
#[must_use]
pub fn stringify_documents(documents: &[Value]) -> String {
    documents
        .iter()
        .map(stringify)
        .collect::<Vec<_>>()
        .join("\n---\n")
}

fn emit_value(value: &Value, indent: usize, lines: &mut Vec<String>) {
    match value {
        Value::Sequence(items) if !items.is_empty() => {
            for item in items {
                emit_item(item, indent, lines);
            }
        }
        Value::Mapping(entries) if !entries.is_empty() => emit_mapping(entries, indent, lines),
        scalar => {
            let (first, rest) = render_scalar(scalar, indent);
            lines.push(format!("{}{first}", " ".repeat(indent)));
            lines.extend(rest);
        }
    }
}

fn emit_mapping(entries: &OrderMap<String, Value>, indent: usize, lines: &mut Vec<String>) {
    let padding = " ".repeat(indent);
    for (key, value) in entries {
        let key = render_key(key);
        if is_nested_collection(value) {
            lines.push(format!("{padding}{key}:"));
            emit_value(value, indent + INDENT, lines);
        } else {
            let (first, rest) = render_scalar(value, indent);
            lines.push(format!("{padding}{key}: {first}"));
            lines.extend(rest);
        }
    }
}

/// Emit one `- item` entry. Nested collections start on the dash line.
fn emit_item(item: &Value, indent: usize, lines: &mut Vec<String>) {
    let padding = " ".repeat(indent);
    if is_nested_collection(item) {
        let mut nested = Vec::new();
        emit_value(item, indent + INDENT, &mut nested);
        let mut nested = nested.into_iter();
        if let Some(first) = nested.next() {
            let content = first.get(indent + INDENT..).unwrap_or_default();
            lines.push(format!("{padding}- {content}"));
        }
        lines.extend(nested);
    } else {
        let (first, rest) = render_scalar(item, indent);
        lines.push(format!("{padding}- {first}"));
        lines.extend(rest);
    }
}

fn is_nested_collection(value: &Value) -> bool {
    match value {
        Value::Sequence(items) => !items.is_empty(),
        Value::Mapping(entries) => !entries.is_empty(),
        _ => false,
    }
}

/// Render a scalar (or empty collection) for a node whose owner sits at
/// `indent`. Returns the text for the owner's line and any following lines.
fn render_scalar(value: &Value, indent: usize) -> (String, Vec<String>) {
    let text = match value {
        Value::Null => "null".to_owned(),
        Value::Bool(value) => value.to_string(),
        Value::Int(value) => value.to_string(),
        Value::Float(value) => render_float(*value),
        Value::String(value) => return render_string(value, indent),
        Value::Sequence(_) => "[]".to_owned(),
        Value::Mapping(_) => "{}".to_owned(),
    };
    (text, Vec::new())
}

fn render_float(value: f64) -> String {
    if value.is_nan() {
        return ".nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { ".inf" } else { "-.inf" }.to_owned();
    }
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

fn render_string(value: &str, indent: usize) -> (String, Vec<String>) {
    if value.contains('\n') {
        if let Some(block) = render_block(value, indent) {
            return block;
        }
        return (quote(value), Vec::new());
    }
    if needs_quotes(value) {
        (quote(value), Vec::new())
    } else {
        (value.to_owned(), Vec::new())
    }
}

/// Render a multi-line string as a literal block, if it reads back unchanged.
fn render_block(value: &str, indent: usize) -> Option<(String, Vec<String>)> {
    let body = value.trim_end_matches('\n');
    let trailing_newlines = value.len() - body.len();
    if body.is_empty() || trailing_newlines > 1 || value.contains('\r') {
        return None;
    }

    let lines: Vec<&str> = body.split('\n').collect();
    // Whitespace-only lines would read back as empty lines.
    if lines
        .iter()
        .any(|line| !line.is_empty() && line.trim().is_empty())
    {
        return None;
    }
    // The first content line fixes the indentation of the block.
    let first_content = lines.iter().find(|line| !line.is_empty())?;
    if first_content.starts_with([' ', '\t']) {
        return None;
    }

    let padding = " ".repeat(indent + INDENT);
    let header = if trailing_newlines == 1 { "|+" } else { "|" };
    let rendered = lines
        .iter()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{padding}{line}")
            }
        })
        .collect();
    Some((header.to_owned(), rendered))
}

/// A string that would not read back as itself when written plain.
fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value.contains([':', '#'])
        || value.contains(|ch: char| ch.is_control())
        || value.trim() != value
        || value.starts_with(INDICATORS)
        || value == "-"
        || value.starts_with("- ")
        || value.starts_with("---")
        || value.starts_with("...")
        || coerce_plain(value) != Value::String(value.to_owned())
}

fn render_key(key: &str) -> String {
    let plain = key
        .chars()
        .next()
        .is_some_and(|ch| ch.is_alphanumeric() || ch == '_')
        && key
            .chars()
            .all(|ch| ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.' | '/'));
    if plain { key.to_owned() } else { quote(key) }
}

/// Double-quote a string, escaping what the lexer unescapes.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            '\0' => quoted.push_str("\\0"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stringify_json(json: serde_json::Value) -> String {
        stringify(&Value::from(json))
    }

    #[test]
    fn test_scalars() {
        assert_eq!(stringify(&Value::Null), "null");
        assert_eq!(stringify(&Value::Bool(true)), "true");
        assert_eq!(stringify(&Value::Int(-3)), "-3");
        assert_eq!(stringify(&Value::Float(1.0)), "1.0");
        assert_eq!(stringify(&Value::Float(0.25)), "0.25");
        assert_eq!(stringify(&Value::Float(f64::NEG_INFINITY)), "-.inf");
        assert_eq!(stringify(&Value::Float(f64::NAN)), ".nan");
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(stringify_json(json!({"a": {}, "b": []})), "a: {}\nb: []");
        assert_eq!(stringify_json(json!([])), "[]");
    }

    #[test]
    fn test_nested_block_layout() {
        let text = stringify_json(json!({
            "server": {"host": "localhost", "ports": [80, 443]},
            "users": [{"name": "a", "roles": ["x"]}, [1, 2]]
        }));
        assert_eq!(
            text,
            "server:\n  host: localhost\n  ports:\n    - 80\n    - 443\n\
             users:\n  - name: a\n    roles:\n      - x\n  - - 1\n    - 2"
        );
    }

    #[test]
    fn test_quoting() {
        let cases = [
            ("plain text", "plain text"),
            ("a: b", "\"a: b\""),
            ("x # y", "\"x # y\""),
            ("", "\"\""),
            (" padded", "\" padded\""),
            ("123", "\"123\""),
            ("1.5", "\"1.5\""),
            ("true", "\"true\""),
            ("null", "\"null\""),
            ("2024-01-15", "\"2024-01-15\""),
            ("*alias", "\"*alias\""),
            ("- item", "\"- item\""),
            ("-", "\"-\""),
            ("say \"hi\"", "say \"hi\""),
            ("[x", "\"[x\""),
            ("~", "~"),
        ];
        for (input, expected) in cases {
            assert_eq!(stringify(&Value::from(input)), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_quoted_escapes() {
        assert_eq!(
            stringify(&Value::from("tab\there: \"q\" \\")),
            r#""tab\there: \"q\" \\""#
        );
    }

    #[test]
    fn test_multiline_strings() {
        assert_eq!(
            stringify_json(json!({"text": "line1\nline2"})),
            "text: |\n  line1\n  line2"
        );
        assert_eq!(
            stringify_json(json!({"text": "line1\n\nline3\n"})),
            "text: |+\n  line1\n\n  line3"
        );
        assert_eq!(stringify_json(json!(["a\nb"])), "- |\n  a\n  b");
        // Falls back to the quoted form
        assert_eq!(
            stringify_json(json!({"text": "  indented\nnext"})),
            "text: \"  indented\\nnext\""
        );
        assert_eq!(
            stringify_json(json!({"text": "a\n\n\n"})),
            "text: \"a\\n\\n\\n\""
        );
    }

    #[test]
    fn test_keys() {
        assert_eq!(
            stringify_json(json!({"a b": 1, "": 2, "x.y": 3, "k:v": 4})),
            "\"a b\": 1\n\"\": 2\nx.y: 3\n\"k:v\": 4"
        );
    }

    #[test]
    fn test_documents() {
        let documents = [Value::from(json!({"a": 1})), Value::from("two")];
        assert_eq!(stringify_documents(&documents), "a: 1\n---\ntwo");
    }
}
