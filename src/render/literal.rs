//! A small TypeScript literal writer.
//!
//! Output style: two-space indentation, single-quoted strings, bare keys where
//! the key is an identifier, trailing commas on multi-line objects and arrays.
//! Arrays holding only scalars stay on one line.

use serde_json::{Number, Value};

use crate::validation::identifiers::is_identifier;

/// Key/value pairs of an object literal, in output order.
pub type Props = Vec<(String, Js)>;

#[derive(Debug, Clone, PartialEq)]
pub enum Js {
    Null,
    Bool(bool),
    Number(Number),
    Str(String),
    /// Identifier or expression, emitted verbatim.
    Raw(String),
    Array(Vec<Js>),
    Object(Props),
}

impl Js {
    pub fn str(value: impl Into<String>) -> Self {
        Js::Str(value.into())
    }

    pub fn raw(value: impl Into<String>) -> Self {
        Js::Raw(value.into())
    }

    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Js::Null,
            Value::Bool(b) => Js::Bool(*b),
            Value::Number(n) => Js::Number(n.clone()),
            Value::String(s) => Js::Str(s.clone()),
            Value::Array(items) => Js::Array(items.iter().map(Js::from_json).collect()),
            Value::Object(map) => {
                Js::Object(map.iter().map(|(k, v)| (k.clone(), Js::from_json(v))).collect())
            }
        }
    }

    fn is_scalar(&self) -> bool {
        !matches!(self, Js::Array(_) | Js::Object(_))
    }

    /// Renders the value; nested lines are indented relative to `indent`.
    pub fn render(&self, indent: usize) -> String {
        let mut out = String::new();
        self.write(&mut out, indent);
        out
    }

    fn write(&self, out: &mut String, indent: usize) {
        match self {
            Js::Null => out.push_str("null"),
            Js::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Js::Number(n) => out.push_str(&n.to_string()),
            Js::Str(s) => write_string(out, s),
            Js::Raw(raw) => out.push_str(raw),
            Js::Array(items) if items.is_empty() => out.push_str("[]"),
            Js::Array(items) if items.iter().all(Js::is_scalar) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write(out, indent);
                }
                out.push(']');
            }
            Js::Array(items) => {
                out.push_str("[\n");
                for item in items {
                    pad(out, indent + 1);
                    item.write(out, indent + 1);
                    out.push_str(",\n");
                }
                pad(out, indent);
                out.push(']');
            }
            Js::Object(props) if props.is_empty() => out.push_str("{}"),
            Js::Object(props) => {
                out.push_str("{\n");
                for (key, value) in props {
                    pad(out, indent + 1);
                    write_key(out, key);
                    out.push_str(": ");
                    value.write(out, indent + 1);
                    out.push_str(",\n");
                }
                pad(out, indent);
                out.push('}');
            }
        }
    }
}

/// Appends `key: value`.
pub fn push(props: &mut Props, key: &str, value: Js) {
    props.push((key.to_string(), value));
}

/// Appends `key: value` only when a value is present.
pub fn push_opt(props: &mut Props, key: &str, value: Option<Js>) {
    if let Some(value) = value {
        push(props, key, value);
    }
}

fn pad(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push_str("  ");
    }
}

fn write_key(out: &mut String, key: &str) {
    if is_identifier(key) {
        out.push_str(key);
    } else {
        write_string(out, key);
    }
}

fn write_string(out: &mut String, value: &str) {
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert_eq!(Js::str("it's").render(0), r"'it\'s'");
        assert_eq!(Js::from_json(&json!(1.5)).render(0), "1.5");
        assert_eq!(Js::raw("isAdmin").render(3), "isAdmin");
        assert_eq!(Js::Null.render(0), "null");
    }

    #[test]
    fn test_nested_object() {
        let value = Js::from_json(&json!({
            "useAsTitle": "title",
            "default-columns": ["title", "status"],
            "preview": {},
        }));
        assert_eq!(
            value.render(1),
            "{\n    useAsTitle: 'title',\n    'default-columns': ['title', 'status'],\n    preview: {},\n  }"
        );
    }

    #[test]
    fn test_array_of_objects_breaks_lines() {
        let value = Js::Array(vec![Js::Object(vec![("a".into(), Js::Bool(true))])]);
        assert_eq!(value.render(0), "[\n  {\n    a: true,\n  },\n]");
    }
}
