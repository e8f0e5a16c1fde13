//! JSON type checks on a raw spec value, run before it is deserialized.
//!
//! The model tolerates missing keys and malformed unions, but a key holding the
//! wrong JSON type (`"name": 5`, `"fields": null`) cannot be deserialized at all.
//! This pass finds every such value and reports it as `INVALID_VALUE_TYPE` with
//! its breadcrumb, so the caller sees the whole list rather than a single parse
//! failure. Values accepted here always deserialize.

use serde_json::{Map, Value};

use super::codes::INVALID_VALUE_TYPE;
use super::{EntityKind, ValidationError};

#[derive(Debug, Clone, Copy)]
enum Expect {
    /// `Option<String>`: null reads as absent.
    Str,
    /// `Option<bool>`: null reads as absent.
    Bool,
    /// `Option<Labels>`.
    MaybeObject,
    Array,
    Object,
}

impl Expect {
    fn accepts(self, value: &Value) -> bool {
        match self {
            Expect::Str => value.is_string() || value.is_null(),
            Expect::Bool => value.is_boolean() || value.is_null(),
            Expect::MaybeObject => value.is_object() || value.is_null(),
            Expect::Array => value.is_array(),
            Expect::Object => value.is_object(),
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Expect::Str => "a string",
            Expect::Bool => "a boolean",
            Expect::MaybeObject | Expect::Object => "an object",
            Expect::Array => "a list",
        }
    }
}

type Keys = &'static [(&'static str, Expect)];

const PROJECT_KEYS: Keys = &[
    ("projectName", Expect::Str),
    ("version", Expect::Str),
    ("description", Expect::Str),
    ("database", Expect::Str),
    ("serverUrl", Expect::Str),
    ("authentication", Expect::Bool),
    ("collections", Expect::Array),
    ("globals", Expect::Array),
    ("blocks", Expect::Array),
    ("plugins", Expect::Array),
];

const COLLECTION_KEYS: Keys = &[
    ("slug", Expect::Str),
    ("labels", Expect::MaybeObject),
    ("admin", Expect::Object),
    ("access", Expect::Object),
    ("fields", Expect::Array),
    ("timestamps", Expect::Bool),
    ("hooks", Expect::Object),
    ("endpoints", Expect::Array),
    ("indexes", Expect::Array),
];

const GLOBAL_KEYS: Keys = &[
    ("slug", Expect::Str),
    ("label", Expect::Str),
    ("admin", Expect::Object),
    ("access", Expect::Object),
    ("fields", Expect::Array),
    ("hooks", Expect::Object),
];

const BLOCK_KEYS: Keys = &[
    ("slug", Expect::Str),
    ("interfaceName", Expect::Str),
    ("labels", Expect::MaybeObject),
    ("admin", Expect::Object),
    ("fields", Expect::Array),
];

const FIELD_KEYS: Keys = &[
    ("name", Expect::Str),
    ("type", Expect::Str),
    ("label", Expect::Str),
    ("required", Expect::Bool),
    ("unique", Expect::Bool),
    ("localized", Expect::Bool),
    ("index", Expect::Bool),
    ("hasMany", Expect::Bool),
    ("admin", Expect::Object),
    ("fields", Expect::Array),
    ("blocks", Expect::Array),
    ("tabs", Expect::Array),
    ("options", Expect::Array),
];

const TAB_KEYS: Keys = &[
    ("label", Expect::Str),
    ("name", Expect::Str),
    ("description", Expect::Str),
    ("fields", Expect::Array),
];

const LABEL_KEYS: Keys = &[("singular", Expect::Str), ("plural", Expect::Str)];

const ENDPOINT_KEYS: Keys = &[("path", Expect::Str), ("method", Expect::Str)];

const INDEX_KEYS: Keys = &[("fields", Expect::Array), ("unique", Expect::Bool)];

const PLUGIN_KEYS: Keys = &[("package", Expect::Str), ("version", Expect::Str)];

/// Type-checks `value` as the given entity, rooted at the breadcrumb the
/// validator uses for it (`collection`, `field`, ...; the project root has none).
/// Tabs and plugins are only checked as part of a project.
pub fn check_shape(kind: EntityKind, value: &Value) -> Vec<ValidationError> {
    let mut shape = Shape::default();
    match kind {
        EntityKind::Project => shape.project(value),
        EntityKind::Collection => shape.collection(value, "collection"),
        EntityKind::Global => shape.global(value, "global"),
        EntityKind::Block => shape.block(value, "block"),
        EntityKind::Field => shape.field(value, "field"),
        EntityKind::Tab | EntityKind::Plugin => {}
    }
    shape.errors
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn found(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn items<'v>(map: &'v Map<String, Value>, key: &str) -> impl Iterator<Item = (usize, &'v Value)> {
    map.get(key).and_then(Value::as_array).into_iter().flatten().enumerate()
}

#[derive(Debug, Default)]
struct Shape {
    errors: Vec<ValidationError>,
}

impl Shape {
    fn mismatch(&mut self, path: &str, expect: Expect, value: &Value) {
        let field = if path.is_empty() { "(root)" } else { path };
        self.errors.push(ValidationError::new(
            INVALID_VALUE_TYPE,
            format!("Expected {}, found {}", expect.noun(), found(value)),
            field,
        ));
    }

    /// Checks that `value` is an object and that each listed key present in it
    /// has the expected type. Unknown keys are ignored.
    fn object<'v>(&mut self, value: &'v Value, path: &str, keys: Keys) -> Option<&'v Map<String, Value>> {
        let Some(map) = value.as_object() else {
            self.mismatch(path, Expect::Object, value);
            return None;
        };
        for &(key, expect) in keys {
            if let Some(entry) = map.get(key).filter(|entry| !expect.accepts(entry)) {
                self.mismatch(&join(path, key), expect, entry);
            }
        }
        Some(map)
    }

    fn project(&mut self, value: &Value) {
        let Some(map) = self.object(value, "", PROJECT_KEYS) else {
            return;
        };
        for (i, collection) in items(map, "collections") {
            self.collection(collection, &format!("collections[{i}]"));
        }
        for (i, global) in items(map, "globals") {
            self.global(global, &format!("globals[{i}]"));
        }
        for (i, block) in items(map, "blocks") {
            self.block(block, &format!("blocks[{i}]"));
        }
        // Bare package names and non-object entries are judged by the validator.
        for (i, plugin) in items(map, "plugins").filter(|(_, p)| p.is_object()) {
            self.object(plugin, &format!("plugins[{i}]"), PLUGIN_KEYS);
        }
    }

    fn collection(&mut self, value: &Value, path: &str) {
        let Some(map) = self.object(value, path, COLLECTION_KEYS) else {
            return;
        };
        self.labels(map, path);
        self.fields(map, path);
        self.hooks(map, path);
        for (i, endpoint) in items(map, "endpoints") {
            self.object(endpoint, &format!("{path}.endpoints[{i}]"), ENDPOINT_KEYS);
        }
        for (i, index) in items(map, "indexes") {
            let index_path = format!("{path}.indexes[{i}]");
            let Some(index) = self.object(index, &index_path, INDEX_KEYS) else {
                continue;
            };
            for (j, name) in items(index, "fields").filter(|(_, name)| !name.is_string()) {
                self.mismatch(&format!("{index_path}.fields[{j}]"), Expect::Str, name);
            }
        }
    }

    fn global(&mut self, value: &Value, path: &str) {
        let Some(map) = self.object(value, path, GLOBAL_KEYS) else {
            return;
        };
        self.fields(map, path);
        self.hooks(map, path);
    }

    fn block(&mut self, value: &Value, path: &str) {
        let Some(map) = self.object(value, path, BLOCK_KEYS) else {
            return;
        };
        self.labels(map, path);
        self.fields(map, path);
    }

    fn field(&mut self, value: &Value, path: &str) {
        let Some(map) = self.object(value, path, FIELD_KEYS) else {
            return;
        };
        self.fields(map, path);
        // Slug strings and other non-objects are judged by the validator.
        for (i, block) in items(map, "blocks").filter(|(_, b)| b.is_object()) {
            self.block(block, &format!("{path}.blocks[{i}]"));
        }
        for (i, tab) in items(map, "tabs") {
            let tab_path = format!("{path}.tabs[{i}]");
            if let Some(tab) = self.object(tab, &tab_path, TAB_KEYS) {
                self.fields(tab, &tab_path);
            }
        }
    }

    fn fields(&mut self, map: &Map<String, Value>, path: &str) {
        for (i, field) in items(map, "fields") {
            self.field(field, &format!("{path}.fields[{i}]"));
        }
    }

    fn labels(&mut self, map: &Map<String, Value>, path: &str) {
        if let Some(labels) = map.get("labels").filter(|labels| labels.is_object()) {
            self.object(labels, &format!("{path}.labels"), LABEL_KEYS);
        }
    }

    /// Hook lists; the entries themselves are judged by the validator.
    fn hooks(&mut self, map: &Map<String, Value>, path: &str) {
        let Some(hooks) = map.get("hooks").and_then(Value::as_object) else {
            return;
        };
        for (kind, refs) in hooks.iter().filter(|(_, refs)| !refs.is_array()) {
            self.mismatch(&format!("{path}.hooks.{kind}"), Expect::Array, refs);
        }
    }
}
