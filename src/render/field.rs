//! Field literals.
//!
//! Common keys come first (`name, type, label, required, unique, localized,
//! index`), then the keys owned by the field's kind, then `hasMany`,
//! `defaultValue` and `admin`. Absent options are left out entirely.

use crate::model::{BlockEntry, BlockSpec, DefaultValue, FieldSpec, Labels, OptionEntry, RelationTo};
use crate::render::literal::{push, push_opt, Js};
use crate::render::names;

pub use crate::render::literal::Props;

/// Renders one field as an object literal. Nested lines are indented relative to `indent`.
pub fn render_field(field: &FieldSpec, indent: usize) -> String {
    field_literal(field).render(indent)
}

pub fn field_literal(field: &FieldSpec) -> Js {
    let mut props = Props::new();
    push_opt(&mut props, "name", non_empty(field.name.as_deref()).map(Js::str));
    push(&mut props, "type", Js::str(field.field_type.as_deref().unwrap_or_default()));
    push_opt(&mut props, "label", field.label.as_deref().map(Js::str));
    push_opt(&mut props, "required", field.required.map(Js::Bool));
    push_opt(&mut props, "unique", field.unique.map(Js::Bool));
    push_opt(&mut props, "localized", field.localized.map(Js::Bool));
    push_opt(&mut props, "index", field.index.map(Js::Bool));

    if let Some(kind) = field.kind() {
        (kind.rules().render)(field, &mut props);
    }

    push_opt(&mut props, "hasMany", field.has_many.map(Js::Bool));
    push_opt(&mut props, "defaultValue", field.default_value.as_ref().map(default_literal));
    if !field.admin.is_empty() {
        push(&mut props, "admin", bag_literal(&field.admin));
    }
    Js::Object(props)
}

pub fn fields_literal(fields: &[FieldSpec]) -> Js {
    Js::Array(fields.iter().map(field_literal).collect())
}

pub fn block_literal(block: &BlockSpec) -> Js {
    let mut props = Props::new();
    push(&mut props, "slug", Js::str(block.slug.as_deref().unwrap_or_default()));
    push_opt(&mut props, "labels", block.labels.as_ref().and_then(labels_literal));
    if !block.admin.is_empty() {
        push(&mut props, "admin", bag_literal(&block.admin));
    }
    push(&mut props, "fields", fields_literal(&block.fields));
    push_opt(&mut props, "interfaceName", block.interface_name.as_deref().map(Js::str));
    Js::Object(props)
}

pub fn labels_literal(labels: &Labels) -> Option<Js> {
    let mut props = Props::new();
    push_opt(&mut props, "singular", labels.singular.as_deref().map(Js::str));
    push_opt(&mut props, "plural", labels.plural.as_deref().map(Js::str));
    (!props.is_empty()).then_some(Js::Object(props))
}

pub fn bag_literal(bag: &crate::model::OptionsBag) -> Js {
    Js::Object(bag.iter().map(|(k, v)| (k.clone(), Js::from_json(v))).collect())
}

fn default_literal(value: &DefaultValue) -> Js {
    match value {
        DefaultValue::Inline { expression } => Js::raw(expression),
        DefaultValue::Literal(value) => Js::from_json(value),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

pub(crate) fn render_leaf(_field: &FieldSpec, _props: &mut Props) {}

pub(crate) fn render_subfields(field: &FieldSpec, props: &mut Props) {
    push(props, "fields", fields_literal(&field.fields));
}

pub(crate) fn render_blocks(field: &FieldSpec, props: &mut Props) {
    let blocks = field
        .blocks
        .iter()
        .filter_map(|entry| match entry {
            BlockEntry::Reference(slug) => Some(Js::raw(names::block_export(slug))),
            BlockEntry::Inline(block) => Some(block_literal(block)),
            BlockEntry::Invalid(_) => None,
        })
        .collect();
    push(props, "blocks", Js::Array(blocks));
}

pub(crate) fn render_tabs(field: &FieldSpec, props: &mut Props) {
    let tabs = field
        .tabs
        .iter()
        .map(|tab| {
            let mut tab_props = Props::new();
            push_opt(&mut tab_props, "label", non_empty(tab.label.as_deref()).map(Js::str));
            push_opt(&mut tab_props, "name", non_empty(tab.name.as_deref()).map(Js::str));
            push_opt(&mut tab_props, "description", tab.description.as_deref().map(Js::str));
            push(&mut tab_props, "fields", fields_literal(&tab.fields));
            Js::Object(tab_props)
        })
        .collect();
    push(props, "tabs", Js::Array(tabs));
}

pub(crate) fn render_options(field: &FieldSpec, props: &mut Props) {
    let options = field
        .options
        .iter()
        .filter_map(|option| match option {
            OptionEntry::Pair { label, value } => Some(Js::Object(vec![
                ("label".to_string(), Js::str(label)),
                ("value".to_string(), Js::str(value)),
            ])),
            OptionEntry::Invalid(_) => None,
        })
        .collect();
    push(props, "options", Js::Array(options));
}

pub(crate) fn render_relation(field: &FieldSpec, props: &mut Props) {
    let relation = match &field.relation_to {
        Some(RelationTo::One(slug)) => Js::str(slug),
        Some(RelationTo::Many(slugs)) => Js::Array(slugs.iter().map(Js::str).collect()),
        Some(RelationTo::Invalid(_)) | None => return,
    };
    push(props, "relationTo", relation);
}
