//! The closed set of field kinds and their per-kind rules.
//!
//! Each kind maps to one [`KindRules`] entry pairing the shape check the
//! validator runs with the renderer that emits the kind's own keys, so the rules
//! for a kind live side by side.

use std::fmt;

use crate::model::FieldSpec;
use crate::render::field::{self, Props};
use crate::validation::tree::{self, Walker};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Textarea,
    Email,
    Code,
    Json,
    Number,
    Date,
    Checkbox,
    Select,
    Radio,
    Relationship,
    Upload,
    Array,
    Group,
    Row,
    Collapsible,
    Blocks,
    Tabs,
    RichText,
    Point,
    Ui,
}

impl FieldKind {
    pub const ALL: [FieldKind; 21] = [
        FieldKind::Text,
        FieldKind::Textarea,
        FieldKind::Email,
        FieldKind::Code,
        FieldKind::Json,
        FieldKind::Number,
        FieldKind::Date,
        FieldKind::Checkbox,
        FieldKind::Select,
        FieldKind::Radio,
        FieldKind::Relationship,
        FieldKind::Upload,
        FieldKind::Array,
        FieldKind::Group,
        FieldKind::Row,
        FieldKind::Collapsible,
        FieldKind::Blocks,
        FieldKind::Tabs,
        FieldKind::RichText,
        FieldKind::Point,
        FieldKind::Ui,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        FieldKind::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Textarea => "textarea",
            FieldKind::Email => "email",
            FieldKind::Code => "code",
            FieldKind::Json => "json",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Select => "select",
            FieldKind::Radio => "radio",
            FieldKind::Relationship => "relationship",
            FieldKind::Upload => "upload",
            FieldKind::Array => "array",
            FieldKind::Group => "group",
            FieldKind::Row => "row",
            FieldKind::Collapsible => "collapsible",
            FieldKind::Blocks => "blocks",
            FieldKind::Tabs => "tabs",
            FieldKind::RichText => "richText",
            FieldKind::Point => "point",
            FieldKind::Ui => "ui",
        }
    }

    /// Layout-only kinds that do not store data under their own name.
    pub fn is_presentational(&self) -> bool {
        matches!(self, FieldKind::Row | FieldKind::Collapsible | FieldKind::Tabs)
    }

    /// Case-insensitive lookup used to suggest a fix for an unknown tag.
    pub fn closest(tag: &str) -> Option<Self> {
        FieldKind::ALL.into_iter().find(|kind| kind.as_str().eq_ignore_ascii_case(tag))
    }

    pub(crate) fn rules(&self) -> &'static KindRules {
        match self {
            FieldKind::Text
            | FieldKind::Textarea
            | FieldKind::Email
            | FieldKind::Code
            | FieldKind::Json
            | FieldKind::Number
            | FieldKind::Date
            | FieldKind::Checkbox
            | FieldKind::RichText
            | FieldKind::Point
            | FieldKind::Ui => &LEAF,
            FieldKind::Select | FieldKind::Radio => &CHOICE,
            FieldKind::Relationship | FieldKind::Upload => &RELATION,
            FieldKind::Array => &ARRAY,
            FieldKind::Group | FieldKind::Row => &NESTED,
            FieldKind::Collapsible => &COLLAPSIBLE,
            FieldKind::Blocks => &BLOCKS,
            FieldKind::Tabs => &TABS,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape check and payload renderer for one group of kinds.
pub(crate) struct KindRules {
    /// Checks the kind-specific sub-structure of a field at the given path.
    pub validate: fn(&mut Walker, &FieldSpec, &str),
    /// Appends the kind-specific keys of a field literal.
    pub render: fn(&FieldSpec, &mut Props),
}

static LEAF: KindRules = KindRules { validate: tree::check_leaf, render: field::render_leaf };

static CHOICE: KindRules =
    KindRules { validate: tree::check_options, render: field::render_options };

static RELATION: KindRules =
    KindRules { validate: tree::check_relation, render: field::render_relation };

static ARRAY: KindRules =
    KindRules { validate: tree::check_optional_fields, render: field::render_subfields };

static NESTED: KindRules =
    KindRules { validate: tree::check_required_fields, render: field::render_subfields };

static COLLAPSIBLE: KindRules =
    KindRules { validate: tree::check_collapsible, render: field::render_subfields };

static BLOCKS: KindRules = KindRules { validate: tree::check_blocks, render: field::render_blocks };

static TABS: KindRules = KindRules { validate: tree::check_tabs, render: field::render_tabs };

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip_through_lookup() {
        for kind in FieldKind::ALL {
            assert_eq!(FieldKind::from_tag(kind.as_str()), Some(kind));
        }
        assert_eq!(FieldKind::from_tag("richtext"), None);
        assert_eq!(FieldKind::closest("richtext"), Some(FieldKind::RichText));
    }
}
