//! Structural validation of project specs.
//!
//! Validation never fails: it returns every problem it finds as a
//! [`ValidationError`], in depth-first discovery order, followed by the
//! project-wide reference checks. An empty list means the spec is safe to render.

use serde::Serialize;
use std::fmt;

pub mod identifiers;
pub mod references;
pub mod shape;
pub mod tree;

pub use identifiers::{
    validate_identifier_name, validate_identifier_slug, validate_package_name, validate_semver,
    validate_slug,
};
pub use shape::check_shape;
pub use tree::{validate_block, validate_collection, validate_field, validate_global, validate_project};

/// Codes that are not derived from an [`EntityKind`].
pub mod codes {
    pub const INVALID_VALUE_TYPE: &str = "INVALID_VALUE_TYPE";

    pub const MISSING_DATABASE: &str = "MISSING_DATABASE";
    pub const INVALID_DATABASE: &str = "INVALID_DATABASE";
    pub const INVALID_SERVER_URL: &str = "INVALID_SERVER_URL";

    pub const DUPLICATE_COLLECTION_SLUG: &str = "DUPLICATE_COLLECTION_SLUG";
    pub const DUPLICATE_GLOBAL_SLUG: &str = "DUPLICATE_GLOBAL_SLUG";
    pub const DUPLICATE_BLOCK_SLUG: &str = "DUPLICATE_BLOCK_SLUG";
    pub const DUPLICATE_FIELD_NAME: &str = "DUPLICATE_FIELD_NAME";
    pub const DUPLICATE_EXPORT_NAME: &str = "DUPLICATE_EXPORT_NAME";
    pub const INVALID_EXPORT_NAME: &str = "INVALID_EXPORT_NAME";

    pub const MISSING_COLLECTION_FIELDS: &str = "MISSING_COLLECTION_FIELDS";
    pub const MISSING_GLOBAL_FIELDS: &str = "MISSING_GLOBAL_FIELDS";

    pub const MISSING_FIELD_TYPE: &str = "MISSING_FIELD_TYPE";
    pub const INVALID_FIELD_TYPE: &str = "INVALID_FIELD_TYPE";
    pub const MISSING_FIELD_LABEL: &str = "MISSING_FIELD_LABEL";
    pub const MISSING_NESTED_FIELDS: &str = "MISSING_NESTED_FIELDS";
    pub const MISSING_BLOCKS_ARRAY: &str = "MISSING_BLOCKS_ARRAY";
    pub const INVALID_BLOCK_ENTRY: &str = "INVALID_BLOCK_ENTRY";
    pub const MISSING_TABS_ARRAY: &str = "MISSING_TABS_ARRAY";
    pub const MISSING_TAB_LABEL: &str = "MISSING_TAB_LABEL";
    pub const MISSING_FIELD_OPTIONS: &str = "MISSING_FIELD_OPTIONS";
    pub const INVALID_FIELD_OPTION: &str = "INVALID_FIELD_OPTION";
    pub const MISSING_RELATION_TO: &str = "MISSING_RELATION_TO";
    pub const INVALID_RELATION_TO: &str = "INVALID_RELATION_TO";

    pub const INVALID_ACCESS_OPERATION: &str = "INVALID_ACCESS_OPERATION";
    pub const INVALID_ACCESS_RULE: &str = "INVALID_ACCESS_RULE";
    pub const INVALID_ACCESS_REFERENCE: &str = "INVALID_ACCESS_REFERENCE";
    pub const INVALID_HOOK_KIND: &str = "INVALID_HOOK_KIND";
    pub const INVALID_HOOK_REFERENCE: &str = "INVALID_HOOK_REFERENCE";
    pub const INVALID_ENDPOINT_PATH: &str = "INVALID_ENDPOINT_PATH";
    pub const INVALID_ENDPOINT_METHOD: &str = "INVALID_ENDPOINT_METHOD";
    pub const MISSING_ENDPOINT_HANDLER: &str = "MISSING_ENDPOINT_HANDLER";
    pub const MISSING_INDEX_FIELDS: &str = "MISSING_INDEX_FIELDS";
    pub const UNKNOWN_INDEX_FIELD: &str = "UNKNOWN_INDEX_FIELD";

    pub const INVALID_PLUGIN_ENTRY: &str = "INVALID_PLUGIN_ENTRY";
    pub const INVALID_PLUGIN_IMPORT: &str = "INVALID_PLUGIN_IMPORT";
    pub const DUPLICATE_PLUGIN: &str = "DUPLICATE_PLUGIN";

    pub const MISSING_AUTH_COLLECTION: &str = "MISSING_AUTH_COLLECTION";
    pub const UNKNOWN_RELATION_TARGET: &str = "UNKNOWN_RELATION_TARGET";
    pub const UNKNOWN_BLOCK_REFERENCE: &str = "UNKNOWN_BLOCK_REFERENCE";
    pub const REFERENCE_NAME_CONFLICT: &str = "REFERENCE_NAME_CONFLICT";

    pub const FS_CREATE_DIRECTORY_FAILED: &str = "FS_CREATE_DIRECTORY_FAILED";
    pub const FS_WRITE_FILE_FAILED: &str = "FS_WRITE_FILE_FAILED";
}

/// A single structural problem, located by a breadcrumb path such as
/// `collections[0].fields[2].blocks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub code: String,
    pub message: String,
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(code: impl Into<String>, message: impl Into<String>, field: impl Into<String>) -> Self {
        Self { code: code.into(), message: message.into(), field: field.into(), suggestion: None }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.field, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

/// The kind of entity an identifier belongs to; drives error codes and messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Project,
    Collection,
    Global,
    Block,
    Field,
    Tab,
    Plugin,
}

impl EntityKind {
    /// Upper-case tag used inside error codes.
    pub fn tag(&self) -> &'static str {
        match self {
            EntityKind::Project => "PROJECT",
            EntityKind::Collection => "COLLECTION",
            EntityKind::Global => "GLOBAL",
            EntityKind::Block => "BLOCK",
            EntityKind::Field => "FIELD",
            EntityKind::Tab => "TAB",
            EntityKind::Plugin => "PLUGIN",
        }
    }

    pub fn noun(&self) -> &'static str {
        match self {
            EntityKind::Project => "project",
            EntityKind::Collection => "collection",
            EntityKind::Global => "global",
            EntityKind::Block => "block",
            EntityKind::Field => "field",
            EntityKind::Tab => "tab",
            EntityKind::Plugin => "plugin",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            EntityKind::Project => "Project",
            EntityKind::Collection => "Collection",
            EntityKind::Global => "Global",
            EntityKind::Block => "Block",
            EntityKind::Field => "Field",
            EntityKind::Tab => "Tab",
            EntityKind::Plugin => "Plugin",
        }
    }
}
