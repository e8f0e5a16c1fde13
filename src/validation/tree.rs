//! Depth-first walk over a project spec.
//!
//! Uniqueness sets are created per scope and passed down explicitly: field names
//! are unique among siblings only, block slugs within one `blocks` field only,
//! and collections, globals and top-level blocks each own a project namespace.

use indexmap::IndexMap;
use log::debug;
use std::collections::HashSet;

use super::codes::*;
use super::identifiers::{
    is_identifier, is_slug, validate_identifier_name, validate_identifier_slug, validate_package_name,
    validate_semver, validate_slug,
};
use super::references;
use super::{EntityKind, ValidationError};
use crate::kinds::FieldKind;
use crate::model::{
    AccessRule, BlockEntry, BlockSpec, CollectionSpec, Database, EndpointSpec, FieldSpec,
    GlobalSpec, HookRef, OptionEntry, PluginEntry, ProjectSpec, RelationTo,
};
use crate::render::names;

pub(crate) const COLLECTION_ACCESS: [&str; 7] =
    ["create", "read", "update", "delete", "admin", "unlock", "readVersions"];

pub(crate) const GLOBAL_ACCESS: [&str; 3] = ["read", "update", "readVersions"];

pub(crate) const COLLECTION_HOOKS: [&str; 15] = [
    "beforeOperation",
    "beforeValidate",
    "beforeChange",
    "afterChange",
    "beforeRead",
    "afterRead",
    "beforeDelete",
    "afterDelete",
    "afterOperation",
    "beforeLogin",
    "afterLogin",
    "afterLogout",
    "afterRefresh",
    "afterMe",
    "afterForgotPassword",
];

pub(crate) const GLOBAL_HOOKS: [&str; 5] =
    ["beforeValidate", "beforeChange", "afterChange", "beforeRead", "afterRead"];

const ENDPOINT_METHODS: [&str; 7] = ["get", "post", "put", "patch", "delete", "options", "head"];

/// A name used somewhere in the tree that must resolve project-wide.
#[derive(Debug, Clone)]
pub(crate) struct PendingRef {
    pub target: String,
    pub path: String,
}

/// Accumulator threaded through one validation call.
#[derive(Debug, Default)]
pub(crate) struct Walker {
    pub errors: Vec<ValidationError>,
    pub relation_refs: Vec<PendingRef>,
    pub block_refs: Vec<PendingRef>,
}

impl Walker {
    pub fn report(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Records the error if any; returns whether the check passed.
    pub fn check(&mut self, result: Option<ValidationError>) -> bool {
        match result {
            Some(error) => {
                self.report(error);
                false
            }
            None => true,
        }
    }
}

/// Plugin packages and the import names they are bound to in `payload.config.ts`.
#[derive(Debug, Default)]
struct PluginScope {
    packages: HashSet<String>,
    imports: IndexMap<String, String>,
}

/// Validates a whole project, including the project-wide reference checks.
pub fn validate_project(spec: &ProjectSpec) -> Vec<ValidationError> {
    let mut walker = Walker::default();

    walker.check(validate_package_name(spec.project_name.as_deref(), EntityKind::Project, "projectName"));
    check_database(&mut walker, spec.database.as_deref());
    if let Some(version) = spec.version.as_deref() {
        walker.check(validate_semver(Some(version), "version"));
    }
    if let Some(server_url) = spec.server_url.as_deref() {
        check_server_url(&mut walker, server_url);
    }

    let mut collection_slugs = HashSet::new();
    for (i, collection) in spec.collections.iter().enumerate() {
        walk_collection(&mut walker, collection, &format!("collections[{i}]"), &mut collection_slugs);
    }

    let mut global_slugs = HashSet::new();
    for (i, global) in spec.globals.iter().enumerate() {
        walk_global(&mut walker, global, &format!("globals[{i}]"), &mut global_slugs);
    }

    let mut block_slugs = HashSet::new();
    for (i, block) in spec.blocks.iter().enumerate() {
        walk_block_module(&mut walker, block, &format!("blocks[{i}]"), &mut block_slugs);
    }

    let mut plugins = PluginScope::default();
    for (i, plugin) in spec.plugins.iter().enumerate() {
        walk_plugin(&mut walker, plugin, &format!("plugins[{i}]"), &mut plugins);
    }

    references::check_project(spec, &mut walker);

    debug!("Validated project spec: {} error(s)", walker.errors.len());
    walker.errors
}

/// Validates one collection on its own. Project-wide references are not resolved.
pub fn validate_collection(spec: &CollectionSpec) -> Vec<ValidationError> {
    let mut walker = Walker::default();
    walk_collection(&mut walker, spec, "collection", &mut HashSet::new());
    walker.errors
}

/// Validates one global on its own. Project-wide references are not resolved.
pub fn validate_global(spec: &GlobalSpec) -> Vec<ValidationError> {
    let mut walker = Walker::default();
    walk_global(&mut walker, spec, "global", &mut HashSet::new());
    walker.errors
}

/// Validates one block on its own. Project-wide references are not resolved.
pub fn validate_block(spec: &BlockSpec) -> Vec<ValidationError> {
    let mut walker = Walker::default();
    walk_block_module(&mut walker, spec, "block", &mut HashSet::new());
    walker.errors
}

/// Validates one field (and everything nested in it) on its own.
pub fn validate_field(spec: &FieldSpec) -> Vec<ValidationError> {
    let mut walker = Walker::default();
    walk_field(&mut walker, spec, "field", &mut HashSet::new());
    walker.errors
}

fn check_database(walker: &mut Walker, database: Option<&str>) {
    let supported = Database::ALL.map(|db| db.as_str()).join(", ");
    match database.filter(|db| !db.is_empty()) {
        None => walker.report(
            ValidationError::new(MISSING_DATABASE, "Database is not set", "database")
                .with_suggestion(format!("Use one of: {supported}")),
        ),
        Some(db) if Database::from_tag(db).is_none() => walker.report(
            ValidationError::new(INVALID_DATABASE, format!("Unsupported database '{db}'"), "database")
                .with_suggestion(format!("Use one of: {supported}")),
        ),
        Some(_) => {}
    }
}

fn check_server_url(walker: &mut Walker, server_url: &str) {
    let valid = url::Url::parse(server_url)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false);
    if !valid {
        walker.report(
            ValidationError::new(
                INVALID_SERVER_URL,
                format!("Invalid server URL '{server_url}'"),
                "serverUrl",
            )
            .with_suggestion("Use an absolute http(s) URL, e.g. 'http://localhost:3000'"),
        );
    }
}

/// Reports a repeated name within one scope; returns whether it was new.
fn check_unique(
    walker: &mut Walker,
    seen: &mut HashSet<String>,
    value: Option<&str>,
    code: &str,
    what: &str,
    path: &str,
) -> bool {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return true;
    };
    if seen.insert(value.to_string()) {
        return true;
    }
    walker.report(
        ValidationError::new(code, format!("Duplicate {what} '{value}'"), path)
            .with_suggestion(format!("Rename this {what}; it must be unique in its scope")),
    );
    false
}

fn walk_collection(
    walker: &mut Walker,
    collection: &CollectionSpec,
    path: &str,
    seen: &mut HashSet<String>,
) {
    let slug_path = format!("{path}.slug");
    let slug_ok =
        walker.check(validate_slug(collection.slug.as_deref(), EntityKind::Collection, &slug_path));
    check_unique(
        walker,
        seen,
        collection.slug.as_deref(),
        DUPLICATE_COLLECTION_SLUG,
        "collection slug",
        &slug_path,
    );
    let mut export = None;
    if let Some(slug) = collection.slug.as_deref().filter(|_| slug_ok) {
        let name = names::collection_export(slug);
        if check_export_name(walker, slug, &name, &slug_path) {
            export = Some(name);
        }
    }

    if collection.fields.is_empty() {
        walker.report(
            ValidationError::new(
                MISSING_COLLECTION_FIELDS,
                "Collection must declare at least one field",
                format!("{path}.fields"),
            )
            .with_suggestion("Add a field, e.g. { name: 'title', type: 'text' }"),
        );
    } else {
        walk_fields(walker, &collection.fields, &format!("{path}.fields"));
    }

    walk_access(walker, &collection.access, &COLLECTION_ACCESS, path);
    walk_hooks(walker, &collection.hooks, &COLLECTION_HOOKS, path);
    for (i, endpoint) in collection.endpoints.iter().enumerate() {
        walk_endpoint(walker, endpoint, &format!("{path}.endpoints[{i}]"));
    }
    walk_indexes(walker, collection, path);

    if let Some(export) = export {
        check_own_references(walker, &export, &collection.access, &collection.hooks, &collection.endpoints, path);
    }
}

fn walk_global(walker: &mut Walker, global: &GlobalSpec, path: &str, seen: &mut HashSet<String>) {
    let slug_path = format!("{path}.slug");
    let slug_ok =
        walker.check(validate_identifier_slug(global.slug.as_deref(), EntityKind::Global, &slug_path));
    check_unique(walker, seen, global.slug.as_deref(), DUPLICATE_GLOBAL_SLUG, "global slug", &slug_path);
    let mut export = None;
    if let Some(slug) = global.slug.as_deref().filter(|_| slug_ok) {
        let name = names::global_export(slug);
        if check_export_name(walker, slug, &name, &slug_path) {
            export = Some(name);
        }
    }

    if global.fields.is_empty() {
        walker.report(ValidationError::new(
            MISSING_GLOBAL_FIELDS,
            "Global must declare at least one field",
            format!("{path}.fields"),
        ));
    } else {
        walk_fields(walker, &global.fields, &format!("{path}.fields"));
    }

    walk_access(walker, &global.access, &GLOBAL_ACCESS, path);
    walk_hooks(walker, &global.hooks, &GLOBAL_HOOKS, path);

    if let Some(export) = export {
        check_own_references(walker, &export, &global.access, &global.hooks, &[], path);
    }
}

/// A top-level block, rendered as its own module under `src/blocks/`.
fn walk_block_module(walker: &mut Walker, block: &BlockSpec, path: &str, seen: &mut HashSet<String>) {
    walk_block(walker, block, path, seen);
    if let Some(slug) = block.slug.as_deref().filter(|slug| is_slug(slug)) {
        check_export_name(walker, slug, &names::block_export(slug), &format!("{path}.slug"));
    }
}

/// The slug of a module becomes its export name, which has to be a TypeScript
/// identifier. A leading digit or a slug made only of separators breaks it.
fn check_export_name(walker: &mut Walker, slug: &str, export: &str, path: &str) -> bool {
    if is_identifier(export) {
        return true;
    }
    let message = if export.is_empty() {
        format!("Slug '{slug}' produces an empty export name")
    } else {
        format!("Slug '{slug}' produces the export name '{export}', which is not a valid identifier")
    };
    walker.report(
        ValidationError::new(INVALID_EXPORT_NAME, message, path)
            .with_suggestion("Start the slug with a letter"),
    );
    false
}

/// Access functions, hooks and endpoint handlers are imported by bare name into
/// the module that exports `export`, so none of them may reuse that name.
fn check_own_references(
    walker: &mut Walker,
    export: &str,
    access: &IndexMap<String, AccessRule>,
    hooks: &IndexMap<String, Vec<HookRef>>,
    endpoints: &[EndpointSpec],
    path: &str,
) {
    let mut clashes = Vec::new();
    for (operation, rule) in access {
        if rule.reference() == Some(export) {
            clashes.push(format!("{path}.access.{operation}"));
        }
    }
    for (kind, refs) in hooks {
        for (i, hook) in refs.iter().enumerate() {
            if hook.reference() == Some(export) {
                clashes.push(format!("{path}.hooks.{kind}[{i}]"));
            }
        }
    }
    for (i, endpoint) in endpoints.iter().enumerate() {
        if endpoint.handler.as_ref().and_then(HookRef::reference) == Some(export) {
            clashes.push(format!("{path}.endpoints[{i}].handler"));
        }
    }

    for clash_path in clashes {
        walker.report(
            ValidationError::new(
                REFERENCE_NAME_CONFLICT,
                format!("'{export}' is already the export name of this module"),
                clash_path,
            )
            .with_suggestion("Rename the function, e.g. with a verb prefix such as 'can' or 'on'"),
        );
    }
}

fn walk_block(walker: &mut Walker, block: &BlockSpec, path: &str, seen: &mut HashSet<String>) {
    let slug_path = format!("{path}.slug");
    walker.check(validate_slug(block.slug.as_deref(), EntityKind::Block, &slug_path));
    check_unique(walker, seen, block.slug.as_deref(), DUPLICATE_BLOCK_SLUG, "block slug", &slug_path);
    walk_fields(walker, &block.fields, &format!("{path}.fields"));
}

fn walk_plugin(walker: &mut Walker, plugin: &PluginEntry, path: &str, scope: &mut PluginScope) {
    match plugin {
        PluginEntry::Package(name) => {
            if walker.check(validate_package_name(Some(name.as_str()), EntityKind::Plugin, path)) {
                check_plugin_import(walker, scope, name, path);
            }
        }
        PluginEntry::Configured(config) => {
            let package_path = format!("{path}.package");
            let package = config.package.as_deref();
            if walker.check(validate_package_name(package, EntityKind::Plugin, &package_path)) {
                check_plugin_import(walker, scope, package.unwrap_or_default(), &package_path);
            }
            if let Some(version) = config.version.as_deref() {
                walker.check(validate_semver(Some(version), &format!("{path}.version")));
            }
        }
        PluginEntry::Invalid(_) => walker.report(
            ValidationError::new(
                INVALID_PLUGIN_ENTRY,
                "Plugin must be a package name or an object with a 'package' key",
                path,
            )
            .with_suggestion("Use '@payloadcms/plugin-seo' or { package: '@payloadcms/plugin-seo' }"),
        ),
    }
}

/// Each plugin is imported once into `payload.config.ts` under the name
/// [`names::plugin_import`] derives from its package.
fn check_plugin_import(walker: &mut Walker, scope: &mut PluginScope, package: &str, path: &str) {
    if !scope.packages.insert(package.to_string()) {
        walker.report(
            ValidationError::new(DUPLICATE_PLUGIN, format!("Plugin '{package}' is listed more than once"), path)
                .with_suggestion("Remove the repeated entry"),
        );
        return;
    }

    let import = names::plugin_import(package);
    if !is_identifier(&import) {
        walker.report(
            ValidationError::new(
                INVALID_PLUGIN_IMPORT,
                format!("Plugin '{package}' would be imported as '{import}', which is not a valid identifier"),
                path,
            )
            .with_suggestion("Use a package whose name starts with a letter"),
        );
        return;
    }

    if let Some(other) = scope.imports.get(&import) {
        walker.report(
            ValidationError::new(
                DUPLICATE_PLUGIN,
                format!("Plugins '{other}' and '{package}' would both be imported as '{import}'"),
                path,
            )
            .with_suggestion("Keep only one of the two plugins"),
        );
        return;
    }
    scope.imports.insert(import, package.to_string());
}

/// Validates one sibling list. The name set is local to this level.
pub(crate) fn walk_fields(walker: &mut Walker, fields: &[FieldSpec], path: &str) {
    let mut seen = HashSet::new();
    for (i, field) in fields.iter().enumerate() {
        walk_field(walker, field, &format!("{path}[{i}]"), &mut seen);
    }
}

fn walk_field(walker: &mut Walker, field: &FieldSpec, path: &str, siblings: &mut HashSet<String>) {
    let kind = field.kind();
    let name = field.name.as_deref().filter(|n| !n.is_empty());
    let name_optional = kind.is_some_and(|k| k.is_presentational());

    if name.is_some() || !name_optional {
        let name_path = format!("{path}.name");
        if walker.check(validate_identifier_name(name, EntityKind::Field, &name_path)) {
            check_unique(walker, siblings, name, DUPLICATE_FIELD_NAME, "field name", &name_path);
        }
    }

    let Some(kind) = kind else {
        report_field_type(walker, field.field_type.as_deref(), path);
        return;
    };

    (kind.rules().validate)(walker, field, path);
}

fn report_field_type(walker: &mut Walker, field_type: Option<&str>, path: &str) {
    let type_path = format!("{path}.type");
    let valid = FieldKind::ALL.map(|k| k.as_str()).join(", ");
    match field_type.filter(|t| !t.is_empty()) {
        None => walker.report(
            ValidationError::new(MISSING_FIELD_TYPE, "Field is missing a type", type_path)
                .with_suggestion(format!("Use one of: {valid}")),
        ),
        Some(tag) => {
            let suggestion = match FieldKind::closest(tag) {
                Some(kind) => format!("Did you mean '{kind}'?"),
                None => format!("Use one of: {valid}"),
            };
            walker.report(
                ValidationError::new(INVALID_FIELD_TYPE, format!("Unknown field type '{tag}'"), type_path)
                    .with_suggestion(suggestion),
            );
        }
    }
}

pub(crate) fn check_leaf(_walker: &mut Walker, _field: &FieldSpec, _path: &str) {}

pub(crate) fn check_optional_fields(walker: &mut Walker, field: &FieldSpec, path: &str) {
    walk_fields(walker, &field.fields, &format!("{path}.fields"));
}

pub(crate) fn check_required_fields(walker: &mut Walker, field: &FieldSpec, path: &str) {
    let fields_path = format!("{path}.fields");
    if field.fields.is_empty() {
        walker.report(
            ValidationError::new(
                MISSING_NESTED_FIELDS,
                format!("A '{}' field must contain at least one field", field.field_type.as_deref().unwrap_or_default()),
                fields_path,
            )
            .with_suggestion("Add nested fields or remove this field"),
        );
        return;
    }
    walk_fields(walker, &field.fields, &fields_path);
}

pub(crate) fn check_collapsible(walker: &mut Walker, field: &FieldSpec, path: &str) {
    if field.label.as_deref().is_none_or(str::is_empty) {
        walker.report(ValidationError::new(
            MISSING_FIELD_LABEL,
            "A 'collapsible' field must have a label",
            format!("{path}.label"),
        ));
    }
    check_required_fields(walker, field, path);
}

pub(crate) fn check_blocks(walker: &mut Walker, field: &FieldSpec, path: &str) {
    let blocks_path = format!("{path}.blocks");
    if field.blocks.is_empty() {
        walker.report(
            ValidationError::new(
                MISSING_BLOCKS_ARRAY,
                "A 'blocks' field must declare at least one block",
                blocks_path,
            )
            .with_suggestion("Add an inline block ({ slug, fields }) or the slug of a top-level block"),
        );
        return;
    }

    let mut seen = HashSet::new();
    for (i, entry) in field.blocks.iter().enumerate() {
        let entry_path = format!("{blocks_path}[{i}]");
        match entry {
            BlockEntry::Reference(slug) => {
                let slug = Some(slug.as_str());
                if walker.check(validate_slug(slug, EntityKind::Block, &entry_path))
                    && check_unique(walker, &mut seen, slug, DUPLICATE_BLOCK_SLUG, "block slug", &entry_path)
                {
                    walker.block_refs.push(PendingRef { target: slug.unwrap_or_default().to_string(), path: entry_path });
                }
            }
            BlockEntry::Inline(block) => walk_block(walker, block, &entry_path, &mut seen),
            BlockEntry::Invalid(_) => walker.report(ValidationError::new(
                INVALID_BLOCK_ENTRY,
                "Block entries must be a block object or a block slug",
                entry_path,
            )),
        }
    }
}

pub(crate) fn check_tabs(walker: &mut Walker, field: &FieldSpec, path: &str) {
    let tabs_path = format!("{path}.tabs");
    if field.tabs.is_empty() {
        walker.report(ValidationError::new(
            MISSING_TABS_ARRAY,
            "A 'tabs' field must declare at least one tab",
            tabs_path,
        ));
        return;
    }

    for (i, tab) in field.tabs.iter().enumerate() {
        let tab_path = format!("{tabs_path}[{i}]");
        let label = tab.label.as_deref().filter(|l| !l.is_empty());
        let name = tab.name.as_deref().filter(|n| !n.is_empty());
        if label.is_none() && name.is_none() {
            walker.report(
                ValidationError::new(MISSING_TAB_LABEL, "Tab must have a label or a name", &tab_path)
                    .with_suggestion("Add a 'label' for display or a 'name' to store the tab's data"),
            );
        }
        if name.is_some() {
            walker.check(validate_identifier_name(name, EntityKind::Tab, &format!("{tab_path}.name")));
        }
        walk_fields(walker, &tab.fields, &format!("{tab_path}.fields"));
    }
}

pub(crate) fn check_options(walker: &mut Walker, field: &FieldSpec, path: &str) {
    let options_path = format!("{path}.options");
    if field.options.is_empty() {
        walker.report(
            ValidationError::new(
                MISSING_FIELD_OPTIONS,
                format!("A '{}' field must declare at least one option", field.field_type.as_deref().unwrap_or_default()),
                options_path,
            )
            .with_suggestion("Add options, e.g. [{ label: 'Draft', value: 'draft' }]"),
        );
        return;
    }

    for (i, option) in field.options.iter().enumerate() {
        if let OptionEntry::Invalid(_) = option {
            walker.report(
                ValidationError::new(
                    INVALID_FIELD_OPTION,
                    "Option must be an object with string 'label' and 'value'",
                    format!("{options_path}[{i}]"),
                )
                .with_suggestion("Use { label: 'Draft', value: 'draft' }"),
            );
        }
    }
}

pub(crate) fn check_relation(walker: &mut Walker, field: &FieldSpec, path: &str) {
    let relation_path = format!("{path}.relationTo");
    let missing = || {
        ValidationError::new(
            MISSING_RELATION_TO,
            format!("A '{}' field must declare 'relationTo'", field.field_type.as_deref().unwrap_or_default()),
            relation_path.clone(),
        )
        .with_suggestion("Set relationTo to a collection slug, e.g. 'users'")
    };
    let invalid = || {
        ValidationError::new(
            INVALID_RELATION_TO,
            "'relationTo' must be a collection slug or a list of collection slugs",
            relation_path.clone(),
        )
    };

    let targets = match &field.relation_to {
        None => return walker.report(missing()),
        Some(RelationTo::One(slug)) if slug.is_empty() => return walker.report(missing()),
        Some(RelationTo::Many(slugs)) if slugs.is_empty() => return walker.report(missing()),
        Some(RelationTo::Many(slugs)) if slugs.iter().any(String::is_empty) => {
            return walker.report(invalid());
        }
        Some(RelationTo::Invalid(_)) => return walker.report(invalid()),
        Some(relation) => relation.targets(),
    };

    for target in targets {
        walker
            .relation_refs
            .push(PendingRef { target: target.to_string(), path: relation_path.clone() });
    }
}

fn walk_access(
    walker: &mut Walker,
    access: &IndexMap<String, AccessRule>,
    allowed: &[&str],
    path: &str,
) {
    for (operation, rule) in access {
        let rule_path = format!("{path}.access.{operation}");
        if !allowed.contains(&operation.as_str()) {
            walker.report(
                ValidationError::new(
                    INVALID_ACCESS_OPERATION,
                    format!("Unknown access operation '{operation}'"),
                    &rule_path,
                )
                .with_suggestion(format!("Use one of: {}", allowed.join(", "))),
            );
            continue;
        }
        match rule {
            AccessRule::Boolean(_) => {}
            AccessRule::Reference(name) if is_identifier(name) => {}
            AccessRule::Reference(name) => walker.report(ValidationError::new(
                INVALID_ACCESS_REFERENCE,
                format!("Access function name '{name}' is not a valid identifier"),
                rule_path,
            )),
            AccessRule::Inline { expression } if !expression.trim().is_empty() => {}
            AccessRule::Inline { .. } | AccessRule::Invalid(_) => walker.report(
                ValidationError::new(
                    INVALID_ACCESS_RULE,
                    "Access rule must be a boolean, a function name or { expression }",
                    rule_path,
                )
                .with_suggestion("Use true, 'isAdmin' or { expression: '({ req }) => Boolean(req.user)' }"),
            ),
        }
    }
}

fn walk_hooks(
    walker: &mut Walker,
    hooks: &IndexMap<String, Vec<HookRef>>,
    allowed: &[&str],
    path: &str,
) {
    for (kind, refs) in hooks {
        let kind_path = format!("{path}.hooks.{kind}");
        if !allowed.contains(&kind.as_str()) {
            walker.report(
                ValidationError::new(INVALID_HOOK_KIND, format!("Unknown hook '{kind}'"), &kind_path)
                    .with_suggestion(format!("Use one of: {}", allowed.join(", "))),
            );
            continue;
        }
        for (i, hook) in refs.iter().enumerate() {
            check_hook_ref(walker, hook, &format!("{kind_path}[{i}]"));
        }
    }
}

fn check_hook_ref(walker: &mut Walker, hook: &HookRef, path: &str) {
    let valid = match hook {
        HookRef::Reference(name) => is_identifier(name),
        HookRef::Inline { expression } => !expression.trim().is_empty(),
        HookRef::Invalid(_) => false,
    };
    if !valid {
        walker.report(
            ValidationError::new(
                INVALID_HOOK_REFERENCE,
                "Hook must be a function name or { expression }",
                path,
            )
            .with_suggestion("Use a camelCase function name, e.g. 'populateSlug'"),
        );
    }
}

fn walk_endpoint(walker: &mut Walker, endpoint: &EndpointSpec, path: &str) {
    if !endpoint.path.as_deref().is_some_and(|p| p.starts_with('/')) {
        walker.report(
            ValidationError::new(
                INVALID_ENDPOINT_PATH,
                "Endpoint path must start with '/'",
                format!("{path}.path"),
            )
            .with_suggestion("Use a path such as '/:id/publish'"),
        );
    }

    let method = endpoint.method.as_deref().unwrap_or_default().to_ascii_lowercase();
    if !ENDPOINT_METHODS.contains(&method.as_str()) {
        walker.report(
            ValidationError::new(
                INVALID_ENDPOINT_METHOD,
                format!("Unsupported endpoint method '{method}'"),
                format!("{path}.method"),
            )
            .with_suggestion(format!("Use one of: {}", ENDPOINT_METHODS.join(", "))),
        );
    }

    match &endpoint.handler {
        Some(handler) => check_hook_ref(walker, handler, &format!("{path}.handler")),
        None => walker.report(ValidationError::new(
            MISSING_ENDPOINT_HANDLER,
            "Endpoint must declare a handler",
            format!("{path}.handler"),
        )),
    }
}

/// Index fields may use dotted paths; the first segment must be a top-level field.
fn walk_indexes(walker: &mut Walker, collection: &CollectionSpec, path: &str) {
    let top_level: HashSet<&str> =
        collection.fields.iter().filter_map(|f| f.name.as_deref()).collect();

    for (i, index) in collection.indexes.iter().enumerate() {
        let index_path = format!("{path}.indexes[{i}].fields");
        if index.fields.is_empty() {
            walker.report(ValidationError::new(
                MISSING_INDEX_FIELDS,
                "Index must name at least one field",
                index_path,
            ));
            continue;
        }
        for (j, name) in index.fields.iter().enumerate() {
            let root = name.split('.').next().unwrap_or_default();
            if !top_level.contains(root) {
                walker.report(ValidationError::new(
                    UNKNOWN_INDEX_FIELD,
                    format!("Index refers to unknown field '{name}'"),
                    format!("{index_path}[{j}]"),
                ));
            }
        }
    }
}
