//! Project-wide checks that need the whole tree: the auth collection,
//! relation targets, block references and generated module names.

use indexmap::IndexMap;
use std::collections::HashSet;

use super::codes::*;
use super::identifiers::is_identifier;
use super::tree::Walker;
use super::ValidationError;
use crate::constants::AUTH_COLLECTION_SLUG;
use crate::model::ProjectSpec;
use crate::render::names;

pub(crate) fn check_project(spec: &ProjectSpec, walker: &mut Walker) {
    check_auth_collection(spec, walker);
    check_relation_targets(spec, walker);
    check_block_references(spec, walker);
    check_export_names(spec, walker);
    check_reference_names(spec, walker);
}

fn check_auth_collection(spec: &ProjectSpec, walker: &mut Walker) {
    if !spec.requires_auth() {
        return;
    }
    let has_users =
        spec.collections.iter().any(|c| c.slug.as_deref() == Some(AUTH_COLLECTION_SLUG));
    if !has_users {
        walker.report(
            ValidationError::new(
                MISSING_AUTH_COLLECTION,
                format!("Authentication is enabled but there is no '{AUTH_COLLECTION_SLUG}' collection"),
                "collections",
            )
            .with_suggestion(format!(
                "Add a collection with slug '{AUTH_COLLECTION_SLUG}' or disable authentication"
            )),
        );
    }
}

fn check_relation_targets(spec: &ProjectSpec, walker: &mut Walker) {
    let known: HashSet<&str> = spec.collections.iter().filter_map(|c| c.slug.as_deref()).collect();
    let listing = known_list(spec.collections.iter().filter_map(|c| c.slug.as_deref()));

    for pending in std::mem::take(&mut walker.relation_refs) {
        if known.contains(pending.target.as_str()) {
            continue;
        }
        walker.report(
            ValidationError::new(
                UNKNOWN_RELATION_TARGET,
                format!("'relationTo' refers to unknown collection '{}'", pending.target),
                pending.path,
            )
            .with_suggestion(format!("Known collections: {listing}")),
        );
    }
}

fn check_block_references(spec: &ProjectSpec, walker: &mut Walker) {
    let known: HashSet<&str> = spec.blocks.iter().filter_map(|b| b.slug.as_deref()).collect();
    let listing = known_list(spec.blocks.iter().filter_map(|b| b.slug.as_deref()));

    for pending in std::mem::take(&mut walker.block_refs) {
        if known.contains(pending.target.as_str()) {
            continue;
        }
        walker.report(
            ValidationError::new(
                UNKNOWN_BLOCK_REFERENCE,
                format!("Block '{}' is not declared in the top-level blocks list", pending.target),
                pending.path,
            )
            .with_suggestion(format!("Known blocks: {listing}")),
        );
    }
}

/// Every generated module is imported into `payload.config.ts`, so export
/// names must not collide across collections, globals and blocks.
fn check_export_names(spec: &ProjectSpec, walker: &mut Walker) {
    let mut entities = Vec::new();
    for (i, c) in spec.collections.iter().enumerate() {
        if let Some(slug) = c.slug.as_deref() {
            entities.push(("collection", slug, names::collection_export(slug), format!("collections[{i}].slug")));
        }
    }
    for (i, g) in spec.globals.iter().enumerate() {
        if let Some(slug) = g.slug.as_deref() {
            entities.push(("global", slug, names::global_export(slug), format!("globals[{i}].slug")));
        }
    }
    for (i, b) in spec.blocks.iter().enumerate() {
        if let Some(slug) = b.slug.as_deref() {
            entities.push(("block", slug, names::block_export(slug), format!("blocks[{i}].slug")));
        }
    }

    let mut seen: IndexMap<String, (&str, &str)> = IndexMap::new();
    for (kind, slug, export, path) in entities {
        // Malformed exports were reported by the tree walk.
        if !is_identifier(&export) {
            continue;
        }
        match seen.get(&export) {
            Some(&(prev_kind, prev_slug)) if (prev_kind, prev_slug) != (kind, slug) => {
                walker.report(
                    ValidationError::new(
                        DUPLICATE_EXPORT_NAME,
                        format!(
                            "{kind} '{slug}' and {prev_kind} '{prev_slug}' would both be exported as '{export}'"
                        ),
                        path,
                    )
                    .with_suggestion("Rename one of the slugs"),
                );
            }
            Some(_) => {}
            None => {
                seen.insert(export, (kind, slug));
            }
        }
    }
}

/// Access functions and hooks are imported by bare name, possibly into the same
/// module, so one name cannot denote both. Top-level blocks are imported the
/// same way into every module whose fields reference them.
fn check_reference_names(spec: &ProjectSpec, walker: &mut Walker) {
    let mut access = HashSet::new();
    let mut hooks = HashSet::new();

    for c in &spec.collections {
        access.extend(c.access.values().filter_map(|rule| rule.reference()));
        hooks.extend(c.hooks.values().flatten().filter_map(|hook| hook.reference()));
        hooks.extend(c.endpoints.iter().filter_map(|e| e.handler.as_ref()?.reference()));
    }
    for g in &spec.globals {
        access.extend(g.access.values().filter_map(|rule| rule.reference()));
        hooks.extend(g.hooks.values().flatten().filter_map(|hook| hook.reference()));
    }

    let mut conflicts: Vec<&str> = access.intersection(&hooks).copied().collect();
    conflicts.sort_unstable();
    for name in conflicts {
        walker.report(
            ValidationError::new(
                REFERENCE_NAME_CONFLICT,
                format!("'{name}' is used both as an access function and as a hook"),
                "collections",
            )
            .with_suggestion("Give the access function and the hook different names"),
        );
    }

    let block_exports: HashSet<String> =
        spec.blocks.iter().filter_map(|b| b.slug.as_deref()).map(names::block_export).collect();
    let mut shadowing: Vec<&str> =
        access.union(&hooks).copied().filter(|name| block_exports.contains(*name)).collect();
    shadowing.sort_unstable();
    for name in shadowing {
        walker.report(
            ValidationError::new(
                REFERENCE_NAME_CONFLICT,
                format!("'{name}' is used both as a function name and as a block export"),
                "blocks",
            )
            .with_suggestion("Rename the function"),
        );
    }
}

fn known_list<'a>(slugs: impl Iterator<Item = &'a str>) -> String {
    let listing = slugs.collect::<Vec<_>>().join(", ");
    if listing.is_empty() {
        "(none)".to_string()
    } else {
        listing
    }
}
