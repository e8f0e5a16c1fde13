//! Collection, global and block modules.
//!
//! Each module holds one exported config object. Keys follow a fixed order
//! (`slug, labels, admin, access, fields`, then kind-specific keys) and the
//! imports a module needs are listed once, in the order they first appear.

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;
use serde_json::json;

use super::field::{bag_literal, block_literal, fields_literal, labels_literal};
use super::literal::{push, push_opt, Js, Props};
use super::names;
use super::templates::ENTITY_MODULE;
use super::TemplateRenderer;
use crate::error::Result;
use crate::model::{AccessRule, BlockEntry, BlockSpec, CollectionSpec, FieldSpec, GlobalSpec, HookRef};

/// One generated file, path relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedFile {
    pub path: String,
    pub content: String,
}

/// Import lines keyed by the imported name.
#[derive(Debug, Default)]
struct Imports(IndexMap<String, String>);

impl Imports {
    fn add(&mut self, name: &str, module: &str) {
        self.0
            .entry(name.to_string())
            .or_insert_with(|| format!("import {{ {name} }} from '{module}'"));
    }

    fn add_access(&mut self, access: &IndexMap<String, AccessRule>) {
        for name in access.values().filter_map(AccessRule::reference) {
            self.add(name, &format!("../access/{name}"));
        }
    }

    fn add_hooks<'a>(&mut self, hooks: impl IntoIterator<Item = &'a HookRef>) {
        for name in hooks.into_iter().filter_map(HookRef::reference) {
            self.add(name, &format!("../hooks/{name}"));
        }
    }

    /// Block references anywhere below `fields`; `dir` is the blocks directory
    /// relative to the importing module.
    fn add_blocks(&mut self, fields: &[FieldSpec], dir: &str) {
        for field in fields {
            for entry in &field.blocks {
                match entry {
                    BlockEntry::Reference(slug) => {
                        let export = names::block_export(slug);
                        self.add(&export, &format!("{dir}/{export}"));
                    }
                    BlockEntry::Inline(block) => self.add_blocks(&block.fields, dir),
                    BlockEntry::Invalid(_) => {}
                }
            }
            self.add_blocks(&field.fields, dir);
            for tab in &field.tabs {
                self.add_blocks(&tab.fields, dir);
            }
        }
    }

    fn into_lines(self) -> Vec<String> {
        self.0.into_values().collect()
    }
}

fn access_literal(access: &IndexMap<String, AccessRule>) -> Option<Js> {
    let props: Props = access
        .iter()
        .filter_map(|(operation, rule)| {
            let value = match rule {
                AccessRule::Boolean(allowed) => Js::raw(format!("() => {allowed}")),
                AccessRule::Reference(name) => Js::raw(name),
                AccessRule::Inline { expression } => Js::raw(expression),
                AccessRule::Invalid(_) => return None,
            };
            Some((operation.clone(), value))
        })
        .collect();
    (!props.is_empty()).then_some(Js::Object(props))
}

fn hook_literal(hook: &HookRef) -> Option<Js> {
    match hook {
        HookRef::Reference(name) => Some(Js::raw(name)),
        HookRef::Inline { expression } => Some(Js::raw(expression)),
        HookRef::Invalid(_) => None,
    }
}

fn hooks_literal(hooks: &IndexMap<String, Vec<HookRef>>) -> Option<Js> {
    let props: Props = hooks
        .iter()
        .map(|(kind, refs)| (kind.clone(), Js::Array(refs.iter().filter_map(hook_literal).collect())))
        .collect();
    (!props.is_empty()).then_some(Js::Object(props))
}

fn opt_json(value: &Option<serde_json::Value>) -> Option<Js> {
    value.as_ref().map(Js::from_json)
}

fn module(
    engine: &dyn TemplateRenderer,
    path: String,
    config_type: &str,
    export_name: &str,
    imports: Imports,
    config: Js,
) -> Result<RenderedFile> {
    debug!("Rendering {path}");
    let context = json!({
        "config_type": config_type,
        "export_name": export_name,
        "imports": imports.into_lines(),
        "config": config.render(0),
    });
    let content = engine.render(ENTITY_MODULE, &context)?;
    Ok(RenderedFile { path, content })
}

pub fn collection_literal(spec: &CollectionSpec) -> Js {
    let mut props = Props::new();
    push(&mut props, "slug", Js::str(spec.slug.as_deref().unwrap_or_default()));
    push_opt(&mut props, "labels", spec.labels.as_ref().and_then(labels_literal));
    if !spec.admin.is_empty() {
        push(&mut props, "admin", bag_literal(&spec.admin));
    }
    push_opt(&mut props, "access", access_literal(&spec.access));
    push(&mut props, "fields", fields_literal(&spec.fields));
    push_opt(&mut props, "auth", opt_json(&spec.auth));
    push_opt(&mut props, "upload", opt_json(&spec.upload));
    push_opt(&mut props, "versions", opt_json(&spec.versions));
    push_opt(&mut props, "timestamps", spec.timestamps.map(Js::Bool));
    push_opt(&mut props, "hooks", hooks_literal(&spec.hooks));

    if !spec.endpoints.is_empty() {
        let endpoints = spec
            .endpoints
            .iter()
            .map(|endpoint| {
                let mut endpoint_props = Props::new();
                push(&mut endpoint_props, "path", Js::str(endpoint.path.as_deref().unwrap_or_default()));
                push(
                    &mut endpoint_props,
                    "method",
                    Js::str(endpoint.method.as_deref().unwrap_or_default().to_ascii_lowercase()),
                );
                push_opt(&mut endpoint_props, "handler", endpoint.handler.as_ref().and_then(hook_literal));
                Js::Object(endpoint_props)
            })
            .collect();
        push(&mut props, "endpoints", Js::Array(endpoints));
    }

    if !spec.indexes.is_empty() {
        let indexes = spec
            .indexes
            .iter()
            .map(|index| {
                let mut index_props = Props::new();
                push(&mut index_props, "fields", Js::Array(index.fields.iter().map(Js::str).collect()));
                push_opt(&mut index_props, "unique", index.unique.map(Js::Bool));
                Js::Object(index_props)
            })
            .collect();
        push(&mut props, "indexes", Js::Array(indexes));
    }

    Js::Object(props)
}

pub fn global_literal(spec: &GlobalSpec) -> Js {
    let mut props = Props::new();
    push(&mut props, "slug", Js::str(spec.slug.as_deref().unwrap_or_default()));
    push_opt(&mut props, "label", spec.label.as_deref().map(Js::str));
    if !spec.admin.is_empty() {
        push(&mut props, "admin", bag_literal(&spec.admin));
    }
    push_opt(&mut props, "access", access_literal(&spec.access));
    push(&mut props, "fields", fields_literal(&spec.fields));
    push_opt(&mut props, "versions", opt_json(&spec.versions));
    push_opt(&mut props, "hooks", hooks_literal(&spec.hooks));
    Js::Object(props)
}

/// Renders `src/collections/<Export>.ts`.
pub fn render_collection(engine: &dyn TemplateRenderer, spec: &CollectionSpec) -> Result<RenderedFile> {
    let export_name = names::collection_export(spec.slug.as_deref().unwrap_or_default());

    let mut imports = Imports::default();
    imports.add_access(&spec.access);
    imports.add_blocks(&spec.fields, "../blocks");
    imports.add_hooks(spec.hooks.values().flatten());
    imports.add_hooks(spec.endpoints.iter().filter_map(|e| e.handler.as_ref()));

    module(
        engine,
        format!("src/collections/{export_name}.ts"),
        "CollectionConfig",
        &export_name,
        imports,
        collection_literal(spec),
    )
}

/// Renders `src/globals/<Export>.ts`.
pub fn render_global(engine: &dyn TemplateRenderer, spec: &GlobalSpec) -> Result<RenderedFile> {
    let export_name = names::global_export(spec.slug.as_deref().unwrap_or_default());

    let mut imports = Imports::default();
    imports.add_access(&spec.access);
    imports.add_blocks(&spec.fields, "../blocks");
    imports.add_hooks(spec.hooks.values().flatten());

    module(
        engine,
        format!("src/globals/{export_name}.ts"),
        "GlobalConfig",
        &export_name,
        imports,
        global_literal(spec),
    )
}

/// Renders `src/blocks/<Export>.ts`.
pub fn render_block(engine: &dyn TemplateRenderer, spec: &BlockSpec) -> Result<RenderedFile> {
    let export_name = names::block_export(spec.slug.as_deref().unwrap_or_default());

    let mut imports = Imports::default();
    imports.add_blocks(&spec.fields, ".");

    module(
        engine,
        format!("src/blocks/{export_name}.ts"),
        "Block",
        &export_name,
        imports,
        block_literal(spec),
    )
}
