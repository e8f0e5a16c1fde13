//! Project-level files: config entry point, manifest, env template, README
//! and stubs for every referenced access function or hook.

use indexmap::{IndexMap, IndexSet};
use serde_json::json;

use super::entity::RenderedFile;
use super::literal::Js;
use super::names;
use super::templates::{
    ACCESS_STUB, ENV_TEMPLATE, GITIGNORE, HANDLER_STUB, HOOK_STUB, PACKAGE_JSON, PAYLOAD_CONFIG,
    README, TSCONFIG,
};
use super::TemplateRenderer;
use crate::constants::{AUTH_COLLECTION_SLUG, PAYLOAD_VERSION};
use crate::error::Result;
use crate::model::{Database, HookRef, ProjectSpec};

/// Commands a user runs inside a freshly generated project.
pub const SETUP_STEPS: [&str; 3] = ["cp .env.example .env", "npm install", "npm run dev"];

pub fn admin_url(spec: &ProjectSpec) -> String {
    format!("{}/admin", spec.server_url().trim_end_matches('/'))
}

fn database(spec: &ProjectSpec) -> Database {
    spec.database_kind().unwrap_or(Database::Mongodb)
}

fn project_name(spec: &ProjectSpec) -> &str {
    spec.project_name.as_deref().unwrap_or_default()
}

fn plugins_context(spec: &ProjectSpec) -> Vec<serde_json::Value> {
    spec.plugins
        .iter()
        .filter_map(|plugin| {
            let package = plugin.package()?;
            let options = plugin.options().map(|o| Js::from_json(o).render(2)).unwrap_or_default();
            Some(json!({
                "import": names::plugin_import(package),
                "package": package,
                "version": plugin.version().unwrap_or("latest"),
                "options": options,
            }))
        })
        .collect()
}

fn collection_exports(spec: &ProjectSpec) -> Vec<String> {
    spec.collections
        .iter()
        .filter_map(|c| c.slug.as_deref())
        .map(names::collection_export)
        .collect()
}

fn global_exports(spec: &ProjectSpec) -> Vec<String> {
    spec.globals.iter().filter_map(|g| g.slug.as_deref()).map(names::global_export).collect()
}

fn block_exports(spec: &ProjectSpec) -> Vec<String> {
    spec.blocks.iter().filter_map(|b| b.slug.as_deref()).map(names::block_export).collect()
}

pub fn render_payload_config(engine: &dyn TemplateRenderer, spec: &ProjectSpec) -> Result<RenderedFile> {
    let db = database(spec);
    let context = json!({
        "db_import": db.adapter_import(),
        "db_package": db.adapter_package(),
        "database": db.as_str(),
        "server_url": spec.server_url(),
        "auth_slug": spec.requires_auth().then_some(AUTH_COLLECTION_SLUG),
        "collections": collection_exports(spec),
        "globals": global_exports(spec),
        "plugins": plugins_context(spec),
    });
    let content = engine.render(PAYLOAD_CONFIG, &context)?;
    Ok(RenderedFile { path: "src/payload.config.ts".to_string(), content })
}

pub fn render_package_json(engine: &dyn TemplateRenderer, spec: &ProjectSpec) -> Result<RenderedFile> {
    let description = spec.description.as_deref().unwrap_or_default();
    let context = json!({
        "project_name": project_name(spec),
        "version": spec.version.as_deref().unwrap_or("1.0.0"),
        "description_json": serde_json::Value::from(description).to_string(),
        "db_package": database(spec).adapter_package(),
        "payload_version": PAYLOAD_VERSION,
        "plugins": plugins_context(spec),
    });
    let content = engine.render(PACKAGE_JSON, &context)?;
    Ok(RenderedFile { path: "package.json".to_string(), content })
}

pub fn render_env(engine: &dyn TemplateRenderer, spec: &ProjectSpec) -> Result<RenderedFile> {
    let context = json!({
        "database_uri": database(spec).example_uri(project_name(spec)),
        "server_url": spec.server_url(),
    });
    let content = engine.render(ENV_TEMPLATE, &context)?;
    Ok(RenderedFile { path: ".env.example".to_string(), content })
}

pub fn render_readme(engine: &dyn TemplateRenderer, spec: &ProjectSpec) -> Result<RenderedFile> {
    let context = json!({
        "project_name": project_name(spec),
        "description": spec.description,
        "database": database(spec).as_str(),
        "next_steps": SETUP_STEPS,
        "admin_url": admin_url(spec),
        "collections": collection_exports(spec),
        "globals": global_exports(spec),
        "blocks": block_exports(spec),
    });
    let content = engine.render(README, &context)?;
    Ok(RenderedFile { path: "README.md".to_string(), content })
}

/// Files whose content never depends on the spec.
pub fn static_files() -> Vec<RenderedFile> {
    vec![
        RenderedFile { path: ".gitignore".to_string(), content: GITIGNORE.to_string() },
        RenderedFile { path: "tsconfig.json".to_string(), content: TSCONFIG.to_string() },
    ]
}

/// How a hook reference is used; the first use decides the stub's signature.
#[derive(Debug, Clone)]
enum HookUse {
    Hook { scope: &'static str, kind: String },
    Handler,
}

/// What a hook of the given kind hands back to Payload.
fn hook_return(kind: &str) -> Option<&'static str> {
    match kind {
        "beforeValidate" | "beforeChange" => Some("data"),
        "afterChange" | "afterRead" | "beforeRead" => Some("doc"),
        "beforeOperation" => Some("args"),
        "afterOperation" => Some("result"),
        _ => None,
    }
}

fn record_hooks<'a>(
    uses: &mut IndexMap<&'a str, HookUse>,
    scope: &'static str,
    hooks: &'a IndexMap<String, Vec<HookRef>>,
) {
    for (kind, refs) in hooks {
        for name in refs.iter().filter_map(HookRef::reference) {
            uses.entry(name).or_insert_with(|| HookUse::Hook { scope, kind: kind.clone() });
        }
    }
}

/// Stub modules for every access function and hook referenced by name.
pub fn render_reference_stubs(engine: &dyn TemplateRenderer, spec: &ProjectSpec) -> Result<Vec<RenderedFile>> {
    let mut access: IndexSet<&str> = IndexSet::new();
    let mut hooks: IndexMap<&str, HookUse> = IndexMap::new();

    for collection in &spec.collections {
        access.extend(collection.access.values().filter_map(|rule| rule.reference()));
        record_hooks(&mut hooks, "Collection", &collection.hooks);
        for name in collection.endpoints.iter().filter_map(|e| e.handler.as_ref()?.reference()) {
            hooks.entry(name).or_insert(HookUse::Handler);
        }
    }
    for global in &spec.globals {
        access.extend(global.access.values().filter_map(|rule| rule.reference()));
        record_hooks(&mut hooks, "Global", &global.hooks);
    }

    let mut files = Vec::with_capacity(access.len() + hooks.len());
    for name in access {
        let content = engine.render(ACCESS_STUB, &json!({ "name": name }))?;
        files.push(RenderedFile { path: format!("src/access/{name}.ts"), content });
    }
    for (name, usage) in hooks {
        let content = match usage {
            HookUse::Hook { scope, kind } => engine.render(
                HOOK_STUB,
                &json!({
                    "name": name,
                    "hook_type": names::hook_type(scope, &kind),
                    "returns": hook_return(&kind),
                }),
            )?,
            HookUse::Handler => engine.render(HANDLER_STUB, &json!({ "name": name }))?,
        };
        files.push(RenderedFile { path: format!("src/hooks/{name}.ts"), content });
    }
    Ok(files)
}
