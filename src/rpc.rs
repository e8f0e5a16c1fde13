//! Tool-call surface: `{"tool": ..., "arguments": {...}}` in, JSON payload out.
//!
//! [`ToolServer::serve`] speaks this protocol as JSON lines over any reader and
//! writer pair; the CLI wires it to stdio.

use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::{
    constants::DEFAULT_OUTPUT_DIR,
    error::{Error, Result},
    fs::Filesystem,
    model::{BlockSpec, CollectionSpec, FieldSpec, GlobalSpec, ProjectSpec},
    processor::{next_steps, write_plan, Processor},
    render::{boilerplate::admin_url, render_block, render_collection, render_field, render_global, RenderedFile, TemplateRenderer},
    validation::{
        check_shape, validate_block, validate_collection, validate_field, validate_global,
        validate_project, EntityKind, ValidationError,
    },
};

pub const TOOLS: [&str; 6] = [
    "scaffold_project",
    "validate_project",
    "generate_collection",
    "generate_global",
    "generate_block",
    "generate_field",
];

#[derive(Debug, Clone, Deserialize)]
pub struct ToolRequest {
    pub tool: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScaffoldArgs {
    options: ProjectSpec,
    #[serde(default)]
    output_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OptionsArgs<T> {
    options: T,
}

fn parse_arguments<T: DeserializeOwned>(tool: &str, arguments: &Value) -> Result<T> {
    T::deserialize(arguments).map_err(|e| Error::InvalidToolArguments {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}

/// Type-checks `arguments.options` as `kind` before deserializing the
/// arguments. Wrong types come back as validation errors for the payload.
fn parse_checked<T: DeserializeOwned>(
    tool: &str,
    arguments: &Value,
    kind: EntityKind,
) -> Result<std::result::Result<T, Vec<ValidationError>>> {
    let options = arguments.get("options").ok_or_else(|| Error::InvalidToolArguments {
        tool: tool.to_string(),
        reason: "missing field `options`".to_string(),
    })?;
    let errors = check_shape(kind, options);
    if !errors.is_empty() {
        return Ok(Err(errors));
    }
    parse_arguments(tool, arguments).map(Ok)
}

fn failure(errors: &[ValidationError]) -> Value {
    json!({ "success": false, "errors": errors })
}

fn generated(file: RenderedFile) -> Value {
    json!({ "success": true, "path": file.path, "content": file.content })
}

pub struct ToolServer<'a> {
    engine: &'a dyn TemplateRenderer,
    fs: &'a dyn Filesystem,
}

impl<'a> ToolServer<'a> {
    pub fn new(engine: &'a dyn TemplateRenderer, fs: &'a dyn Filesystem) -> Self {
        Self { engine, fs }
    }

    /// Dispatches one tool call.
    ///
    /// Validation problems are part of the returned payload.
    ///
    /// # Errors
    /// * `Error::UnsupportedTool` for a tool name outside [`TOOLS`]
    /// * `Error::InvalidToolArguments` when `options` is missing or the other
    ///   arguments do not have the tool's shape
    /// * `Error::MinijinjaError` if rendering fails
    pub fn handle(&self, request: &ToolRequest) -> Result<Value> {
        debug!("Handling tool call '{}'", request.tool);
        let tool = request.tool.as_str();
        let arguments = &request.arguments;
        match tool {
            "scaffold_project" => match parse_checked(tool, arguments, EntityKind::Project)? {
                Ok(args) => self.scaffold_project(args),
                Err(errors) => Ok(failure(&errors)),
            },
            "validate_project" => {
                let errors = match parse_checked::<OptionsArgs<ProjectSpec>>(tool, arguments, EntityKind::Project)? {
                    Ok(args) => validate_project(&args.options),
                    Err(errors) => errors,
                };
                Ok(json!({ "valid": errors.is_empty(), "errors": errors }))
            }
            "generate_collection" => {
                let args: OptionsArgs<CollectionSpec> = match parse_checked(tool, arguments, EntityKind::Collection)? {
                    Ok(args) => args,
                    Err(errors) => return Ok(failure(&errors)),
                };
                let errors = validate_collection(&args.options);
                if !errors.is_empty() {
                    return Ok(failure(&errors));
                }
                Ok(generated(render_collection(self.engine, &args.options)?))
            }
            "generate_global" => {
                let args: OptionsArgs<GlobalSpec> = match parse_checked(tool, arguments, EntityKind::Global)? {
                    Ok(args) => args,
                    Err(errors) => return Ok(failure(&errors)),
                };
                let errors = validate_global(&args.options);
                if !errors.is_empty() {
                    return Ok(failure(&errors));
                }
                Ok(generated(render_global(self.engine, &args.options)?))
            }
            "generate_block" => {
                let args: OptionsArgs<BlockSpec> = match parse_checked(tool, arguments, EntityKind::Block)? {
                    Ok(args) => args,
                    Err(errors) => return Ok(failure(&errors)),
                };
                let errors = validate_block(&args.options);
                if !errors.is_empty() {
                    return Ok(failure(&errors));
                }
                Ok(generated(render_block(self.engine, &args.options)?))
            }
            "generate_field" => {
                let args: OptionsArgs<FieldSpec> = match parse_checked(tool, arguments, EntityKind::Field)? {
                    Ok(args) => args,
                    Err(errors) => return Ok(failure(&errors)),
                };
                let errors = validate_field(&args.options);
                if !errors.is_empty() {
                    return Ok(failure(&errors));
                }
                Ok(json!({ "success": true, "content": render_field(&args.options, 0) }))
            }
            _ => Err(Error::UnsupportedTool(request.tool.clone())),
        }
    }

    fn scaffold_project(&self, args: ScaffoldArgs) -> Result<Value> {
        let spec = args.options;
        let project_path = PathBuf::from(args.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR))
            .join(spec.project_name.as_deref().unwrap_or_default());

        let outcome = Processor::new(self.engine).plan(&spec, &project_path)?;
        let Some(plan) = outcome.plan else {
            return Ok(failure(&outcome.errors));
        };

        let project_path = project_path.display().to_string();
        let write_errors = write_plan(&plan, self.fs);
        if !write_errors.is_empty() {
            return Ok(json!({ "success": false, "projectPath": project_path, "errors": write_errors }));
        }

        Ok(json!({
            "success": true,
            "projectPath": project_path,
            "adminUrl": admin_url(&spec),
            "nextSteps": next_steps(&plan.root),
            "files": plan.paths().collect::<Vec<_>>(),
        }))
    }

    /// Answers JSON-lines requests until `input` is exhausted. Every request
    /// gets exactly one response line; failures become `{"error": ...}`.
    pub fn serve<R: BufRead, W: Write>(&self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let response = serde_json::from_str::<ToolRequest>(&line)
                .map_err(|e| Error::InvalidToolArguments { tool: "<request>".to_string(), reason: e.to_string() })
                .and_then(|request| self.handle(&request))
                .unwrap_or_else(|e| json!({ "error": e.to_string() }));
            writeln!(output, "{response}")?;
            output.flush()?;
        }
        Ok(())
    }
}
