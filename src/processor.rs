//! Turns a project spec into a file plan and writes that plan to disk.
//!
//! Nothing is rendered unless the whole spec validates. Writing is best
//! effort: every directory and file is attempted and failures are collected.

use indexmap::IndexMap;
use log::{debug, warn};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::{
    constants::AUTH_COLLECTION_SLUG,
    error::{Error, Result},
    fs::Filesystem,
    model::{CollectionSpec, ProjectSpec},
    render::{
        boilerplate::{
            render_env, render_package_json, render_payload_config, render_readme,
            render_reference_stubs, static_files, SETUP_STEPS,
        },
        render_block, render_collection, render_global, RenderedFile, TemplateRenderer,
    },
    validation::{codes, validate_project, ValidationError},
};

/// Every file of a generated project, keyed by path relative to `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePlan {
    pub root: PathBuf,
    pub files: IndexMap<String, String>,
    /// Directories relative to `root`, parents before children.
    pub directories: Vec<String>,
}

impl FilePlan {
    fn new(root: PathBuf) -> Self {
        Self { root, files: IndexMap::new(), directories: Vec::new() }
    }

    fn add(&mut self, file: RenderedFile) {
        let parents: Vec<String> = Path::new(&file.path)
            .ancestors()
            .skip(1)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| dir.to_string_lossy().replace('\\', "/"))
            .collect();
        for dir in parents.into_iter().rev() {
            if !self.directories.contains(&dir) {
                self.directories.push(dir);
            }
        }
        self.files.insert(file.path, file.content);
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

/// Result of planning a scaffold. `plan` is present only when `errors` is empty.
#[derive(Debug, Clone)]
pub struct ScaffoldOutcome {
    pub success: bool,
    pub plan: Option<FilePlan>,
    pub errors: Vec<ValidationError>,
}

/// Collections as they will be rendered. With authentication on, the `users`
/// collection gets `auth: true` unless it configures auth itself.
fn effective_collections(spec: &ProjectSpec) -> Vec<Cow<'_, CollectionSpec>> {
    spec.collections
        .iter()
        .map(|collection| {
            let is_auth_target = spec.requires_auth()
                && collection.auth.is_none()
                && collection.slug.as_deref() == Some(AUTH_COLLECTION_SLUG);
            if is_auth_target {
                let mut collection = collection.clone();
                collection.auth = Some(serde_json::Value::Bool(true));
                Cow::Owned(collection)
            } else {
                Cow::Borrowed(collection)
            }
        })
        .collect()
}

/// Builds file plans from project specs.
pub struct Processor<'a> {
    engine: &'a dyn TemplateRenderer,
}

impl<'a> Processor<'a> {
    pub fn new(engine: &'a dyn TemplateRenderer) -> Self {
        Self { engine }
    }

    /// Validates `spec` and, if it is clean, renders every file of the project
    /// under `root`.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if a template fails to render
    pub fn plan<P: AsRef<Path>>(&self, spec: &ProjectSpec, root: P) -> Result<ScaffoldOutcome> {
        let errors = validate_project(spec);
        if !errors.is_empty() {
            debug!("Skipping render: {} validation error(s)", errors.len());
            return Ok(ScaffoldOutcome { success: false, plan: None, errors });
        }

        let mut plan = FilePlan::new(root.as_ref().to_path_buf());
        plan.add(render_payload_config(self.engine, spec)?);
        for collection in effective_collections(spec) {
            plan.add(render_collection(self.engine, &collection)?);
        }
        for global in &spec.globals {
            plan.add(render_global(self.engine, global)?);
        }
        for block in &spec.blocks {
            plan.add(render_block(self.engine, block)?);
        }
        for stub in render_reference_stubs(self.engine, spec)? {
            plan.add(stub);
        }
        plan.add(render_package_json(self.engine, spec)?);
        plan.add(render_env(self.engine, spec)?);
        plan.add(render_readme(self.engine, spec)?);
        for file in static_files() {
            plan.add(file);
        }

        debug!("Planned {} file(s) under {}", plan.files.len(), plan.root.display());
        Ok(ScaffoldOutcome { success: true, plan: Some(plan), errors })
    }
}

/// Creates the plan's directories, then writes its files.
/// Failures are reported as `FS_*` errors and do not stop the remaining writes.
pub fn write_plan(plan: &FilePlan, fs: &dyn Filesystem) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let root = plan.root.to_string_lossy();
    let directories = std::iter::once(String::new()).chain(plan.directories.iter().cloned());
    for dir in directories {
        let target = plan.root.join(&dir);
        debug!("Creating directory: {}", target.display());
        if let Err(e) = fs.create_dir_all(&target) {
            warn!("Failed to create {}: {e}", target.display());
            let field = if dir.is_empty() { root.to_string() } else { dir };
            errors.push(ValidationError::new(
                codes::FS_CREATE_DIRECTORY_FAILED,
                format!("Failed to create directory: {e}"),
                field,
            ));
        }
    }

    for (path, content) in &plan.files {
        let target = plan.root.join(path);
        debug!("Writing file: {}", target.display());
        if let Err(e) = fs.write_file(&target, content) {
            warn!("Failed to write {}: {e}", target.display());
            errors.push(ValidationError::new(
                codes::FS_WRITE_FILE_FAILED,
                format!("Failed to write file: {e}"),
                path.clone(),
            ));
        }
    }

    errors
}

/// Ensures the output directory is safe to write to.
///
/// # Errors
/// * `Error::OutputDirectoryExistsError` if the directory exists and `force` is false
pub fn ensure_output_dir<P: AsRef<Path>>(output_dir: P, force: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() && !force {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_dir.display().to_string(),
        });
    }
    Ok(output_dir.to_path_buf())
}

/// Shell commands that bring a freshly written project up.
pub fn next_steps<P: AsRef<Path>>(root: P) -> Vec<String> {
    std::iter::once(format!("cd {}", root.as_ref().display()))
        .chain(SETUP_STEPS.iter().map(|step| step.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_are_listed_once_parents_first() {
        let mut plan = FilePlan::new(PathBuf::from("out"));
        for path in ["src/collections/Posts.ts", "src/collections/Users.ts", "src/payload.config.ts", "package.json"] {
            plan.add(RenderedFile { path: path.to_string(), content: String::new() });
        }
        assert_eq!(plan.directories, vec!["src".to_string(), "src/collections".to_string()]);
    }

    #[test]
    fn next_steps_start_in_the_project() {
        let steps = next_steps("my-app");
        assert_eq!(steps[0], "cd my-app");
        assert_eq!(steps.len(), SETUP_STEPS.len() + 1);
    }
}
