//! Loading project specs from disk or stdin.
//! A spec is JSON or YAML; a directory argument is searched for one of
//! [`SPEC_FILES`].

use crate::constants::SPEC_FILES;
use crate::error::{Error, Result};
use crate::model::ProjectSpec;
use crate::validation::{check_shape, EntityKind};
use log::debug;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Resolves the spec file for `path`: the path itself when it is a file,
/// otherwise the first of [`SPEC_FILES`] found inside it.
pub fn resolve_spec_path<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    if path.is_dir() {
        for file in SPEC_FILES {
            let candidate = path.join(file);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }

    Err(Error::SpecFileNotFoundError {
        path: path.display().to_string(),
        tried: SPEC_FILES.join(", "),
    })
}

/// Parses a spec, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::SpecParseError` if the content is neither JSON nor YAML
/// * `Error::InvalidValueTypes` listing every key that holds the wrong JSON type
pub fn parse_project_spec(content: &str) -> Result<ProjectSpec> {
    let value: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        // Input that looks like JSON keeps the JSON diagnostic.
        Err(e) if content.trim_start().starts_with('{') => {
            return Err(Error::SpecParseError(e.to_string()));
        }
        Err(_) => serde_yaml::from_str(content).map_err(|e| Error::SpecParseError(e.to_string()))?,
    };
    project_spec_from_value(value)
}

/// Deserializes an already parsed spec after type-checking it.
pub fn project_spec_from_value(value: Value) -> Result<ProjectSpec> {
    let errors = check_shape(EntityKind::Project, &value);
    if !errors.is_empty() {
        return Err(Error::InvalidValueTypes(errors));
    }
    serde_json::from_value(value).map_err(|e| Error::SpecParseError(e.to_string()))
}

/// Loads a spec from a file or a directory holding one of [`SPEC_FILES`].
pub fn load_project_spec<P: AsRef<Path>>(path: P) -> Result<ProjectSpec> {
    let spec_path = resolve_spec_path(path)?;
    debug!("Loading project spec from {}", spec_path.display());
    let content = std::fs::read_to_string(&spec_path).map_err(Error::IoError)?;
    parse_project_spec(&content)
}

/// Reads a spec from standard input.
pub fn load_project_spec_from_stdin() -> Result<ProjectSpec> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    parse_project_spec(&buffer)
}
