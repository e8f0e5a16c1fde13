//! Error handling for payload-scaffold.
//! Structural problems in a project spec are not errors in this sense: they are
//! reported as [`crate::validation::ValidationError`] values. The types here cover
//! the cases where the program itself cannot continue.

use std::io;
use thiserror::Error as ThisError;

use crate::validation::ValidationError;

/// Custom error types for payload-scaffold operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A spec file (or stdin payload) is not well-formed JSON or YAML, or its
    /// root does not deserialize into a project spec.
    #[error("Failed to parse project spec: {0}.")]
    SpecParseError(String),

    /// The spec parsed, but some keys hold values of the wrong JSON type
    /// (`"name": 5`, `"fields": null`). Each one is listed with its breadcrumb.
    #[error("Project spec has {} value(s) of the wrong type.", .0.len())]
    InvalidValueTypes(Vec<ValidationError>),

    /// No spec file found at the given location.
    #[error("Project spec not found at '{path}' (tried: {tried}).")]
    SpecFileNotFoundError { path: String, tried: String },

    /// Represents errors raised by the template engine.
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Output directory '{output_dir}' already exists. Use --force to overwrite it.")]
    OutputDirectoryExistsError { output_dir: String },

    /// A tool name the RPC surface does not know about.
    #[error("Unsupported tool: '{0}'.")]
    UnsupportedTool(String),

    /// Tool arguments that do not deserialize into the expected shape. Wrong
    /// types inside `options` are reported in the tool's payload instead.
    #[error("Invalid arguments for tool '{tool}': {reason}.")]
    InvalidToolArguments { tool: String, reason: String },

    /// Errors raised by interactive prompts.
    #[error("Prompt error: {0}.")]
    PromptError(String),

    /// The spec was loaded but did not validate; the details were already printed.
    #[error("Project spec has {0} validation error(s).")]
    ValidationFailed(usize),

    /// Some files of the plan could not be written; the details were already printed.
    #[error("{0} filesystem operation(s) failed.")]
    WriteFailed(usize),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
