//! payload-scaffold validates Payload CMS project specs and scaffolds the
//! TypeScript project they describe: collections, globals, blocks, the config
//! entry point and the surrounding boilerplate.

/// Command-line interface module for the payload-scaffold application
pub mod cli;

/// Loading project specs
/// Supports JSON and YAML formats (payload-scaffold.json, payload-scaffold.yml, payload-scaffold.yaml)
pub mod config;

/// Fixed names and defaults
pub mod constants;

/// Error types and handling for the payload-scaffold application
pub mod error;

/// Filesystem collaborator for writing file plans
pub mod fs;

/// The closed set of field kinds and their per-kind rules
pub mod kinds;

/// Deserializable project spec tree
pub mod model;

/// Validation gate, file-plan building and writing
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// TypeScript module and boilerplate rendering
pub mod render;

/// JSON tool-call surface
pub mod rpc;

/// Structural and cross-reference validation
pub mod validation;
