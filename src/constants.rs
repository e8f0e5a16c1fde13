//! Common constants used throughout payload-scaffold.

/// Spec file names looked up when a directory is given instead of a file.
pub const SPEC_FILES: [&str; 3] =
    ["payload-scaffold.json", "payload-scaffold.yml", "payload-scaffold.yaml"];

/// Server URL used when the spec does not set `serverUrl`.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// Output directory used by the RPC surface when no `outputPath` is given.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Slug of the collection the admin panel authenticates against.
pub const AUTH_COLLECTION_SLUG: &str = "users";

/// Version range written into the generated package manifest.
pub const PAYLOAD_VERSION: &str = "^3.0.0";
