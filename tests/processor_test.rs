use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};

use payload_scaffold::fs::{Filesystem, LocalFilesystem};
use payload_scaffold::model::ProjectSpec;
use payload_scaffold::processor::{ensure_output_dir, next_steps, write_plan, FilePlan, Processor};
use payload_scaffold::render::MiniJinjaRenderer;
use payload_scaffold::validation::codes;
use serde_json::json;
use tempfile::TempDir;

fn sample_project() -> ProjectSpec {
    serde_json::from_value(json!({
        "projectName": "my-site",
        "database": "mongodb",
        "authentication": true,
        "collections": [
            {
                "slug": "posts",
                "access": { "update": "isAdmin" },
                "hooks": { "beforeChange": ["populateSlug"] },
                "fields": [
                    { "name": "title", "type": "text", "required": true },
                    { "name": "author", "type": "relationship", "relationTo": "users" },
                    { "name": "layout", "type": "blocks", "blocks": ["hero"] }
                ]
            },
            { "slug": "users", "fields": [{ "name": "name", "type": "text" }] }
        ],
        "globals": [{ "slug": "siteSettings", "fields": [{ "name": "siteName", "type": "text" }] }],
        "blocks": [{ "slug": "hero", "fields": [{ "name": "heading", "type": "text" }] }]
    }))
    .unwrap()
}

fn plan_for(spec: &ProjectSpec, root: &Path) -> FilePlan {
    let engine = MiniJinjaRenderer::new();
    let outcome = Processor::new(&engine).plan(spec, root).unwrap();
    assert!(outcome.success);
    assert!(outcome.errors.is_empty());
    outcome.plan.unwrap()
}

/// Records writes and fails for paths ending with `fail_on`.
struct FlakyFilesystem {
    fail_on: &'static str,
    written: RefCell<Vec<PathBuf>>,
}

impl FlakyFilesystem {
    fn new(fail_on: &'static str) -> Self {
        Self { fail_on, written: RefCell::new(Vec::new()) }
    }
}

impl Filesystem for FlakyFilesystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        if path.ends_with(self.fail_on) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, _content: &str) -> io::Result<()> {
        if path.ends_with(self.fail_on) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        }
        self.written.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

#[test]
fn test_plan_lists_every_file_in_order() {
    let plan = plan_for(&sample_project(), Path::new("out"));
    let paths: Vec<&str> = plan.paths().collect();

    assert_eq!(
        paths,
        vec![
            "src/payload.config.ts",
            "src/collections/Posts.ts",
            "src/collections/Users.ts",
            "src/globals/SiteSettings.ts",
            "src/blocks/HeroBlock.ts",
            "src/access/isAdmin.ts",
            "src/hooks/populateSlug.ts",
            "package.json",
            ".env.example",
            "README.md",
            ".gitignore",
            "tsconfig.json",
        ]
    );
    assert_eq!(
        plan.directories,
        vec!["src", "src/collections", "src/globals", "src/blocks", "src/access", "src/hooks"]
    );
    assert_eq!(plan.root, PathBuf::from("out"));
}

#[test]
fn test_users_collection_gets_auth_when_authentication_is_on() {
    let plan = plan_for(&sample_project(), Path::new("out"));
    let users = &plan.files["src/collections/Users.ts"];
    assert!(users.contains("  auth: true,\n"));
    assert!(!plan.files["src/collections/Posts.ts"].contains("auth:"));
}

#[test]
fn test_invalid_spec_renders_nothing() {
    let mut spec = sample_project();
    spec.collections[0].slug = Some("Posts".to_string());

    let engine = MiniJinjaRenderer::new();
    let outcome = Processor::new(&engine).plan(&spec, "out").unwrap();

    assert!(!outcome.success);
    assert!(outcome.plan.is_none());
    // The relation still points at `users`, so only the slug is reported.
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].code, "INVALID_COLLECTION_SLUG_FORMAT");
}

#[test]
fn test_unusable_export_names_render_nothing() {
    let mut spec = sample_project();
    spec.collections[0].slug = Some("2024-posts".to_string());
    spec.globals[0].slug = Some("_".to_string());

    let engine = MiniJinjaRenderer::new();
    let outcome = Processor::new(&engine).plan(&spec, "out").unwrap();

    assert!(outcome.plan.is_none());
    let fields: Vec<&str> = outcome.errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["collections[0].slug", "globals[0].slug"]);
    assert!(outcome.errors.iter().all(|e| e.code == codes::INVALID_EXPORT_NAME));
}

#[test]
fn test_write_plan_continues_after_a_failed_write() {
    let plan = plan_for(&sample_project(), Path::new("out"));
    let fs = FlakyFilesystem::new("README.md");

    let errors = write_plan(&plan, &fs);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, codes::FS_WRITE_FILE_FAILED);
    assert_eq!(errors[0].field, "README.md");
    assert_eq!(fs.written.borrow().len(), plan.files.len() - 1);
    assert!(fs.written.borrow().contains(&PathBuf::from("out/tsconfig.json")));
}

#[test]
fn test_write_plan_reports_failed_directories() {
    let plan = plan_for(&sample_project(), Path::new("out"));
    let fs = FlakyFilesystem::new("src/globals");

    let errors = write_plan(&plan, &fs);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, codes::FS_CREATE_DIRECTORY_FAILED);
    assert_eq!(errors[0].field, "src/globals");
    assert_eq!(fs.written.borrow().len(), plan.files.len());
}

#[test_log::test]
fn test_scaffold_is_byte_identical_across_runs() {
    let spec = sample_project();
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    for dir in [&first, &second] {
        let root = dir.path().join("my-site");
        let plan = plan_for(&spec, &root);
        assert!(write_plan(&plan, &LocalFilesystem).is_empty());
    }

    assert!(!dir_diff::is_different(first.path(), second.path()).unwrap());
    let config = std::fs::read_to_string(first.path().join("my-site/src/payload.config.ts")).unwrap();
    assert!(config.contains("import { Posts } from './collections/Posts'"));
}

#[test]
fn test_ensure_output_dir() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path();

    // Test non-existent directory
    let new_dir = path.join("new_dir");
    assert!(ensure_output_dir(&new_dir, false).is_ok());

    // Test existing directory without force
    assert!(ensure_output_dir(path, false).is_err());

    // Test existing directory with force
    assert!(ensure_output_dir(path, true).is_ok());
}

#[test]
fn test_next_steps() {
    assert_eq!(
        next_steps("out/my-site"),
        vec!["cd out/my-site", "cp .env.example .env", "npm install", "npm run dev"]
    );
}
