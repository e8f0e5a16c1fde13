use std::fs;

use payload_scaffold::config::{load_project_spec, parse_project_spec, resolve_spec_path};
use payload_scaffold::error::Error;
use payload_scaffold::model::{AccessRule, BlockEntry, Database, HookRef, PluginEntry};
use tempfile::TempDir;

const YAML_SPEC: &str = r#"
projectName: my-site
database: postgres
authentication: true
collections:
  - slug: users
    fields:
      - name: name
        type: text
  - slug: pages
    access:
      read: true
      update: isAdmin
      delete:
        expression: "({ req }) => req.user?.role === 'admin'"
    hooks:
      beforeChange:
        - populateSlug
    fields:
      - name: layout
        type: blocks
        blocks:
          - hero
          - slug: quote
            fields:
              - name: text
                type: textarea
blocks:
  - slug: hero
    fields:
      - name: heading
        type: text
plugins:
  - "@payloadcms/plugin-seo"
  - package: "@payloadcms/plugin-redirects"
    version: 3.0.0
"#;

#[test]
fn test_parse_yaml_spec() {
    let spec = parse_project_spec(YAML_SPEC).unwrap();

    assert_eq!(spec.project_name.as_deref(), Some("my-site"));
    assert_eq!(spec.database_kind(), Some(Database::Postgres));
    assert!(spec.requires_auth());
    assert_eq!(spec.collections.len(), 2);

    let pages = &spec.collections[1];
    assert_eq!(pages.access["read"], AccessRule::Boolean(true));
    assert_eq!(pages.access["update"], AccessRule::Reference("isAdmin".to_string()));
    assert!(matches!(pages.access["delete"], AccessRule::Inline { .. }));
    assert_eq!(pages.hooks["beforeChange"], vec![HookRef::Reference("populateSlug".to_string())]);

    let blocks = &pages.fields[0].blocks;
    assert_eq!(blocks[0], BlockEntry::Reference("hero".to_string()));
    assert_eq!(blocks[1].slug(), Some("quote"));

    assert_eq!(spec.plugins[0], PluginEntry::Package("@payloadcms/plugin-seo".to_string()));
    assert_eq!(spec.plugins[1].package(), Some("@payloadcms/plugin-redirects"));
    assert_eq!(spec.plugins[1].version(), Some("3.0.0"));
}

#[test]
fn test_parse_json_spec() {
    let spec = parse_project_spec(
        r#"{"projectName": "blog", "database": "mongodb", "serverUrl": "http://localhost:4000"}"#,
    )
    .unwrap();
    assert_eq!(spec.project_name.as_deref(), Some("blog"));
    assert_eq!(spec.server_url(), "http://localhost:4000");
    assert!(spec.collections.is_empty());
}

#[test]
fn test_broken_json_reports_json_error() {
    match parse_project_spec(r#"{"projectName": "blog",}"#) {
        Err(Error::SpecParseError(message)) => assert!(message.contains("line 1")),
        other => panic!("Expected SpecParseError, got {other:?}"),
    }
}

#[test]
fn test_wrong_value_types_are_reported_together() {
    let content = r#"{
        "projectName": "blog",
        "database": "mongodb",
        "collections": [{ "slug": "posts", "fields": [{ "name": 5, "type": "text", "required": "yes" }] }]
    }"#;
    match parse_project_spec(content) {
        Err(Error::InvalidValueTypes(errors)) => {
            let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
            assert_eq!(fields, vec!["collections[0].fields[0].name", "collections[0].fields[0].required"]);
        }
        other => panic!("Expected InvalidValueTypes, got {other:?}"),
    }

    match parse_project_spec("projectName: blog\nversion: 1.0\ncollections: ~\n") {
        Err(Error::InvalidValueTypes(errors)) => {
            assert_eq!(errors.len(), 2);
            assert_eq!(errors[0].field, "version");
            assert_eq!(errors[1].field, "collections");
        }
        other => panic!("Expected InvalidValueTypes, got {other:?}"),
    }
}

#[test]
fn test_resolve_spec_path_in_directory() {
    let temp_dir = TempDir::new().unwrap();

    assert!(matches!(
        resolve_spec_path(temp_dir.path()),
        Err(Error::SpecFileNotFoundError { .. })
    ));

    let yaml = temp_dir.path().join("payload-scaffold.yaml");
    fs::write(&yaml, YAML_SPEC).unwrap();
    assert_eq!(resolve_spec_path(temp_dir.path()).unwrap(), yaml);

    let json = temp_dir.path().join("payload-scaffold.json");
    fs::write(&json, r#"{"projectName": "blog"}"#).unwrap();
    assert_eq!(resolve_spec_path(temp_dir.path()).unwrap(), json);
}

#[test]
fn test_load_project_spec_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("site.yml");
    fs::write(&path, YAML_SPEC).unwrap();

    let spec = load_project_spec(&path).unwrap();
    assert_eq!(spec.blocks[0].slug.as_deref(), Some("hero"));

    assert!(load_project_spec(temp_dir.path().join("missing.yml")).is_err());
}
