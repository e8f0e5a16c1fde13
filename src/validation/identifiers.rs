//! Pattern checks for slugs, identifiers, versions and package names.
//!
//! Every check returns `Some(ValidationError)` on failure and `None` otherwise;
//! none of them panic.

use regex::Regex;
use std::sync::LazyLock;

use super::{EntityKind, ValidationError};

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("slug pattern"));

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern"));

static SEMVER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+(-[\w.]+)?$").expect("semver pattern"));

static PACKAGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(@[a-z0-9-~][a-z0-9-._~]*/)?[a-z0-9-~][a-z0-9-._~]*$").expect("package pattern")
});

/// npm rejects longer names.
const MAX_PACKAGE_NAME_LEN: usize = 214;

pub fn is_slug(value: &str) -> bool {
    SLUG.is_match(value)
}

pub fn is_identifier(value: &str) -> bool {
    IDENTIFIER.is_match(value)
}

pub fn is_package_name(value: &str) -> bool {
    value.len() <= MAX_PACKAGE_NAME_LEN && PACKAGE_NAME.is_match(value)
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Checks a kebab-case slug (`blog-posts`).
pub fn validate_slug(value: Option<&str>, kind: EntityKind, path: &str) -> Option<ValidationError> {
    let Some(slug) = present(value) else {
        return Some(ValidationError::new(
            format!("MISSING_{}_SLUG", kind.tag()),
            format!("{} is missing a slug", kind.title()),
            path,
        ));
    };

    if is_slug(slug) {
        return None;
    }

    Some(
        ValidationError::new(
            format!("INVALID_{}_SLUG_FORMAT", kind.tag()),
            format!("Invalid {} slug '{slug}': slugs must be kebab-case", kind.noun()),
            path,
        )
        .with_suggestion(format!("Use '{}' instead", suggest_slug(slug))),
    )
}

/// Checks a slug that must be a JavaScript identifier (`siteSettings`).
pub fn validate_identifier_slug(
    value: Option<&str>,
    kind: EntityKind,
    path: &str,
) -> Option<ValidationError> {
    let Some(slug) = present(value) else {
        return Some(ValidationError::new(
            format!("MISSING_{}_SLUG", kind.tag()),
            format!("{} is missing a slug", kind.title()),
            path,
        ));
    };

    if is_identifier(slug) {
        return None;
    }

    Some(
        ValidationError::new(
            format!("INVALID_{}_SLUG_FORMAT", kind.tag()),
            format!("Invalid {} slug '{slug}': slugs must be valid identifiers", kind.noun()),
            path,
        )
        .with_suggestion("Use camelCase, e.g. 'siteSettings'"),
    )
}

/// Checks a JavaScript-identifier-like name (`publishedAt`).
pub fn validate_identifier_name(
    value: Option<&str>,
    kind: EntityKind,
    path: &str,
) -> Option<ValidationError> {
    let Some(name) = present(value) else {
        return Some(ValidationError::new(
            format!("MISSING_{}_NAME", kind.tag()),
            format!("{} is missing a name", kind.title()),
            path,
        ));
    };

    if is_identifier(name) {
        return None;
    }

    Some(
        ValidationError::new(
            format!("INVALID_{}_NAME", kind.tag()),
            format!(
                "Invalid {} name '{name}': names must start with a letter, '_' or '$' \
                 and contain only letters, digits, '_' or '$'",
                kind.noun()
            ),
            path,
        )
        .with_suggestion("Use camelCase, e.g. 'publishedAt'"),
    )
}

/// Checks a `MAJOR.MINOR.PATCH[-pre]` version string.
pub fn validate_semver(value: Option<&str>, path: &str) -> Option<ValidationError> {
    let Some(version) = present(value) else {
        return Some(ValidationError::new("MISSING_VERSION", "Version is missing", path));
    };

    if SEMVER.is_match(version) {
        return None;
    }

    Some(
        ValidationError::new(
            "INVALID_VERSION_FORMAT",
            format!("Invalid version '{version}'"),
            path,
        )
        .with_suggestion("Use semantic versioning, e.g. '1.0.0'"),
    )
}

/// Checks an npm package name. The project name and plugin packages share this rule.
pub fn validate_package_name(
    value: Option<&str>,
    kind: EntityKind,
    path: &str,
) -> Option<ValidationError> {
    let attr = match kind {
        EntityKind::Plugin => "PACKAGE",
        _ => "NAME",
    };

    let Some(name) = present(value) else {
        return Some(ValidationError::new(
            format!("MISSING_{}_{attr}", kind.tag()),
            format!("{} is missing a package name", kind.title()),
            path,
        ));
    };

    if is_package_name(name) {
        return None;
    }

    Some(
        ValidationError::new(
            format!("INVALID_{}_{attr}", kind.tag()),
            format!("Invalid {} package name '{name}'", kind.noun()),
            path,
        )
        .with_suggestion("Use lowercase letters, digits, '-', '.' or '_', e.g. 'my-project'"),
    )
}

/// Best-effort kebab-case rendition of a rejected slug.
fn suggest_slug(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    let mut prev_lower = false;
    for ch in value.chars() {
        if ch.is_ascii_uppercase() {
            if prev_lower {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower = false;
        } else if ch.is_ascii_alphanumeric() {
            out.push(ch);
            prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        } else {
            out.push('-');
            prev_lower = false;
        }
    }
    out.split('-').filter(|part| !part.is_empty()).collect::<Vec<_>>().join("-")
}
