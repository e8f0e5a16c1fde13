//! Names of generated modules and imports.

use cruet::Inflector;

pub fn collection_export(slug: &str) -> String {
    slug.to_pascal_case()
}

pub fn global_export(slug: &str) -> String {
    slug.to_pascal_case()
}

/// Blocks get a suffix so `hero` never clashes with a `hero` collection.
pub fn block_export(slug: &str) -> String {
    format!("{}Block", slug.to_pascal_case())
}

/// Import name of a plugin's factory: `@payloadcms/plugin-seo` → `seoPlugin`.
pub fn plugin_import(package: &str) -> String {
    let last = package.rsplit('/').next().unwrap_or(package);
    let stem = last
        .strip_prefix("payload-plugin-")
        .or_else(|| last.strip_prefix("plugin-"))
        .unwrap_or(last);
    format!("{}Plugin", stem.to_camel_case())
}

/// Payload's type name for a hook: (`Collection`, `beforeChange`) → `CollectionBeforeChangeHook`.
pub fn hook_type(scope: &str, kind: &str) -> String {
    format!("{scope}{}Hook", kind.to_pascal_case())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_names() {
        assert_eq!(collection_export("blog-posts"), "BlogPosts");
        assert_eq!(global_export("siteSettings"), "SiteSettings");
        assert_eq!(block_export("call-to-action"), "CallToActionBlock");
    }

    #[test]
    fn test_plugin_import() {
        assert_eq!(plugin_import("@payloadcms/plugin-seo"), "seoPlugin");
        assert_eq!(plugin_import("@payloadcms/plugin-form-builder"), "formBuilderPlugin");
        assert_eq!(plugin_import("payload-plugin-cloud-storage"), "cloudStoragePlugin");
    }

    #[test]
    fn test_hook_type() {
        assert_eq!(hook_type("Collection", "beforeChange"), "CollectionBeforeChangeHook");
        assert_eq!(hook_type("Global", "afterRead"), "GlobalAfterReadHook");
    }
}
