//! Two-stage document resolution.
//!
//! 1. **Imports** - mappings with an `import` key merge the top-level keys of
//!    the referenced file, relative to the directory of the file being loaded.
//! 2. **Placeholders** - `{{ dotted.key.path }}` tokens in string values are
//!    replaced by values looked up from the document root.
//!
//! Imports always run first, so placeholders can reference imported keys.

mod imports;
mod placeholders;

pub use imports::{IMPORT_KEY, resolve_imports};
pub use placeholders::{CLOSE, OPEN, expand, lookup, resolve_placeholders};

use crate::document::Tree;
use crate::error::Result;
use std::path::Path;

/// Run both resolution stages over `tree` in place.
///
/// Placeholders are looked up in a snapshot of the tree taken after imports
/// are merged, so every lookup sees unexpanded values regardless of the
/// order in which keys are visited.
pub fn resolve_tree(tree: &mut Tree, base_dir: &Path) -> Result<()> {
    resolve_imports(tree, base_dir)?;

    let root = tree.clone();
    resolve_placeholders(tree, &root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tree(content: &str) -> Tree {
        serde_yaml::from_str(content).unwrap()
    }

    #[test]
    fn test_placeholders_see_imported_keys() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("import_test.yaml"),
            "db_host: localhost\ndb_port: 5432\n",
        )
        .unwrap();

        let mut data = tree(
            "import: import_test.yaml\napp_name: TestApp\ndb_host_placeholder: '{{ db_host }}'\n",
        );

        resolve_tree(&mut data, temp.path()).unwrap();

        assert_eq!(
            data,
            tree(
                "{app_name: TestApp, db_host_placeholder: localhost, \
                 db_host: localhost, db_port: 5432}"
            )
        );
    }

    #[test]
    fn test_placeholders_see_merge_key_values() {
        let mut data = crate::document::parse(
            "base: &b {x: 1}\nder:\n  <<: *b\n  y: 2\nref: \"{{ der.x }}\"\n",
            Path::new("merge.yaml"),
        )
        .unwrap();

        resolve_tree(&mut data, Path::new(".")).unwrap();

        assert_eq!(data.get("ref").and_then(serde_yaml::Value::as_str), Some("1"));
    }
}
