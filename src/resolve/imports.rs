//! Import merging.
//!
//! A mapping carrying an `import` key pulls in the top-level keys of the
//! referenced file. Nested mappings (and mappings inside sequences) are
//! resolved before the mapping that contains them, always against the
//! directory of the file being resolved.

use crate::document::{self, Tree, key_label, untagged, untagged_mut};
use crate::error::{Error, Result};
use crate::paths;
use serde_yaml::Value;
use std::path::Path;
use tracing::debug;

/// Reserved key naming a file to merge into the enclosing mapping.
pub const IMPORT_KEY: &str = "import";

/// Resolve every `import` key in `tree`, merging imported documents in place.
///
/// Imported documents are merged as-is: `import` keys inside them are not
/// followed. A key collision aborts with [`Error::DuplicateKey`]; keys merged
/// before the collision remain in the tree.
pub fn resolve_imports(tree: &mut Tree, base_dir: &Path) -> Result<()> {
    for value in tree.values_mut() {
        match untagged_mut(value) {
            Value::Mapping(map) => resolve_imports(map, base_dir)?,
            Value::Sequence(items) => {
                for item in items.iter_mut() {
                    if let Value::Mapping(map) = untagged_mut(item) {
                        resolve_imports(map, base_dir)?;
                    }
                }
            }
            _ => {}
        }
    }

    let reference = match tree.get(IMPORT_KEY).map(untagged) {
        None => return Ok(()),
        Some(Value::String(reference)) => reference.clone(),
        Some(other) => {
            return Err(Error::InvalidImport {
                found: value_kind(other).to_string(),
            });
        }
    };

    let path = paths::resolve(base_dir, &reference);
    let imported = document::load(&path).map_err(|source| Error::Import {
        reference: reference.clone(),
        path: path.clone(),
        source: Box::new(source),
    })?;

    tree.shift_remove(IMPORT_KEY);
    debug!(path = %path.display(), keys = imported.len(), "Merging import");

    merge_disjoint(tree, imported)
}

/// Insert every entry of `imported` into `tree`, refusing to overwrite.
fn merge_disjoint(tree: &mut Tree, imported: Tree) -> Result<()> {
    for (key, value) in imported {
        if tree.contains_key(&key) {
            return Err(Error::DuplicateKey {
                key: key_label(&key),
            });
        }
        tree.insert(key, value);
    }
    Ok(())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(tagged) => value_kind(&tagged.value),
    }
}
