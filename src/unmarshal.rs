//! Entry points: load, resolve and decode a document.

use crate::document::{self, Tree};
use crate::error::{Error, Result};
use crate::paths;
use crate::resolve::resolve_tree;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

/// Label used in errors for documents that were not read from a file.
const STRING_ORIGIN: &str = "<string>";

/// Load the YAML file at `path`, resolve imports and placeholders, and
/// return the resolved tree.
pub fn resolve_file(path: impl AsRef<Path>) -> Result<Tree> {
    let path = path.as_ref();
    let base_dir = paths::base_dir_of(path);

    let mut tree = document::load(path)?;
    resolve_tree(&mut tree, &base_dir)?;

    debug!(path = %path.display(), keys = tree.len(), "Resolved document");
    Ok(tree)
}

/// Resolve in-memory YAML content, with relative imports read from `base_dir`.
///
/// Parse errors are labelled `<string>` since the content has no file.
pub fn resolve_str(content: &str, base_dir: impl AsRef<Path>) -> Result<Tree> {
    let base_dir = base_dir.as_ref();

    let mut tree = document::parse(content, Path::new(STRING_ORIGIN))?;
    resolve_tree(&mut tree, base_dir)?;
    Ok(tree)
}

/// Load, resolve and decode the YAML file at `path` into `T`.
///
/// The resolved tree is rendered back to YAML and decoded with `serde_yaml`,
/// so scalar coercion and field naming follow `T`'s `Deserialize` impl.
///
/// # Example
/// ```no_run
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Settings {
///     app_name: String,
///     db_port: u16,
/// }
///
/// let settings: Settings = yaml_import::unmarshal("config/main.yaml")?;
/// # Ok::<(), yaml_import::Error>(())
/// ```
pub fn unmarshal<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let tree = resolve_file(path)?;
    decode(&tree)
}

/// Decode a resolved tree into `T` via a YAML round trip.
pub fn decode<T: DeserializeOwned>(tree: &Tree) -> Result<T> {
    let rendered = document::to_yaml_string(tree)?;
    serde_yaml::from_str(&rendered).map_err(Error::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_yaml::Value;
    use tempfile::TempDir;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Ports {
        http: u16,
        label: String,
    }

    #[test]
    fn test_resolve_str_uses_base_dir() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("base.yaml"), "port: 80\n").unwrap();

        let content = "import: base.yaml\nurl: \"http://x:{{ port }}\"\n";
        let tree = resolve_str(content, temp.path()).unwrap();

        let expected: Tree = serde_yaml::from_str("{url: 'http://x:80', port: 80}").unwrap();
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_resolve_str_labels_parse_errors() {
        let err = resolve_str("key: [unclosed", "/srv/config").unwrap_err();
        assert!(matches!(err, Error::Parse { ref path, .. } if path == Path::new("<string>")));
    }

    #[test]
    fn test_resolve_str_applies_merge_keys() {
        let content = "base: &b {x: 1}\nder:\n  <<: *b\n  y: 2\nref: \"{{ der.x }}\"\n";
        let tree = resolve_str(content, ".").unwrap();
        assert_eq!(tree.get("ref").and_then(Value::as_str), Some("1"));
    }

    #[test]
    fn test_decode_keeps_non_finite_floats() {
        #[derive(Debug, Deserialize)]
        struct Limits {
            max: f64,
            min: f64,
        }

        let tree = resolve_str("max: .inf\nmin: -.inf\n", ".").unwrap();
        let limits: Limits = decode(&tree).unwrap();

        assert_eq!(limits.max, f64::INFINITY);
        assert_eq!(limits.min, f64::NEG_INFINITY);
    }

    #[test]
    fn test_decode_coerces_scalars() {
        let tree = resolve_str("http: 8080\nlabel: \"{{ http }}\"\n", ".").unwrap();
        let ports: Ports = decode(&tree).unwrap();

        assert_eq!(
            ports,
            Ports {
                http: 8080,
                label: "8080".to_string()
            }
        );
    }

    #[test]
    fn test_decode_type_mismatch() {
        let tree = resolve_str("http: not-a-number\nlabel: x\n", ".").unwrap();
        let err = decode::<Ports>(&tree).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_unmarshal_missing_root_file() {
        let temp = TempDir::new().unwrap();
        let err = unmarshal::<Value>(temp.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
