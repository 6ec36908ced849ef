//! Error types for document loading and resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading, resolving or decoding a document.
#[derive(Debug, Error)]
pub enum Error {
    /// A document could not be read from disk.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document is not valid YAML.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A document parsed, but its root is not a mapping.
    #[error("document root of {} is not a mapping", path.display())]
    RootNotMapping { path: PathBuf },

    /// Loading the target of an `import` key failed.
    #[error("failed to import file: {} (declared as '{reference}')", path.display())]
    Import {
        /// The path exactly as written in the `import` value.
        reference: String,
        /// The path after resolution against the importing file's directory.
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    /// An `import` key whose value is not a string.
    #[error("import value must be a string, found {found}")]
    InvalidImport { found: String },

    /// An imported top-level key already exists in the importing mapping.
    #[error("duplicate key: {key}")]
    DuplicateKey { key: String },

    /// A `{{` with no `}}` after it.
    #[error("unmatched '{{{{' in placeholder: {template}")]
    UnmatchedDelimiter { template: String },

    /// A placeholder path segment is missing from the document.
    #[error("failed to resolve placeholder '{path}': key '{segment}' not found")]
    KeyNotFound { path: String, segment: String },

    /// A placeholder path walks through a value that is not a mapping.
    #[error("failed to resolve placeholder '{path}': key '{segment}' is not a map")]
    NotAMapping { path: String, segment: String },

    /// The resolved tree could not be serialized for the final decode.
    #[error("failed to encode resolved document: {0}")]
    Encode(#[source] serde_yaml::Error),

    /// The resolved tree could not be rendered as JSON.
    #[error("failed to render resolved document as JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// The resolved document does not fit the requested type.
    #[error("failed to decode resolved document: {0}")]
    Decode(#[source] serde_yaml::Error),
}

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_message() {
        let err = Error::DuplicateKey {
            key: "db_host".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate key: db_host");
    }

    #[test]
    fn test_unmatched_delimiter_message_names_template() {
        let err = Error::UnmatchedDelimiter {
            template: "{{ open".to_string(),
        };
        assert_eq!(err.to_string(), "unmatched '{{' in placeholder: {{ open");
    }

    #[test]
    fn test_key_not_found_message() {
        let err = Error::KeyNotFound {
            path: "missing.key".to_string(),
            segment: "missing".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to resolve placeholder 'missing.key': key 'missing' not found"
        );
    }

    #[test]
    fn test_import_error_exposes_source() {
        use std::error::Error as _;

        let inner = Error::RootNotMapping {
            path: PathBuf::from("/tmp/list.yaml"),
        };
        let err = Error::Import {
            reference: "list.yaml".to_string(),
            path: PathBuf::from("/tmp/list.yaml"),
            source: Box::new(inner),
        };

        assert!(err.to_string().contains("/tmp/list.yaml"));
        assert!(err.to_string().contains("'list.yaml'"));
        let source = err.source().expect("import error should carry a source");
        assert!(source.to_string().contains("not a mapping"));
    }
}
