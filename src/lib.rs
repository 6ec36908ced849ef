//! YAML preprocessor with file imports and placeholder substitution.
//!
//! A document may pull in the top-level keys of another file with an
//! `import` key, and may reference any value in the (import-merged) document
//! with `{{ dotted.key.path }}` inside a string:
//!
//! ```yaml
//! # main.yaml
//! import: db.yaml
//! app_name: TestApp
//! db_url: "postgres://{{ db_host }}:{{ db_port }}"
//! ```
//!
//! [`unmarshal`] loads and resolves such a file, then decodes it into any
//! `serde::Deserialize` type.

pub mod cli;
pub mod document;
pub mod error;
pub mod format;
pub mod logging;
pub mod paths;
pub mod resolve;

mod unmarshal;

pub use document::Tree;
pub use error::{Error, Result};
pub use unmarshal::{decode, resolve_file, resolve_str, unmarshal};
