//! Placeholder substitution.
//!
//! String values may embed `{{ dotted.key.path }}` tokens. Each token is
//! replaced by the string form of the value found at that path, looked up
//! from the document root. Only mapping values are scanned; strings inside
//! sequences are left untouched.

use crate::document::{Tree, untagged, untagged_mut};
use crate::error::{Error, Result};
use serde_yaml::Value;
use tracing::trace;

/// Opening placeholder delimiter.
pub const OPEN: &str = "{{";
/// Closing placeholder delimiter.
pub const CLOSE: &str = "}}";

/// Expand every templated string value reachable through mappings of `tree`.
///
/// Lookups go against `root`, which stays fixed for the whole walk. A string
/// is only treated as a template if it contains both delimiters.
pub fn resolve_placeholders(tree: &mut Tree, root: &Tree) -> Result<()> {
    for value in tree.values_mut() {
        match untagged_mut(value) {
            Value::String(text) if text.contains(OPEN) && text.contains(CLOSE) => {
                let expanded = expand(text, root)?;
                trace!(template = %text, expanded = %expanded, "Expanded placeholder");
                *text = expanded;
            }
            Value::Mapping(map) => resolve_placeholders(map, root)?,
            _ => {}
        }
    }
    Ok(())
}

/// Expand all tokens in `template`, left to right.
///
/// Literal text between tokens is copied unchanged. Whitespace inside the
/// delimiters is trimmed before lookup.
///
/// # Example
/// ```
/// use yaml_import::Tree;
/// use yaml_import::resolve::expand;
///
/// let root: Tree = serde_yaml::from_str("{a: 1, b: {c: two}}").unwrap();
/// assert_eq!(expand("{{a}}-{{ b.c }}", &root).unwrap(), "1-two");
/// ```
pub fn expand(template: &str, root: &Tree) -> Result<String> {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    loop {
        let Some(open) = rest.find(OPEN) else {
            result.push_str(rest);
            break;
        };
        result.push_str(&rest[..open]);

        let inner = &rest[open + OPEN.len()..];
        let Some(close) = inner.find(CLOSE) else {
            return Err(Error::UnmatchedDelimiter {
                template: template.to_string(),
            });
        };

        let key = inner[..close].trim();
        push_rendered(&mut result, lookup(root, key)?)?;

        rest = &inner[close + CLOSE.len()..];
    }

    Ok(result)
}

/// Look up a dotted key path from the root of a document.
pub fn lookup<'a>(root: &'a Tree, path: &str) -> Result<&'a Value> {
    lookup_in(root, path, path)
}

fn lookup_in<'a>(map: &'a Tree, remaining: &str, path: &str) -> Result<&'a Value> {
    let (segment, rest) = match remaining.split_once('.') {
        Some((segment, rest)) => (segment, Some(rest)),
        None => (remaining, None),
    };

    let value = map.get(segment).ok_or_else(|| Error::KeyNotFound {
        path: path.to_string(),
        segment: segment.to_string(),
    })?;

    match (rest, untagged(value)) {
        (None, value) => Ok(value),
        (Some(rest), Value::Mapping(nested)) => lookup_in(nested, rest, path),
        (Some(_), _) => Err(Error::NotAMapping {
            path: path.to_string(),
            segment: segment.to_string(),
        }),
    }
}

/// Append the canonical string form of a value.
///
/// Scalars render as their literal YAML text (`.inf`, `.nan` included) and
/// tags are dropped. Sequences and mappings render as compact JSON.
fn push_rendered(out: &mut String, value: &Value) -> Result<()> {
    match untagged(value) {
        Value::String(s) => out.push_str(s),
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        collection => out.push_str(&serde_json::to_string(collection).map_err(Error::Json)?),
    }
    Ok(())
}
