//! Document tree and loader.
//!
//! Documents are parsed into a generic `serde_yaml` tree. Every YAML scalar
//! survives as-is (non-finite floats, big integers, tagged values), merge
//! keys (`<<: *anchor`) are expanded at load time, and mappings keep their
//! insertion order so rendered output stays stable across runs.

use crate::error::{Error, Result};
use serde::de::{self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, VariantAccess};
use serde_yaml::value::{Tag, TaggedValue};
use serde_yaml::{Mapping, Number, Value};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// A mapping-rooted document tree.
pub type Tree = Mapping;

/// Read a YAML file and parse it into a mapping-rooted tree.
pub fn load(path: &Path) -> Result<Tree> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tree = parse(&content, path)?;
    debug!(path = %path.display(), keys = tree.len(), "Loaded document");
    Ok(tree)
}

/// Parse YAML content into a mapping-rooted tree.
///
/// `origin` is only used to label errors. An empty document parses as an
/// empty mapping.
pub fn parse(content: &str, origin: &Path) -> Result<Tree> {
    if content.trim().is_empty() {
        return Ok(Tree::new());
    }

    let parse_error = |source| Error::Parse {
        path: origin.to_path_buf(),
        source,
    };
    let Node(mut value) = serde_yaml::from_str(content).map_err(parse_error)?;
    value.apply_merge().map_err(parse_error)?;

    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Tree::new()),
        _ => Err(Error::RootNotMapping {
            path: origin.to_path_buf(),
        }),
    }
}

/// A `serde_yaml::Value` that also accepts integers wider than 64 bits,
/// keeping them as the nearest float.
struct Node(Value);

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor).map(Node)
    }
}

struct NodeVisitor;

impl<'de> de::Visitor<'de> for NodeVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any YAML value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Value, E> {
        Ok(Value::Number(Number::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Value, E> {
        Ok(Value::Number(Number::from(v)))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> std::result::Result<Value, E> {
        Ok(Value::Number(Number::from(v as f64)))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> std::result::Result<Value, E> {
        Ok(Value::Number(Number::from(v as f64)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Value, E> {
        Ok(Value::Number(Number::from(v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> std::result::Result<Value, D::Error> {
        Node::deserialize(d).map(|node| node.0)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(Node(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Value, A::Error> {
        let mut mapping = Mapping::new();
        while let Some((Node(key), Node(value))) = map.next_entry()? {
            if mapping.contains_key(&key) {
                return Err(de::Error::custom(format!(
                    "duplicate entry with key {}",
                    key_label(&key)
                )));
            }
            mapping.insert(key, value);
        }
        Ok(Value::Mapping(mapping))
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> std::result::Result<Value, A::Error> {
        let (tag, contents): (String, _) = data.variant()?;
        let Node(value) = contents.newtype_variant()?;
        if tag.trim_start_matches('!').is_empty() {
            return Ok(value);
        }
        Ok(Value::Tagged(Box::new(TaggedValue {
            tag: Tag::new(tag),
            value,
        })))
    }
}

/// Serialize a tree back to YAML.
pub fn to_yaml_string(tree: &Tree) -> Result<String> {
    serde_yaml::to_string(tree).map_err(Error::Encode)
}

/// Strip any number of YAML tags, yielding the tagged content.
pub fn untagged(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untagged(&tagged.value),
        other => other,
    }
}

/// Mutable counterpart of [`untagged`].
pub fn untagged_mut(value: &mut Value) -> &mut Value {
    match value {
        Value::Tagged(tagged) => untagged_mut(&mut tagged.value),
        other => other,
    }
}

/// Render a mapping key for messages. String keys render bare.
pub fn key_label(key: &Value) -> String {
    match untagged(key) {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{other:?}")),
    }
}
