// Read-only lookups over serde_json::Value addressed by `Path`.
// - `resolve` is the primitive: `None` means not found, nothing is coerced.
// - `resolve_or` / `try_resolve` are caller conveniences on top of it.
// - `list_children` feeds tree browsing (one level, with kind and size).
use crate::error::{EditError, EditResult};
use crate::path::{Path, Seg};
use serde_json::Value;

/// Value at `path`, or `None` when a segment is missing or meets the wrong kind of value.
pub fn resolve<'a>(root: &'a Value, path: &Path) -> Option<&'a Value> {
    let mut cur = root;
    for seg in path {
        cur = match (seg, cur) {
            (Seg::Key(k), Value::Object(map)) => map.get(k)?,
            (Seg::Index(i), Value::Array(arr)) => arr.get(*i)?,
            _ => {
                tracing::trace!(%path, at = %seg, "resolve stopped at incompatible value");
                return None;
            }
        };
    }
    Some(cur)
}

pub fn resolve_or<'a>(root: &'a Value, path: &Path, fallback: &'a Value) -> &'a Value {
    resolve(root, path).unwrap_or(fallback)
}

pub fn try_resolve<'a>(root: &'a Value, path: &Path) -> EditResult<&'a Value> {
    resolve(root, path).ok_or_else(|| EditError::not_found(path.clone()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind { Null, Bool, Number, String, Object, Array }

impl JsonKind {
    pub fn of(v: &Value) -> JsonKind {
        match v {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Bool,
            Value::Number(_) => JsonKind::Number,
            Value::String(_) => JsonKind::String,
            Value::Object(_) => JsonKind::Object,
            Value::Array(_) => JsonKind::Array,
        }
    }

    pub fn is_container(self) -> bool {
        matches!(self, JsonKind::Object | JsonKind::Array)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChildInfo { pub segment: Seg, pub kind: JsonKind, pub len: Option<usize> }

fn container_len(v: &Value) -> Option<usize> {
    match v { Value::Array(a) => Some(a.len()), Value::Object(m) => Some(m.len()), _ => None }
}

/// Direct children of the node at `path`; primitives have none.
pub fn list_children(root: &Value, path: &Path) -> EditResult<Vec<ChildInfo>> {
    let node = try_resolve(root, path)?;
    let out = match node {
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| ChildInfo { segment: Seg::Key(k.clone()), kind: JsonKind::of(v), len: container_len(v) })
            .collect(),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| ChildInfo { segment: Seg::Index(i), kind: JsonKind::of(v), len: container_len(v) })
            .collect(),
        _ => Vec::new(),
    };
    Ok(out)
}
