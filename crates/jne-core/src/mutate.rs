//! Path-addressed replacement of a subtree.
//!
//! Writes walk the path left to right. A missing (or `null`) slot on the way is
//! filled with an empty container whose kind is picked by the segment that
//! follows it: an index makes an array, a key makes an object. Arrays shorter
//! than a requested index are padded with `null`, at most [`MAX_PAD`] of them
//! per array; a write that needs more is refused with
//! [`EditError::IndexOutOfRange`].
//!
//! A value that exists but cannot hold the next segment (a number where an
//! object is needed, an array addressed by key) is a type conflict. In
//! [`WriteMode::Permissive`] it is overwritten by a fresh container and a
//! warning is logged; in [`WriteMode::Strict`] the write is refused.
//!
//! Every write is checked by [`check_write`] before anything changes, so a
//! refused write leaves the document as it was.

use crate::error::{EditError, EditResult};
use crate::path::{Path, Seg};
use serde_json::{Map, Value};

/// Most `null`s a single write may append to one array to reach its index.
pub const MAX_PAD: usize = 1 << 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Overwrite incompatible intermediate values.
    #[default]
    Permissive,
    /// Fail with [`EditError::TypeConflict`] on incompatible intermediate values.
    Strict,
}

/// Replace the subtree at `path` with `new_value` and return the new root.
///
/// Takes `root` by value: the caller hands over a copy it owns, so any
/// previously shared root stays untouched. An index more than [`MAX_PAD`]
/// past the end of its array is refused: the root comes back unchanged and a
/// warning is logged. Use [`try_apply`] to get that refusal as an error.
pub fn apply(root: Value, path: &Path, new_value: Value) -> Value {
    let mut root = root;
    apply_in_place(&mut root, path, new_value);
    root
}

pub fn apply_in_place(root: &mut Value, path: &Path, new_value: Value) {
    if let Err(e) = try_apply_in_place(root, path, new_value, WriteMode::Permissive) {
        tracing::warn!(%path, error = %e, "write refused, document left unchanged");
    }
}

pub fn try_apply(root: Value, path: &Path, new_value: Value, mode: WriteMode) -> EditResult<Value> {
    let mut root = root;
    try_apply_in_place(&mut root, path, new_value, mode)?;
    Ok(root)
}

pub fn try_apply_in_place(root: &mut Value, path: &Path, new_value: Value, mode: WriteMode) -> EditResult<()> {
    check_write(root, path, mode)?;
    write(root, path, new_value);
    Ok(())
}

/// Read-only pre-flight of a write: index bounds always, type conflicts in strict mode.
pub fn check_write(root: &Value, path: &Path, mode: WriteMode) -> EditResult<()> {
    // `None` once the walk is inside containers the write would synthesize.
    let mut cur = Some(root);
    for (depth, seg) in path.iter().enumerate() {
        let existing = cur.filter(|v| !v.is_null());
        if let Some(v) = existing
            && !seg.fits(v)
            && mode == WriteMode::Strict
        {
            return Err(EditError::type_conflict(path.prefix(depth), seg.container_name(), v));
        }
        let container = existing.filter(|v| seg.fits(v));
        if let Seg::Index(i) = seg {
            let len = container.and_then(Value::as_array).map_or(0, Vec::len);
            if i.saturating_sub(len) > MAX_PAD {
                return Err(EditError::IndexOutOfRange { path: path.prefix(depth), index: *i, len });
            }
        }
        cur = container.and_then(|c| match (seg, c) {
            (Seg::Key(k), Value::Object(map)) => map.get(k),
            (Seg::Index(i), Value::Array(arr)) => arr.get(*i),
            _ => None,
        });
    }
    Ok(())
}

// Callers run `check_write` first; indices here are within `MAX_PAD` of the array end.
fn write(root: &mut Value, path: &Path, new_value: Value) {
    tracing::debug!(%path, "apply");
    let segs = path.segments();
    let Some(last) = segs.len().checked_sub(1) else {
        *root = new_value;
        return;
    };
    let mut cur = root;
    for (depth, seg) in segs.iter().enumerate() {
        if !seg.fits(cur) {
            if !cur.is_null() {
                tracing::warn!(
                    %path,
                    at = %path.prefix(depth),
                    found = crate::error::value_type_name(cur),
                    expected = seg.container_name(),
                    "overwriting incompatible value"
                );
            }
            *cur = seg.empty_container();
        }
        let slot = child_slot(cur, seg);
        if depth == last {
            *slot = new_value;
            return;
        }
        cur = slot;
    }
}

// `cur` must already be the container kind `seg` addresses.
fn child_slot<'a>(cur: &'a mut Value, seg: &Seg) -> &'a mut Value {
    match (seg, cur) {
        (Seg::Key(k), Value::Object(map)) => entry(map, k),
        (Seg::Index(i), Value::Array(arr)) => {
            if arr.len() <= *i {
                arr.resize(*i + 1, Value::Null);
            }
            &mut arr[*i]
        }
        _ => unreachable!("container kind is fixed before descending"),
    }
}

fn entry<'a>(map: &'a mut Map<String, Value>, k: &str) -> &'a mut Value {
    map.entry(k.to_owned()).or_insert(Value::Null)
}
