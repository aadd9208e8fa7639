//! Paths into a JSON document.
//!
//! A [`Path`] is an ordered list of [`Seg`]ments, each either an object key or an
//! array index. The empty path addresses the document root. Paths travel as
//! JSON arrays (`["customer", 0]`) and can be converted from and to RFC 6901
//! JSON Pointers (`/customer/0`).

use crate::error::{EditError, EditResult};
use crate::format::Bracketed;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One step of a path.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seg {
    /// Object member access.
    Key(String),
    /// Array element access.
    Index(usize),
}

impl Seg {
    pub fn is_index(&self) -> bool {
        matches!(self, Seg::Index(_))
    }

    pub fn as_key(&self) -> Option<&str> {
        match self {
            Seg::Key(k) => Some(k),
            Seg::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            Seg::Key(_) => None,
            Seg::Index(i) => Some(*i),
        }
    }

    /// Name of the container kind this segment steps into.
    pub fn container_name(&self) -> &'static str {
        match self {
            Seg::Key(_) => "object",
            Seg::Index(_) => "array",
        }
    }

    /// Empty container of the kind this segment addresses.
    pub fn empty_container(&self) -> Value {
        match self {
            Seg::Key(_) => Value::Object(Default::default()),
            Seg::Index(_) => Value::Array(Vec::new()),
        }
    }

    /// True when `v` is the container kind this segment needs.
    pub fn fits(&self, v: &Value) -> bool {
        match self {
            Seg::Key(_) => v.is_object(),
            Seg::Index(_) => v.is_array(),
        }
    }
}

impl fmt::Display for Seg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seg::Key(k) => {
                let quoted = serde_json::to_string(k).map_err(|_| fmt::Error)?;
                write!(f, "[{}]", quoted)
            }
            Seg::Index(i) => write!(f, "[{}]", i),
        }
    }
}

impl From<String> for Seg {
    fn from(s: String) -> Self {
        Seg::Key(s)
    }
}

impl From<&str> for Seg {
    fn from(s: &str) -> Self {
        Seg::Key(s.to_owned())
    }
}

impl From<usize> for Seg {
    fn from(i: usize) -> Self {
        Seg::Index(i)
    }
}

/// A location in a JSON document.
///
/// Builders consume and return the path, so a constructed path is never
/// renumbered behind the caller's back.
///
/// ```
/// use jne_core::Path;
///
/// let p = Path::root().key("customer").index(0);
/// assert_eq!(p.len(), 2);
/// assert_eq!(p.to_string(), r#"$["customer"][0]"#);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<Seg>);

impl Path {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn from_segments(segments: Vec<Seg>) -> Self {
        Self(segments)
    }

    pub fn key(mut self, k: impl Into<String>) -> Self {
        self.0.push(Seg::Key(k.into()));
        self
    }

    pub fn index(mut self, i: usize) -> Self {
        self.0.push(Seg::Index(i));
        self
    }

    /// Append a segment, returning a new path.
    pub fn child(&self, seg: impl Into<Seg>) -> Path {
        let mut p = self.clone();
        p.0.push(seg.into());
        p
    }

    pub fn segments(&self) -> &[Seg] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn last(&self) -> Option<&Seg> {
        self.0.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Seg> {
        self.0.iter()
    }

    pub fn parent(&self) -> Option<Path> {
        let (_, head) = self.0.split_last()?;
        Some(Path(head.to_vec()))
    }

    pub fn join(&self, other: &Path) -> Path {
        let mut p = self.clone();
        p.0.extend(other.0.iter().cloned());
        p
    }

    /// The first `n` segments.
    pub fn prefix(&self, n: usize) -> Path {
        Path(self.0[..n.min(self.0.len())].to_vec())
    }

    /// A path is a prefix of itself.
    pub fn is_prefix_of(&self, other: &Path) -> bool {
        other.0.starts_with(&self.0)
    }

    /// Parse the JSON array form, e.g. `["customer", 0]`.
    pub fn parse_json(text: &str) -> EditResult<Path> {
        let parsed: Value = serde_json::from_str(text)
            .map_err(|e| EditError::malformed_path(text, e.to_string()))?;
        let Value::Array(items) = parsed else {
            return Err(EditError::malformed_path(text, "expected a JSON array"));
        };
        let mut segs = Vec::with_capacity(items.len());
        for item in items {
            let seg = match item {
                Value::String(s) => Seg::Key(s),
                Value::Number(n) => n
                    .as_u64()
                    .and_then(|i| usize::try_from(i).ok())
                    .map(Seg::Index)
                    .ok_or_else(|| {
                        EditError::malformed_path(text, format!("invalid array index {}", n))
                    })?,
                other => {
                    return Err(EditError::malformed_path(
                        text,
                        format!("segment must be a string or index, got {}", other),
                    ));
                }
            };
            segs.push(seg);
        }
        Ok(Path(segs))
    }

    /// Parse an RFC 6901 JSON Pointer.
    ///
    /// Tokens that read as canonical non-negative integers (`0`, `17`, not `017`)
    /// become [`Seg::Index`]; use [`Path::parse_json`] to address numeric object keys.
    pub fn from_pointer(ptr: &str) -> EditResult<Path> {
        if ptr.is_empty() {
            return Ok(Path::root());
        }
        let Some(rest) = ptr.strip_prefix('/') else {
            return Err(EditError::malformed_path(ptr, "pointer must start with '/'"));
        };
        let segs = rest
            .split('/')
            .map(|tok| {
                let tok = unescape_token(tok);
                match parse_index(&tok) {
                    Some(i) => Seg::Index(i),
                    None => Seg::Key(tok),
                }
            })
            .collect();
        Ok(Path(segs))
    }

    pub fn to_pointer(&self) -> String {
        let mut out = String::new();
        for seg in &self.0 {
            out.push('/');
            match seg {
                Seg::Key(k) => out.push_str(&k.replace('~', "~0").replace('/', "~1")),
                Seg::Index(i) => out.push_str(&i.to_string()),
            }
        }
        out
    }
}

fn unescape_token(tok: &str) -> String {
    tok.replace("~1", "/").replace("~0", "~")
}

fn parse_index(tok: &str) -> Option<usize> {
    let canonical = tok == "0" || (!tok.starts_with('0') && !tok.is_empty());
    if canonical && tok.bytes().all(|b| b.is_ascii_digit()) {
        tok.parse().ok()
    } else {
        None
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Bracketed(self), f)
    }
}

impl FromIterator<Seg> for Path {
    fn from_iter<I: IntoIterator<Item = Seg>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Seg;
    type IntoIter = std::slice::Iter<'a, Seg>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Build a [`Path`]: string literals become keys, integers become indices.
///
/// ```
/// use jne_core::path;
///
/// let p = path!("orders", 2, "total");
/// assert_eq!(p.len(), 3);
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::root()
    };
    ($($seg:expr),+ $(,)?) => {
        $crate::Path::from_segments(vec![$($crate::Seg::from($seg)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_macro_agree() {
        let built = Path::root().key("users").index(0).key("name");
        assert_eq!(built, path!("users", 0, "name"));
        assert_eq!(built.segments().get(1), Some(&Seg::Index(0)));
    }

    #[test]
    fn parse_json_array_form() {
        let p = Path::parse_json(r#"["customer", 0]"#).unwrap();
        assert_eq!(p, path!("customer", 0));
        assert!(Path::parse_json("[]").unwrap().is_empty());
    }

    #[test]
    fn parse_json_rejects_bad_segments() {
        for bad in [r#"["a", -1]"#, r#"["a", 1.5]"#, r#"[true]"#, r#"{"a":1}"#, "[\"a\""] {
            assert!(
                matches!(Path::parse_json(bad), Err(EditError::MalformedPath { .. })),
                "{bad}"
            );
        }
    }

    #[test]
    fn pointer_conversion() {
        let p = Path::from_pointer("/a~1b/0/m~0n/007").unwrap();
        assert_eq!(p, path!("a/b", 0, "m~n", "007"));
        assert_eq!(p.to_pointer(), "/a~1b/0/m~0n/007");
        assert_eq!(Path::from_pointer("").unwrap(), Path::root());
        assert!(Path::from_pointer("a/b").is_err());
    }

    #[test]
    fn parent_and_prefix() {
        let p = path!("a", "b", 3);
        assert_eq!(p.parent(), Some(path!("a", "b")));
        assert_eq!(Path::root().parent(), None);
        assert!(p.prefix(1).is_prefix_of(&p));
        assert!(!path!("b").is_prefix_of(&p));
        assert_eq!(p.prefix(10), p);
    }

    #[test]
    fn serde_uses_array_form() {
        let p = path!("items", 0);
        assert_eq!(serde_json::to_string(&p).unwrap(), r#"["items",0]"#);
        let back: Path = serde_json::from_str(r#"["items",0]"#).unwrap();
        assert_eq!(back, p);
    }
}
