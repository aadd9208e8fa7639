// Edit session for a single selected node.
// Holds the node's path and a text buffer seeded from the store; `commit`
// parses the buffer, writes it through the store and re-seeds from the result.
use crate::error::EditResult;
use crate::format::format_path;
use crate::mutate::WriteMode;
use crate::path::Path;
use crate::resolve::resolve;
use crate::store::DocumentStore;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOpts {
    pub mode: WriteMode,
    pub pretty: bool,
    pub backup_on_save: bool,
}

impl Default for EditOpts {
    fn default() -> Self {
        Self {
            mode: WriteMode::Permissive,
            pretty: true,
            backup_on_save: true,
        }
    }
}

pub fn render_value(v: &Value, pretty: bool) -> String {
    let res = if pretty { serde_json::to_string_pretty(v) } else { serde_json::to_string(v) };
    // Value's Serialize impl has no failure path for string-keyed maps.
    res.unwrap_or_else(|_| "null".to_string())
}

#[derive(Debug, Clone)]
pub struct NodeEditor {
    path: Path,
    buffer: String,
    missing: bool,
    opts: EditOpts,
}

impl NodeEditor {
    pub fn open(store: &impl DocumentStore, path: Path, opts: EditOpts) -> Self {
        let mut ed = Self { path, buffer: String::new(), missing: false, opts };
        ed.reload(store);
        ed
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn display_path(&self) -> String {
        format_path(&self.path)
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// True when the node did not exist at the last reload.
    pub fn is_missing(&self) -> bool {
        self.missing
    }

    pub fn reload(&mut self, store: &impl DocumentStore) {
        let snap = store.current();
        let found = resolve(&snap.root, &self.path);
        self.missing = found.is_none();
        self.buffer = render_value(found.unwrap_or(&Value::Null), self.opts.pretty);
    }

    /// Parse the buffer and write it at this node. Invalid JSON fails before the store is touched.
    pub fn commit(&mut self, store: &impl DocumentStore) -> EditResult<u64> {
        let value: Value = serde_json::from_str(&self.buffer)?;
        let rev = store.edit(&self.path, value, self.opts.mode)?;
        tracing::debug!(path = %self.path, revision = rev, "node committed");
        self.reload(store);
        Ok(rev)
    }
}
