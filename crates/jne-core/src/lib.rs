//! jne-core: path-addressed inspection and editing of JSON document nodes
//!
//! This crate focuses on a small, well-factored surface:
//! - `Path` / `Seg` addressing (JSON array form and JSON Pointer)
//! - `resolve`: read a subtree, `None` when absent
//! - `apply`: return a new root with one subtree replaced, synthesizing containers
//! - `format_path`: `$["customer"][0]` rendering for display
//! - `SharedDocument` store, `NodeEditor` session, and JSON file helpers
//!
pub mod editor;
pub mod error;
pub mod format;
pub mod json;
pub mod mutate;
pub mod path;
pub mod resolve;
pub mod store;

pub use editor::{EditOpts, NodeEditor, render_value};
pub use error::{EditError, EditResult, value_type_name};
pub use format::{Bracketed, ROOT_MARKER, format_path};
pub use json::{backup_file, load_json_file, save_json_file, write_json_file};
pub use mutate::{MAX_PAD, WriteMode, apply, apply_in_place, check_write, try_apply, try_apply_in_place};
pub use path::{Path, Seg};
pub use resolve::{ChildInfo, JsonKind, list_children, resolve, resolve_or, try_resolve};
pub use store::{DocumentStore, SharedDocument, Snapshot};
