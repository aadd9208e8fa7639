use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::editor::{EditOpts, render_value};
use crate::error::EditResult;

// Empty or whitespace-only files surface as MalformedInput (EOF while parsing).
pub fn load_json_file(path: &Path) -> EditResult<Value> {
    let data = fs::read(path)?;
    Ok(serde_json::from_slice(&data)?)
}

pub fn write_json_file(path: &Path, value: &Value, pretty: bool) -> EditResult<()> {
    let mut s = render_value(value, pretty);
    s.push('\n');
    fs::write(path, s)?;
    Ok(())
}

// Timestamped copy next to the original (non-destructive)
pub fn backup_file(path: &Path) -> EditResult<PathBuf> {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("document.json");
    let (stem, ext) = match name.rsplit_once('.') {
        Some((s, e)) if !s.is_empty() => (s, Some(e)),
        _ => (name, None),
    };
    let ts = chrono::Local::now().format("%Y%m%d-%H%M%S").to_string();
    let mut src = fs::File::open(path)?;
    // Never overwrite an earlier backup; saves within one second get `_1`, `_2`, ...
    let mut n = 0u32;
    let (dest, mut out) = loop {
        let tag = if n == 0 { ts.clone() } else { format!("{}_{}", ts, n) };
        let dest = path.with_file_name(match ext {
            Some(ext) => format!("{}_{}.{}.bak", stem, tag, ext),
            None => format!("{}_{}.bak", stem, tag),
        });
        match fs::OpenOptions::new().write(true).create_new(true).open(&dest) {
            Ok(f) => break (dest, f),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => n += 1,
            Err(e) => return Err(e.into()),
        }
    };
    io::copy(&mut src, &mut out)?;
    tracing::debug!(src = %path.display(), dest = %dest.display(), "backup written");
    Ok(dest)
}

/// Write `value` to `path`, backing up an existing file first when enabled.
pub fn save_json_file(path: &Path, value: &Value, opts: &EditOpts) -> EditResult<Option<PathBuf>> {
    let backup = if opts.backup_on_save && path.is_file() {
        Some(backup_file(path)?)
    } else {
        None
    };
    write_json_file(path, value, opts.pretty)?;
    Ok(backup)
}
