//! Human-readable rendering of paths: `$["customer"][0]`.

use crate::path::Path;
use std::fmt;

/// Marker printed for the document root.
pub const ROOT_MARKER: &str = "$";

/// Display adapter rendering a path as a root marker followed by bracketed segments.
pub struct Bracketed<'a>(pub &'a Path);

impl fmt::Display for Bracketed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ROOT_MARKER)?;
        for seg in self.0 {
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

pub fn format_path(path: &Path) -> String {
    Bracketed(path).to_string()
}
