//! CI step outputs.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Appends `version=<new>` to the CI output file, creating it if absent.
///
/// Existing content is never truncated.
pub fn append_version(path: &Path, version: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "version={}", version)?;
    tracing::debug!(file = %path.display(), %version, "appended CI output");
    Ok(())
}
