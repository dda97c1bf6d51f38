//! Reading the current version from the source-of-truth file.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ReleaseError, Result};

/// The version currently declared in the source of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentVersion {
    /// Base `X.Y.Z`, without any `v` prefix or prerelease suffix.
    pub base: String,
    /// The `N` of a trailing `-rc.N`, if present.
    pub rc: Option<u32>,
}

fn version_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^\s*version:\s*v?(\d+\.\d+\.\d+)(?:-rc\.(\d+))?")
            .expect("version line pattern is valid")
    })
}

/// Finds the first `version: [v]X.Y.Z[-rc.N]` declaration in `text`.
///
/// `origin` only names the file in the error when no declaration exists.
pub fn parse_current(text: &str, origin: &Path) -> Result<CurrentVersion> {
    let captures = version_line()
        .captures(text)
        .ok_or_else(|| ReleaseError::NoVersionLine(origin.to_path_buf()))?;

    let base = captures[1].to_string();
    let rc = match captures.get(2) {
        Some(n) => Some(
            n.as_str()
                .parse::<u32>()
                .map_err(|_| ReleaseError::invalid_version(captures[0].trim()))?,
        ),
        None => None,
    };

    Ok(CurrentVersion { base, rc })
}

/// Reads `path` and parses its version declaration.
pub fn read_current(path: &Path) -> Result<CurrentVersion> {
    if !path.is_file() {
        return Err(ReleaseError::SourceNotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path)?;
    let current = parse_current(&text, path)?;
    tracing::debug!(
        file = %path.display(),
        base = %current.base,
        rc = ?current.rc,
        "read current version"
    );
    Ok(current)
}
