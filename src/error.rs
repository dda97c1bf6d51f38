use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors that abort a release operation
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Could not find version in {}", .0.display())]
    NoVersionLine(PathBuf),

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error(
        "Unknown bump: {0}. Use patch, minor, major, rc, patch-rc, minor-rc, or major-rc."
    )]
    UnknownBump(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read {}: {source}", .path.display())]
    TargetRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}; already updated: {updated}", .path.display())]
    TargetWrite {
        path: PathBuf,
        updated: UpdatedFiles,
        source: std::io::Error,
    },

    #[error("Invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Files rewritten before a bump failed, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdatedFiles(pub Vec<PathBuf>);

impl fmt::Display for UpdatedFiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("none");
        }
        for (i, path) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", path.display())?;
        }
        Ok(())
    }
}

/// Convenience type alias for Results in weavegitops-tooling
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create an invalid version error with context
    pub fn invalid_version(version: impl Into<String>) -> Self {
        ReleaseError::InvalidVersion(version.into())
    }

    /// Create an unknown bump kind error
    pub fn unknown_bump(bump: impl Into<String>) -> Self {
        ReleaseError::UnknownBump(bump.into())
    }
}
