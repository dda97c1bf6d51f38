use std::fmt;
use std::path::PathBuf;

/// Targets skipped during a bump.
/// These are non-fatal and reported to the user as warnings.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipWarning {
    /// Optional target file does not exist
    TargetMissing { path: PathBuf },
    /// Target file exists but holds no field with the old version
    VersionNotFound { path: PathBuf, old_base: String },
}

impl fmt::Display for SkipWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipWarning::TargetMissing { path } => {
                write!(f, "Skipped {}: file not found", path.display())
            }
            SkipWarning::VersionNotFound { path, old_base } => {
                write!(
                    f,
                    "Skipped {}: no version '{}' to update",
                    path.display(),
                    old_base
                )
            }
        }
    }
}
