//! Files whose embedded version is kept in sync with the chart.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ReleaseConfig;
use crate::error::{ReleaseError, Result};

pub mod rule;

pub use rule::{FieldRule, FieldStyle};

/// Role of a target file in a bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRole {
    /// The chart descriptor. Its absence fails the bump.
    Primary,
    /// Any other synced file. Skipped when absent.
    Secondary,
}

/// A file and the version fields to rewrite in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFile {
    /// Path relative to the project root.
    pub path: PathBuf,
    pub role: TargetRole,
    pub fields: Vec<FieldRule>,
}

/// What rewriting one target file would do, computed before any write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewritePlan {
    /// New file contents.
    Update(String),
    NotFound,
    Unchanged,
}

impl TargetFile {
    /// Computes the new contents of this file for `old_base` → `new_version`.
    ///
    /// Field rules are applied independently. Nothing is written; a file
    /// that cannot be read fails with [`ReleaseError::TargetRead`].
    pub fn plan(&self, root: &Path, old_base: &str, new_version: &str) -> Result<RewritePlan> {
        let path = root.join(&self.path);
        if !path.is_file() {
            return Ok(RewritePlan::NotFound);
        }

        let mut text = fs::read_to_string(&path).map_err(|source| ReleaseError::TargetRead {
            path: self.path.clone(),
            source,
        })?;
        let mut changed = false;
        for field in &self.fields {
            if let Some(updated) = field.apply(&text, old_base, new_version)? {
                tracing::debug!(file = %self.path.display(), key = field.key, "field matched");
                text = updated;
                changed = true;
            }
        }

        if changed {
            Ok(RewritePlan::Update(text))
        } else {
            Ok(RewritePlan::Unchanged)
        }
    }

    /// Writes planned contents back to this file.
    pub fn commit(&self, root: &Path, text: &str) -> std::io::Result<()> {
        fs::write(root.join(&self.path), text)
    }
}

/// The chart directory relative to the project root.
pub fn chart_dir(config: &ReleaseConfig) -> PathBuf {
    Path::new("charts").join(&config.chart)
}

/// The source of truth: `charts/<chart>/Chart.yaml`.
pub fn chart_yaml(config: &ReleaseConfig) -> PathBuf {
    chart_dir(config).join("Chart.yaml")
}

/// Targets in rewrite order: chart descriptor, chart values, package.json.
pub fn default_targets(config: &ReleaseConfig) -> Vec<TargetFile> {
    vec![
        TargetFile {
            path: chart_yaml(config),
            role: TargetRole::Primary,
            fields: vec![
                FieldRule::yaml_bare("version"),
                FieldRule::yaml_tag("appVersion"),
            ],
        },
        TargetFile {
            path: chart_dir(config).join("values.yaml"),
            role: TargetRole::Secondary,
            fields: vec![FieldRule::yaml_tag("tag")],
        },
        TargetFile {
            path: config.package_json.clone(),
            role: TargetRole::Secondary,
            fields: vec![FieldRule::json("version")],
        },
    ]
}
