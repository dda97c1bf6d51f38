//! The version-bump engine.
//!
//! A bump runs read → compute → write → report:
//! 1. Read the current version from `charts/<chart>/Chart.yaml`
//! 2. Compute the next version for the requested kind
//! 3. Rewrite the version in every target that still holds the old base
//! 4. Report the changed files and append to the CI output when configured
//!
//! Steps 1 and 2 fail fatally and run before anything is written. Every
//! target is read and planned before the first write, so an unreadable target
//! also aborts with the tree untouched. A failed write names the files already
//! rewritten.

use std::path::{Path, PathBuf};

use crate::config::{load_config, Settings};
use crate::error::{ReleaseError, Result, UpdatedFiles};
use crate::output;
use crate::skip::SkipWarning;
use crate::source::read_current;
use crate::targets::{chart_yaml, default_targets, RewritePlan, TargetRole};
use crate::ui;
use crate::version::{next_version, BumpKind};

/// Whether a completed bump changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpStatus {
    /// At least one file was rewritten.
    Updated,
    /// No target held the old version.
    NothingUpdated,
}

/// Result of a bump that got past reading and computing.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpReport {
    pub kind: BumpKind,
    /// Base `X.Y.Z` read from the source of truth.
    pub old_base: String,
    /// rc ordinal read from the source of truth.
    pub old_rc: Option<u32>,
    pub new_version: String,
    /// Updated files, relative to the project root, in rewrite order.
    pub updated: Vec<PathBuf>,
    pub skipped: Vec<SkipWarning>,
}

impl BumpReport {
    pub fn status(&self) -> BumpStatus {
        if self.updated.is_empty() {
            BumpStatus::NothingUpdated
        } else {
            BumpStatus::Updated
        }
    }

    /// Process exit code: 0 when something was updated, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self.status() {
            BumpStatus::Updated => 0,
            BumpStatus::NothingUpdated => 1,
        }
    }
}

/// Bumps the version under `project_root`.
///
/// Returns `Err` for fatal conditions and a report for everything else,
/// including the case where no file matched. Only
/// [`ReleaseError::TargetWrite`] and a failed CI output append can follow a
/// write; every other error leaves the tree untouched.
pub fn execute(project_root: &Path, kind: BumpKind, settings: &Settings) -> Result<BumpReport> {
    let source = chart_yaml(&settings.release);
    let source_path = project_root.join(&source);
    if !source_path.is_file() {
        return Err(ReleaseError::SourceNotFound(source));
    }

    let current = read_current(&source_path)?;
    let new_version = next_version(&current.base, kind, current.rc)?;
    tracing::debug!(old = %current.base, new = %new_version, %kind, "computed next version");

    // Plan every target before writing any, so a read failure leaves the tree untouched.
    let mut planned = Vec::new();
    let mut skipped = Vec::new();
    for target in default_targets(&settings.release) {
        match target.plan(project_root, &current.base, &new_version)? {
            RewritePlan::Update(text) => planned.push((target, text)),
            RewritePlan::NotFound => {
                if target.role == TargetRole::Primary {
                    return Err(ReleaseError::SourceNotFound(target.path));
                }
                tracing::debug!(file = %target.path.display(), "target missing");
                skipped.push(SkipWarning::TargetMissing { path: target.path });
            }
            RewritePlan::Unchanged => {
                tracing::debug!(file = %target.path.display(), "old version not found");
                skipped.push(SkipWarning::VersionNotFound {
                    path: target.path,
                    old_base: current.base.clone(),
                });
            }
        }
    }

    let mut updated = Vec::new();
    for (target, text) in planned {
        if let Err(source) = target.commit(project_root, &text) {
            return Err(ReleaseError::TargetWrite {
                path: target.path,
                updated: UpdatedFiles(updated),
                source,
            });
        }
        updated.push(target.path);
    }

    let report = BumpReport {
        kind,
        old_base: current.base,
        old_rc: current.rc,
        new_version,
        updated,
        skipped,
    };

    if report.status() == BumpStatus::Updated {
        if let Some(ci_output) = &settings.ci_output {
            output::append_version(ci_output, &report.new_version)?;
        }
    }

    Ok(report)
}

/// Runs a bump with explicit settings and reports it on the terminal.
///
/// Returns the process exit code: 0 on success, 1 on any failure.
pub fn run_with(project_root: &Path, bump: &str, settings: &Settings) -> i32 {
    let outcome = bump
        .parse::<BumpKind>()
        .and_then(|kind| execute(project_root, kind, settings));

    match outcome {
        Ok(report) => {
            ui::display_bump_report(&report);
            report.exit_code()
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            1
        }
    }
}

/// Bumps the version under `project_root`: reads `weavegitops.toml` there if
/// present and takes the CI output path from the environment.
pub fn run(project_root: &Path, bump: &str) -> i32 {
    match load_config(None, project_root) {
        Ok(config) => run_with(project_root, bump, &Settings::with_config(config)),
        Err(e) => {
            ui::display_error(&e.to_string());
            1
        }
    }
}
