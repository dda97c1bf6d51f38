//! Pure formatting functions for UI output.
//!
//! `format_*` functions build the text, `display_*` functions print it.

use std::path::PathBuf;

use crate::skip::SkipWarning;
use crate::version::BumpKind;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message);
}

/// Display a skipped target to the user.
pub fn display_skip_warning(warning: &SkipWarning) {
    eprintln!("\x1b[33m⚠ WARNING:\x1b[0m {}", warning);
}

/// One-line summary of a successful bump.
pub fn format_bump_summary(
    old_base: &str,
    new_version: &str,
    kind: BumpKind,
    updated: usize,
) -> String {
    format!(
        "Bumped {} -> {} ({}); updated {} file(s)",
        old_base, new_version, kind, updated
    )
}

/// Message for a bump where no target held the old version.
pub fn format_nothing_updated(old_base: &str) -> String {
    format!(
        "No files had version '{}' to update (Chart, values, package.json).",
        old_base
    )
}

/// Display the summary line followed by one indented path per updated file.
pub fn display_bump_summary(
    old_base: &str,
    new_version: &str,
    kind: BumpKind,
    updated: &[PathBuf],
) {
    display_success(&format_bump_summary(old_base, new_version, kind, updated.len()));
    for path in updated {
        println!("  {}", path.display());
    }
}
