//! User interface module - reporting bump results.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Reporting whole results

pub mod formatter;

pub use formatter::{
    display_bump_summary, display_error, display_skip_warning, display_success, format_bump_summary,
    format_nothing_updated,
};

use crate::bump::{BumpReport, BumpStatus};

/// Prints a bump report: skipped targets as warnings, then the outcome.
///
/// Success goes to stdout, the nothing-updated failure to stderr.
pub fn display_bump_report(report: &BumpReport) {
    for warning in &report.skipped {
        display_skip_warning(warning);
    }

    match report.status() {
        BumpStatus::Updated => display_bump_summary(
            &report.old_base,
            &report.new_version,
            report.kind,
            &report.updated,
        ),
        BumpStatus::NothingUpdated => display_error(&format_nothing_updated(&report.old_base)),
    }
}
