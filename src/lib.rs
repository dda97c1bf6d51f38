pub mod bump;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod skip;
pub mod source;
pub mod targets;
pub mod ui;
pub mod version;

pub use bump::{run, BumpReport, BumpStatus};
pub use error::{ReleaseError, Result};
pub use version::{next_version, BumpKind, Version};
