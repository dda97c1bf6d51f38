//! Command-line surface.
//!
//! Argument parsing lives here; the work is done by [`crate::bump`] and
//! [`ci`]. Subcommand handlers return a process exit code instead of exiting,
//! so they can be driven from tests.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::bump;
use crate::config::{self, Settings};
use crate::ui;

pub mod ci;

#[derive(Parser, Debug)]
#[command(
    name = "weavegitops",
    about = "Weave GitOps tooling: release bump and CI helpers",
    version
)]
pub struct Cli {
    /// Custom configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Release: bump the version in Chart, values and package.json
    Release {
        #[command(subcommand)]
        command: ReleaseCommand,
    },
    /// CI helper commands
    Ci {
        #[command(subcommand)]
        command: CiCommand,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ReleaseCommand {
    /// Bump version from Chart.yaml; update Chart, values, package.json
    Bump {
        /// patch|minor|major|rc|patch-rc|minor-rc|major-rc. minor-rc: 0.39.x -> 0.40.0-rc.1
        #[arg(default_value = "patch")]
        bump: String,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum CiCommand {
    /// Print 'true' if GITHUB_REF is a v-prefixed tag, else 'false'
    IsTag,
}

impl Cli {
    /// Dispatches the parsed command and returns the process exit code.
    pub fn run(self) -> i32 {
        match self.command {
            Command::Release {
                command: ReleaseCommand::Bump { bump },
            } => run_bump(self.config, &bump),
            Command::Ci {
                command: CiCommand::IsTag,
            } => {
                println!("{}", ci::is_tag_from_env());
                0
            }
        }
    }
}

/// Exit code for a failed parse: 0 for `--help` and `--version`, 1 for every
/// usage error, including a missing subcommand.
pub fn parse_error_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

fn run_bump(config_path: Option<PathBuf>, bump: &str) -> i32 {
    let settings = config::project_root().and_then(|root| {
        let config = config::load_config(config_path.as_deref(), &root)?;
        Ok((root, Settings::with_config(config)))
    });

    match settings {
        Ok((root, settings)) => bump::run_with(&root, bump, &settings),
        Err(e) => {
            ui::display_error(&e.to_string());
            1
        }
    }
}
