use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use weavegitops_tooling::cli::{parse_error_code, Cli};

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            e.print()?;
            std::process::exit(parse_error_code(&e));
        }
    };

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {}", e))?;

    let code = cli.run();
    std::process::exit(code);
}
