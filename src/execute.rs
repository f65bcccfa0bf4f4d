use anyhow::{Context, Result};
use barrel::config::Config;
use barrel::installer::{run, Invocation};
use barrel::layout::Layout;
use crate::cli::CLI;

/// Merges the CLI with the global config. Flags on the command line win.
pub fn invocation(cli: CLI, config: &Config) -> Invocation {
    Invocation {
        package: cli.package,
        entrypoint: cli.entrypoint,
        wants_update: cli.update,
        wants_reinstall: cli.reinstall,
        debug: cli.debug || config.debug,
        python: cli.python.unwrap_or_else(|| config.python.clone()),
    }
}

pub fn execute(invocation: &Invocation) -> Result<()> {
    let layout = Layout::current()?;
    let current_exe = std::env::current_exe()
        .context("Could not determine the running executable")?;
    run(invocation, &layout, &current_exe)?;
    Ok(())
}
