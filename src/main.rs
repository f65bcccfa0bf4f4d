mod cli;
mod execute;

use barrel::error::AbortError;
use barrel::output;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use crate::cli::CLI;

fn main() {
    let cli = CLI::parse();
    let config = match barrel::config::Config::load_global() {
        Ok(config) => config,
        Err(e) => {
            output::error(&format!("{e:#}"));
            std::process::exit(1);
        }
    };
    let invocation = execute::invocation(cli, &config);
    init_tracing(invocation.debug);

    if let Err(e) = execute::execute(&invocation) {
        match e.downcast_ref::<AbortError>() {
            Some(abort) => output::error(&abort.to_string()),
            None => output::error(&format!("Error: {e:#}")),
        }
        std::process::exit(1);
    }
}

fn init_tracing(debug: bool) {
    let default = if debug { "barrel=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}
