use clap::Parser;
use clap::builder::NonEmptyStringValueParser;

/// Install one Python tool into this directory: a `.venv` plus a pinned `requirements.txt`
#[derive(Debug, Parser, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct CLI {
    /// Package to install, e.g. `black`, `black>=24` or `./path/to/package`
    #[clap(value_parser = NonEmptyStringValueParser::new())]
    pub package: String,
    /// Remove the existing `.venv` and `requirements.txt` and install from scratch
    #[clap(long)]
    pub reinstall: bool,
    /// Update the existing installation to the latest (or the given) version
    #[clap(long)]
    pub update: bool,
    /// Show installer output and debug logs
    #[clap(long)]
    pub debug: bool,
    /// Executable expected on PATH after installing. Defaults to the package name
    #[clap(long)]
    pub entrypoint: Option<String>,
    /// Python interpreter used to create the virtual environment
    #[clap(long, env = "BARREL_PYTHON")]
    pub python: Option<String>,
}
