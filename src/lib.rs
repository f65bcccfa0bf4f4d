//! # Barrel Core Library
//!
//! `barrel` installs a single Python tool into the current directory: it creates an
//! isolated `.venv`, installs the package with the environment's own `pip`, pins the
//! resolved version in a one-line `requirements.txt`, and checks that the tool's
//! executable is the one found on `PATH`.
//!
//! The binary is a thin wrapper over [`installer::run`]; tools installed with
//! `barrel` can call [`self_update`] to update themselves in place.
//!
//! ## Modules Overview
//! - [`package`] – Parsing package specifiers into a canonical name
//! - [`state`] – Detecting what is on disk and selecting the installation mode
//! - [`installer`] – Running the create / install / update / reinstall modes
//! - [`services`] – `venv`, `pip` and `PATH` lookup behind narrow traits
//! - [`requirements`] – The pinned `requirements.txt`
//! - [`layout`] – Paths inside the project directory
//! - [`config`] – Global user configuration
//! - [`error`] – [`AbortError`], the diagnostics that stop a mode
//! - [`output`] – Colored terminal output

pub mod config;
pub mod error;
pub mod installer;
pub mod layout;
pub mod output;
pub mod package;
pub mod requirements;
pub mod services;
pub mod state;

pub use error::{AbortError, ForeignTool};
pub use installer::{Installer, Invocation, Services};
pub use layout::Layout;
pub use package::{EntrypointSpec, PackageSpec};
pub use requirements::RequirementsManifest;
pub use state::{select_mode, InstallationState, Mode};

use anyhow::{Context, Result};

/// Updates `package` in the current directory from a tool that `barrel` installed.
///
/// Run from inside the tool's `.venv` this always selects the update mode.
/// Returns the newly pinned `name==version` line.
pub fn self_update(package: &str, entrypoint: Option<&str>) -> Result<String> {
    let config = config::Config::load_global()?;
    let invocation = Invocation {
        package: package.to_string(),
        entrypoint: entrypoint.map(str::to_string),
        wants_update: true,
        wants_reinstall: false,
        debug: config.debug,
        python: config.python,
    };
    let current_exe = std::env::current_exe()
        .context("Could not determine the running executable")?;
    installer::run(&invocation, &Layout::current()?, &current_exe)
}
