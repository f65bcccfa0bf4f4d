//! Collaborators the installer shells out to.
//!
//! Each concern sits behind a narrow trait so the orchestration in
//! [`crate::installer`] can run against fakes in tests.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use anyhow::{bail, Context, Result};
use tracing::debug;

/// Creates isolated environments.
pub trait EnvironmentProvisioner {
    fn create_environment(&self, path: &Path) -> Result<()>;
}

/// Installs packages into an environment and reports what is installed.
pub trait PackageInstaller {
    fn install(&self, specifier: &str, quiet: bool) -> Result<()>;
    fn install_from_manifest(&self, manifest: &Path, quiet: bool) -> Result<()>;
    fn upgrade(&self, specifier: &str, quiet: bool) -> Result<()>;
    /// One `name==version` line per installed distribution, in pip's order.
    fn list_installed(&self) -> Result<Vec<String>>;
}

/// Looks an executable up the way the shell would.
pub trait ExecutableLookup {
    fn find(&self, name: &str) -> Option<PathBuf>;
}

/// Provisions environments with `<python> -m venv <path>`.
#[derive(Debug, Clone)]
pub struct VenvProvisioner {
    pub python: String,
}

impl VenvProvisioner {
    pub fn new(python: &str) -> VenvProvisioner {
        VenvProvisioner {
            python: python.to_string(),
        }
    }
}

impl EnvironmentProvisioner for VenvProvisioner {
    fn create_environment(&self, path: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.python);
        cmd.arg("-m").arg("venv").arg(path);
        run(&mut cmd, false)
    }
}

/// Drives the environment's own `pip`.
#[derive(Debug, Clone)]
pub struct Pip {
    pub executable: PathBuf,
}

impl Pip {
    pub fn new<P: AsRef<Path>>(executable: P) -> Pip {
        Pip {
            executable: executable.as_ref().to_path_buf(),
        }
    }

    fn command(&self) -> Command {
        Command::new(&self.executable)
    }
}

impl PackageInstaller for Pip {
    fn install(&self, specifier: &str, quiet: bool) -> Result<()> {
        let mut cmd = self.command();
        cmd.arg("install").arg(specifier);
        run(&mut cmd, quiet)
    }

    fn install_from_manifest(&self, manifest: &Path, quiet: bool) -> Result<()> {
        let mut cmd = self.command();
        cmd.arg("install").arg("-r").arg(manifest);
        run(&mut cmd, quiet)
    }

    fn upgrade(&self, specifier: &str, quiet: bool) -> Result<()> {
        let mut cmd = self.command();
        cmd.arg("install").arg("-U").arg(specifier);
        run(&mut cmd, quiet)
    }

    fn list_installed(&self) -> Result<Vec<String>> {
        let mut cmd = self.command();
        cmd.arg("freeze");
        debug!(command = ?cmd, "running");
        let output = cmd
            .stderr(Stdio::inherit())
            .output()
            .with_context(|| format!("Could not run {}", self.executable.display()))?;
        if !output.status.success() {
            bail!("{:?} exited with {}", cmd, output.status);
        }
        let stdout = String::from_utf8(output.stdout)?;
        Ok(stdout.lines().map(str::to_string).collect())
    }
}

/// Resolves executables through `PATH`, relative entries against `cwd`.
#[derive(Debug, Clone)]
pub struct SearchPath {
    pub paths: Option<OsString>,
    pub cwd: PathBuf,
}

impl SearchPath {
    /// Uses the process's own `PATH`.
    pub fn from_env<P: AsRef<Path>>(cwd: P) -> SearchPath {
        SearchPath {
            paths: std::env::var_os("PATH"),
            cwd: cwd.as_ref().to_path_buf(),
        }
    }

    /// `paths` with every relative entry joined onto `cwd`.
    fn anchored_paths(&self) -> Option<OsString> {
        let paths = self.paths.as_ref()?;
        let entries = std::env::split_paths(paths).map(|entry| {
            if entry.is_relative() {
                self.cwd.join(entry)
            } else {
                entry
            }
        });
        std::env::join_paths(entries).ok()
    }
}

impl ExecutableLookup for SearchPath {
    fn find(&self, name: &str) -> Option<PathBuf> {
        which::which_in(name, self.anchored_paths(), &self.cwd).ok()
    }
}

/// Runs `cmd` to completion; any non-zero exit is an error.
fn run(cmd: &mut Command, quiet: bool) -> Result<()> {
    debug!(command = ?cmd, quiet, "running");
    if quiet {
        cmd.stdout(Stdio::null());
    }
    let status = cmd
        .status()
        .with_context(|| format!("Could not run {:?}", cmd.get_program()))?;
    if !status.success() {
        bail!("{:?} exited with {}", cmd, status);
    }
    Ok(())
}
