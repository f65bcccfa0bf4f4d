use std::path::{Path, PathBuf};

/// Name of the isolated environment directory.
pub const VENV_NAME: &str = ".venv";
/// Name of the pinned manifest.
pub const REQUIREMENTS_FILE: &str = "requirements.txt";
/// Ignore list checked for the environment directory.
pub const GITIGNORE_FILE: &str = ".gitignore";
/// Marker for a version-controlled directory.
pub const GIT_DIR: &str = ".git";

#[cfg(windows)]
const ENV_BIN_DIR: &str = "Scripts";
#[cfg(not(windows))]
const ENV_BIN_DIR: &str = "bin";

#[cfg(windows)]
const PIP_EXE: &str = "pip.exe";
#[cfg(not(windows))]
const PIP_EXE: &str = "pip";

/// Paths `barrel` reads and writes, all relative to one project directory.
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    pub fn new<P: AsRef<Path>>(root: P) -> Layout {
        Layout {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Layout of the current working directory.
    pub fn current() -> anyhow::Result<Layout> {
        Ok(Layout::new(std::env::current_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path to the `.venv` directory.
    pub fn venv_dir(&self) -> PathBuf {
        self.root.join(VENV_NAME)
    }

    /// Returns the directory holding the environment's executables (`.venv/bin`).
    pub fn venv_bin_dir(&self) -> PathBuf {
        self.venv_dir().join(ENV_BIN_DIR)
    }

    /// Returns the environment's own `pip`.
    pub fn pip(&self) -> PathBuf {
        self.venv_bin_dir().join(PIP_EXE)
    }

    /// Returns the path to `requirements.txt`.
    pub fn requirements_file(&self) -> PathBuf {
        self.root.join(REQUIREMENTS_FILE)
    }

    pub fn gitignore_file(&self) -> PathBuf {
        self.root.join(GITIGNORE_FILE)
    }

    pub fn git_dir(&self) -> PathBuf {
        self.root.join(GIT_DIR)
    }

    /// Checks whether `marker` (a file name) exists in the project directory.
    pub fn has(&self, marker: &str) -> bool {
        self.root.join(marker).exists()
    }

    /// Whether `executable` lives somewhere under the `.venv` directory.
    ///
    /// Directories are canonicalized when possible so symlinked temp dirs and
    /// relative `PATH` entries compare equal. The executable itself is not
    /// resolved: a symlink in `.venv/bin` counts as living there.
    pub fn contains_executable(&self, executable: &Path) -> bool {
        canonical_entry(executable).starts_with(canonical_dir(&self.venv_dir()))
    }

    /// Whether `executable` lives in `.venv/bin`.
    pub fn exposes_executable(&self, executable: &Path) -> bool {
        canonical_entry(executable).starts_with(canonical_dir(&self.venv_bin_dir()))
    }
}

fn canonical_dir(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// `path` with its parent directory canonicalized and the last component kept as is.
fn canonical_entry(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => canonical_dir(parent).join(name),
        _ => path.to_path_buf(),
    }
}
