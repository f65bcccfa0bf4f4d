use std::fmt;
use std::path::Path;
use crate::error::AbortError;
use crate::layout::{Layout, REQUIREMENTS_FILE, VENV_NAME};

/// What is on disk right now. Computed fresh on every run, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstallationState {
    pub environment_exists: bool,
    pub requirements_exists: bool,
    /// The running executable lives inside the managed `.venv`.
    pub running_inside_environment: bool,
}

impl InstallationState {
    /// Inspects `layout` and checks whether `current_executable` belongs to its environment.
    pub fn detect(layout: &Layout, current_executable: &Path) -> InstallationState {
        InstallationState {
            environment_exists: layout.venv_dir().exists(),
            requirements_exists: layout.requirements_file().exists(),
            running_inside_environment: layout.contains_executable(current_executable),
        }
    }
}

/// The lifecycle action selected for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Fresh directory: new environment and a new manifest.
    Create,
    /// Manifest without environment: rebuild the pinned environment.
    Install,
    /// Move the pinned package to the latest or a newly constrained version.
    Update,
    /// Throw away environment and manifest, then create them again.
    Reinstall,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Create => "create",
            Mode::Install => "install",
            Mode::Update => "update",
            Mode::Reinstall => "reinstall",
        };
        f.write_str(name)
    }
}

/// Picks the mode for `state` and the user's intent flags.
///
/// Running from inside the managed environment always means "update me in place".
/// An environment without a manifest is never produced by `barrel` and aborts,
/// as does an existing installation without `--update` or `--reinstall`.
pub fn select_mode(
    state: InstallationState,
    wants_update: bool,
    wants_reinstall: bool,
) -> Result<Mode, AbortError> {
    if state.running_inside_environment {
        return Ok(Mode::Update);
    }
    match (state.environment_exists, state.requirements_exists) {
        (false, false) => Ok(Mode::Create),
        (false, true) => Ok(Mode::Install),
        (true, false) => Err(AbortError::InconsistentState {
            env_dir: VENV_NAME.to_string(),
            manifest: REQUIREMENTS_FILE.to_string(),
        }),
        (true, true) if wants_update => Ok(Mode::Update),
        (true, true) if wants_reinstall => Ok(Mode::Reinstall),
        (true, true) => Err(AbortError::AmbiguousInstallation),
    }
}
