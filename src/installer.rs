use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use tracing::{debug, info};
use crate::error::{AbortError, ForeignTool};
use crate::layout::{Layout, REQUIREMENTS_FILE, VENV_NAME};
use crate::output::{event, success, warn};
use crate::package::{EntrypointSpec, PackageSpec};
use crate::requirements::{resolve_installed, RequirementsManifest};
use crate::services::{
    EnvironmentProvisioner, ExecutableLookup, PackageInstaller, Pip, SearchPath, VenvProvisioner,
};
use crate::state::{select_mode, InstallationState, Mode};

/// Everything one `barrel` run needs to know about the user's intent.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Package specifier as typed, e.g. `black>=24`.
    pub package: String,
    /// Executable to expect on `PATH`; defaults to the package name.
    pub entrypoint: Option<String>,
    pub wants_update: bool,
    pub wants_reinstall: bool,
    pub debug: bool,
    /// Interpreter used to provision the environment.
    pub python: String,
}

/// Runs `invocation` in `layout` with the real `python -m venv`, `pip` and `PATH`.
///
/// `current_executable` decides whether this process runs from inside the
/// managed environment. Returns the pinned `name==version` line.
pub fn run(invocation: &Invocation, layout: &Layout, current_executable: &Path) -> Result<String> {
    let provisioner = VenvProvisioner::new(&invocation.python);
    let pip = Pip::new(layout.pip());
    let lookup = SearchPath::from_env(layout.root());
    let installer = Installer::new(
        invocation,
        layout.clone(),
        Services {
            provisioner: &provisioner,
            installer: &pip,
            lookup: &lookup,
        },
    )?;
    installer.execute(current_executable, invocation.wants_update, invocation.wants_reinstall)
}

/// The external collaborators an [`Installer`] drives.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub provisioner: &'a dyn EnvironmentProvisioner,
    pub installer: &'a dyn PackageInstaller,
    pub lookup: &'a dyn ExecutableLookup,
}

/// Runs the installation modes for one package in one directory.
pub struct Installer<'a> {
    pub package: PackageSpec,
    pub entrypoint: EntrypointSpec,
    pub layout: Layout,
    pub debug: bool,
    services: Services<'a>,
}

impl<'a> Installer<'a> {
    pub fn new(invocation: &Invocation, layout: Layout, services: Services<'a>) -> Result<Installer<'a>> {
        let package = PackageSpec::parse(&invocation.package)?;
        let entrypoint = EntrypointSpec::new(invocation.entrypoint.as_deref(), &package);
        Ok(Installer {
            package,
            entrypoint,
            layout,
            debug: invocation.debug,
            services,
        })
    }

    /// Detects the on-disk state, selects a mode and runs it.
    pub fn execute(
        &self,
        current_executable: &Path,
        wants_update: bool,
        wants_reinstall: bool,
    ) -> Result<String> {
        let state = InstallationState::detect(&self.layout, current_executable);
        debug!(?state, wants_update, wants_reinstall, "detected installation state");
        let mode = match select_mode(state, wants_update, wants_reinstall) {
            Ok(mode) => mode,
            Err(AbortError::AmbiguousInstallation) => {
                self.report_existing();
                return Err(AbortError::AmbiguousInstallation.into());
            }
            Err(err) => return Err(err.into()),
        };
        info!(%mode, package = %self.package.raw_input, "selected mode");
        self.run(mode)
    }

    /// Runs the action sequence of `mode`. Returns the pinned package line.
    pub fn run(&self, mode: Mode) -> Result<String> {
        match mode {
            Mode::Create => self.create(),
            Mode::Install => self.install(),
            Mode::Update => self.update(),
            Mode::Reinstall => self.reinstall(),
        }
    }

    /// Creates `.venv` and `requirements.txt` from the raw specifier.
    pub fn create(&self) -> Result<String> {
        self.preflight(false)?;
        self.event(&format!("Setting up {} in this directory", self.package.raw_input));

        self.create_venv()?;
        self.pip_install()?;
        let installed = self.require_installed_package()?;
        self.save_requirements(&installed)?;

        self.check_path()?;
        self.check_gitignore()?;

        success(&format!("\nSuccessfully installed {installed}!"));
        Ok(installed)
    }

    /// Rebuilds `.venv` from an existing `requirements.txt`.
    pub fn install(&self) -> Result<String> {
        self.preflight(true)?;
        self.event(&format!("Installing {} into this directory", self.package.raw_input));

        self.create_venv()?;
        self.pip_install_requirements()?;

        // The manifest is authoritative here, so an empty read-back is not fatal.
        let installed = match self.installed_package()? {
            Some(installed) => installed,
            None => RequirementsManifest::read_pinned(self.layout.requirements_file())?
                .unwrap_or_else(|| self.package.canonical_name.clone()),
        };

        self.check_path()?;
        self.check_gitignore()?;

        success(&format!("\nSuccessfully installed {installed}!"));
        Ok(installed)
    }

    /// Removes `.venv` and `requirements.txt`, then runs [`Installer::create`].
    pub fn reinstall(&self) -> Result<String> {
        self.preflight(false)?;
        self.event(&format!("Re-installing {} into this directory", self.package.raw_input));

        self.remove_existing()?;
        self.create()
    }

    /// Upgrades to the latest release, or installs the new constraint if one was given.
    pub fn update(&self) -> Result<String> {
        self.preflight(true)?;
        self.event(&format!("Updating {}", self.package.raw_input));

        if self.package.is_bare() {
            self.pip_update()?;
        } else {
            self.pip_install()?;
        }

        let installed = self.require_installed_package()?;
        self.save_requirements(&installed)?;

        success(&format!("\nSuccessfully updated {installed}!"));
        Ok(installed)
    }

    /// Refuses to run next to another dependency manager, and checks for the
    /// manifest when the mode depends on one.
    pub fn preflight(&self, requirements_should_exist: bool) -> Result<(), AbortError> {
        for tool in ForeignTool::ALL {
            if tool.markers().iter().any(|marker| self.layout.has(marker)) {
                return Err(AbortError::ForeignManager { tool });
            }
        }
        if requirements_should_exist && !self.layout.requirements_file().exists() {
            return Err(AbortError::MissingRequirements {
                manifest: REQUIREMENTS_FILE.to_string(),
            });
        }
        Ok(())
    }

    /// The entrypoint must resolve through `PATH` to `.venv/bin`, not to some
    /// other executable with the same name.
    pub fn check_path(&self) -> Result<(), AbortError> {
        let name = &self.entrypoint.name;
        match self.services.lookup.find(name) {
            None => Err(AbortError::EntrypointNotFound {
                name: name.clone(),
                env_dir: VENV_NAME.to_string(),
            }),
            Some(found) if !self.layout.exposes_executable(&found) => {
                Err(AbortError::EntrypointShadowed {
                    name: name.clone(),
                    found,
                    env_dir: VENV_NAME.to_string(),
                })
            }
            Some(found) => {
                debug!(path = %found.display(), "entrypoint found");
                Ok(())
            }
        }
    }

    /// Warns, without failing, when a git checkout does not ignore `.venv`.
    pub fn check_gitignore(&self) -> Result<()> {
        if let Some(recommendation) = self.gitignore_recommendation()? {
            warn(&recommendation);
        }
        Ok(())
    }

    /// The `.gitignore` warning to show, if any.
    pub fn gitignore_recommendation(&self) -> Result<Option<String>> {
        if !self.layout.git_dir().exists()
            || self.gitignore_contains(VENV_NAME)?
            || self.gitignore_contains(&format!("/{VENV_NAME}"))?
        {
            return Ok(None);
        }
        Ok(Some(format!(
            "- You should add {VENV_NAME} to your .gitignore so that it is not tracked by git"
        )))
    }

    fn gitignore_contains(&self, text: &str) -> Result<bool> {
        let path = self.layout.gitignore_file();
        if !path.exists() {
            return Ok(false);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        Ok(content
            .lines()
            .any(|line| line.trim().eq_ignore_ascii_case(text)))
    }

    fn report_existing(&self) {
        warn(&format!(
            "- Both a virtual environment ({VENV_NAME}) and a requirements file ({REQUIREMENTS_FILE}) already exist"
        ));
    }

    fn remove_existing(&self) -> Result<()> {
        let venv = self.layout.venv_dir();
        if venv.exists() {
            self.event(&format!("  - Removing existing {VENV_NAME}"));
            fs::remove_dir_all(&venv)
                .with_context(|| format!("Could not remove {}", venv.display()))?;
        }
        let requirements = self.layout.requirements_file();
        if requirements.exists() {
            self.event(&format!("  - Removing existing {REQUIREMENTS_FILE}"));
            fs::remove_file(&requirements)
                .with_context(|| format!("Could not remove {}", requirements.display()))?;
        }
        Ok(())
    }

    fn create_venv(&self) -> Result<()> {
        self.event(&format!("- Creating a virtual environment at {VENV_NAME}"));
        self.services
            .provisioner
            .create_environment(&self.layout.venv_dir())
            .context("Could not create the virtual environment")
    }

    fn pip_install(&self) -> Result<()> {
        self.event(&format!(
            "- Installing {} with {VENV_NAME}/bin/pip",
            self.package.raw_input
        ));
        self.services
            .installer
            .install(&self.package.raw_input, !self.debug)
            .with_context(|| format!("Could not install {}", self.package.raw_input))
    }

    fn pip_install_requirements(&self) -> Result<()> {
        self.event(&format!("- Installing {REQUIREMENTS_FILE}"));
        self.services
            .installer
            .install_from_manifest(&self.layout.requirements_file(), !self.debug)
            .with_context(|| format!("Could not install {REQUIREMENTS_FILE}"))
    }

    fn pip_update(&self) -> Result<()> {
        self.event(&format!(
            "- Updating {} with {VENV_NAME}/bin/pip",
            self.package.raw_input
        ));
        self.services
            .installer
            .upgrade(&self.package.raw_input, !self.debug)
            .with_context(|| format!("Could not update {}", self.package.raw_input))
    }

    fn installed_package(&self) -> Result<Option<String>> {
        let installed = self.services.installer.list_installed()?;
        resolve_installed(&installed, &self.package.canonical_name)
    }

    fn require_installed_package(&self) -> Result<String> {
        match self.installed_package()? {
            Some(installed) => Ok(installed),
            None => Err(AbortError::UnresolvedPackage {
                name: self.package.canonical_name.clone(),
            }
            .into()),
        }
    }

    fn save_requirements(&self, installed: &str) -> Result<()> {
        self.event(&format!("- Saving {REQUIREMENTS_FILE}"));
        RequirementsManifest::new(&self.package.canonical_name, installed)
            .save(self.layout.requirements_file())
    }

    fn event(&self, text: &str) {
        event(text, self.debug);
    }
}
