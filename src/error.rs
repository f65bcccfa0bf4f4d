use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Another dependency manager whose marker files make `barrel` refuse to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignTool {
    Poetry,
    Pipenv,
    PipCompile,
    Setuptools,
}

impl ForeignTool {
    /// Every known tool, in the order their markers are checked.
    pub const ALL: [ForeignTool; 4] = [
        ForeignTool::Poetry,
        ForeignTool::Pipenv,
        ForeignTool::PipCompile,
        ForeignTool::Setuptools,
    ];

    /// Files whose presence means this tool owns the dependencies of the directory.
    pub fn markers(self) -> &'static [&'static str] {
        match self {
            ForeignTool::Poetry => &["pyproject.toml", "poetry.lock"],
            ForeignTool::Pipenv => &["Pipfile", "Pipfile.lock"],
            ForeignTool::PipCompile => &["requirements.in"],
            ForeignTool::Setuptools => &["setup.py"],
        }
    }

    /// The command the user should run instead.
    pub fn recommended_command(self) -> &'static str {
        match self {
            ForeignTool::Poetry => "poetry update",
            ForeignTool::Pipenv => "pipenv update",
            ForeignTool::PipCompile => "pip-compile requirements.in",
            ForeignTool::Setuptools => "python setup.py install",
        }
    }
}

impl fmt::Display for ForeignTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ForeignTool::Poetry => "Poetry",
            ForeignTool::Pipenv => "Pipenv",
            ForeignTool::PipCompile => "pip-compile",
            ForeignTool::Setuptools => "setuptools",
        };
        f.write_str(name)
    }
}

/// Stops the current installation mode. Each variant is one kind of diagnostic
/// and its `Display` is the full message shown to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbortError {
    #[error(
        "It looks like you are using {tool} for dependencies. Use the `{}` command instead.",
        .tool.recommended_command()
    )]
    ForeignManager { tool: ForeignTool },

    #[error(
        "A {manifest} file does not exist, which likely means that you aren't updating a barrel-compatible installation or aren't in the right directory."
    )]
    MissingRequirements { manifest: String },

    #[error(
        "inconsistent state: environment present without manifest ({env_dir} exists but {manifest} does not... might not be a barrel-compatible installation?)"
    )]
    InconsistentState { env_dir: String, manifest: String },

    #[error(
        "ambiguous: existing installation requires explicit update or reinstall intent (use --reinstall or --update)"
    )]
    AmbiguousInstallation,

    #[error("Could not find a pinned version of {name}")]
    UnresolvedPackage { name: String },

    #[error(
        "Could not find {name} in PATH\n\nA simple solution is to add this to your .bash_profile/.zshrc:\nexport PATH=\"./{env_dir}/bin:$PATH\""
    )]
    EntrypointNotFound { name: String, env_dir: String },

    #[error(
        "Found {name} at {} instead of inside {env_dir}\n\nPut the environment first in your PATH, for example in your .bash_profile/.zshrc:\nexport PATH=\"./{env_dir}/bin:$PATH\"",
        .found.display()
    )]
    EntrypointShadowed {
        name: String,
        found: PathBuf,
        env_dir: String,
    },

    #[error("A package name is required (got {input:?})")]
    EmptyPackageName { input: String },
}
