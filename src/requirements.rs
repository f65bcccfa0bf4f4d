use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use regex::Regex;

/// The single-package `requirements.txt` managed by `barrel`.
///
/// Only the top-level package is pinned. Transitive dependencies are left out
/// on purpose, so they may drift between installs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementsManifest {
    /// Name written into the header comment.
    pub managed_by: String,
    /// The resolved `name==version` line as reported by pip.
    pub pinned: String,
}

impl RequirementsManifest {
    pub fn new(managed_by: &str, pinned: &str) -> RequirementsManifest {
        RequirementsManifest {
            managed_by: managed_by.to_string(),
            pinned: pinned.trim().to_string(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "# This file is managed automatically by {}\n{}\n",
            self.managed_by, self.pinned
        )
    }

    /// Writes the manifest to `path`, replacing whatever was there.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.render())
            .with_context(|| format!("Could not write {}", path.display()))
    }

    /// Reads the first pinned line of an existing manifest, if it has one.
    pub fn read_pinned<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        Ok(content
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string))
    }
}

/// Finds the line in `installed` (pip freeze output) that pins `name`.
///
/// The name must match case-insensitively at the start of the line and be
/// followed by a non-word character, so `black` does not match `blackd==1.0`.
pub fn resolve_installed<S: AsRef<str>>(installed: &[S], name: &str) -> Result<Option<String>> {
    let re = Regex::new(&format!(r"(?i)^{}\W", regex::escape(name)))?;
    Ok(installed
        .iter()
        .map(|line| line.as_ref().trim())
        .find(|line| re.is_match(line))
        .map(str::to_string))
}
