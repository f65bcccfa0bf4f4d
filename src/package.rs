use crate::error::AbortError;

/// Characters that start a version constraint in a package specifier.
const CONSTRAINT_OPERATORS: [char; 5] = ['>', '<', '~', '^', '='];
/// An operator preceded by this character is part of the name, not a constraint.
const ESCAPE: char = '\\';

/// What the user asked to install, e.g. `black`, `black>=24.1` or `./tools/mytool`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    /// The complete expression, handed to pip unchanged.
    pub raw_input: String,
    /// The bare package name: no constraint suffix and no directory prefix.
    pub canonical_name: String,
}

impl PackageSpec {
    /// Derives the canonical package name from a user-supplied specifier.
    ///
    /// The name is everything before the first unescaped constraint operator.
    /// If it still contains a `/`, only the last path segment is kept so that
    /// local paths yield a usable package and executable name.
    ///
    /// # Errors
    /// Returns [`AbortError::EmptyPackageName`] if no name is left over,
    /// e.g. for `""` or `">=1.0"`.
    pub fn parse(raw_input: &str) -> Result<PackageSpec, AbortError> {
        let candidate = match find_constraint_start(raw_input) {
            Some(index) => &raw_input[..index],
            None => raw_input,
        };
        let canonical = candidate
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();

        if canonical.is_empty() {
            return Err(AbortError::EmptyPackageName {
                input: raw_input.to_string(),
            });
        }
        Ok(PackageSpec {
            raw_input: raw_input.to_string(),
            canonical_name: canonical.to_string(),
        })
    }

    /// True when the user gave a plain name, no constraint and no path.
    pub fn is_bare(&self) -> bool {
        self.raw_input == self.canonical_name
    }
}

/// Byte index of the first constraint operator not preceded by [`ESCAPE`].
fn find_constraint_start(input: &str) -> Option<usize> {
    let mut previous = None;
    for (index, ch) in input.char_indices() {
        if CONSTRAINT_OPERATORS.contains(&ch) && previous != Some(ESCAPE) {
            return Some(index);
        }
        previous = Some(ch);
    }
    None
}

/// The executable expected on `PATH` after installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrypointSpec {
    pub name: String,
}

impl EntrypointSpec {
    /// Uses `name` when given and non-empty, the package's canonical name otherwise.
    pub fn new(name: Option<&str>, package: &PackageSpec) -> EntrypointSpec {
        let name = name
            .filter(|n| !n.is_empty())
            .unwrap_or(&package.canonical_name);
        EntrypointSpec { name: name.to_string() }
    }
}
