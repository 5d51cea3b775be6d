use crate::error::LookupError;
use std::fmt;
use std::str::FromStr;

/// Package ecosystems served by deps.dev.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ecosystem {
    Npm,
    Pypi,
    Maven,
    Cargo,
    Go,
}

impl Ecosystem {
    /// Lowercase name used in package references and request paths.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Ecosystem::Npm => "npm",
            Ecosystem::Pypi => "pypi",
            Ecosystem::Maven => "maven",
            Ecosystem::Cargo => "cargo",
            Ecosystem::Go => "go",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts both package-reference names (`pypi`) and deps.dev system names
/// (`PYPI`).
impl FromStr for Ecosystem {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "npm" => Ok(Ecosystem::Npm),
            "pypi" => Ok(Ecosystem::Pypi),
            "maven" => Ok(Ecosystem::Maven),
            "cargo" => Ok(Ecosystem::Cargo),
            "go" => Ok(Ecosystem::Go),
            _ => Err(LookupError::UnknownEcosystem(s.to_string())),
        }
    }
}
