use crate::error::DepscoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const PURL_PREFIX: &str = "pkg:";
const DEPS_DOT_DEV_PREFIX: &str = "https://deps.dev/";
const NPMJS_PREFIX: &str = "https://www.npmjs.com/package/";
const PYPI_PREFIX: &str = "https://pypi.org/project/";

/// A package version as seen by the graph walk.
///
/// All three fields are opaque to the aggregation; only `name` takes part in
/// cycle detection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Package {
    #[serde(alias = "Ecosystem")]
    pub ecosystem: String,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Version")]
    pub version: String,
}

impl Package {
    pub fn new(
        ecosystem: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            ecosystem: ecosystem.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pkg:{}/{}@{}", self.ecosystem, self.name, self.version)
    }
}

/// Parses a package URL (`pkg:npm/left-pad@1.3.0`) or one of the package page
/// URLs of deps.dev, npmjs.com and pypi.org.
impl FromStr for Package {
    type Err = DepscoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = if let Some(rest) = s.strip_prefix(PURL_PREFIX) {
            parse_purl(rest)
        } else if let Some(rest) = s.strip_prefix(DEPS_DOT_DEV_PREFIX) {
            parse_deps_dot_dev(rest)
        } else if let Some(rest) = s.strip_prefix(NPMJS_PREFIX) {
            parse_npmjs(rest)
        } else if let Some(rest) = s.strip_prefix(PYPI_PREFIX) {
            parse_pypi(rest)
        } else {
            None
        };

        parsed.ok_or_else(|| DepscoreError::InvalidPackage(s.to_string()))
    }
}

fn parse_purl(rest: &str) -> Option<Package> {
    let (ecosystem, rest) = rest.split_once('/')?;
    let (name, version) = rest.rsplit_once('@')?;
    build(ecosystem, &decode(name)?, &decode(version)?)
}

fn parse_deps_dot_dev(rest: &str) -> Option<Package> {
    let (ecosystem, rest) = rest.split_once('/')?;
    let (name, version) = rest.trim_end_matches('/').rsplit_once('/')?;
    build(&ecosystem.to_lowercase(), &decode(name)?, &decode(version)?)
}

fn parse_npmjs(rest: &str) -> Option<Package> {
    let (name, version) = rest.trim_end_matches('/').rsplit_once("/v/")?;
    build("npm", &decode(name)?, version)
}

fn parse_pypi(rest: &str) -> Option<Package> {
    let (name, version) = rest.trim_end_matches('/').split_once('/')?;
    if version.contains('/') {
        return None;
    }
    build("pypi", name, version)
}

fn decode(segment: &str) -> Option<String> {
    urlencoding::decode(segment).ok().map(|s| s.into_owned())
}

fn build(ecosystem: &str, name: &str, version: &str) -> Option<Package> {
    if ecosystem.is_empty() || name.is_empty() || version.is_empty() {
        return None;
    }
    Some(Package::new(ecosystem, name, version))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Package {
        s.parse().expect("package reference should parse")
    }

    #[test]
    fn purl_display_and_parse_agree() {
        let package = Package::new("npm", "@babel/core", "7.24.0");
        assert_eq!(package.to_string(), "pkg:npm/@babel/core@7.24.0");
        assert_eq!(parse("pkg:npm/@babel/core@7.24.0"), package);
        assert_eq!(parse("pkg:npm/%40babel/core@7.24.0"), package);
    }

    #[test]
    fn parses_go_module_purl_with_slashes() {
        assert_eq!(
            parse("pkg:go/gopkg.in/yaml.v2@v2.4.0"),
            Package::new("go", "gopkg.in/yaml.v2", "v2.4.0")
        );
    }

    #[test]
    fn parses_deps_dot_dev_url() {
        assert_eq!(
            parse("https://deps.dev/npm/%40types%2Fnode/20.11.0"),
            Package::new("npm", "@types/node", "20.11.0")
        );
        assert_eq!(
            parse("https://deps.dev/pypi/requests/2.28.1/"),
            Package::new("pypi", "requests", "2.28.1")
        );
    }

    #[test]
    fn parses_registry_page_urls() {
        assert_eq!(
            parse("https://pypi.org/project/requests/2.28.1/"),
            Package::new("pypi", "requests", "2.28.1")
        );
        assert_eq!(
            parse("https://www.npmjs.com/package/@scope/pkg/v/1.0.0"),
            Package::new("npm", "@scope/pkg", "1.0.0")
        );
    }

    #[test]
    fn rejects_unknown_and_incomplete_references() {
        for input in [
            "requests",
            "https://example.com/requests/1.0",
            "pkg:npm/left-pad",
            "pkg:/left-pad@1.0.0",
            "https://pypi.org/project/requests/",
        ] {
            let result = input.parse::<Package>();
            assert!(
                matches!(result, Err(DepscoreError::InvalidPackage(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn deserializes_capitalized_field_names() {
        let package: Package = serde_json::from_str(
            r#"{"Ecosystem": "cargo", "Name": "serde", "Version": "1.0.200"}"#,
        )
        .expect("package json should deserialize");
        assert_eq!(package, Package::new("cargo", "serde", "1.0.200"));
    }
}
