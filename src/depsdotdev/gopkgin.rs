//! Repository resolution for `gopkg.in` module paths, which deps.dev does not
//! link to a source repository.
//!
//! Follows the redirection rules documented at <https://labix.org/gopkg.in>
//! instead of fetching the `go-import` meta tag.

use crate::error::LookupError;
use regex::Regex;
use std::sync::LazyLock;

pub const GOPKGIN_PREFIX: &str = "gopkg.in/";

static GOPKGIN_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^gopkg\.in/(?P<package>[a-zA-Z0-9_\-./]+)\.v[0-9]+$").ok());

/// `gopkg.in/pkg.vN` → `github.com/go-pkg/pkg`,
/// `gopkg.in/user/pkg.vN` → `github.com/user/pkg`.
pub fn repository(package_name: &str) -> Result<String, LookupError> {
    let captures = GOPKGIN_RE
        .as_ref()
        .and_then(|re| re.captures(package_name))
        .ok_or_else(|| LookupError::NotGopkgIn(package_name.to_string()))?;
    let path = &captures["package"];

    match path.split('/').collect::<Vec<_>>().as_slice() {
        [pkg] => Ok(format!("github.com/go-{pkg}/{pkg}")),
        [user, pkg] => Ok(format!("github.com/{user}/{pkg}")),
        _ => Err(LookupError::UnexpectedGopkgInParts(path.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_short_and_user_forms() {
        for (name, expected) in [
            ("gopkg.in/yaml.v2", "github.com/go-yaml/yaml"),
            ("gopkg.in/yaml.v3", "github.com/go-yaml/yaml"),
            ("gopkg.in/DataDog/dd-trace-go.v1", "github.com/DataDog/dd-trace-go"),
        ] {
            assert_eq!(
                repository(name).expect("gopkg.in path should resolve"),
                expected,
                "{name}"
            );
        }
    }

    #[test]
    fn rejects_paths_outside_the_scheme() {
        assert!(matches!(repository("wrong"), Err(LookupError::NotGopkgIn(_))));
        assert!(matches!(
            repository("gopkg.in/noVersion"),
            Err(LookupError::NotGopkgIn(_))
        ));
    }

    #[test]
    fn rejects_too_many_parts() {
        assert!(matches!(
            repository("gopkg.in/one/two/three.v1"),
            Err(LookupError::UnexpectedGopkgInParts(_))
        ));
    }
}
