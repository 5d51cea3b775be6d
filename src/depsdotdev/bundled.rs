//! npm packages may ship some dependencies inside their own tarball. deps.dev
//! reports those as `bundled` graph nodes and lists their install locations in
//! the parent version's `bundledPaths`.

use std::collections::HashSet;

const NODE_MODULES: &str = "node_modules/";

/// Names bundled directly under the parent's top-level `node_modules/`.
///
/// `node_modules/a/node_modules/b` is bundled by `a`, not by the parent, and is
/// left out.
pub fn direct_bundled_names<S: AsRef<str>>(paths: &[S]) -> HashSet<String> {
    paths
        .iter()
        .filter_map(|path| direct_bundled_name(path.as_ref()))
        .collect()
}

fn direct_bundled_name(path: &str) -> Option<String> {
    let rest = path.trim_start_matches("./").strip_prefix(NODE_MODULES)?;
    let rest = rest.trim_end_matches('/');
    if rest.is_empty() || rest.contains(NODE_MODULES) {
        return None;
    }

    let segments = rest.split('/').collect::<Vec<_>>();
    match segments.as_slice() {
        [scope, name] if scope.starts_with('@') && !name.is_empty() => {
            Some(format!("{scope}/{name}"))
        }
        [name] if !name.starts_with('@') => Some(name.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_plain_and_scoped_names() {
        let names = direct_bundled_names(&[
            "node_modules/semver",
            "node_modules/@npmcli/fs",
            "./node_modules/abbrev/",
        ]);
        assert_eq!(names.len(), 3);
        assert!(names.contains("semver"));
        assert!(names.contains("@npmcli/fs"));
        assert!(names.contains("abbrev"));
    }

    #[test]
    fn skips_nested_and_foreign_paths() {
        let names = direct_bundled_names(&[
            "node_modules/semver/node_modules/lru-cache",
            "node_modules/@scope",
            "lib/node_modules/x",
            "node_modules/",
        ]);
        assert!(names.is_empty(), "unexpected names: {names:?}");
    }
}
