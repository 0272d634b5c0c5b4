//! Path → version resolution and the derived head data.
//!
//! A page belongs to a version when one of its `/`-separated path segments
//! is exactly that version's label. Pages older than the current version
//! get a canonical URL pointing at the same page under the current version.

use tracing::debug;

use crate::head::{DOCSEARCH_VERSION, MetaTag, PageHead, PageMetadata};
use crate::{ResolveError, VersionLabel, VersionSet};

/// Find the version a page path belongs to.
///
/// Labels are tried in list order and must match a whole path segment, so
/// `"1.0"` never matches `"21.0"` or `"v1.0x"`. Segments for two different
/// labels in one path are reported as [`ResolveError::AmbiguousVersion`].
pub fn resolve_version<'a>(
    path: &str,
    known_versions: &'a [VersionLabel],
) -> Result<Option<&'a VersionLabel>, ResolveError> {
    if path.is_empty() {
        return Err(ResolveError::EmptyPath);
    }

    let mut matches = known_versions
        .iter()
        .filter(|label| segments(path).any(|segment| segment == label.as_str()));

    let Some(first) = matches.next() else {
        return Ok(None);
    };
    if let Some(second) = matches.next() {
        return Err(ResolveError::AmbiguousVersion {
            path: path.to_owned(),
            first: first.clone(),
            second: second.clone(),
        });
    }
    Ok(Some(first))
}

/// Meta tags for a page: one `docsearch:version` tag when it is versioned.
pub fn build_metadata(
    path: &str,
    known_versions: &[VersionLabel],
) -> Result<PageMetadata, ResolveError> {
    Ok(metadata_for(resolve_version(path, known_versions)?))
}

/// Canonical URL for a page on a non-current version.
///
/// Returns `None` for unversioned pages and pages already on
/// `current_version`. Otherwise the first segment equal to the page's
/// version is swapped for `current_version` and `base_prefix` prepended.
pub fn build_canonical_url(
    path: &str,
    known_versions: &[VersionLabel],
    current_version: &VersionLabel,
    base_prefix: &str,
) -> Result<Option<String>, ResolveError> {
    if base_prefix.is_empty() {
        return Err(ResolveError::EmptyBasePrefix);
    }
    if !known_versions.contains(current_version) {
        return Err(ResolveError::UnknownCurrent(current_version.to_string()));
    }
    let version = resolve_version(path, known_versions)?;
    Ok(canonical_for(path, version, current_version, base_prefix))
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn metadata_for(version: Option<&VersionLabel>) -> PageMetadata {
    version
        .map(|v| vec![MetaTag::new(DOCSEARCH_VERSION, v.facet_value())])
        .unwrap_or_default()
}

fn canonical_for(
    path: &str,
    version: Option<&VersionLabel>,
    current: &VersionLabel,
    base_prefix: &str,
) -> Option<String> {
    let version = version.filter(|v| *v != current)?;

    let mut replaced = false;
    let rewritten: Vec<&str> = path
        .split('/')
        .map(|segment| {
            if !replaced && segment == version.as_str() {
                replaced = true;
                current.as_str()
            } else {
                segment
            }
        })
        .collect();

    Some(join_base(base_prefix, &rewritten.join("/")))
}

/// Join a base prefix and a relative path with exactly one `/` between them.
fn join_base(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Resolver bound to one site's version list and base prefix.
///
/// Immutable once built; share it by reference across pages and threads.
#[derive(Clone, Debug)]
pub struct VersionResolver {
    versions: VersionSet,
    base_prefix: String,
}

impl VersionResolver {
    /// Create a resolver. `base_prefix` must be non-empty.
    pub fn new(versions: VersionSet, base_prefix: impl Into<String>) -> Result<Self, ResolveError> {
        let base_prefix = base_prefix.into();
        if base_prefix.is_empty() {
            return Err(ResolveError::EmptyBasePrefix);
        }
        Ok(Self {
            versions,
            base_prefix,
        })
    }

    /// Configured versions.
    #[must_use]
    pub fn versions(&self) -> &VersionSet {
        &self.versions
    }

    /// Configured base prefix.
    #[must_use]
    pub fn base_prefix(&self) -> &str {
        &self.base_prefix
    }

    /// Version of a page, if any.
    pub fn resolve(&self, path: &str) -> Result<Option<&VersionLabel>, ResolveError> {
        resolve_version(path, self.versions.labels())
    }

    /// Meta tags for a page.
    pub fn metadata(&self, path: &str) -> Result<PageMetadata, ResolveError> {
        build_metadata(path, self.versions.labels())
    }

    /// Canonical URL for a page, if it is on an older version.
    pub fn canonical_url(&self, path: &str) -> Result<Option<String>, ResolveError> {
        build_canonical_url(
            path,
            self.versions.labels(),
            self.versions.current(),
            &self.base_prefix,
        )
    }

    /// Version, meta tags and canonical URL for a page, resolving once.
    pub fn page_head(&self, path: &str) -> Result<PageHead, ResolveError> {
        let version = self.resolve(path)?;
        let head = PageHead {
            version: version.cloned(),
            metadata: metadata_for(version),
            canonical: canonical_for(
                path,
                version,
                self.versions.current(),
                &self.base_prefix,
            ),
        };
        debug!(
            path,
            version = ?head.version.as_ref().map(VersionLabel::as_str),
            canonical = ?head.canonical,
            "Resolved page head"
        );
        Ok(head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn labels(tokens: &[&str]) -> Vec<VersionLabel> {
        tokens
            .iter()
            .map(|t| VersionLabel::new(*t).unwrap())
            .collect()
    }

    fn nova_resolver() -> VersionResolver {
        let versions = VersionSet::new(["1.0", "2.0", "3.0", "4.0"]).unwrap();
        VersionResolver::new(versions, "/docs/").unwrap()
    }

    #[test]
    fn resolves_leading_version_segment() {
        let known = labels(&["1.0", "2.0", "3.0", "4.0"]);
        let version = resolve_version("2.0/resources/fields", &known).unwrap();
        assert_eq!(version.map(VersionLabel::as_str), Some("2.0"));
    }

    #[test]
    fn resolves_nested_version_segment() {
        let known = labels(&["1.0", "2.0"]);
        let version = resolve_version("/docs/1.0/installation.md", &known).unwrap();
        assert_eq!(version.map(VersionLabel::as_str), Some("1.0"));
    }

    #[test]
    fn unversioned_path_resolves_to_none() {
        let known = labels(&["1.0", "2.0", "3.0", "4.0"]);
        assert_eq!(resolve_version("installation", &known).unwrap(), None);
    }

    #[test]
    fn version_inside_longer_segment_does_not_match() {
        let known = labels(&["1.0", "2.0"]);
        assert_eq!(
            resolve_version("/docs/21.0/resources/fields", &known).unwrap(),
            None
        );
        assert_eq!(resolve_version("v1.0x/fields", &known).unwrap(), None);
        assert_eq!(resolve_version("resources/fields-1.0", &known).unwrap(), None);
    }

    #[test]
    fn same_version_twice_is_not_ambiguous() {
        let known = labels(&["1.0", "2.0"]);
        let version = resolve_version("2.0/upgrade/2.0", &known).unwrap();
        assert_eq!(version.map(VersionLabel::as_str), Some("2.0"));
    }

    #[test]
    fn two_versions_in_one_path_is_an_error() {
        let known = labels(&["1.0", "2.0", "3.0"]);
        let err = resolve_version("3.0/upgrade/from/1.0", &known).unwrap_err();
        assert_eq!(
            err,
            ResolveError::AmbiguousVersion {
                path: "3.0/upgrade/from/1.0".to_owned(),
                first: VersionLabel::new("1.0").unwrap(),
                second: VersionLabel::new("3.0").unwrap(),
            }
        );
    }

    #[test]
    fn empty_path_is_an_error() {
        let known = labels(&["1.0"]);
        assert_eq!(resolve_version("", &known), Err(ResolveError::EmptyPath));
        assert_eq!(build_metadata("", &known), Err(ResolveError::EmptyPath));
    }

    #[test]
    fn metadata_for_versioned_page() {
        let known = labels(&["1.0", "2.0", "3.0", "4.0"]);
        assert_eq!(
            build_metadata("2.0/resources/fields", &known).unwrap(),
            vec![MetaTag::new("docsearch:version", "2.0")]
        );
    }

    #[test]
    fn metadata_normalizes_bare_major_labels() {
        let known = labels(&["1", "2"]);
        assert_eq!(
            build_metadata("1/installation", &known).unwrap(),
            vec![MetaTag::new("docsearch:version", "1.0")]
        );
    }

    #[test]
    fn metadata_for_unversioned_page_is_empty() {
        let known = labels(&["1.0", "2.0", "3.0", "4.0"]);
        assert!(build_metadata("installation", &known).unwrap().is_empty());
    }

    #[test]
    fn canonical_rewrites_old_version() {
        let known = labels(&["1.0", "2.0", "3.0", "4.0"]);
        let current = VersionLabel::new("4.0").unwrap();
        assert_eq!(
            build_canonical_url("2.0/resources/fields", &known, &current, "/docs/").unwrap(),
            Some("/docs/4.0/resources/fields".to_owned())
        );
    }

    #[test]
    fn canonical_none_for_current_version() {
        let known = labels(&["1.0", "2.0", "3.0", "4.0"]);
        let current = VersionLabel::new("4.0").unwrap();
        assert_eq!(
            build_canonical_url("4.0/resources/fields", &known, &current, "/docs/").unwrap(),
            None
        );
    }

    #[test]
    fn canonical_none_for_unversioned_page() {
        let known = labels(&["1.0", "2.0", "3.0", "4.0"]);
        let current = VersionLabel::new("4.0").unwrap();
        assert_eq!(
            build_canonical_url("installation", &known, &current, "/docs/").unwrap(),
            None
        );
    }

    #[test]
    fn canonical_replaces_only_first_occurrence() {
        let known = labels(&["1.0", "2.0"]);
        let current = VersionLabel::new("2.0").unwrap();
        assert_eq!(
            build_canonical_url("1.0/releases/1.0", &known, &current, "/").unwrap(),
            Some("/2.0/releases/1.0".to_owned())
        );
    }

    #[test]
    fn canonical_joins_base_without_double_slash() {
        let known = labels(&["1.0", "2.0"]);
        let current = VersionLabel::new("2.0").unwrap();
        assert_eq!(
            build_canonical_url("/1.0/installation", &known, &current, "/docs/").unwrap(),
            Some("/docs/2.0/installation".to_owned())
        );
        assert_eq!(
            build_canonical_url("1.0/installation", &known, &current, "/docs").unwrap(),
            Some("/docs/2.0/installation".to_owned())
        );
    }

    #[test]
    fn canonical_rejects_empty_base_prefix() {
        let known = labels(&["1.0", "2.0"]);
        let current = VersionLabel::new("2.0").unwrap();
        assert_eq!(
            build_canonical_url("1.0/installation", &known, &current, ""),
            Err(ResolveError::EmptyBasePrefix)
        );
    }

    #[test]
    fn canonical_rejects_unknown_current() {
        let known = labels(&["1.0", "2.0"]);
        let current = VersionLabel::new("9.0").unwrap();
        assert_eq!(
            build_canonical_url("1.0/installation", &known, &current, "/"),
            Err(ResolveError::UnknownCurrent("9.0".to_owned()))
        );
    }

    #[test]
    fn canonical_url_is_stable_under_reresolution() {
        let resolver = nova_resolver();
        for path in ["1.0/installation", "2.0/resources/fields", "3.0/actions/defining-actions"] {
            let canonical = resolver.canonical_url(path).unwrap().unwrap();
            assert_eq!(
                resolver.resolve(&canonical).unwrap(),
                Some(resolver.versions().current())
            );
            assert_eq!(resolver.canonical_url(&canonical).unwrap(), None);
        }
    }

    #[test]
    fn resolver_rejects_empty_base_prefix() {
        let versions = VersionSet::new(["1.0"]).unwrap();
        assert!(matches!(
            VersionResolver::new(versions, ""),
            Err(ResolveError::EmptyBasePrefix)
        ));
    }

    #[test]
    fn page_head_for_old_version() {
        let head = nova_resolver().page_head("2.0/resources/fields").unwrap();
        assert_eq!(
            head,
            PageHead {
                version: Some(VersionLabel::new("2.0").unwrap()),
                metadata: vec![MetaTag::new("docsearch:version", "2.0")],
                canonical: Some("/docs/4.0/resources/fields".to_owned()),
            }
        );
    }

    #[test]
    fn page_head_for_current_version() {
        let head = nova_resolver().page_head("4.0/resources/fields").unwrap();
        assert_eq!(head.metadata, vec![MetaTag::new("docsearch:version", "4.0")]);
        assert_eq!(head.canonical, None);
    }

    #[test]
    fn page_head_for_unversioned_page() {
        assert_eq!(
            nova_resolver().page_head("installation").unwrap(),
            PageHead::default()
        );
    }

    #[test]
    fn page_head_agrees_with_individual_operations() {
        let resolver = nova_resolver();
        for path in ["1.0/installation", "4.0/resources", "installation", "/docs/3.0/x"] {
            let head = resolver.page_head(path).unwrap();
            assert_eq!(head.version.as_ref(), resolver.resolve(path).unwrap());
            assert_eq!(head.metadata, resolver.metadata(path).unwrap());
            assert_eq!(head.canonical, resolver.canonical_url(path).unwrap());
        }
    }

    #[test]
    fn explicit_current_version_is_honored() {
        let versions = VersionSet::new(["1.0", "2.0", "3.0"])
            .unwrap()
            .with_current("2.0")
            .unwrap();
        let resolver = VersionResolver::new(versions, "/").unwrap();
        assert_eq!(
            resolver.canonical_url("3.0/installation").unwrap(),
            Some("/2.0/installation".to_owned())
        );
        assert_eq!(resolver.canonical_url("2.0/installation").unwrap(), None);
    }
}
