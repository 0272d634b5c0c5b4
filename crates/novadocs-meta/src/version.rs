//! Version labels and the ordered version list.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::ResolveError;

/// Suffix search indexes expect on every version facet value.
const FACET_SUFFIX: &str = ".0";

/// Token identifying one documentation release (e.g. `"4.0"`).
///
/// Never empty, never contains `/`, so it always fits in one path segment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VersionLabel(String);

impl VersionLabel {
    /// Create a label, rejecting empty tokens and tokens with `/`.
    pub fn new(label: impl Into<String>) -> Result<Self, ResolveError> {
        let label = label.into();
        if label.is_empty() || label.contains('/') {
            return Err(ResolveError::InvalidLabel(label));
        }
        Ok(Self(label))
    }

    /// The raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `docsearch:version` facet.
    ///
    /// Labels already in `N.0` form are returned as-is; a bare major
    /// version gets the `.0` suffix.
    #[must_use]
    pub fn facet_value(&self) -> String {
        if self.0.contains('.') {
            self.0.clone()
        } else {
            format!("{}{FACET_SUFFIX}", self.0)
        }
    }
}

impl fmt::Display for VersionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VersionLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Known versions, oldest first, with one of them marked current.
///
/// Built once from configuration and shared read-only by every page.
#[derive(Clone, Debug)]
pub struct VersionSet {
    labels: Vec<VersionLabel>,
    current: usize,
}

impl VersionSet {
    /// Build from labels ordered oldest to newest. The newest is current.
    pub fn new<I, S>(labels: I) -> Result<Self, ResolveError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels = labels
            .into_iter()
            .map(VersionLabel::new)
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::new();
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(ResolveError::DuplicateVersion(label.0.clone()));
            }
        }

        let current = labels.len().checked_sub(1).ok_or(ResolveError::NoVersions)?;
        Ok(Self { labels, current })
    }

    /// Mark a different label as current.
    pub fn with_current(mut self, label: &str) -> Result<Self, ResolveError> {
        self.current = self
            .labels
            .iter()
            .position(|l| l.as_str() == label)
            .ok_or_else(|| ResolveError::UnknownCurrent(label.to_owned()))?;
        Ok(self)
    }

    /// All labels, oldest first.
    #[must_use]
    pub fn labels(&self) -> &[VersionLabel] {
        &self.labels
    }

    /// The current version.
    #[must_use]
    pub fn current(&self) -> &VersionLabel {
        &self.labels[self.current]
    }

    /// Look up a label by token.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&VersionLabel> {
        self.labels.iter().find(|l| l.as_str() == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_rejects_separator() {
        assert_eq!(
            VersionLabel::new("4.0/beta"),
            Err(ResolveError::InvalidLabel("4.0/beta".to_owned()))
        );
        assert!(VersionLabel::new("").is_err());
    }

    #[test]
    fn facet_value_normalizes_suffix() {
        assert_eq!(VersionLabel::new("4.0").unwrap().facet_value(), "4.0");
        assert_eq!(VersionLabel::new("4").unwrap().facet_value(), "4.0");
    }

    #[test]
    fn newest_label_is_current() {
        let set = VersionSet::new(["1.0", "2.0", "3.0"]).unwrap();
        assert_eq!(set.current().as_str(), "3.0");
        assert_eq!(set.labels().len(), 3);
    }

    #[test]
    fn with_current_overrides_default() {
        let set = VersionSet::new(["1.0", "2.0", "3.0"])
            .unwrap()
            .with_current("2.0")
            .unwrap();
        assert_eq!(set.current().as_str(), "2.0");
    }

    #[test]
    fn with_current_rejects_unknown_label() {
        let err = VersionSet::new(["1.0"]).unwrap().with_current("9.0").unwrap_err();
        assert_eq!(err, ResolveError::UnknownCurrent("9.0".to_owned()));
    }

    #[test]
    fn empty_set_is_rejected() {
        let err = VersionSet::new(Vec::<String>::new()).unwrap_err();
        assert_eq!(err, ResolveError::NoVersions);
    }

    #[test]
    fn duplicate_label_is_rejected() {
        let err = VersionSet::new(["1.0", "2.0", "1.0"]).unwrap_err();
        assert_eq!(err, ResolveError::DuplicateVersion("1.0".to_owned()));
    }

    #[test]
    fn get_finds_known_label() {
        let set = VersionSet::new(["1.0", "2.0"]).unwrap();
        assert!(set.get("2.0").is_some());
        assert!(set.get("21.0").is_none());
    }
}
