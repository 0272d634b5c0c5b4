//! Resolver error type.

use crate::VersionLabel;

/// Error raised while building version metadata for a page.
///
/// Everything here is a configuration problem: the caller should surface it
/// at build time rather than emit a page with wrong metadata.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Page path is empty.
    #[error("page path cannot be empty")]
    EmptyPath,
    /// Base prefix is empty.
    #[error("base prefix cannot be empty")]
    EmptyBasePrefix,
    /// Version list is empty.
    #[error("no documentation versions configured")]
    NoVersions,
    /// Label is empty or contains a path separator.
    #[error("invalid version label \"{0}\": must be non-empty and contain no /")]
    InvalidLabel(String),
    /// Label appears twice in the version list.
    #[error("version \"{0}\" is listed more than once")]
    DuplicateVersion(String),
    /// Current version is not in the version list.
    #[error("current version \"{0}\" is not a known version")]
    UnknownCurrent(String),
    /// Path contains segments for two different versions.
    #[error("path \"{path}\" matches more than one version: {first} and {second}")]
    AmbiguousVersion {
        /// Offending page path.
        path: String,
        /// First match in version-list order.
        first: VersionLabel,
        /// Second match in version-list order.
        second: VersionLabel,
    },
}
