//! Per-page version metadata for a versioned documentation site.
//!
//! Pages live under version directories (`2.0/resources/fields.md`). For
//! every page this crate works out which version it belongs to, the
//! `docsearch:version` meta tag search crawlers facet on, and, for pages on
//! older versions, the canonical URL of the same page on the current
//! version.
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), novadocs_meta::ResolveError> {
//! use novadocs_meta::{VersionResolver, VersionSet};
//!
//! let versions = VersionSet::new(["1.0", "2.0", "3.0", "4.0"])?;
//! let resolver = VersionResolver::new(versions, "/docs/")?;
//!
//! let head = resolver.page_head("2.0/resources/fields")?;
//! assert_eq!(head.metadata[0].content, "2.0");
//! assert_eq!(head.canonical.as_deref(), Some("/docs/4.0/resources/fields"));
//! # Ok(())
//! # }
//! ```

mod batch;
mod error;
mod head;
mod resolver;
mod version;

pub use batch::{PageError, PartialResolveResult, ResolvedPage, resolve_all};
pub use error::ResolveError;
pub use head::{DOCSEARCH_VERSION, HeadTag, MetaTag, PageHead, PageMetadata, render_head};
pub use resolver::{VersionResolver, build_canonical_url, build_metadata, resolve_version};
pub use version::{VersionLabel, VersionSet};
