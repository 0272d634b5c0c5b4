//! Parallel resolution of many pages.
//!
//! Pages are independent, so they are resolved on the global rayon pool.
//! A failing page is reported alongside the successes and never stops the
//! rest of the batch.

use rayon::prelude::*;
use serde::Serialize;
use tracing::warn;

use crate::{PageHead, ResolveError, VersionResolver};

/// Head data for one page of a batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedPage {
    /// Page path as given.
    pub path: String,
    #[serde(flatten)]
    pub head: PageHead,
}

/// Failure for one page of a batch.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{path}: {error}")]
pub struct PageError {
    /// Page path as given.
    pub path: String,
    /// What went wrong.
    pub error: ResolveError,
}

/// Result of resolving a batch with partial failures.
#[derive(Debug, Default)]
pub struct PartialResolveResult {
    /// Successfully resolved pages, in input order.
    pub resolved: Vec<ResolvedPage>,
    /// Pages that failed, in input order.
    pub errors: Vec<PageError>,
}

impl PartialResolveResult {
    /// Whether every page resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Resolve head data for every path in parallel.
#[must_use]
pub fn resolve_all<S>(resolver: &VersionResolver, paths: &[S]) -> PartialResolveResult
where
    S: AsRef<str> + Sync,
{
    let results: Vec<Result<ResolvedPage, PageError>> = paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            resolver
                .page_head(path)
                .map(|head| ResolvedPage {
                    path: path.to_owned(),
                    head,
                })
                .map_err(|error| PageError {
                    path: path.to_owned(),
                    error,
                })
        })
        .collect();

    let mut partial = PartialResolveResult::default();
    for result in results {
        match result {
            Ok(page) => partial.resolved.push(page),
            Err(err) => {
                warn!(path = %err.path, error = %err.error, "Failed to resolve page version");
                partial.errors.push(err);
            }
        }
    }
    partial
}
