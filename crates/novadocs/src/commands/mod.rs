//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod head;
pub(crate) mod manifest;
pub(crate) mod resolve;

pub(crate) use check::CheckArgs;
pub(crate) use head::HeadArgs;
pub(crate) use manifest::ManifestArgs;
pub(crate) use resolve::ResolveArgs;
