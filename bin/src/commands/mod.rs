//! CLI command implementations.

pub(crate) mod download;
pub(crate) mod list;
pub(crate) mod split;
