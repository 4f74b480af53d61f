//! CLI command implementations.

pub(crate) mod paths;
pub(crate) mod props;
pub(crate) mod serve;

pub(crate) use paths::PathsArgs;
pub(crate) use props::PropsArgs;
pub(crate) use serve::ServeArgs;
