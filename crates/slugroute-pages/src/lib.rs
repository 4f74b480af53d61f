//! Post page routes for slugroute.
//!
//! This crate provides:
//! - [`PostRoute`]: build-time path enumeration and per-page props resolution
//!   for one [`SegmentShape`]
//! - [`PostRoutes`]: both routes, dispatching URL paths by segment count
//! - Placeholder pages for documents that cannot be resolved
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use slugroute_pages::{BuildMode, PostRoutes, RouteConfig};
//! use slugroute_source::FileSource;
//!
//! let source = FileSource::new(PathBuf::from("data/site.json"));
//! let routes = PostRoutes::new(RouteConfig {
//!     mode: BuildMode { production: true, export: false },
//!     ..RouteConfig::default()
//! });
//!
//! // Enumerate pages to pre-render
//! let paths = routes.static_paths(&source)?;
//!
//! // Resolve one page (never fails for a valid post path)
//! let props = routes.static_props_for_path(&source, "/blog/hello-world", "zh-CN")?;
//! # Ok(())
//! # }
//! ```

mod fallback;
mod route;
mod shape;

pub use fallback::{FALLBACK_REVALIDATE_SECONDS, FallbackText};
pub use route::{
    AllStaticPaths, BuildMode, DEFAULT_REVALIDATE_SECONDS, PostRoute, PostRoutes, REVALIDATE_KEY,
    RouteConfig, RouteError, StaticPaths, StaticProps,
};
pub use shape::{PathEntry, RouteParams, SegmentShape};
