//! Data source abstraction for slugroute.
//!
//! This crate provides the [`SiteDataSource`] and [`PostResolver`] traits for
//! abstracting the external document datastore a blog's content lives in.
//! This enables:
//!
//! - **Unit testing** of route handlers without a real datastore
//! - **Backend flexibility** (JSON export on disk, remote API)
//! - **Clean separation** between routing glue and data access
//!
//! # Architecture
//!
//! The crate provides:
//! - [`SiteDataSource`] for the global page listing used at build time
//! - [`PostResolver`] for resolving one URL path to a document and site context
//! - [`FileSource`] implementing both over a JSON datastore export
//! - [`MockSource`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use slugroute_source::{FileSource, SiteDataSource};
//!
//! let source = FileSource::new(PathBuf::from("data/site.json"));
//! let data = source.fetch_global_all_data("slug-paths")?;
//! for page in data.all_pages {
//!     println!("{:?}", page.slug);
//! }
//! ```

mod file;
#[cfg(feature = "mock")]
mod mock;
mod source;

pub use file::FileSource;
#[cfg(feature = "mock")]
pub use mock::MockSource;
pub use source::{
    GlobalData, JsonMap, PageSummary, Post, PostDate, PostProps, PostRequest, PostResolver,
    SiteDataSource, SourceError, SourceErrorKind,
};
