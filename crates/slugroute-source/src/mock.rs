//! Mock data source implementation for testing.
//!
//! Provides [`MockSource`] for unit testing without a datastore export.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::source::{
    GlobalData, JsonMap, PageSummary, Post, PostProps, PostRequest, PostResolver, SiteDataSource,
    SourceError, SourceErrorKind,
};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// Mock data source for testing.
///
/// Stores page summaries and posts in memory. Use the builder methods
/// to configure the mock with test data. Every call is recorded so tests can
/// assert on what the route forwarded.
///
/// # Example
///
/// ```ignore
/// use slugroute_source::{MockSource, SiteDataSource};
///
/// let source = MockSource::new()
///     .with_page("blog/hello")
///     .with_post(post);
///
/// let data = source.fetch_global_all_data("slug-paths").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockSource {
    pages: RwLock<Vec<PageSummary>>,
    posts: RwLock<HashMap<String, Post>>,
    notion_config: RwLock<JsonMap>,
    site_info: RwLock<JsonMap>,
    fetch_failure: RwLock<Option<SourceErrorKind>>,
    resolve_failure: RwLock<Option<SourceErrorKind>>,
    fetches: RwLock<Vec<String>>,
    requests: RwLock<Vec<PostRequest>>,
}

impl MockSource {
    /// Create a new empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page summary with the given slug.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, slug: impl Into<String>) -> Self {
        self.pages
            .write()
            .unwrap()
            .push(PageSummary::with_slug(slug));
        self
    }

    /// Add a fully specified page summary.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_summary(self, summary: PageSummary) -> Self {
        self.pages.write().unwrap().push(summary);
        self
    }

    /// Add a resolvable post, keyed by its slug.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned or the post has no slug.
    #[must_use]
    pub fn with_post(self, post: Post) -> Self {
        let slug = post.slug.clone().expect("mock post must have a slug");
        self.posts.write().unwrap().insert(slug, post);
        self
    }

    /// Set a `NOTION_CONFIG` entry returned with every resolution.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_notion_config(self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.notion_config.write().unwrap().insert(key.into(), value);
        self
    }

    /// Set a `siteInfo` entry returned with every resolution.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_site_info(self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.site_info.write().unwrap().insert(key.into(), value);
        self
    }

    /// Make `fetch_global_all_data` fail with the given kind.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn failing_fetch(self, kind: SourceErrorKind) -> Self {
        *self.fetch_failure.write().unwrap() = Some(kind);
        self
    }

    /// Make `resolve_post_props` fail with the given kind.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn failing_resolve(self, kind: SourceErrorKind) -> Self {
        *self.resolve_failure.write().unwrap() = Some(kind);
        self
    }

    /// Caller tags of every `fetch_global_all_data` call, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn fetches(&self) -> Vec<String> {
        self.fetches.read().unwrap().clone()
    }

    /// Every request passed to `resolve_post_props`, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<PostRequest> {
        self.requests.read().unwrap().clone()
    }
}

impl SiteDataSource for MockSource {
    fn fetch_global_all_data(&self, from: &str) -> Result<GlobalData, SourceError> {
        self.fetches.write().unwrap().push(from.to_owned());

        if let Some(kind) = *self.fetch_failure.read().unwrap() {
            return Err(SourceError::new(kind).with_backend(BACKEND));
        }

        Ok(GlobalData {
            all_pages: self.pages.read().unwrap().clone(),
        })
    }
}

impl PostResolver for MockSource {
    fn resolve_post_props(&self, request: &PostRequest) -> Result<PostProps, SourceError> {
        self.requests.write().unwrap().push(request.clone());

        if let Some(kind) = *self.resolve_failure.read().unwrap() {
            return Err(SourceError::new(kind).with_backend(BACKEND));
        }

        Ok(PostProps {
            post: self.posts.read().unwrap().get(&request.full_slug()).cloned(),
            notion_config: self.notion_config.read().unwrap().clone(),
            site_info: self.site_info.read().unwrap().clone(),
        })
    }
}
