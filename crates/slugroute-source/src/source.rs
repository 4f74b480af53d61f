//! Data source traits, document records, and error types.
//!
//! Provides the [`SiteDataSource`] and [`PostResolver`] traits for abstracting
//! the external document datastore, along with [`SourceError`] for unified
//! error handling across backends.
//!
//! # Slug Convention
//!
//! Document slugs are `/`-delimited URL paths without a leading slash:
//! - `"about"` - single segment (not routed by the post routes)
//! - `"blog/hello-world"` - prefix and slug
//! - `"archive/2023/10/29/test"` - prefix, slug, and suffix segments

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Free-form JSON object, used for site configuration and extra document fields.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;

/// Publication date of a document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PostDate {
    /// Start date as `YYYY-MM-DD`.
    pub start_date: String,
    /// Remaining fields supplied by the datastore.
    #[serde(flatten)]
    pub extra: JsonMap,
}

/// Document record as returned by the resolver.
///
/// Only `id` is mandatory. Fields the datastore omits stay omitted when the
/// record is serialized again, so a resolved post passes through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Document identifier.
    pub id: String,
    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Publication status (e.g., "Published", "Draft").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Document type (e.g., "Post", "Page", "Menu").
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub post_type: Option<String>,
    /// Canonical slug (e.g., "blog/hello-world").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Publication date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<PostDate>,
    /// Tag names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Tag records with datastore-specific shape (colors, counts).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_items: Option<Vec<serde_json::Value>>,
    /// Remaining fields supplied by the datastore.
    #[serde(flatten)]
    pub extra: JsonMap,
}

/// Row of the global page listing, used for path enumeration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageSummary {
    /// Document identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Canonical slug. Rows without a slug are never routed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Document type (e.g., "Post", "Menu", "SubMenu").
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub page_type: Option<String>,
    /// Publication status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Remaining fields supplied by the datastore.
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl PageSummary {
    /// Create a summary with only a slug set.
    #[must_use]
    pub fn with_slug(slug: impl Into<String>) -> Self {
        Self {
            slug: Some(slug.into()),
            ..Self::default()
        }
    }
}

/// Result of a global data fetch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalData {
    /// All known documents.
    #[serde(default)]
    pub all_pages: Vec<PageSummary>,
}

/// Props bundle handed to the page component.
///
/// Serialized with the field names the page component expects:
/// `{ "post": ..., "NOTION_CONFIG": {...}, "siteInfo": {...} }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PostProps {
    /// Resolved document (`None` when the resolver found nothing).
    #[serde(default)]
    pub post: Option<Post>,
    /// Site-level configuration overrides stored in the datastore.
    #[serde(rename = "NOTION_CONFIG", default)]
    pub notion_config: JsonMap,
    /// Site metadata (title, description, icons).
    #[serde(rename = "siteInfo", default)]
    pub site_info: JsonMap,
}

/// Parameters passed to [`PostResolver::resolve_post_props`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRequest {
    /// First path segment.
    pub prefix: String,
    /// Second path segment.
    pub slug: String,
    /// Remaining segments (`None` for two-segment paths).
    pub suffix: Option<Vec<String>>,
    /// Requested locale (e.g., "zh-CN").
    pub locale: String,
}

impl PostRequest {
    /// Full slug the request refers to (e.g., `"blog/hello"` or `"a/b/c/d"`).
    #[must_use]
    pub fn full_slug(&self) -> String {
        let mut path = format!("{}/{}", self.prefix, self.slug);
        for segment in self.suffix.iter().flatten() {
            path.push('/');
            path.push_str(segment);
        }
        path
    }
}

/// Semantic error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceErrorKind {
    /// Datastore export or document does not exist.
    NotFound,
    /// Datastore returned data that could not be decoded.
    Invalid,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Other/unknown error category.
    Other,
}

/// Data source error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct SourceError {
    kind: SourceErrorKind,
    path: Option<PathBuf>,
    backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl SourceError {
    /// Create a new data source error.
    #[must_use]
    pub fn new(kind: SourceErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    /// Path context, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Backend identifier, if any.
    #[must_use]
    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }

    /// Create a data source error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => SourceErrorKind::NotFound,
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::ConnectionRefused => {
                SourceErrorKind::Unavailable
            }
            _ => SourceErrorKind::Other,
        };
        Self::new(kind).with_path(path).with_source(err)
    }
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            SourceErrorKind::NotFound => "Not found",
            SourceErrorKind::Invalid => "Invalid data",
            SourceErrorKind::Unavailable => "Unavailable",
            SourceErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Global listing of all documents in the datastore.
///
/// Used at build time to enumerate the paths to pre-render.
pub trait SiteDataSource: Send + Sync {
    /// Fetch every known document.
    ///
    /// # Arguments
    ///
    /// * `from` - Caller tag for datastore-side logging (e.g., "slug-paths")
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the datastore cannot be reached or decoded.
    fn fetch_global_all_data(&self, from: &str) -> Result<GlobalData, SourceError>;
}

/// Resolution of a single URL path to a document and its site context.
pub trait PostResolver: Send + Sync {
    /// Resolve the props for a post page.
    ///
    /// Returns props with `post: None` when no document matches the request.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if resolution itself fails.
    fn resolve_post_props(&self, request: &PostRequest) -> Result<PostProps, SourceError>;
}
