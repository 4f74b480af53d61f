//! Post routes: build-time path enumeration and per-page props resolution.
//!
//! [`PostRoute`] is parameterized by a [`SegmentShape`] and covers both the
//! `/{prefix}/{slug}` and `/{prefix}/{slug}/{...suffix}` pages.
//!
//! # Error Handling
//!
//! Enumeration and resolution handle failures differently:
//! - [`PostRoute::static_paths`] returns data source errors to the caller, so a
//!   broken datastore aborts the build.
//! - [`PostRoute::static_props`] never fails. A missing document or a resolver
//!   error turns into a placeholder page that is regenerated after
//!   [`FALLBACK_REVALIDATE_SECONDS`].

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use slugroute_source::{JsonMap, PostProps, PostRequest, PostResolver, SiteDataSource, SourceError};

use crate::fallback::{
    FALLBACK_REVALIDATE_SECONDS, FallbackReason, FallbackText, placeholder_post,
};
use crate::shape::{PathEntry, RouteParams, SegmentShape};

/// Caller tag passed to the data source during enumeration.
const ENUMERATE_FROM: &str = "slug-paths";

/// `NOTION_CONFIG` key overriding the revalidate interval per site.
pub const REVALIDATE_KEY: &str = "NEXT_REVALIDATE_SECOND";

/// Revalidate interval used when neither the site nor the datastore sets one.
pub const DEFAULT_REVALIDATE_SECONDS: u32 = 60;

/// Build environment flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildMode {
    /// Enumerate real paths at build time. Otherwise every page is resolved on
    /// first request.
    pub production: bool,
    /// Static export: pages are never regenerated on a timer.
    pub export: bool,
}

/// Configuration shared by all post routes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteConfig {
    /// Build environment flags.
    pub mode: BuildMode,
    /// Site-level revalidate interval in seconds.
    pub revalidate_seconds: u32,
    /// Placeholder page texts.
    pub fallback: FallbackText,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            mode: BuildMode::default(),
            revalidate_seconds: DEFAULT_REVALIDATE_SECONDS,
            fallback: FallbackText::default(),
        }
    }
}

/// Result of path enumeration: `{ "paths": [...], "fallback": true }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticPaths {
    /// Pages to pre-render.
    pub paths: Vec<PathEntry>,
    /// Whether unlisted paths are resolved on first request.
    pub fallback: bool,
}

/// Result of props resolution: `{ "props": {...}, "revalidate": 60 }`.
///
/// `revalidate` is omitted when `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaticProps {
    /// Props handed to the page component.
    pub props: PostProps,
    /// Seconds until the page may be regenerated (`None` disables regeneration).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revalidate: Option<u32>,
}

/// Error returned by route operations.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// The data source failed during path enumeration.
    #[error("Failed to enumerate {shape} post paths: {source}")]
    Enumerate {
        /// Route being enumerated.
        shape: SegmentShape,
        /// Underlying data source error.
        #[source]
        source: SourceError,
    },
    /// URL path does not have at least two segments.
    #[error("Not a post path: {0}")]
    InvalidPath(String),
}

/// Post page route for one [`SegmentShape`].
#[derive(Clone, Debug)]
pub struct PostRoute {
    shape: SegmentShape,
    config: RouteConfig,
}

impl PostRoute {
    /// Create a route for the given shape.
    #[must_use]
    pub fn new(shape: SegmentShape, config: RouteConfig) -> Self {
        Self { shape, config }
    }

    /// Shape this route serves.
    #[must_use]
    pub fn shape(&self) -> SegmentShape {
        self.shape
    }

    /// Route configuration.
    #[must_use]
    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Enumerate the pages to pre-render.
    ///
    /// Outside production mode the data source is not consulted and the
    /// list is empty.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Enumerate`] if the data source fails.
    pub fn static_paths(&self, source: &dyn SiteDataSource) -> Result<StaticPaths, RouteError> {
        if !self.config.mode.production {
            return Ok(StaticPaths {
                paths: Vec::new(),
                fallback: true,
            });
        }

        let data = source
            .fetch_global_all_data(ENUMERATE_FROM)
            .map_err(|source| RouteError::Enumerate {
                shape: self.shape,
                source,
            })?;

        let paths: Vec<PathEntry> = data
            .all_pages
            .iter()
            .filter(|page| self.shape.matches(page))
            .filter_map(|page| page.slug.as_deref().and_then(RouteParams::from_slug))
            .map(|params| PathEntry { params })
            .collect();

        tracing::info!(
            route = %self.shape,
            total = data.all_pages.len(),
            matched = paths.len(),
            "Enumerated post paths"
        );

        Ok(StaticPaths {
            paths,
            fallback: true,
        })
    }

    /// Resolve props for a page, falling back to a placeholder on any failure.
    pub fn static_props(
        &self,
        resolver: &dyn PostResolver,
        params: &RouteParams,
        locale: &str,
    ) -> StaticProps {
        self.static_props_on(resolver, params, locale, Utc::now().date_naive())
    }

    /// [`static_props`](Self::static_props) with an explicit date for placeholders.
    pub(crate) fn static_props_on(
        &self,
        resolver: &dyn PostResolver,
        params: &RouteParams,
        locale: &str,
        today: NaiveDate,
    ) -> StaticProps {
        let request = self.request(params, locale);

        match resolver.resolve_post_props(&request) {
            Ok(props) if props.post.is_some() => {
                let revalidate = self.revalidate_for(&props.notion_config);
                StaticProps { props, revalidate }
            }
            Ok(props) => {
                tracing::warn!(
                    path = %self.display_path(params),
                    "Post not found, rendering placeholder page"
                );
                self.placeholder(
                    params,
                    FallbackReason::NotFound,
                    props.notion_config,
                    props.site_info,
                    today,
                )
            }
            Err(e) => {
                tracing::error!(
                    path = %self.display_path(params),
                    error = %e,
                    "Failed to build post page, rendering placeholder page"
                );
                self.placeholder(
                    params,
                    FallbackReason::Failed,
                    JsonMap::new(),
                    JsonMap::new(),
                    today,
                )
            }
        }
    }

    /// Revalidate interval for a successfully resolved page.
    ///
    /// Export mode disables regeneration. Otherwise a valid
    /// [`REVALIDATE_KEY`] entry in the datastore's config wins over the
    /// site-level setting.
    #[must_use]
    pub fn revalidate_for(&self, notion_config: &JsonMap) -> Option<u32> {
        if self.config.mode.export {
            return None;
        }

        let configured = self.config.revalidate_seconds;
        let seconds = match notion_config.get(REVALIDATE_KEY) {
            None | Some(serde_json::Value::Null) => configured,
            Some(value) => parse_seconds(value).unwrap_or_else(|| {
                tracing::warn!(
                    key = REVALIDATE_KEY,
                    value = %value,
                    fallback = configured,
                    "Ignoring invalid revalidate interval"
                );
                configured
            }),
        };

        Some(seconds)
    }

    fn request(&self, params: &RouteParams, locale: &str) -> PostRequest {
        PostRequest {
            prefix: params.prefix.clone(),
            slug: params.slug.clone(),
            suffix: match self.shape {
                SegmentShape::Pair => None,
                SegmentShape::Nested => Some(params.suffix.clone()),
            },
            locale: locale.to_owned(),
        }
    }

    fn placeholder(
        &self,
        params: &RouteParams,
        reason: FallbackReason,
        notion_config: JsonMap,
        site_info: JsonMap,
        today: NaiveDate,
    ) -> StaticProps {
        let post = placeholder_post(self.shape, params, reason, &self.config.fallback, today);
        StaticProps {
            props: PostProps {
                post: Some(post),
                notion_config,
                site_info,
            },
            revalidate: Some(FALLBACK_REVALIDATE_SECONDS),
        }
    }

    fn display_path(&self, params: &RouteParams) -> String {
        match self.shape {
            SegmentShape::Pair => format!("/{}/{}", params.prefix, params.slug),
            SegmentShape::Nested => format!(
                "/{}/{}/{}",
                params.prefix,
                params.slug,
                params.suffix.join("/")
            ),
        }
    }
}

/// Parse a revalidate interval given as a number or numeric string.
fn parse_seconds(value: &serde_json::Value) -> Option<u32> {
    match value {
        serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Both post routes, dispatching URL paths by segment count.
#[derive(Clone, Debug)]
pub struct PostRoutes {
    pair: PostRoute,
    nested: PostRoute,
}

/// Enumeration results of both routes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllStaticPaths {
    /// `/{prefix}/{slug}` pages.
    pub pair: StaticPaths,
    /// `/{prefix}/{slug}/{...suffix}` pages.
    pub nested: StaticPaths,
}

impl PostRoutes {
    /// Create both routes with a shared configuration.
    #[must_use]
    pub fn new(config: RouteConfig) -> Self {
        Self {
            pair: PostRoute::new(SegmentShape::Pair, config.clone()),
            nested: PostRoute::new(SegmentShape::Nested, config),
        }
    }

    /// Route serving the given shape.
    #[must_use]
    pub fn route(&self, shape: SegmentShape) -> &PostRoute {
        match shape {
            SegmentShape::Pair => &self.pair,
            SegmentShape::Nested => &self.nested,
        }
    }

    /// Enumerate both routes.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Enumerate`] if the data source fails for either route.
    pub fn static_paths(&self, source: &dyn SiteDataSource) -> Result<AllStaticPaths, RouteError> {
        Ok(AllStaticPaths {
            pair: self.pair.static_paths(source)?,
            nested: self.nested.static_paths(source)?,
        })
    }

    /// Resolve props for a URL path such as `/blog/hello` or `/a/b/c`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidPath`] if the path has fewer than two segments.
    pub fn static_props_for_path(
        &self,
        resolver: &dyn PostResolver,
        path: &str,
        locale: &str,
    ) -> Result<StaticProps, RouteError> {
        let params = RouteParams::from_url_path(path)
            .ok_or_else(|| RouteError::InvalidPath(path.to_owned()))?;
        Ok(self
            .route(params.shape())
            .static_props(resolver, &params, locale))
    }
}
