//! Segment shapes and route parameters.
//!
//! A post route owns one [`SegmentShape`]. The shape decides both which
//! document slugs the route enumerates and how route parameters are laid
//! out, so the two cannot disagree.

use serde::{Deserialize, Serialize};
use slugroute_source::PageSummary;

/// Number of path segments a post route handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentShape {
    /// `/{prefix}/{slug}`: slug contains exactly one `/`.
    Pair,
    /// `/{prefix}/{slug}/{...suffix}`: slug contains two or more `/`.
    Nested,
}

impl SegmentShape {
    /// Shape owning a slug, or `None` if no post route serves it.
    ///
    /// Absolute links (`http://`, `https://`) are never routed. A single
    /// leading `/` is not counted.
    #[must_use]
    pub fn of_slug(slug: &str) -> Option<Self> {
        if slug.starts_with("http://") || slug.starts_with("https://") {
            return None;
        }
        match strip_leading_slash(slug).matches('/').count() {
            0 => None,
            1 => Some(Self::Pair),
            _ => Some(Self::Nested),
        }
    }

    /// Whether a listed page belongs to this shape.
    ///
    /// Menu entries (`Menu`, `SubMenu`) share the slug field with posts but
    /// only ever link elsewhere, so they are skipped.
    #[must_use]
    pub fn matches(self, page: &PageSummary) -> bool {
        let Some(slug) = page.slug.as_deref() else {
            return false;
        };
        if page
            .page_type
            .as_deref()
            .is_some_and(|t| t.contains("Menu"))
        {
            return false;
        }
        Self::of_slug(slug) == Some(self)
    }

    /// Route name used in logs and API responses.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pair => "pair",
            Self::Nested => "nested",
        }
    }
}

impl std::fmt::Display for SegmentShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Positional parameters of a post route.
///
/// `suffix` is empty for [`SegmentShape::Pair`] and omitted when serialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteParams {
    /// First path segment.
    pub prefix: String,
    /// Second path segment.
    pub slug: String,
    /// Remaining segments, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suffix: Vec<String>,
}

impl RouteParams {
    /// Create two-segment parameters.
    #[must_use]
    pub fn pair(prefix: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            slug: slug.into(),
            suffix: Vec::new(),
        }
    }

    /// Create parameters with suffix segments.
    #[must_use]
    pub fn nested(prefix: impl Into<String>, slug: impl Into<String>, suffix: Vec<String>) -> Self {
        Self {
            prefix: prefix.into(),
            slug: slug.into(),
            suffix,
        }
    }

    /// Split a slug into parameters.
    ///
    /// Splits on literal `/` only, after dropping a single leading `/`.
    /// Returns `None` for slugs with fewer than two segments.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        let mut segments = strip_leading_slash(slug).split('/').map(str::to_owned);
        let prefix = segments.next()?;
        let slug = segments.next()?;
        Some(Self {
            prefix,
            slug,
            suffix: segments.collect(),
        })
    }

    /// Parse a request URL path (leading and trailing slashes ignored).
    #[must_use]
    pub fn from_url_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return None;
        }
        Self::from_slug(trimmed)
    }

    /// Shape of the route that serves these parameters.
    #[must_use]
    pub fn shape(&self) -> SegmentShape {
        if self.suffix.is_empty() {
            SegmentShape::Pair
        } else {
            SegmentShape::Nested
        }
    }
}

fn strip_leading_slash(slug: &str) -> &str {
    slug.strip_prefix('/').unwrap_or(slug)
}

/// One entry of a route's pre-render list: `{ "params": {...} }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathEntry {
    /// Parameters of the page to pre-render.
    pub params: RouteParams,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn page(slug: &str, page_type: Option<&str>) -> PageSummary {
        PageSummary {
            page_type: page_type.map(str::to_owned),
            ..PageSummary::with_slug(slug)
        }
    }

    #[test]
    fn test_of_slug_counts_slashes() {
        assert_eq!(SegmentShape::of_slug("about"), None);
        assert_eq!(SegmentShape::of_slug("blog/hello"), Some(SegmentShape::Pair));
        assert_eq!(SegmentShape::of_slug("a/b/c"), Some(SegmentShape::Nested));
        assert_eq!(
            SegmentShape::of_slug("archive/2023/10/29/test"),
            Some(SegmentShape::Nested)
        );
    }

    #[test]
    fn test_of_slug_skips_links() {
        assert_eq!(SegmentShape::of_slug("https://example.com/a"), None);
        assert_eq!(SegmentShape::of_slug("http://example.com"), None);
    }

    #[test]
    fn test_matches_requires_slug() {
        let page = PageSummary::default();

        assert!(!SegmentShape::Pair.matches(&page));
        assert!(!SegmentShape::Nested.matches(&page));
    }

    #[test]
    fn test_matches_skips_menus() {
        assert!(!SegmentShape::Pair.matches(&page("docs/intro", Some("Menu"))));
        assert!(!SegmentShape::Pair.matches(&page("docs/intro", Some("SubMenu"))));
        assert!(SegmentShape::Pair.matches(&page("docs/intro", Some("Post"))));
        assert!(SegmentShape::Pair.matches(&page("docs/intro", None)));
    }

    #[test]
    fn test_matches_is_exclusive() {
        let pair = page("blog/hello", None);
        let nested = page("blog/2024/hello", None);

        assert!(SegmentShape::Pair.matches(&pair));
        assert!(!SegmentShape::Nested.matches(&pair));
        assert!(SegmentShape::Nested.matches(&nested));
        assert!(!SegmentShape::Pair.matches(&nested));
    }

    #[test]
    fn test_of_slug_ignores_leading_slash() {
        assert_eq!(SegmentShape::of_slug("/blog/hello"), Some(SegmentShape::Pair));
        assert_eq!(SegmentShape::of_slug("/a/b/c"), Some(SegmentShape::Nested));
        assert_eq!(SegmentShape::of_slug("/about"), None);
    }

    #[test]
    fn test_from_slug_drops_leading_slash() {
        assert_eq!(
            RouteParams::from_slug("/blog/hello"),
            Some(RouteParams::pair("blog", "hello"))
        );
        assert_eq!(RouteParams::from_slug("/about"), None);
    }

    #[test]
    fn test_from_slug_pair() {
        let params = RouteParams::from_slug("blog/hello").unwrap();

        assert_eq!(params, RouteParams::pair("blog", "hello"));
        assert_eq!(params.shape(), SegmentShape::Pair);
    }

    #[test]
    fn test_from_slug_nested() {
        let params = RouteParams::from_slug("archive/2023/10/29/test").unwrap();

        assert_eq!(params.prefix, "archive");
        assert_eq!(params.slug, "2023");
        assert_eq!(params.suffix, vec!["10", "29", "test"]);
        assert_eq!(params.shape(), SegmentShape::Nested);
    }

    #[test]
    fn test_from_slug_single_segment() {
        assert_eq!(RouteParams::from_slug("about"), None);
    }

    #[test]
    fn test_from_slug_keeps_empty_segments() {
        let params = RouteParams::from_slug("blog/").unwrap();

        assert_eq!(params, RouteParams::pair("blog", ""));
    }

    #[test]
    fn test_from_url_path_trims_slashes() {
        assert_eq!(
            RouteParams::from_url_path("/blog/hello/"),
            Some(RouteParams::pair("blog", "hello"))
        );
        assert_eq!(RouteParams::from_url_path("/"), None);
        assert_eq!(RouteParams::from_url_path("/about"), None);
    }

    #[test]
    fn test_path_entry_serialization() {
        let pair = PathEntry {
            params: RouteParams::pair("blog", "hello"),
        };
        let nested = PathEntry {
            params: RouteParams::nested("a", "b", vec!["c".to_owned(), "d".to_owned()]),
        };

        assert_eq!(
            serde_json::to_value(&pair).unwrap(),
            json!({"params": {"prefix": "blog", "slug": "hello"}})
        );
        assert_eq!(
            serde_json::to_value(&nested).unwrap(),
            json!({"params": {"prefix": "a", "slug": "b", "suffix": ["c", "d"]}})
        );
    }
}
