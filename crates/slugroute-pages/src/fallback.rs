//! Placeholder documents for pages that could not be resolved.

use chrono::NaiveDate;
use slugroute_source::{JsonMap, Post, PostDate};

use crate::shape::{RouteParams, SegmentShape};

/// Seconds before a placeholder page is regenerated.
pub const FALLBACK_REVALIDATE_SECONDS: u32 = 10;

/// Why a placeholder was generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackReason {
    /// The resolver returned no document.
    NotFound,
    /// The resolver failed.
    Failed,
}

/// Texts shown on placeholder pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FallbackText {
    /// Title when the document was not found.
    pub not_found_title: String,
    /// Summary when the document was not found.
    pub not_found_summary: String,
    /// Title when resolution failed.
    pub failed_title: String,
    /// Summary when resolution failed.
    pub failed_summary: String,
}

impl Default for FallbackText {
    fn default() -> Self {
        Self {
            not_found_title: "文章暂时无法访问".to_owned(),
            not_found_summary: "该文章可能已被隐藏、删除或正在生成中。".to_owned(),
            failed_title: "构建失败".to_owned(),
            failed_summary: "生成此页面时发生错误，请查看后台日志。".to_owned(),
        }
    }
}

impl FallbackText {
    fn for_reason(&self, reason: FallbackReason) -> (&str, &str) {
        match reason {
            FallbackReason::NotFound => (
                self.not_found_title.as_str(),
                self.not_found_summary.as_str(),
            ),
            FallbackReason::Failed => (self.failed_title.as_str(), self.failed_summary.as_str()),
        }
    }
}

/// Build the placeholder post for a route.
///
/// The route's shape decides whether the suffix takes part in the id and slug;
/// a nested route always appends it, even when empty.
pub(crate) fn placeholder_post(
    shape: SegmentShape,
    params: &RouteParams,
    reason: FallbackReason,
    text: &FallbackText,
    today: NaiveDate,
) -> Post {
    let (title, summary) = text.for_reason(reason);

    let (id, slug) = match shape {
        SegmentShape::Pair => (
            format!("error-{}-{}", params.prefix, params.slug),
            format!("{}/{}", params.prefix, params.slug),
        ),
        SegmentShape::Nested => (
            format!(
                "error-{}-{}-{}",
                params.prefix,
                params.slug,
                params.suffix.join("-")
            ),
            format!(
                "{}/{}/{}",
                params.prefix,
                params.slug,
                params.suffix.join("/")
            ),
        ),
    };

    Post {
        id,
        title: Some(title.to_owned()),
        summary: Some(summary.to_owned()),
        status: Some("Published".to_owned()),
        post_type: Some("Post".to_owned()),
        slug: Some(slug),
        date: Some(PostDate {
            start_date: today.format("%Y-%m-%d").to_string(),
            extra: JsonMap::new(),
        }),
        tags: Some(Vec::new()),
        tag_items: Some(Vec::new()),
        extra: JsonMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[test]
    fn test_pair_placeholder() {
        let post = placeholder_post(
            SegmentShape::Pair,
            &RouteParams::pair("blog", "missing"),
            FallbackReason::NotFound,
            &FallbackText::default(),
            today(),
        );

        assert_eq!(
            serde_json::to_value(&post).unwrap(),
            json!({
                "id": "error-blog-missing",
                "title": "文章暂时无法访问",
                "summary": "该文章可能已被隐藏、删除或正在生成中。",
                "status": "Published",
                "type": "Post",
                "slug": "blog/missing",
                "date": {"start_date": "2024-03-07"},
                "tags": [],
                "tagItems": []
            })
        );
    }

    #[test]
    fn test_nested_placeholder() {
        let params = RouteParams::nested(
            "archive",
            "2023",
            vec!["10".to_owned(), "29".to_owned(), "test".to_owned()],
        );

        let post = placeholder_post(
            SegmentShape::Nested,
            &params,
            FallbackReason::Failed,
            &FallbackText::default(),
            today(),
        );

        assert_eq!(post.id, "error-archive-2023-10-29-test");
        assert_eq!(post.slug.as_deref(), Some("archive/2023/10/29/test"));
        assert_eq!(post.title.as_deref(), Some("构建失败"));
        assert_eq!(
            post.summary.as_deref(),
            Some("生成此页面时发生错误，请查看后台日志。")
        );
    }

    #[test]
    fn test_pair_placeholder_ignores_suffix() {
        let params = RouteParams::nested("a", "b", vec!["c".to_owned()]);

        let post = placeholder_post(
            SegmentShape::Pair,
            &params,
            FallbackReason::NotFound,
            &FallbackText::default(),
            today(),
        );

        assert_eq!(post.id, "error-a-b");
        assert_eq!(post.slug.as_deref(), Some("a/b"));
    }

    #[test]
    fn test_custom_text() {
        let text = FallbackText {
            not_found_title: "Temporarily unavailable".to_owned(),
            ..FallbackText::default()
        };

        let post = placeholder_post(
            SegmentShape::Pair,
            &RouteParams::pair("blog", "x"),
            FallbackReason::NotFound,
            &text,
            today(),
        );

        assert_eq!(post.title.as_deref(), Some("Temporarily unavailable"));
    }
}
