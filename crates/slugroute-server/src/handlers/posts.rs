//! Posts API endpoint.
//!
//! Resolves props for post pages. Resolution never fails: missing documents
//! and resolver errors come back as placeholder pages.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{Uri, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use slugroute_pages::{RouteError, RouteParams, SegmentShape};

use crate::error::ServerError;
use crate::state::AppState;

/// Mount point of the posts API.
const POSTS_PREFIX: &str = "/api/posts";

/// `s-maxage` sent for pages that are never regenerated.
const IMMUTABLE_MAX_AGE: u32 = 31_536_000;

/// Query parameters for props requests.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PropsQuery {
    /// Locale override.
    locale: Option<String>,
}

/// Handle GET /api/posts/{prefix}/{slug}.
pub(crate) async fn get_pair(
    Path((prefix, slug)): Path<(String, String)>,
    Query(query): Query<PropsQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let params = RouteParams::pair(prefix, slug);
    props_response(&state, SegmentShape::Pair, &params, &query)
}

/// Handle GET /api/posts/{prefix}/{slug}/{*suffix}.
pub(crate) async fn get_nested(
    Path((prefix, slug, suffix)): Path<(String, String, String)>,
    Query(query): Query<PropsQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let suffix = suffix.split('/').map(str::to_owned).collect();
    let params = RouteParams::nested(prefix, slug, suffix);
    props_response(&state, SegmentShape::Nested, &params, &query)
}

/// Handle post URLs with fewer than two segments.
pub(crate) async fn not_a_post(uri: Uri) -> ServerError {
    let path = uri.path().strip_prefix(POSTS_PREFIX).unwrap_or(uri.path());
    let path = if path.is_empty() { "/" } else { path };
    ServerError::Route(RouteError::InvalidPath(path.to_owned()))
}

fn props_response(
    state: &AppState,
    shape: SegmentShape,
    params: &RouteParams,
    query: &PropsQuery,
) -> Response {
    let locale = query.locale.as_deref().unwrap_or(&state.default_locale);
    let props = state
        .routes
        .route(shape)
        .static_props(state.resolver.as_ref(), params, locale);

    (
        [(header::CACHE_CONTROL, cache_control(props.revalidate))],
        Json(props),
    )
        .into_response()
}

/// `Cache-Control` value for a page's revalidate interval.
fn cache_control(revalidate: Option<u32>) -> String {
    let max_age = revalidate.unwrap_or(IMMUTABLE_MAX_AGE);
    format!("s-maxage={max_age}, stale-while-revalidate")
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use slugroute_pages::{BuildMode, RouteConfig};
    use slugroute_source::{MockSource, Post, SourceErrorKind};

    use super::*;
    use crate::handlers::test_state;

    fn post(slug: &str) -> Post {
        serde_json::from_value(json!({"id": "p1", "title": "Hello", "slug": slug})).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn cache_header(response: &Response) -> &str {
        response
            .headers()
            .get(header::CACHE_CONTROL)
            .unwrap()
            .to_str()
            .unwrap()
    }

    #[test]
    fn test_cache_control() {
        assert_eq!(cache_control(Some(60)), "s-maxage=60, stale-while-revalidate");
        assert_eq!(
            cache_control(None),
            "s-maxage=31536000, stale-while-revalidate"
        );
    }

    #[tokio::test]
    async fn test_get_pair_found() {
        let source = Arc::new(
            MockSource::new()
                .with_post(post("blog/hello"))
                .with_notion_config("NEXT_REVALIDATE_SECOND", json!(120)),
        );
        let state = test_state(&source, RouteConfig::default());

        let response = get_pair(
            Path(("blog".to_owned(), "hello".to_owned())),
            Query(PropsQuery::default()),
            State(state),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(cache_header(&response), "s-maxage=120, stale-while-revalidate");
        let body = body_json(response).await;
        assert_eq!(body["props"]["post"]["title"], "Hello");
        assert_eq!(body["revalidate"], 120);
        assert_eq!(source.requests()[0].locale, "zh-CN");
    }

    #[tokio::test]
    async fn test_get_pair_locale_query() {
        let source = Arc::new(MockSource::new().with_post(post("blog/hello")));
        let state = test_state(&source, RouteConfig::default());

        get_pair(
            Path(("blog".to_owned(), "hello".to_owned())),
            Query(PropsQuery {
                locale: Some("en-US".to_owned()),
            }),
            State(state),
        )
        .await;

        assert_eq!(source.requests()[0].locale, "en-US");
    }

    #[tokio::test]
    async fn test_get_nested_splits_suffix() {
        let source = Arc::new(MockSource::new().with_post(post("archive/2023/10/29/test")));
        let state = test_state(&source, RouteConfig::default());

        let response = get_nested(
            Path((
                "archive".to_owned(),
                "2023".to_owned(),
                "10/29/test".to_owned(),
            )),
            Query(PropsQuery::default()),
            State(state),
        )
        .await;

        let body = body_json(response).await;
        assert_eq!(body["props"]["post"]["title"], "Hello");
        let requests = source.requests();
        assert_eq!(
            requests[0].suffix,
            Some(vec!["10".to_owned(), "29".to_owned(), "test".to_owned()])
        );
    }

    #[tokio::test]
    async fn test_get_pair_missing_post_is_placeholder() {
        let source = Arc::new(MockSource::new());
        let state = test_state(&source, RouteConfig::default());

        let response = get_pair(
            Path(("blog".to_owned(), "missing".to_owned())),
            Query(PropsQuery::default()),
            State(state),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(cache_header(&response), "s-maxage=10, stale-while-revalidate");
        let body = body_json(response).await;
        assert_eq!(body["props"]["post"]["id"], "error-blog-missing");
        assert_eq!(body["revalidate"], 10);
    }

    #[tokio::test]
    async fn test_get_nested_resolver_failure_is_placeholder() {
        let source = Arc::new(MockSource::new().failing_resolve(SourceErrorKind::Unavailable));
        let state = test_state(&source, RouteConfig::default());

        let response = get_nested(
            Path(("a".to_owned(), "b".to_owned(), "c".to_owned())),
            Query(PropsQuery::default()),
            State(state),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["props"]["post"]["id"], "error-a-b-c");
        assert_eq!(body["props"]["post"]["title"], "构建失败");
        assert_eq!(body["props"]["NOTION_CONFIG"], json!({}));
    }

    #[tokio::test]
    async fn test_export_mode_is_immutable() {
        let source = Arc::new(MockSource::new().with_post(post("blog/hello")));
        let config = RouteConfig {
            mode: BuildMode {
                production: true,
                export: true,
            },
            ..RouteConfig::default()
        };
        let state = test_state(&source, config);

        let response = get_pair(
            Path(("blog".to_owned(), "hello".to_owned())),
            Query(PropsQuery::default()),
            State(state),
        )
        .await;

        assert_eq!(
            cache_header(&response),
            "s-maxage=31536000, stale-while-revalidate"
        );
        let body = body_json(response).await;
        assert!(body.get("revalidate").is_none());
    }
}
