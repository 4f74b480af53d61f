//! File-backed data source.
//!
//! Provides [`FileSource`] for serving documents from a JSON export of the
//! datastore. The export is read on every call, so edits to the file are
//! picked up by the next page build without a restart.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::source::{
    GlobalData, JsonMap, PageSummary, Post, PostProps, PostRequest, PostResolver, SiteDataSource,
    SourceError, SourceErrorKind,
};

/// Backend identifier for error messages.
const BACKEND: &str = "File";

/// On-disk layout of a datastore export.
#[derive(Debug, Default, Deserialize)]
struct SiteExport {
    #[serde(rename = "allPages", default)]
    all_pages: Vec<serde_json::Value>,
    #[serde(rename = "NOTION_CONFIG", default)]
    notion_config: JsonMap,
    #[serde(rename = "siteInfo", default)]
    site_info: JsonMap,
}

/// Data source reading a JSON datastore export.
///
/// Expected layout:
///
/// ```json
/// {
///   "allPages": [{ "id": "1", "slug": "blog/hello", "title": "Hello" }],
///   "NOTION_CONFIG": { "NEXT_REVALIDATE_SECOND": 120 },
///   "siteInfo": { "title": "My Blog" }
/// }
/// ```
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use slugroute_source::{FileSource, SiteDataSource};
///
/// let source = FileSource::new(PathBuf::from("data/site.json"));
/// let data = source.fetch_global_all_data("slug-paths")?;
/// ```
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source backed by the export at `path`.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing export file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<SiteExport, SourceError> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| SourceError::io(e, &self.path).with_backend(BACKEND))?;
        serde_json::from_str(&content).map_err(|e| self.invalid(e))
    }

    fn invalid(&self, err: serde_json::Error) -> SourceError {
        SourceError::new(SourceErrorKind::Invalid)
            .with_backend(BACKEND)
            .with_path(&self.path)
            .with_source(err)
    }
}

impl SiteDataSource for FileSource {
    fn fetch_global_all_data(&self, from: &str) -> Result<GlobalData, SourceError> {
        let export = self.load()?;
        let all_pages = export
            .all_pages
            .into_iter()
            .map(serde_json::from_value::<PageSummary>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| self.invalid(e))?;

        tracing::debug!(
            from,
            page_count = all_pages.len(),
            path = %self.path.display(),
            "Loaded global page listing"
        );

        Ok(GlobalData { all_pages })
    }
}

impl PostResolver for FileSource {
    fn resolve_post_props(&self, request: &PostRequest) -> Result<PostProps, SourceError> {
        let export = self.load()?;
        let wanted = request.full_slug();

        let row = export
            .all_pages
            .into_iter()
            .find(|row| {
                row.get("slug")
                    .and_then(serde_json::Value::as_str)
                    .map(|slug| slug.strip_prefix('/').unwrap_or(slug))
                    == Some(wanted.as_str())
            });

        let post = match row {
            Some(row) => Some(serde_json::from_value::<Post>(row).map_err(|e| self.invalid(e))?),
            None => {
                tracing::debug!(slug = %wanted, locale = %request.locale, "No document for slug");
                None
            }
        };

        Ok(PostProps {
            post,
            notion_config: export.notion_config,
            site_info: export.site_info,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_export(content: &str) -> (tempfile::TempDir, FileSource) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        fs::write(&path, content).unwrap();
        (dir, FileSource::new(path))
    }

    fn request(prefix: &str, slug: &str, suffix: Option<&[&str]>) -> PostRequest {
        PostRequest {
            prefix: prefix.to_owned(),
            slug: slug.to_owned(),
            suffix: suffix.map(|s| s.iter().map(|p| (*p).to_owned()).collect()),
            locale: "zh-CN".to_owned(),
        }
    }

    const EXPORT: &str = r#"{
        "allPages": [
            {"id": "1", "slug": "blog/hello", "title": "Hello", "type": "Post"},
            {"id": "2", "slug": "archive/2023/10/test", "title": "Deep", "type": "Post"},
            {"id": "3", "slug": "about", "type": "Page"}
        ],
        "NOTION_CONFIG": {"NEXT_REVALIDATE_SECOND": 120},
        "siteInfo": {"title": "My Blog"}
    }"#;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_file_source_is_send_sync() {
        assert_send_sync::<FileSource>();
    }

    #[test]
    fn test_fetch_lists_all_pages() {
        let (_dir, source) = write_export(EXPORT);

        let data = source.fetch_global_all_data("slug-paths").unwrap();

        let slugs: Vec<_> = data
            .all_pages
            .iter()
            .filter_map(|p| p.slug.as_deref())
            .collect();
        assert_eq!(slugs, vec!["blog/hello", "archive/2023/10/test", "about"]);
        assert_eq!(data.all_pages[2].page_type.as_deref(), Some("Page"));
    }

    #[test]
    fn test_fetch_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.json"));

        let err = source.fetch_global_all_data("slug-paths").unwrap_err();

        assert_eq!(err.kind(), SourceErrorKind::NotFound);
        assert_eq!(err.backend(), Some("File"));
    }

    #[test]
    fn test_fetch_malformed_json() {
        let (_dir, source) = write_export("{ not json");

        let err = source.fetch_global_all_data("slug-paths").unwrap_err();

        assert_eq!(err.kind(), SourceErrorKind::Invalid);
        assert!(err.to_string().starts_with("[File] Invalid data"));
    }

    #[test]
    fn test_fetch_empty_object() {
        let (_dir, source) = write_export("{}");

        let data = source.fetch_global_all_data("slug-paths").unwrap();

        assert!(data.all_pages.is_empty());
    }

    #[test]
    fn test_resolve_pair() {
        let (_dir, source) = write_export(EXPORT);

        let props = source
            .resolve_post_props(&request("blog", "hello", None))
            .unwrap();

        let post = props.post.unwrap();
        assert_eq!(post.id, "1");
        assert_eq!(post.title.as_deref(), Some("Hello"));
        assert_eq!(props.notion_config["NEXT_REVALIDATE_SECOND"], 120);
        assert_eq!(props.site_info["title"], "My Blog");
    }

    #[test]
    fn test_resolve_matches_slug_with_leading_slash() {
        let (_dir, source) =
            write_export(r#"{"allPages": [{"id": "7", "slug": "/blog/rooted"}]}"#);

        let props = source
            .resolve_post_props(&request("blog", "rooted", None))
            .unwrap();

        assert_eq!(props.post.unwrap().id, "7");
    }

    #[test]
    fn test_resolve_nested() {
        let (_dir, source) = write_export(EXPORT);

        let props = source
            .resolve_post_props(&request("archive", "2023", Some(&["10", "test"])))
            .unwrap();

        assert_eq!(props.post.unwrap().id, "2");
    }

    #[test]
    fn test_resolve_unknown_slug_keeps_site_context() {
        let (_dir, source) = write_export(EXPORT);

        let props = source
            .resolve_post_props(&request("blog", "missing", None))
            .unwrap();

        assert!(props.post.is_none());
        assert_eq!(props.site_info["title"], "My Blog");
    }

    #[test]
    fn test_resolve_row_without_id_is_invalid() {
        let (_dir, source) = write_export(r#"{"allPages": [{"slug": "blog/hello"}]}"#);

        let err = source
            .resolve_post_props(&request("blog", "hello", None))
            .unwrap_err();

        assert_eq!(err.kind(), SourceErrorKind::Invalid);
    }
}
