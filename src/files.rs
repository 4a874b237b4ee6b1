//! Static file handlers.
//!
//! Two flavors: [`dir`] serves a directory subtree under a catch-all route
//! (`/static/{*path}`), [`file`] serves one fixed file (favicon, the
//! unmatched-path fallback). Misses are empty 404s — no JSON envelope on
//! non-API paths.

use std::path::{Path, PathBuf};

use http::StatusCode;
use tracing::warn;

use crate::handler::Handler;
use crate::request::Request;
use crate::response::Response;

/// Handler serving files under `root`, keyed by the route's `{*path}` capture.
pub fn dir(root: impl Into<PathBuf>) -> impl Handler {
    let root = root.into();
    move |req: Request| {
        let root = root.clone();
        async move {
            match resolve(&root, req.param("path").unwrap_or_default()) {
                Some(path) => read(&path).await,
                None => Response::status(StatusCode::NOT_FOUND),
            }
        }
    }
}

/// Handler serving one fixed file, whatever the request path was.
pub fn file(path: impl Into<PathBuf>) -> impl Handler {
    let path = path.into();
    move |_req: Request| {
        let path = path.clone();
        async move { read(&path).await }
    }
}

/// Maps the raw capture onto a path under `root`.
///
/// `None` for anything that could escape the root: `..` segments and
/// backslashes are rejected outright, empty and `.` segments are skipped.
fn resolve(root: &Path, param: &str) -> Option<PathBuf> {
    let segments = param.split('/');
    if segments.clone().any(|s| s == ".." || s.contains('\\')) {
        return None;
    }

    let mut path = root.to_path_buf();
    segments
        .filter(|s| !s.is_empty() && *s != ".")
        .for_each(|s| path.push(s));
    Some(path)
}

async fn read(path: &Path) -> Response {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => {}
        // Directories are not listable content; same observable result as a
        // missing file.
        Ok(_) => return Response::status(StatusCode::NOT_FOUND),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Response::status(StatusCode::NOT_FOUND);
        }
        Err(e) => {
            warn!(path = %path.display(), "static stat failed: {e}");
            return Response::status(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    match tokio::fs::read(path).await {
        Ok(body) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            Response::builder().bytes(mime.as_ref(), body)
        }
        Err(e) => {
            warn!(path = %path.display(), "static read failed: {e}");
            Response::status(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_joins_clean_segments() {
        let path = resolve(Path::new("/srv/static"), "css/site.css").expect("clean");
        assert_eq!(path, Path::new("/srv/static/css/site.css"));
    }

    #[test]
    fn resolve_skips_empty_and_dot_segments() {
        let path = resolve(Path::new("/srv/static"), "a//./b").expect("clean");
        assert_eq!(path, Path::new("/srv/static/a/b"));
    }

    #[test]
    fn resolve_rejects_traversal() {
        assert!(resolve(Path::new("/srv/static"), "../secret").is_none());
        assert!(resolve(Path::new("/srv/static"), "a/../../secret").is_none());
        assert!(resolve(Path::new("/srv/static"), "a\\b").is_none());
    }

    #[tokio::test]
    async fn read_serves_file_bytes_with_guessed_type() {
        let root = tempfile::tempdir().expect("tempdir");
        let path = root.path().join("hello.txt");
        std::fs::write(&path, "hello from static").expect("write fixture");

        let res = read(&path).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body_bytes(), b"hello from static");
        assert_eq!(res.header_value("content-type"), Some("text/plain"));
    }

    #[tokio::test]
    async fn read_miss_is_an_empty_404() {
        let root = tempfile::tempdir().expect("tempdir");
        let res = read(&root.path().join("missing.txt")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert!(res.body_bytes().is_empty());
    }

    #[tokio::test]
    async fn read_of_a_directory_is_a_404() {
        let root = tempfile::tempdir().expect("tempdir");
        let res = read(root.path()).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    }
}
