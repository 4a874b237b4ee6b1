//! Service assembly: configuration plus the full route table.

use std::path::PathBuf;
use std::sync::Arc;

use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::store::UserStore;
use crate::{api, files, health, openapi};

/// Service configuration.
///
/// Plain data with working defaults — no environment variables or CLI flags.
/// Construct one, override what you need, hand it to [`app`].
pub struct AppConfig {
    /// Directory served under `/static/`.
    pub static_root: PathBuf,
    /// File served at `/favicon.ico`.
    pub favicon: PathBuf,
    /// File served for any unmatched `GET` path. `None` disables the
    /// catch-all, so unmatched paths get an empty 404 instead. With the
    /// catch-all on, a missing file also yields 404 — the route is
    /// registered, the content simply is not there.
    pub fallback: Option<PathBuf>,
    /// When true, creating a user with an empty `name` is rejected with 400.
    /// Off by default: any string name is accepted.
    pub strict_names: bool,
    /// Registers `/doc` (OpenAPI JSON) and `/ui` (documentation browser).
    pub docs: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            static_root: PathBuf::from("static"),
            favicon: PathBuf::from("favicon.ico"),
            fallback: Some(PathBuf::from("static/fallback.txt")),
            strict_names: false,
            docs: true,
        }
    }
}

/// Builds the full application router over a shared store handle.
///
/// The store is passed in rather than created here so callers (the binary,
/// the tests) keep a handle to observe and seed it.
pub fn app(store: Arc<UserStore>, config: &AppConfig) -> Router {
    let mut router = Router::new()
        .on(Method::Get, "/", |_req: Request| async {
            Response::text("You can access: /static/hello.txt")
        })
        .on(Method::Get, "/static/{*path}", files::dir(config.static_root.clone()))
        .on(Method::Get, "/favicon.ico", files::file(config.favicon.clone()))
        .on(Method::Get, "/healthz", health::liveness)
        .on(Method::Get, "/readyz", health::readiness);

    router = api::routes(router, store, config.strict_names);

    if config.docs {
        router = openapi::routes(router);
    }
    if let Some(path) = &config.fallback {
        router = router.fallback(files::file(path.clone()));
    }

    router
}
