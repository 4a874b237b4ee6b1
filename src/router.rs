//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup, plus an optional GET
//! fallback for everything the trees miss. You register a path, you get a
//! handler. That is all.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each registration call returns `self` so they chain naturally.
///
/// Path parameters use `{name}` syntax, catch-alls `{*name}`:
///
/// ```rust,no_run
/// # use minato::{Method, Request, Response, Router};
/// # async fn get_user(_: Request) -> Response { Response::text("") }
/// # async fn create_user(_: Request) -> Response { Response::text("") }
/// # async fn static_file(_: Request) -> Response { Response::text("") }
/// Router::new()
///     .on(Method::Get,  "/api/users/{id}",  get_user)
///     .on(Method::Post, "/api/users",       create_user)
///     .on(Method::Get,  "/static/{*path}",  static_file);
/// ```
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    fallback: Option<BoxedHandler>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), fallback: None }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// # Panics
    ///
    /// Panics on a malformed or conflicting route pattern. Routes are
    /// registered once at startup, so this fails fast instead of burying a
    /// configuration mistake in a runtime error path.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Register a catch-all handler for `GET` requests no route matches.
    ///
    /// This is how unmatched paths serve fixed fallback content instead of
    /// the default empty 404. Non-GET misses never reach it.
    pub fn fallback(mut self, handler: impl Handler) -> Self {
        self.fallback = Some(handler.into_boxed_handler());
        self
    }

    pub(crate) fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    pub(crate) fn fallback_handler(&self) -> Option<BoxedHandler> {
        self.fallback.as_ref().map(Arc::clone)
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::ErasedHandler;
    use crate::request::{self, Request};
    use crate::response::Response;

    async fn ok(_req: Request) -> Response {
        Response::text("ok")
    }

    #[tokio::test]
    async fn captures_path_params() {
        let router = Router::new().on(Method::Get, "/api/users/{id}", ok);
        let (_, params) = router.lookup(Method::Get, "/api/users/42").expect("route");
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
    }

    #[tokio::test]
    async fn catch_all_param_spans_segments() {
        let router = Router::new().on(Method::Get, "/static/{*path}", ok);
        let (_, params) = router.lookup(Method::Get, "/static/css/site.css").expect("route");
        assert_eq!(params.get("path").map(String::as_str), Some("css/site.css"));
    }

    #[test]
    fn method_misses_are_not_matches() {
        let router = Router::new().on(Method::Get, "/api/users/{id}", ok);
        assert!(router.lookup(Method::Post, "/api/users/42").is_none());
    }

    #[tokio::test]
    async fn fallback_is_separate_from_route_trees() {
        let router = Router::new().fallback(ok);
        assert!(router.lookup(Method::Get, "/anything").is_none());

        let handler = router.fallback_handler().expect("fallback registered");
        let res = handler.call(request::fake(Method::Get, "/anything", b"")).await;
        assert_eq!(res.body_bytes(), b"ok");
    }
}
