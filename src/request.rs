//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::HeaderMap;

use crate::method::Method;

/// An incoming HTTP request, as seen by a handler.
///
/// The server has already read the full body into memory by the time a
/// handler runs — `body()` is plain bytes, never a stream. Route parameters
/// captured by the router are available through [`param`](Request::param).
pub struct Request {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Bytes,
    params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        path: String,
        headers: HeaderMap,
        body: Bytes,
        params: HashMap<String, String>,
    ) -> Self {
        Self { method, path, headers, body, params }
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup. `None` for absent headers and for
    /// values that are not valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

#[cfg(test)]
pub(crate) fn fake(method: Method, path: &str, body: &[u8]) -> Request {
    Request::new(
        method,
        path.to_owned(),
        HeaderMap::new(),
        Bytes::copy_from_slice(body),
        HashMap::new(),
    )
}

#[cfg(test)]
pub(crate) fn fake_with_params(
    method: Method,
    path: &str,
    params: &[(&str, &str)],
) -> Request {
    Request::new(
        method,
        path.to_owned(),
        HeaderMap::new(),
        Bytes::new(),
        params.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect(),
    )
}
