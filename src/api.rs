//! The user API endpoints.
//!
//! `GET /api/users/{id}` and `POST /api/users`. Each handler is a pure
//! function of (validated input, store) to (response, store mutation); the
//! closures registered on the router only thread the store handle through.

use std::sync::Arc;

use http::StatusCode;

use crate::method::Method;
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::router::Router;
use crate::schema::{self, CreateUser};
use crate::store::UserStore;

/// Registers both user endpoints on `router`.
pub fn routes(router: Router, store: Arc<UserStore>, strict_names: bool) -> Router {
    let lookup_store = Arc::clone(&store);
    router
        .on(Method::Get, "/api/users/{id}", move |req: Request| {
            let store = Arc::clone(&lookup_store);
            async move { lookup(&store, &req) }
        })
        .on(Method::Post, "/api/users", move |req: Request| {
            let store = Arc::clone(&store);
            async move { create(&store, strict_names, &req) }
        })
}

/// Scan for the requested id; 200 with the record or 404 with the envelope.
fn lookup(store: &UserStore, req: &Request) -> Response {
    let id = match schema::param(req, "id") {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };

    match store.get(&id) {
        Some(user) => Response::json(&user),
        None => Response::error(StatusCode::NOT_FOUND, "not found"),
    }
}

/// Validate, append, 201 with the created record.
///
/// Validation runs to completion before the store is touched; the append
/// itself cannot fail.
fn create(store: &UserStore, strict_names: bool, req: &Request) -> Response {
    let input: CreateUser = match schema::body(req) {
        Ok(input) => input,
        Err(err) => return err.into_response(),
    };
    if let Err(err) = input.validate(strict_names) {
        return err.into_response();
    }

    let user = store.create(input.name, input.age);
    Response::builder().status(StatusCode::CREATED).json(&user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request;

    fn store() -> UserStore {
        UserStore::seeded()
    }

    #[test]
    fn lookup_hit_returns_the_record() {
        let req = request::fake_with_params(Method::Get, "/api/users/1", &[("id", "1")]);
        let res = lookup(&store(), &req);
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body_bytes(), br#"{"id":"1","name":"John","age":20}"#);
    }

    #[test]
    fn lookup_miss_returns_the_404_envelope() {
        let req = request::fake_with_params(Method::Get, "/api/users/299", &[("id", "299")]);
        let res = lookup(&store(), &req);
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(res.body_bytes(), br#"{"error":"not found"}"#);
    }

    #[test]
    fn lookup_without_a_capture_is_a_400() {
        let req = request::fake(Method::Get, "/api/users/1", b"");
        let res = lookup(&store(), &req);
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn create_appends_and_returns_201() {
        let store = store();
        let req = request::fake(Method::Post, "/api/users", br#"{"name":"testUser","age":99}"#);
        let res = create(&store, false, &req);
        assert_eq!(res.status_code(), StatusCode::CREATED);
        assert_eq!(res.body_bytes(), br#"{"id":"3","name":"testUser","age":99}"#);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn create_rejection_leaves_the_store_untouched() {
        let store = store();
        let req = request::fake(Method::Post, "/api/users", br#"{"name":"noAge"}"#);
        let res = create(&store, false, &req);
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn create_strictness_gates_empty_names() {
        let store = store();
        let body = br#"{"name":"","age":5}"#;

        let res = create(&store, true, &request::fake(Method::Post, "/api/users", body));
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(store.len(), 2);

        let res = create(&store, false, &request::fake(Method::Post, "/api/users", body));
        assert_eq!(res.status_code(), StatusCode::CREATED);
        assert_eq!(store.len(), 3);
    }
}
