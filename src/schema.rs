//! Request validation.
//!
//! An explicit two-step pipeline instead of framework middleware: a handler
//! calls `schema::body` / `schema::param` first, and either gets a typed
//! value it can trust or returns the error, which renders as a
//! `400 {"error": <message>}` envelope. Nothing downstream of a failed check
//! runs — in particular, a rejected create never touches the store.

use http::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Number;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A rejected input. The display string is the message clients see in the
/// error envelope.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The body was not valid JSON, or did not match the expected shape
    /// (missing field, wrong type). The message is serde's description.
    #[error("{0}")]
    Shape(#[from] serde_json::Error),
    /// A route parameter the shape requires was not captured. Unreachable
    /// through the registered routes, but the check exists so the shape is
    /// total.
    #[error("missing path parameter `{0}`")]
    MissingParam(&'static str),
    /// A field rejected by the strict variant of a shape.
    #[error("`{0}` must not be empty")]
    Empty(&'static str),
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        Response::error(StatusCode::BAD_REQUEST, &self.to_string())
    }
}

/// Validates a JSON request body against the shape `T`.
///
/// Unknown fields are ignored; missing or mistyped fields fail.
pub fn body<T: DeserializeOwned>(req: &Request) -> Result<T, ValidationError> {
    serde_json::from_slice(req.body()).map_err(ValidationError::from)
}

/// Validates that the route captured the parameter `name`.
///
/// Any captured string is accepted — there is no format constraint on ids.
pub fn param(req: &Request, name: &'static str) -> Result<String, ValidationError> {
    req.param(name)
        .map(str::to_owned)
        .ok_or(ValidationError::MissingParam(name))
}

/// The create-user body shape: `{ name: string, age: number }`.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub age: Number,
}

impl CreateUser {
    /// The strict variant additionally requires a non-empty `name`.
    pub fn validate(&self, strict_names: bool) -> Result<(), ValidationError> {
        if strict_names && self.name.is_empty() {
            return Err(ValidationError::Empty("name"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::Method;
    use crate::request;

    fn post(body: &[u8]) -> Request {
        request::fake(Method::Post, "/api/users", body)
    }

    #[test]
    fn accepts_a_well_shaped_body() {
        let input: CreateUser = body(&post(br#"{"name":"testUser","age":99}"#)).expect("valid");
        assert_eq!(input.name, "testUser");
        assert_eq!(input.age, Number::from(99));
    }

    #[test]
    fn ignores_unknown_fields() {
        let input: CreateUser =
            body(&post(br#"{"name":"a","age":1,"admin":true}"#)).expect("valid");
        assert_eq!(input.name, "a");
    }

    #[test]
    fn rejects_missing_age() {
        let err = body::<CreateUser>(&post(br#"{"name":"testUser"}"#)).unwrap_err();
        assert!(err.to_string().contains("missing field `age`"), "{err}");
    }

    #[test]
    fn rejects_non_numeric_age() {
        let err = body::<CreateUser>(&post(br#"{"name":"x","age":"20"}"#)).unwrap_err();
        assert!(err.to_string().contains("invalid type"), "{err}");
    }

    #[test]
    fn rejects_a_body_that_is_not_json() {
        assert!(body::<CreateUser>(&post(b"not json")).is_err());
    }

    #[test]
    fn empty_name_depends_on_strictness() {
        let input = CreateUser { name: String::new(), age: Number::from(1) };
        assert!(input.validate(false).is_ok());
        let err = input.validate(true).unwrap_err();
        assert_eq!(err.to_string(), "`name` must not be empty");
    }

    #[test]
    fn param_reads_the_capture() {
        let req = request::fake_with_params(Method::Get, "/api/users/42", &[("id", "42")]);
        assert_eq!(param(&req, "id").expect("captured"), "42");
        assert!(param(&req, "missing").is_err());
    }

    #[test]
    fn failures_render_as_400_envelopes() {
        let res = ValidationError::Empty("name").into_response();
        assert_eq!(res.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(res.body_bytes(), br#"{"error":"`name` must not be empty"}"#);
    }
}
