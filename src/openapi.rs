//! Machine-readable API documentation.
//!
//! `GET /doc` serves an OpenAPI 3.1 document covering the user endpoints;
//! `GET /ui` serves a Swagger UI page that reads it. Both are registered only
//! when [`AppConfig::docs`](crate::AppConfig) is on.

use serde_json::{Value, json};

use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// Registers `/doc` and `/ui`.
pub fn routes(router: Router) -> Router {
    router
        .on(Method::Get, "/doc", |_req: Request| async { Response::json(&document()) })
        .on(Method::Get, "/ui", |_req: Request| async { Response::html(UI_PAGE) })
}

/// The OpenAPI 3.1 description of the user API.
///
/// Assembled by hand — two operations do not justify a schema-derivation
/// dependency.
pub fn document() -> Value {
    json!({
        "openapi": "3.1.0",
        "info": {
            "title": "minato user API",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "paths": {
            "/api/users/{id}": {
                "get": {
                    "summary": "Fetch a user by id",
                    "parameters": [{
                        "name": "id",
                        "in": "path",
                        "required": true,
                        "schema": { "type": "string" },
                    }],
                    "responses": {
                        "200": {
                            "description": "The user record",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/User" },
                                },
                            },
                        },
                        "404": {
                            "description": "No user with that id",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Error" },
                                },
                            },
                        },
                        "400": {
                            "description": "Parameter validation failed",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Error" },
                                },
                            },
                        },
                    },
                },
            },
            "/api/users": {
                "post": {
                    "summary": "Create a user",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/CreateUser" },
                            },
                        },
                    },
                    "responses": {
                        "201": {
                            "description": "The created user record",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/User" },
                                },
                            },
                        },
                        "400": {
                            "description": "Body validation failed",
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Error" },
                                },
                            },
                        },
                    },
                },
            },
        },
        "components": {
            "schemas": {
                "User": {
                    "type": "object",
                    "required": ["id", "name", "age"],
                    "properties": {
                        "id": { "type": "string" },
                        "name": { "type": "string" },
                        "age": { "type": "number" },
                    },
                },
                "CreateUser": {
                    "type": "object",
                    "required": ["name", "age"],
                    "properties": {
                        "name": { "type": "string" },
                        "age": { "type": "number" },
                    },
                },
                "Error": {
                    "type": "object",
                    "required": ["error"],
                    "properties": {
                        "error": { "type": "string" },
                    },
                },
            },
        },
    })
}

const UI_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>minato API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    SwaggerUIBundle({ url: '/doc', dom_id: '#swagger-ui' });
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_covers_both_operations() {
        let doc = document();
        assert!(doc.pointer("/paths/~1api~1users~1{id}/get").is_some());
        assert!(doc.pointer("/paths/~1api~1users/post").is_some());
        assert_eq!(
            doc.pointer("/components/schemas/User/properties/age/type"),
            Some(&json!("number")),
        );
    }

    #[test]
    fn ui_page_points_at_the_document_route() {
        assert!(UI_PAGE.contains("url: '/doc'"));
    }
}
