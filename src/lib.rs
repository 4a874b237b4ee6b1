//! # minato
//!
//! A small user-directory HTTP service over an in-memory store.
//! Nothing more. Nothing less.
//!
//! ## The contract
//!
//! Two JSON endpoints over a seeded, append-only store:
//!
//! - `GET /api/users/{id}` — 200 with the record, or 404 `{"error":"not found"}`
//! - `POST /api/users` — validate `{name, age}`, append, 201 with the record;
//!   400 `{"error": <message>}` on a bad body, with nothing appended
//!
//! Around them, the rest of a working service: static files under
//! `/static/`, a favicon route, a configurable catch-all for unmatched GET
//! paths, health probes, and an optional OpenAPI document at `/doc` with a
//! browser at `/ui`. Edge concerns (TLS, rate limiting, body-size limits)
//! belong to the reverse proxy in front.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use minato::{AppConfig, Server, UserStore, service};
//!
//! #[tokio::main]
//! async fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     let store = Arc::new(UserStore::seeded());
//!     let router = service::app(Arc::clone(&store), &AppConfig::default());
//!
//!     let server = Server::bind("0.0.0.0:3000").await.expect("bind failed");
//!     server.serve(router).await.expect("server error");
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;

pub mod api;
pub mod files;
pub mod health;
pub mod openapi;
pub mod schema;
pub mod service;
pub mod store;

pub use error::Error;
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use schema::{CreateUser, ValidationError};
pub use server::Server;
pub use service::{AppConfig, app};
pub use store::{User, UserStore};
