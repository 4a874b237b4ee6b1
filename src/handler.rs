//! Handler trait and type erasure.
//!
//! The router holds handlers of *different* concrete types in a single map,
//! so each one is hidden behind a trait object (`dyn ErasedHandler`). A
//! handler is anything callable as `Fn(Request) -> impl Future<Output = impl
//! IntoResponse>`:
//!
//! - a plain `async fn handler(req: Request) -> Response`
//! - a closure capturing shared state, which is how the user endpoints get
//!   their store handle:
//!
//! ```rust,no_run
//! # use std::sync::Arc;
//! # use minato::{Request, Response, Router, Method, UserStore};
//! # use http::StatusCode;
//! let store = Arc::new(UserStore::seeded());
//! let router = Router::new().on(Method::Get, "/api/users/{id}", move |req: Request| {
//!     let store = Arc::clone(&store);
//!     async move {
//!         match store.get(req.param("id").unwrap_or_default()) {
//!             Some(user) => Response::json(&user),
//!             None => Response::error(StatusCode::NOT_FOUND, "not found"),
//!         }
//!     }
//! });
//! ```
//!
//! The per-request cost of the erasure is one `Arc` clone plus one virtual
//! call — negligible next to network I/O.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it appears in the
/// return type of the public `Handler` trait's `into_boxed_handler` method.
/// External crates cannot usefully interact with this trait.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A heap-allocated, type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Implemented for every valid route handler.
///
/// You never implement this yourself — it is automatically satisfied for any
/// function or closure with the signature
/// `Fn(Request) -> impl Future<Output = impl IntoResponse>`.
///
/// The trait is **sealed** (via the private `Sealed` supertrait): only the
/// blanket impl below can satisfy it, which keeps the dispatch surface
/// stable.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

// ── Blanket implementations ───────────────────────────────────────────────────

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Newtype wrapper that holds a concrete handler `F` and implements
/// [`ErasedHandler`], bridging the typed world to the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
