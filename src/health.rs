//! Health-check handlers.
//!
//! Wired into the default router by [`service::app`](crate::service::app):
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | Liveness | `/healthz` | Is the process alive? |
//! | Readiness | `/readyz` | Can it serve traffic? |
//!
//! The store is in-process memory, so readiness has nothing to wait on; both
//! probes answer unconditionally.

use crate::request::Request;
use crate::response::Response;

/// Liveness probe handler. Always `200 OK` with body `"ok"` — if the process
/// can respond to HTTP at all, it is alive.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// Readiness probe handler. Always `200 OK` with body `"ready"`; there are no
/// external dependencies to verify.
pub async fn readiness(_req: Request) -> Response {
    Response::text("ready")
}
