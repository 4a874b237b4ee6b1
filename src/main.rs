//! Service entrypoint.
//!
//! Run with:
//!   RUST_LOG=info cargo run
//!
//! Try:
//!   curl http://localhost:3000/api/users/1
//!   curl -X POST http://localhost:3000/api/users \
//!        -H 'content-type: application/json' \
//!        -d '{"name":"testUser","age":99}'
//!   curl http://localhost:3000/static/hello.txt
//!   curl http://localhost:3000/doc

use std::sync::Arc;

use minato::{AppConfig, Server, UserStore, service};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let store = Arc::new(UserStore::seeded());
    let router = service::app(Arc::clone(&store), &AppConfig::default());

    let server = Server::bind("0.0.0.0:3000").await.expect("bind failed");
    server.serve(router).await.expect("server error");
}
