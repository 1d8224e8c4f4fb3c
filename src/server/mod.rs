//! Axum-based HTTP server for the plantdoc API.
//!
//! Exposes the welcome route, `POST /predict/` for plant diagnosis, and the
//! operational `/health` and `/metrics` endpoints.
//!
//! # Components
//!
//! - `handlers`: Implementation of individual endpoints.
//! - `middleware`: Request ID and CORS layers.
//! - `routes`: The main router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use routes::{create_router, AppState};
