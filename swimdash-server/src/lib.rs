//! swimdash-server: HTTP API over a loaded [`Dashboard`](swimdash_core::Dashboard).
//!
//! Every endpoint is a read-only query against data loaded once at startup,
//! so handlers share the dashboard behind an `Arc` without locking.

pub mod error;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
