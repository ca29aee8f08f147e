//! Handle Hunt application crate.
//!
//! Hosts the HTTP surface so the `handle-hunt` binary and the route tests
//! share one router.

pub mod server;

pub use server::{create_router, serve, ApiResponse, AppState};
