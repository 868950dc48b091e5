//! # Courtside Server
//!
//! HTTP adapter: axum router, request/response DTOs and error mapping.
//! Handlers stay thin; every decision beyond parsing lives in
//! `courtside-core`.

pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
