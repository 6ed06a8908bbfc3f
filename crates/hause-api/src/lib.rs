//! HTTP API for the PowerHause community manager.
//!
//! Thin axum layer over the engine: handlers validate input, translate
//! errors to status codes, and delegate to the pipeline, scheduler and
//! responder held in [`AppState`].

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use router::{create_router, serve};
pub use state::AppState;
