//! Content generation for PowerHause.
//!
//! Wraps the Gemini generative-language HTTP API behind the
//! [`ContentGenerator`] trait. The trait boundary is infallible by contract:
//! if the model is unavailable or the call errors, callers get a
//! deterministic fallback string, never an error. Availability of *some*
//! message is prioritized over correctness of content.

pub mod client;
pub mod error;
pub mod generator;
pub mod prompt;

pub use client::GeminiClient;
pub use error::{GeminiError, Result};
pub use generator::{ContentGenerator, GeminiGenerator};
