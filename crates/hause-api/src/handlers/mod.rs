//! API request handlers.

pub mod communities;
pub mod health;
pub mod webhooks;

pub use communities::*;
pub use health::*;
pub use webhooks::*;
