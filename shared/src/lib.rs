//! Shared types for the storefront catalog
//!
//! Domain models and the unified error/response types used by
//! catalog-server and its HTTP clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};
