//! Data models
//!
//! Shared between catalog-server and its API clients.
//! All ids are opaque strings assigned by the store ("category:xxx").

pub mod category;
pub mod serde_helpers;

// Re-exports
pub use category::*;
