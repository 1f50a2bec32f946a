//! Category catalog core
//!
//! Slug derivation and ancestor-cache maintenance over an injected
//! [`CategoryStore`](crate::db::CategoryStore).

mod error;
mod slug;
mod tree;

pub use error::{CategoryError, CategoryResult};
pub use slug::{is_valid_slug, slugify};
pub use tree::CategoryTree;
