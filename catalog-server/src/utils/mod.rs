//! Utilities: error re-exports and logging

pub mod error;
pub mod logger;

pub use error::{AppError, AppResult, ErrorCode, ErrorResponse};
