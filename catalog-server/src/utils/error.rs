//! Error handling
//!
//! Re-exports the workspace-wide error types from `shared::error`, which
//! implement axum's `IntoResponse`.

pub use shared::error::{AppError, AppResult, ErrorCode, ErrorResponse};
