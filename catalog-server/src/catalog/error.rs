//! Category core errors

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use crate::db::RepoError;

#[derive(Debug, Error)]
pub enum CategoryError {
    /// Rejected by a tree rule (slug, cycle, delete guard)
    #[error("{message}")]
    Validation { code: ErrorCode, message: String },

    #[error("Category not found: {0}")]
    NotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

pub type CategoryResult<T> = Result<T, CategoryError>;

impl CategoryError {
    pub fn slug_taken(slug: &str) -> Self {
        Self::Validation {
            code: ErrorCode::CategorySlugExists,
            message: format!("Slug '{slug}' is already in use"),
        }
    }

    pub fn invalid_slug(slug: &str) -> Self {
        Self::Validation {
            code: ErrorCode::CategoryInvalidSlug,
            message: format!("Slug '{slug}' must be non-empty and contain only a-z, 0-9 and '-'"),
        }
    }

    pub fn cycle(id: &str, parent: &str) -> Self {
        Self::Validation {
            code: ErrorCode::CategoryCycle,
            message: format!("Cannot move {id} under {parent}: it would create a cycle"),
        }
    }

    /// Stored parent chain already loops
    pub fn broken_chain(parent: &str, repeated: &str) -> Self {
        Self::Validation {
            code: ErrorCode::CategoryCycle,
            message: format!("Parent chain of {parent} loops back to {repeated}"),
        }
    }

    pub fn has_children(id: &str, count: usize) -> Self {
        Self::Validation {
            code: ErrorCode::CategoryHasChildren,
            message: format!("Category {id} still has {count} child categories"),
        }
    }

    /// Error code for the validation variant, `None` otherwise
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Validation { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<RepoError> for CategoryError {
    fn from(err: RepoError) -> Self {
        match err {
            // Lost a race against the unique slug index
            RepoError::Duplicate(msg) => Self::Validation {
                code: ErrorCode::CategorySlugExists,
                message: msg,
            },
            RepoError::Database(msg) => Self::Persistence(msg),
        }
    }
}

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::Validation { code, message } => AppError::with_message(code, message),
            CategoryError::NotFound(id) => {
                AppError::with_message(ErrorCode::CategoryNotFound, format!("Category {id} not found"))
                    .with_detail("id", id)
            }
            CategoryError::Persistence(msg) => AppError::database(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_repo_error_mapping() {
        let dup: CategoryError = RepoError::Duplicate("slug".into()).into();
        assert_eq!(dup.code(), Some(ErrorCode::CategorySlugExists));

        let db: CategoryError = RepoError::Database("disk full".into()).into();
        assert!(matches!(db, CategoryError::Persistence(ref m) if m == "disk full"));
    }

    #[test]
    fn test_app_error_mapping() {
        let app: AppError = CategoryError::NotFound("category:x".into()).into();
        assert_eq!(app.code, ErrorCode::CategoryNotFound);
        assert_eq!(app.http_status(), StatusCode::NOT_FOUND);

        let app: AppError = CategoryError::cycle("category:a", "category:b").into();
        assert_eq!(app.code, ErrorCode::CategoryCycle);
        assert_eq!(app.http_status(), StatusCode::BAD_REQUEST);

        let app: AppError = CategoryError::has_children("category:a", 2).into();
        assert_eq!(app.http_status(), StatusCode::CONFLICT);

        let app: AppError = CategoryError::Persistence("boom".into()).into();
        assert_eq!(app.code, ErrorCode::DatabaseError);
    }
}
