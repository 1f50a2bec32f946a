//! Category API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use shared::models::{Category, CategoryCreate, CategoryFilter, CategoryUpdate};

use crate::api::extract::ValidatedJson;
use crate::core::ServerState;
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
pub struct RebuildReport {
    pub rewritten: usize,
}

/// GET /api/categories - list, optionally filtered by `is_active` / `is_featured`
pub async fn list(
    State(state): State<ServerState>,
    Query(filter): Query<CategoryFilter>,
) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(state.categories.list(filter).await?))
}

/// GET /api/categories/featured - active and featured categories
pub async fn featured(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(state.categories.featured().await?))
}

/// GET /api/categories/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Category>> {
    Ok(Json(state.categories.get(&id).await?))
}

/// GET /api/categories/{id}/children - direct children
pub async fn children(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(state.categories.children(&id).await?))
}

/// POST /api/categories
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<CategoryCreate>,
) -> AppResult<Json<Category>> {
    Ok(Json(state.categories.create(payload).await?))
}

/// PUT /api/categories/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    Ok(Json(state.categories.update(&id, payload).await?))
}

/// DELETE /api/categories/{id} - refused while the category has children
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    state.categories.delete(&id).await?;
    Ok(Json(true))
}

/// POST /api/categories/rebuild-ancestors - repair stale ancestor caches
pub async fn rebuild_ancestors(
    State(state): State<ServerState>,
) -> AppResult<Json<RebuildReport>> {
    let rewritten = state.categories.rebuild_ancestors().await?;
    Ok(Json(RebuildReport { rewritten }))
}
