//! In-memory category store
//!
//! Mirrors the SurrealDB repository semantics (including the unique slug
//! index) on top of a `parking_lot::RwLock<HashMap>`. Used for tests and the
//! `memory` engine when no embedded database is wanted.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::{Category, CategoryFilter};

use super::repository::{RepoError, RepoResult};
use super::store::{CategoryPatch, CategoryStore, NewCategory, sort_by_name};

const TABLE: &str = "category";

#[derive(Clone, Default)]
pub struct MemoryCategoryStore {
    /// "category:xxx" -> Category
    categories: Arc<RwLock<HashMap<String, Category>>>,
}

impl std::fmt::Debug for MemoryCategoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCategoryStore")
            .field("categories", &self.categories.read().len())
            .finish()
    }
}

impl MemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.categories.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.read().is_empty()
    }

    fn slug_taken(cache: &HashMap<String, Category>, slug: &str, except: Option<&str>) -> bool {
        cache
            .values()
            .any(|c| c.slug == slug && Some(c.id.as_str()) != except)
    }
}

#[async_trait]
impl CategoryStore for MemoryCategoryStore {
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        Ok(self.categories.read().get(id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Category>> {
        let cache = self.categories.read();
        Ok(cache.values().find(|c| c.slug == slug).cloned())
    }

    async fn find_by_parent(&self, parent_id: &str) -> RepoResult<Vec<Category>> {
        let mut children: Vec<Category> = {
            let cache = self.categories.read();
            cache
                .values()
                .filter(|c| c.parent.as_deref() == Some(parent_id))
                .cloned()
                .collect()
        };
        sort_by_name(&mut children);
        Ok(children)
    }

    async fn find_all(&self, filter: CategoryFilter) -> RepoResult<Vec<Category>> {
        let mut categories: Vec<Category> = {
            let cache = self.categories.read();
            cache.values().filter(|c| filter.matches(c)).cloned().collect()
        };
        sort_by_name(&mut categories);
        Ok(categories)
    }

    async fn insert(&self, data: NewCategory) -> RepoResult<Category> {
        let mut cache = self.categories.write();
        if Self::slug_taken(&cache, &data.slug, None) {
            return Err(RepoError::Duplicate(format!(
                "Slug '{}' already exists",
                data.slug
            )));
        }

        let id = format!("{}:{}", TABLE, uuid::Uuid::new_v4().simple());
        let category = data.into_category(id.clone());
        cache.insert(id, category.clone());
        Ok(category)
    }

    async fn update_by_id(&self, id: &str, patch: CategoryPatch) -> RepoResult<Option<Category>> {
        let mut cache = self.categories.write();
        if let Some(ref slug) = patch.slug
            && Self::slug_taken(&cache, slug, Some(id))
        {
            return Err(RepoError::Duplicate(format!("Slug '{}' already exists", slug)));
        }

        let Some(existing) = cache.get_mut(id) else {
            return Ok(None);
        };
        patch.apply(existing);
        Ok(Some(existing.clone()))
    }

    async fn delete_by_id(&self, id: &str) -> RepoResult<bool> {
        Ok(self.categories.write().remove(id).is_some())
    }
}
