//! Category persistence collaborator
//!
//! [`CategoryStore`] is the only interface the category core needs from the
//! persistence layer. Implementations:
//! - [`CategoryRepository`](super::repository::CategoryRepository) (SurrealDB)
//! - [`MemoryCategoryStore`](super::memory::MemoryCategoryStore)

use async_trait::async_trait;
use serde::Serialize;
use shared::models::{AncestorRef, Category, CategoryFilter, Seo};

use super::repository::RepoResult;

/// A category record before the store assigns its id
#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent: Option<String>,
    pub ancestors: Vec<AncestorRef>,
    pub image: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub seo: Option<Seo>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl NewCategory {
    pub fn into_category(self, id: String) -> Category {
        Category {
            id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            parent: self.parent,
            ancestors: self.ancestors,
            image: self.image,
            is_active: self.is_active,
            is_featured: self.is_featured,
            seo: self.seo,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Partial update; `None` fields are left untouched.
///
/// `Some(None)` on `description`, `parent`, `image` or `seo` clears the field.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ancestors: Option<Vec<AncestorRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo: Option<Option<Seo>>,
    pub updated_at: i64,
}

impl CategoryPatch {
    /// Patch that only rewrites the ancestor cache
    pub fn ancestors(ancestors: Vec<AncestorRef>, updated_at: i64) -> Self {
        Self {
            ancestors: Some(ancestors),
            updated_at,
            ..Default::default()
        }
    }

    pub fn apply(self, category: &mut Category) {
        if let Some(name) = self.name {
            category.name = name;
        }
        if let Some(slug) = self.slug {
            category.slug = slug;
        }
        if let Some(description) = self.description {
            category.description = description;
        }
        if let Some(parent) = self.parent {
            category.parent = parent;
        }
        if let Some(ancestors) = self.ancestors {
            category.ancestors = ancestors;
        }
        if let Some(image) = self.image {
            category.image = image;
        }
        if let Some(is_active) = self.is_active {
            category.is_active = is_active;
        }
        if let Some(is_featured) = self.is_featured {
            category.is_featured = is_featured;
        }
        if let Some(seo) = self.seo {
            category.seo = seo;
        }
        category.updated_at = self.updated_at;
    }
}

/// Persistence operations consumed by [`CategoryTree`](crate::catalog::CategoryTree)
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>>;

    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Category>>;

    /// Direct children of `parent_id`, ordered by name
    async fn find_by_parent(&self, parent_id: &str) -> RepoResult<Vec<Category>>;

    /// All categories matching `filter`, ordered by name (ordinal)
    async fn find_all(&self, filter: CategoryFilter) -> RepoResult<Vec<Category>>;

    /// Persist a new record and assign its id
    async fn insert(&self, data: NewCategory) -> RepoResult<Category>;

    async fn update_by_id(&self, id: &str, patch: CategoryPatch) -> RepoResult<Option<Category>>;

    async fn delete_by_id(&self, id: &str) -> RepoResult<bool>;
}

/// Ordinal (byte-wise) ordering by name
pub(crate) fn sort_by_name(categories: &mut [Category]) {
    categories.sort_by(|a, b| a.name.cmp(&b.name));
}
