//! Category Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::store::{CategoryPatch, CategoryStore, NewCategory, sort_by_name};
use async_trait::async_trait;
use serde::Deserialize;
use shared::models::{AncestorRef, Category, CategoryFilter, Seo};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "category";

/// Row as stored in SurrealDB (native record id)
#[derive(Debug, Clone, Deserialize)]
struct CategoryRecord {
    id: RecordId,
    name: String,
    slug: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    ancestors: Vec<AncestorRef>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default = "default_true")]
    is_active: bool,
    #[serde(default)]
    is_featured: bool,
    #[serde(default)]
    seo: Option<Seo>,
    #[serde(default)]
    created_at: i64,
    #[serde(default)]
    updated_at: i64,
}

fn default_true() -> bool {
    true
}

impl From<CategoryRecord> for Category {
    fn from(r: CategoryRecord) -> Self {
        Category {
            id: r.id.to_string(),
            name: r.name,
            slug: r.slug,
            description: r.description,
            parent: r.parent,
            ancestors: r.ancestors,
            image: r.image,
            is_active: r.is_active,
            is_featured: r.is_featured,
            seo: r.seo,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Parse "category:xxx"; ids of other tables or malformed ids never match a record
fn parse_id(id: &str) -> Option<RecordId> {
    id.parse::<RecordId>()
        .ok()
        .filter(|rid| rid.table() == TABLE)
}

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl CategoryStore for CategoryRepository {
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let Some(rid) = parse_id(id) else {
            return Ok(None);
        };
        let record: Option<CategoryRecord> = self.base.db().select(rid).await?;
        Ok(record.map(Category::from))
    }

    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Category>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM category WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug.to_string()))
            .await?;
        let records: Vec<CategoryRecord> = result.take(0)?;
        Ok(records.into_iter().next().map(Category::from))
    }

    async fn find_by_parent(&self, parent_id: &str) -> RepoResult<Vec<Category>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM category WHERE parent = $parent")
            .bind(("parent", parent_id.to_string()))
            .await?;
        let records: Vec<CategoryRecord> = result.take(0)?;
        let mut categories: Vec<Category> = records.into_iter().map(Category::from).collect();
        sort_by_name(&mut categories);
        Ok(categories)
    }

    async fn find_all(&self, filter: CategoryFilter) -> RepoResult<Vec<Category>> {
        let mut conditions = Vec::new();
        if filter.is_active.is_some() {
            conditions.push("is_active = $is_active");
        }
        if filter.is_featured.is_some() {
            conditions.push("is_featured = $is_featured");
        }
        let sql = if conditions.is_empty() {
            "SELECT * FROM category".to_string()
        } else {
            format!("SELECT * FROM category WHERE {}", conditions.join(" AND "))
        };

        let mut query = self.base.db().query(sql);
        if let Some(is_active) = filter.is_active {
            query = query.bind(("is_active", is_active));
        }
        if let Some(is_featured) = filter.is_featured {
            query = query.bind(("is_featured", is_featured));
        }

        let records: Vec<CategoryRecord> = query.await?.take(0)?;
        let mut categories: Vec<Category> = records.into_iter().map(Category::from).collect();
        // SurrealDB string ordering is not guaranteed to be byte-wise
        sort_by_name(&mut categories);
        Ok(categories)
    }

    async fn insert(&self, data: NewCategory) -> RepoResult<Category> {
        let created: Option<CategoryRecord> = self.base.db().create(TABLE).content(data).await?;
        created
            .map(Category::from)
            .ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    async fn update_by_id(&self, id: &str, patch: CategoryPatch) -> RepoResult<Option<Category>> {
        let Some(rid) = parse_id(id) else {
            return Ok(None);
        };

        // UPDATE never creates: a missing record yields an empty result
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing MERGE $data RETURN AFTER")
            .bind(("thing", rid))
            .bind(("data", patch))
            .await?;
        let updated: Option<CategoryRecord> = result.take(0)?;
        Ok(updated.map(Category::from))
    }

    async fn delete_by_id(&self, id: &str) -> RepoResult<bool> {
        let Some(rid) = parse_id(id) else {
            return Ok(false);
        };
        let deleted: Option<CategoryRecord> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }
}
