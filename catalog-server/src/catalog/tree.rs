//! Category tree maintenance
//!
//! Every category carries a root-first copy of its ancestor chain
//! (`ancestors`). [`CategoryTree`] is the only writer of that cache:
//!
//! - create: chain walked from the parent
//! - update: chain recomputed on re-parent, then pushed down to every
//!   descendant whenever name, slug or ancestors changed
//! - delete: refused while children still point at the category
//! - [`rebuild_ancestors`](CategoryTree::rebuild_ancestors): full top-down repair

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use shared::models::{AncestorRef, Category, CategoryCreate, CategoryFilter, CategoryUpdate};
use shared::util::now_millis;

use super::error::{CategoryError, CategoryResult};
use super::slug::{is_valid_slug, slugify};
use crate::db::{CategoryPatch, CategoryStore, NewCategory};

#[derive(Clone)]
pub struct CategoryTree {
    store: Arc<dyn CategoryStore>,
}

impl std::fmt::Debug for CategoryTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryTree").finish_non_exhaustive()
    }
}

impl CategoryTree {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        Self { store }
    }

    // ==================== Reads ====================

    pub async fn get(&self, id: &str) -> CategoryResult<Category> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| CategoryError::NotFound(id.to_string()))
    }

    /// Categories matching `filter`, ordered by name
    pub async fn list(&self, filter: CategoryFilter) -> CategoryResult<Vec<Category>> {
        Ok(self.store.find_all(filter).await?)
    }

    /// Active and featured categories
    pub async fn featured(&self) -> CategoryResult<Vec<Category>> {
        self.list(CategoryFilter::featured()).await
    }

    /// Direct children of an existing category
    pub async fn children(&self, id: &str) -> CategoryResult<Vec<Category>> {
        self.get(id).await?;
        Ok(self.store.find_by_parent(id).await?)
    }

    // ==================== Writes ====================

    /// Insert a category under `data.parent` (or as a root).
    ///
    /// `data` is expected in normalized, validated form. Slug format,
    /// uniqueness and the parent chain are checked here.
    pub async fn create(&self, mut data: CategoryCreate) -> CategoryResult<Category> {
        let slug = match data.slug.take() {
            Some(slug) => slug,
            None => slugify(&data.name),
        };
        ensure_valid_slug(&slug)?;
        self.ensure_slug_available(&slug, None).await?;

        let ancestors = match data.parent.as_deref() {
            Some(parent_id) => self.walk_parent_chain(parent_id, None).await?,
            None => Vec::new(),
        };

        let now = now_millis();
        let category = self
            .store
            .insert(NewCategory {
                name: data.name,
                slug,
                description: data.description,
                parent: data.parent,
                ancestors,
                image: data.image,
                is_active: data.is_active.unwrap_or(true),
                is_featured: data.is_featured.unwrap_or(false),
                seo: data.seo,
                created_at: now,
                updated_at: now,
            })
            .await?;

        tracing::info!(
            target: "audit",
            action = "category.create",
            id = %category.id,
            slug = %category.slug,
            parent = ?category.parent,
            "Category created"
        );
        Ok(category)
    }

    pub async fn update(&self, id: &str, mut data: CategoryUpdate) -> CategoryResult<Category> {
        let current = self.get(id).await?;
        let mut patch = CategoryPatch {
            updated_at: now_millis(),
            ..Default::default()
        };

        let new_name = data.name.take().filter(|name| *name != current.name);

        // An explicit slug wins; otherwise a rename regenerates it
        let slug = data
            .slug
            .take()
            .or_else(|| new_name.as_deref().map(slugify));
        if let Some(slug) = slug {
            ensure_valid_slug(&slug)?;
            if slug != current.slug {
                self.ensure_slug_available(&slug, Some(id)).await?;
                patch.slug = Some(slug);
            }
        }
        patch.name = new_name;

        if let Some(new_parent) = data.parent.take()
            && new_parent != current.parent
        {
            let ancestors = match new_parent.as_deref() {
                Some(parent_id) => self.walk_parent_chain(parent_id, Some(id)).await?,
                None => Vec::new(),
            };
            patch.parent = Some(new_parent);
            patch.ancestors = Some(ancestors);
        }

        patch.description = data.description;
        patch.image = data.image;
        patch.is_active = data.is_active;
        patch.is_featured = data.is_featured;
        patch.seo = data.seo;

        let cascade = patch.name.is_some() || patch.slug.is_some() || patch.ancestors.is_some();
        let reparented = patch.parent.is_some();

        let updated = self
            .store
            .update_by_id(id, patch)
            .await?
            .ok_or_else(|| CategoryError::NotFound(id.to_string()))?;

        tracing::info!(
            target: "audit",
            action = "category.update",
            id = %updated.id,
            slug = %updated.slug,
            parent = ?updated.parent,
            reparented,
            "Category updated"
        );

        if cascade {
            let rewritten = self.cascade_ancestors(&updated).await?;
            if rewritten > 0 {
                tracing::info!(
                    target: "audit",
                    action = "category.cascade",
                    id = %updated.id,
                    rewritten,
                    "Descendant ancestor caches rewritten"
                );
            }
        }

        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> CategoryResult<()> {
        let category = self.get(id).await?;

        let children = self.store.find_by_parent(id).await?;
        if !children.is_empty() {
            return Err(CategoryError::has_children(id, children.len()));
        }

        if !self.store.delete_by_id(id).await? {
            return Err(CategoryError::NotFound(id.to_string()));
        }

        tracing::info!(
            target: "audit",
            action = "category.delete",
            id = %category.id,
            slug = %category.slug,
            "Category deleted"
        );
        Ok(())
    }

    /// Recompute every ancestor cache top-down from the roots.
    ///
    /// Returns the number of rewritten records. Categories that cannot be
    /// reached from a root (dangling parent, stored cycle) are left untouched.
    pub async fn rebuild_ancestors(&self) -> CategoryResult<usize> {
        let all = self.store.find_all(CategoryFilter::default()).await?;
        let total = all.len();

        let mut children_of: HashMap<String, Vec<Category>> = HashMap::new();
        let mut queue: VecDeque<(Category, Vec<AncestorRef>)> = VecDeque::new();
        for category in all {
            match category.parent.clone() {
                Some(parent_id) => children_of.entry(parent_id).or_default().push(category),
                None => queue.push_back((category, Vec::new())),
            }
        }

        let now = now_millis();
        let mut rewritten = 0;
        while let Some((mut category, expected)) = queue.pop_front() {
            if category.ancestors != expected {
                let patch = CategoryPatch::ancestors(expected, now);
                match self.store.update_by_id(&category.id, patch).await? {
                    Some(updated) => {
                        category = updated;
                        rewritten += 1;
                    }
                    None => continue,
                }
            }

            if let Some(children) = children_of.remove(&category.id) {
                let child_ancestors = category.ancestors_for_child();
                queue.extend(children.into_iter().map(|c| (c, child_ancestors.clone())));
            }
        }

        for (parent_id, orphans) in &children_of {
            for orphan in orphans {
                tracing::warn!(
                    id = %orphan.id,
                    parent = %parent_id,
                    "Category unreachable from any root, ancestors left as is"
                );
            }
        }

        tracing::info!(
            target: "audit",
            action = "category.rebuild_ancestors",
            total,
            rewritten,
            "Ancestor caches rebuilt"
        );
        Ok(rewritten)
    }

    // ==================== Helpers ====================

    async fn ensure_slug_available(&self, slug: &str, except: Option<&str>) -> CategoryResult<()> {
        match self.store.find_by_slug(slug).await? {
            Some(existing) if Some(existing.id.as_str()) != except => {
                Err(CategoryError::slug_taken(slug))
            }
            _ => Ok(()),
        }
    }

    /// Root-first ancestors for a child of `parent_id`.
    ///
    /// With `moving` set, fails if that id shows up anywhere on the chain
    /// (the parent itself included).
    async fn walk_parent_chain(
        &self,
        parent_id: &str,
        moving: Option<&str>,
    ) -> CategoryResult<Vec<AncestorRef>> {
        let parent = self.get(parent_id).await?;
        if let Some(moving) = moving
            && parent.id == moving
        {
            return Err(CategoryError::cycle(moving, parent_id));
        }

        let mut chain = vec![parent.as_ancestor()];
        let mut visited = HashSet::from([parent.id.clone()]);
        let mut next = parent.parent;

        while let Some(id) = next {
            if moving == Some(id.as_str()) {
                return Err(CategoryError::cycle(&id, parent_id));
            }
            if !visited.insert(id.clone()) {
                return Err(CategoryError::broken_chain(parent_id, &id));
            }

            match self.store.find_by_id(&id).await? {
                Some(ancestor) => {
                    chain.push(ancestor.as_ancestor());
                    next = ancestor.parent;
                }
                None => {
                    tracing::warn!(
                        parent = %parent_id,
                        missing = %id,
                        "Dangling id in parent chain, ancestors truncated"
                    );
                    next = None;
                }
            }
        }

        chain.reverse();
        tracing::debug!(parent = %parent_id, depth = chain.len(), "Parent chain resolved");
        Ok(chain)
    }

    /// Push `root`'s cache down to its descendants, breadth-first.
    ///
    /// Only stale entries are written. Returns the number of rewritten records.
    async fn cascade_ancestors(&self, root: &Category) -> CategoryResult<usize> {
        let now = now_millis();
        let mut rewritten = 0;
        let mut visited = HashSet::from([root.id.clone()]);
        let mut queue = VecDeque::from([root.clone()]);

        while let Some(parent) = queue.pop_front() {
            let expected = parent.ancestors_for_child();
            for child in self.store.find_by_parent(&parent.id).await? {
                if !visited.insert(child.id.clone()) {
                    continue;
                }

                let child = if child.ancestors == expected {
                    child
                } else {
                    let patch = CategoryPatch::ancestors(expected.clone(), now);
                    match self.store.update_by_id(&child.id, patch).await? {
                        Some(updated) => {
                            rewritten += 1;
                            updated
                        }
                        // Deleted while cascading
                        None => continue,
                    }
                };
                queue.push_back(child);
            }
        }

        tracing::debug!(root = %root.id, rewritten, "Ancestor cascade finished");
        Ok(rewritten)
    }
}

fn ensure_valid_slug(slug: &str) -> CategoryResult<()> {
    if is_valid_slug(slug) {
        Ok(())
    } else {
        Err(CategoryError::invalid_slug(slug))
    }
}
