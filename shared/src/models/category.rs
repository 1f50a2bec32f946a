//! Category Model

use std::borrow::Cow;

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateUrl, ValidationError};

/// Separator used when rendering a breadcrumb path
pub const BREADCRUMB_SEPARATOR: &str = " > ";

/// Canonical form of an incoming payload, applied before validation
pub trait Normalize {
    fn normalize(&mut self);
}

/// One entry of a category's ancestor cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestorRef {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// Search-engine metadata attached to a category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Seo {
    #[validate(length(max = 70, message = "Meta title cannot exceed 70 characters"))]
    pub meta_title: Option<String>,
    #[validate(length(max = 160, message = "Meta description cannot exceed 160 characters"))]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Seo {
    fn normalize(&mut self) {
        self.meta_title = trim_to_none(self.meta_title.take());
        self.meta_description = trim_to_none(self.meta_description.take());
        self.keywords = std::mem::take(&mut self.keywords)
            .into_iter()
            .map(|kw| kw.trim().to_string())
            .filter(|kw| !kw.is_empty())
            .collect();
    }
}

/// Category entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Store-assigned id ("category:xxx")
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Parent category id, `None` for a root category
    #[serde(default)]
    pub parent: Option<String>,
    /// Root-first chain of ancestors, ending with the immediate parent
    #[serde(default)]
    pub ancestors: Vec<AncestorRef>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub seo: Option<Seo>,
    /// Creation time (Unix millis)
    #[serde(default)]
    pub created_at: i64,
    /// Last modification time (Unix millis)
    #[serde(default)]
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

impl Category {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Number of ancestors above this category (0 for roots)
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    /// The entry this category contributes to its children's ancestor cache
    pub fn as_ancestor(&self) -> AncestorRef {
        AncestorRef {
            id: self.id.clone(),
            name: self.name.clone(),
            slug: self.slug.clone(),
        }
    }

    /// Ancestor cache a direct child of this category must carry
    pub fn ancestors_for_child(&self) -> Vec<AncestorRef> {
        let mut ancestors = self.ancestors.clone();
        ancestors.push(self.as_ancestor());
        ancestors
    }

    /// "Shoes > Sneakers > Running"
    pub fn breadcrumb(&self) -> String {
        self.ancestors
            .iter()
            .map(|a| a.name.as_str())
            .chain(std::iter::once(self.name.as_str()))
            .collect::<Vec<_>>()
            .join(BREADCRUMB_SEPARATOR)
    }
}

/// Create category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CategoryCreate {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Category name must be between 3 and 50 characters"
    ))]
    pub name: String,
    /// Explicit slug; derived from `name` when absent
    pub slug: Option<String>,
    #[validate(length(max = 1000, message = "Description cannot exceed 1000 characters"))]
    pub description: Option<String>,
    pub parent: Option<String>,
    #[validate(url(message = "Invalid image URL"))]
    pub image: Option<String>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    #[validate(nested)]
    pub seo: Option<Seo>,
}

impl CategoryCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }
}

impl Normalize for CategoryCreate {
    /// Trim free-text fields and lowercase an explicit slug.
    ///
    /// Blank optional strings collapse to `None`.
    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.slug = trim_to_none(self.slug.take()).map(|s| s.to_lowercase());
        self.description = trim_to_none(self.description.take());
        self.parent = trim_to_none(self.parent.take());
        self.image = trim_to_none(self.image.take());
        if let Some(seo) = self.seo.as_mut() {
            seo.normalize();
        }
    }
}

/// Update category payload
///
/// Absent fields are left unchanged. `parent`, `description`, `image` and
/// `seo` distinguish an absent field from an explicit `null`: `null` moves
/// the category to the root or clears the field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_update_fields"))]
pub struct CategoryUpdate {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Category name must be between 3 and 50 characters"
    ))]
    pub name: Option<String>,
    pub slug: Option<String>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub parent: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    #[serde(
        default,
        deserialize_with = "serde_helpers::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub seo: Option<Option<Seo>>,
}

impl CategoryUpdate {
    pub fn move_to(mut self, parent: Option<String>) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl Normalize for CategoryUpdate {
    /// Blank `description` or `image` becomes an explicit clear.
    fn normalize(&mut self) {
        self.name = self.name.take().map(|n| n.trim().to_string());
        self.slug = trim_to_none(self.slug.take()).map(|s| s.to_lowercase());
        self.description = self.description.take().map(trim_to_none);
        self.parent = self.parent.take().map(trim_to_none);
        self.image = self.image.take().map(trim_to_none);
        if let Some(Some(seo)) = self.seo.as_mut() {
            seo.normalize();
        }
    }
}

fn validate_update_fields(update: &CategoryUpdate) -> Result<(), ValidationError> {
    if let Some(Some(description)) = &update.description
        && description.chars().count() > 1000
    {
        return Err(field_error("description", "Description cannot exceed 1000 characters"));
    }
    if let Some(Some(image)) = &update.image
        && !image.validate_url()
    {
        return Err(field_error("image", "Invalid image URL"));
    }
    if let Some(Some(seo)) = &update.seo {
        seo.validate()
            .map_err(|e| field_error("seo", e.to_string()))?;
    }
    Ok(())
}

fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Equality filters for listing categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

impl CategoryFilter {
    /// Active and featured categories (storefront home page)
    pub fn featured() -> Self {
        Self {
            is_active: Some(true),
            is_featured: Some(true),
        }
    }

    pub fn matches(&self, category: &Category) -> bool {
        self.is_active.is_none_or(|v| v == category.is_active)
            && self.is_featured.is_none_or(|v| v == category.is_featured)
    }
}

fn trim_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
