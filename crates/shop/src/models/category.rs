//! Category and subcategory domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use larder_core::{CategoryId, SubcategoryId};

/// A top-level catalog category.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub updated_at: DateTime<Utc>,
}

/// A subcategory nested under a [`Category`].
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Subcategory {
    pub id: SubcategoryId,
    #[serde(skip)]
    pub category_id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub updated_at: DateTime<Utc>,
}

/// A category together with its subcategories, as the API presents it.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTree {
    #[serde(flatten)]
    pub category: Category,
    pub subcategories: Vec<Subcategory>,
}
