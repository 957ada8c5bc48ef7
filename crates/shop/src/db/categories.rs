//! Category repository for catalog browsing.

use std::collections::HashMap;

use sqlx::PgPool;

use larder_core::CategoryId;

use super::RepositoryError;
use crate::models::category::{Category, CategoryTree, Subcategory};

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories with their subcategories.
    ///
    /// Two queries total, grouped in memory.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(&self) -> Result<Vec<CategoryTree>, RepositoryError> {
        let categories = sqlx::query_as::<_, Category>(
            r"
            SELECT id, name, slug, created_at, updated_at
            FROM shop.category
            ORDER BY name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let subcategories = sqlx::query_as::<_, Subcategory>(
            r"
            SELECT id, category_id, name, slug, created_at, updated_at
            FROM shop.subcategory
            ORDER BY name
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let mut grouped: HashMap<CategoryId, Vec<Subcategory>> = HashMap::new();
        for subcategory in subcategories {
            grouped
                .entry(subcategory.category_id)
                .or_default()
                .push(subcategory);
        }

        Ok(categories
            .into_iter()
            .map(|category| CategoryTree {
                subcategories: grouped.remove(&category.id).unwrap_or_default(),
                category,
            })
            .collect())
    }

    /// Get one category (with subcategories) by its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<CategoryTree>, RepositoryError> {
        let category = sqlx::query_as::<_, Category>(
            r"
            SELECT id, name, slug, created_at, updated_at
            FROM shop.category
            WHERE slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        let Some(category) = category else {
            return Ok(None);
        };

        let subcategories = sqlx::query_as::<_, Subcategory>(
            r"
            SELECT id, category_id, name, slug, created_at, updated_at
            FROM shop.subcategory
            WHERE category_id = $1
            ORDER BY name
            ",
        )
        .bind(category.id)
        .fetch_all(self.pool)
        .await?;

        Ok(Some(CategoryTree {
            category,
            subcategories,
        }))
    }
}
