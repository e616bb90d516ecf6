use super::Repository;
use crate::domain::{Category, CategoryMap};
use sqlx::Row;

impl Repository {
    /// All categories ordered by id.
    pub async fn list_categories(&self) -> Result<Vec<Category>, sqlx::Error> {
        let rows = sqlx::query("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| Category::new(row.get("id"), row.get::<String, _>("type")))
            .collect())
    }

    /// Categories as an id → type mapping.
    pub async fn category_map(&self) -> Result<CategoryMap, sqlx::Error> {
        Ok(self
            .list_categories()
            .await?
            .into_iter()
            .map(|c| (c.id, c.kind))
            .collect())
    }

    pub async fn get_category(&self, id: i64) -> Result<Option<Category>, sqlx::Error> {
        let row = sqlx::query("SELECT id, type FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| Category::new(row.get("id"), row.get::<String, _>("type"))))
    }
}
