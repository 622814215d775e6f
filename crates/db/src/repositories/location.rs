//! Location repository.

use std::sync::Arc;

use crate::entities::{Location, location};
use blogr_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Location repository for database operations.
#[derive(Clone)]
pub struct LocationRepository {
    db: Arc<DatabaseConnection>,
}

impl LocationRepository {
    /// Create a new location repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a location by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<location::Model>> {
        Location::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a location by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<location::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location not found: {id}")))
    }

    /// List published locations, ordered by name.
    pub async fn find_published(&self) -> AppResult<Vec<location::Model>> {
        Location::find()
            .filter(location::Column::IsPublished.eq(true))
            .order_by_asc(location::Column::Name)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new location.
    pub async fn create(&self, model: location::ActiveModel) -> AppResult<location::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a location.
    pub async fn update(&self, model: location::ActiveModel) -> AppResult<location::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a location.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Location::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_find_published() {
        let loc = location::Model {
            id: "loc1".to_string(),
            name: "Reykjavik".to_string(),
            is_published: true,
            created_at: Utc::now().into(),
            updated_at: None,
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[loc]])
                .into_connection(),
        );

        let repo = LocationRepository::new(db);
        let result = repo.find_published().await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Reykjavik");
    }
}
