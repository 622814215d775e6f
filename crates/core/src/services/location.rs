//! Location service.

use blogr_common::{AppError, AppResult, IdGenerator};
use blogr_db::{
    entities::{location, user},
    repositories::LocationRepository,
};
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Location service for business logic.
///
/// Locations are curated by administrators. An unpublished location is
/// hidden from pickers but does not hide posts tagged with it.
#[derive(Clone)]
pub struct LocationService {
    location_repo: LocationRepository,
    id_gen: IdGenerator,
}

/// Input for creating a location.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLocationInput {
    #[validate(length(min = 1, max = 256))]
    pub name: String,

    pub is_published: Option<bool>,
}

/// Input for updating a location.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateLocationInput {
    #[validate(length(min = 1, max = 256))]
    pub name: Option<String>,

    pub is_published: Option<bool>,
}

fn require_admin(actor: &user::Model) -> AppResult<()> {
    if actor.is_admin {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Administrator access required".to_string(),
        ))
    }
}

impl LocationService {
    /// Create a new location service.
    #[must_use]
    pub const fn new(location_repo: LocationRepository) -> Self {
        Self {
            location_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List published locations, ordered by name.
    pub async fn list_published(&self) -> AppResult<Vec<location::Model>> {
        self.location_repo.find_published().await
    }

    /// Create a location. Administrators only.
    pub async fn create(
        &self,
        actor: &user::Model,
        input: CreateLocationInput,
    ) -> AppResult<location::Model> {
        require_admin(actor)?;
        input.validate()?;

        let model = location::ActiveModel {
            id: Set(self.id_gen.generate()),
            name: Set(input.name),
            is_published: Set(input.is_published.unwrap_or(true)),
            ..Default::default()
        };

        self.location_repo.create(model).await
    }

    /// Update a location. Administrators only.
    pub async fn update(
        &self,
        actor: &user::Model,
        id: &str,
        input: UpdateLocationInput,
    ) -> AppResult<location::Model> {
        require_admin(actor)?;
        input.validate()?;

        let location = self.location_repo.get_by_id(id).await?;
        let mut active: location::ActiveModel = location.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(is_published) = input.is_published {
            active.is_published = Set(is_published);
        }

        active.updated_at = Set(Some(Utc::now().into()));

        self.location_repo.update(active).await
    }

    /// Delete a location. Administrators only.
    ///
    /// Posts tagged with it keep existing with the tag cleared.
    pub async fn delete(&self, actor: &user::Model, id: &str) -> AppResult<()> {
        require_admin(actor)?;

        self.location_repo.get_by_id(id).await?;
        self.location_repo.delete(id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_user(id: &str, is_admin: bool) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: "alice".to_string(),
            username_lower: "alice".to_string(),
            token: Some("token".to_string()),
            name: None,
            email: None,
            is_admin,
            posts_count: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_requires_admin() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = LocationService::new(LocationRepository::new(Arc::new(db)));

        let actor = create_test_user("user1", false);
        let result = service
            .create(
                &actor,
                CreateLocationInput {
                    name: "Riverside".to_string(),
                    is_published: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_requires_admin() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = LocationService::new(LocationRepository::new(Arc::new(db)));

        let actor = create_test_user("user1", false);
        let result = service.delete(&actor, "loc1").await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
