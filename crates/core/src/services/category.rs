//! Category service.

use blogr_common::{AppError, AppResult, IdGenerator};
use blogr_db::{
    entities::{category, user},
    repositories::CategoryRepository,
};
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Category service for business logic.
///
/// Categories are curated by administrators; regular users only read
/// them.
#[derive(Clone)]
pub struct CategoryService {
    category_repo: CategoryRepository,
    id_gen: IdGenerator,
}

/// Input for creating a category.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,

    /// URL identifier. Derived from the title when omitted.
    #[validate(length(min = 1, max = 64))]
    pub slug: Option<String>,

    #[validate(length(max = 4096))]
    pub description: Option<String>,

    pub is_published: Option<bool>,
}

/// Input for updating a category.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCategoryInput {
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 64))]
    pub slug: Option<String>,

    pub description: Option<Option<String>>,

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

impl CategoryService {
    /// Create a new category service.
    #[must_use]
    pub const fn new(category_repo: CategoryRepository) -> Self {
        Self {
            category_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// List published categories, ordered by title.
    pub async fn list_published(&self) -> AppResult<Vec<category::Model>> {
        self.category_repo.find_published().await
    }

    /// Get a published category by slug.
    ///
    /// Unpublished categories are reported as missing.
    pub async fn get_published_by_slug(&self, slug: &str) -> AppResult<category::Model> {
        self.category_repo
            .find_by_slug(slug)
            .await?
            .filter(|c| c.is_published)
            .ok_or_else(|| AppError::CategoryNotFound(slug.to_string()))
    }

    /// Create a category. Administrators only.
    pub async fn create(
        &self,
        actor: &user::Model,
        input: CreateCategoryInput,
    ) -> AppResult<category::Model> {
        require_admin(actor)?;
        input.validate()?;

        let slug = input
            .slug
            .unwrap_or_else(|| slug::slugify(&input.title));

        if self.category_repo.find_by_slug(&slug).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Category slug already taken: {slug}"
            )));
        }

        let model = category::ActiveModel {
            id: Set(self.id_gen.generate()),
            slug: Set(slug),
            title: Set(input.title),
            description: Set(input.description),
            is_published: Set(input.is_published.unwrap_or(true)),
            ..Default::default()
        };

        self.category_repo.create(model).await
    }

    /// Update a category. Administrators only.
    pub async fn update(
        &self,
        actor: &user::Model,
        id: &str,
        input: UpdateCategoryInput,
    ) -> AppResult<category::Model> {
        require_admin(actor)?;
        input.validate()?;

        let category = self.category_repo.get_by_id(id).await?;

        if let Some(ref slug) = input.slug
            && *slug != category.slug
            && self.category_repo.find_by_slug(slug).await?.is_some()
        {
            return Err(AppError::Conflict(format!(
                "Category slug already taken: {slug}"
            )));
        }

        let mut active: category::ActiveModel = category.into();

        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(slug) = input.slug {
            active.slug = Set(slug);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(is_published) = input.is_published {
            active.is_published = Set(is_published);
        }

        active.updated_at = Set(Some(Utc::now().into()));

        self.category_repo.update(active).await
    }

    /// Delete a category. Administrators only.
    ///
    /// Fails while posts still reference it.
    pub async fn delete(&self, actor: &user::Model, id: &str) -> AppResult<()> {
        require_admin(actor)?;

        self.category_repo.get_by_id(id).await?;
        self.category_repo.delete(id).await
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

    fn create_test_category(slug: &str, is_published: bool) -> category::Model {
        category::Model {
            id: "cat1".to_string(),
            slug: slug.to_string(),
            title: "Travel".to_string(),
            description: None,
            is_published,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_requires_admin() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = CategoryService::new(CategoryRepository::new(Arc::new(db)));

        let actor = create_test_user("user1", false);
        let result = service
            .create(
                &actor,
                CreateCategoryInput {
                    title: "Travel".to_string(),
                    slug: None,
                    description: None,
                    is_published: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_taken_slug() {
        let existing = create_test_category("travel", true);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing]])
            .into_connection();
        let service = CategoryService::new(CategoryRepository::new(Arc::new(db)));

        let actor = create_test_user("admin1", true);
        let result = service
            .create(
                &actor,
                CreateCategoryInput {
                    title: "Travel".to_string(),
                    slug: Some("travel".to_string()),
                    description: None,
                    is_published: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_get_published_by_slug_hides_unpublished() {
        let hidden = create_test_category("travel", false);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[hidden]])
            .into_connection();
        let service = CategoryService::new(CategoryRepository::new(Arc::new(db)));

        let result = service.get_published_by_slug("travel").await;

        assert!(matches!(result, Err(AppError::CategoryNotFound(_))));
    }

    #[test]
    fn test_slug_derived_from_title() {
        assert_eq!(slug::slugify("City Walks & Parks"), "city-walks-parks");
    }
}
