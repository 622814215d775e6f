//! Post service.

use blogr_common::{AppError, AppResult, IdGenerator};
use blogr_db::{
    entities::{category, post},
    repositories::{CategoryRepository, LocationRepository, PostRepository, UserRepository},
};
use chrono::{DateTime, Utc};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Post service for business logic.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    user_repo: UserRepository,
    category_repo: CategoryRepository,
    location_repo: LocationRepository,
    id_gen: IdGenerator,
}

/// Input for creating a post.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,

    #[validate(length(min = 1))]
    pub text: String,

    pub category_id: String,

    pub location_id: Option<String>,

    #[validate(length(max = 1024))]
    pub image_url: Option<String>,

    /// Publish timestamp; future values schedule the post. Defaults to now.
    pub published_at: Option<DateTime<Utc>>,

    /// Unchecked = hidden from non-authors. Defaults to true.
    pub is_published: Option<bool>,
}

/// Input for updating a post. `None` leaves a field untouched;
/// `Some(None)` on the double-optional fields clears them.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePostInput {
    #[validate(length(min = 1, max = 256))]
    pub title: Option<String>,

    #[validate(length(min = 1))]
    pub text: Option<String>,

    pub category_id: Option<String>,

    pub location_id: Option<Option<String>>,

    pub image_url: Option<Option<String>>,

    pub published_at: Option<DateTime<Utc>>,

    pub is_published: Option<bool>,
}

/// Whether a post is visible to a viewer.
///
/// Authors always see their own posts. Everyone else sees a post only
/// when it is published, its publish time has passed, and its category
/// is itself published.
#[must_use]
pub fn is_visible_to(
    post: &post::Model,
    category_published: bool,
    viewer_id: Option<&str>,
) -> bool {
    if viewer_id == Some(post.author_id.as_str()) {
        return true;
    }

    post.is_published && post.published_at <= Utc::now().fixed_offset() && category_published
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub const fn new(
        post_repo: PostRepository,
        user_repo: UserRepository,
        category_repo: CategoryRepository,
        location_repo: LocationRepository,
    ) -> Self {
        Self {
            post_repo,
            user_repo,
            category_repo,
            location_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new post.
    pub async fn create(&self, author_id: &str, input: CreatePostInput) -> AppResult<post::Model> {
        input.validate()?;

        // The category must exist; its visibility only affects reads
        if self
            .category_repo
            .find_by_id(&input.category_id)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest("Unknown category".to_string()));
        }

        if let Some(ref location_id) = input.location_id
            && self.location_repo.find_by_id(location_id).await?.is_none()
        {
            return Err(AppError::BadRequest("Unknown location".to_string()));
        }

        let model = post::ActiveModel {
            id: Set(self.id_gen.generate()),
            author_id: Set(author_id.to_string()),
            category_id: Set(input.category_id),
            location_id: Set(input.location_id),
            title: Set(input.title),
            text: Set(input.text),
            image_url: Set(input.image_url),
            is_published: Set(input.is_published.unwrap_or(true)),
            published_at: Set(input.published_at.unwrap_or_else(Utc::now).into()),
            ..Default::default()
        };

        let post = self.post_repo.create(model).await?;
        self.user_repo.increment_posts_count(author_id).await?;

        Ok(post)
    }

    /// Get a post as seen by a viewer.
    ///
    /// Posts the viewer may not see are reported as missing, so hidden
    /// posts are indistinguishable from nonexistent ones.
    pub async fn get_visible(&self, id: &str, viewer_id: Option<&str>) -> AppResult<post::Model> {
        let post = self.post_repo.get_by_id(id).await?;

        if viewer_id == Some(post.author_id.as_str()) {
            return Ok(post);
        }

        let category = self.category_repo.get_by_id(&post.category_id).await?;
        if !is_visible_to(&post, category.is_published, viewer_id) {
            return Err(AppError::PostNotFound(id.to_string()));
        }

        Ok(post)
    }

    /// Get the public feed, newest first, with total count.
    pub async fn feed(&self, limit: u64, offset: u64) -> AppResult<(Vec<post::Model>, u64)> {
        let posts = self.post_repo.find_feed(limit, offset).await?;
        let total = self.post_repo.count_feed().await?;
        Ok((posts, total))
    }

    /// List published posts in a category identified by slug.
    ///
    /// An unpublished category is reported as missing, hiding its posts
    /// along with it.
    pub async fn list_by_category(
        &self,
        slug: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<(category::Model, Vec<post::Model>, u64)> {
        let category = self
            .category_repo
            .find_by_slug(slug)
            .await?
            .filter(|c| c.is_published)
            .ok_or_else(|| AppError::CategoryNotFound(slug.to_string()))?;

        let posts = self
            .post_repo
            .find_by_category(&category.id, limit, offset)
            .await?;
        let total = self.post_repo.count_by_category(&category.id).await?;

        Ok((category, posts, total))
    }

    /// List posts by an author as seen by a viewer, with total count.
    pub async fn list_by_author(
        &self,
        author_id: &str,
        viewer_id: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<post::Model>, u64)> {
        let posts = self
            .post_repo
            .find_by_author(author_id, viewer_id, limit, offset)
            .await?;
        let total = self.post_repo.count_by_author(author_id, viewer_id).await?;
        Ok((posts, total))
    }

    /// Update a post.
    pub async fn update(
        &self,
        id: &str,
        author_id: &str,
        input: UpdatePostInput,
    ) -> AppResult<post::Model> {
        input.validate()?;

        let post = self.post_repo.get_by_id(id).await?;

        if post.author_id != author_id {
            return Err(AppError::Forbidden("Not the post author".to_string()));
        }

        if let Some(ref category_id) = input.category_id
            && self.category_repo.find_by_id(category_id).await?.is_none()
        {
            return Err(AppError::BadRequest("Unknown category".to_string()));
        }

        if let Some(Some(ref location_id)) = input.location_id
            && self.location_repo.find_by_id(location_id).await?.is_none()
        {
            return Err(AppError::BadRequest("Unknown location".to_string()));
        }

        let mut active: post::ActiveModel = post.into();

        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(text) = input.text {
            active.text = Set(text);
        }
        if let Some(category_id) = input.category_id {
            active.category_id = Set(category_id);
        }
        if let Some(location_id) = input.location_id {
            active.location_id = Set(location_id);
        }
        if let Some(image_url) = input.image_url {
            active.image_url = Set(image_url);
        }
        if let Some(published_at) = input.published_at {
            active.published_at = Set(published_at.into());
        }
        if let Some(is_published) = input.is_published {
            active.is_published = Set(is_published);
        }

        active.updated_at = Set(Some(Utc::now().into()));

        self.post_repo.update(active).await
    }

    /// Delete a post. Its comments go with it.
    pub async fn delete(&self, id: &str, author_id: &str) -> AppResult<()> {
        let post = self.post_repo.get_by_id(id).await?;

        if post.author_id != author_id {
            return Err(AppError::Forbidden("Not the post author".to_string()));
        }

        self.post_repo.delete(id).await?;
        self.user_repo.decrement_posts_count(author_id).await?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_post(id: &str, author_id: &str) -> post::Model {
        post::Model {
            id: id.to_string(),
            author_id: author_id.to_string(),
            category_id: "cat1".to_string(),
            location_id: None,
            title: "Title".to_string(),
            text: "Body".to_string(),
            image_url: None,
            is_published: true,
            published_at: Utc::now().into(),
            comments_count: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_category(id: &str, is_published: bool) -> category::Model {
        category::Model {
            id: id.to_string(),
            slug: "travel".to_string(),
            title: "Travel".to_string(),
            description: None,
            is_published,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn service_with(db: sea_orm::DatabaseConnection) -> PostService {
        let db = Arc::new(db);
        PostService::new(
            PostRepository::new(Arc::clone(&db)),
            UserRepository::new(Arc::clone(&db)),
            CategoryRepository::new(Arc::clone(&db)),
            LocationRepository::new(db),
        )
    }

    #[test]
    fn test_visible_published_past_post() {
        let post = create_test_post("post1", "user1");
        assert!(is_visible_to(&post, true, None));
        assert!(is_visible_to(&post, true, Some("user2")));
    }

    #[test]
    fn test_unpublished_post_hidden_from_others() {
        let mut post = create_test_post("post1", "user1");
        post.is_published = false;

        assert!(!is_visible_to(&post, true, Some("user2")));
        assert!(!is_visible_to(&post, true, None));
        // Author always sees their own
        assert!(is_visible_to(&post, true, Some("user1")));
    }

    #[test]
    fn test_future_dated_post_hidden_from_others() {
        let mut post = create_test_post("post1", "user1");
        post.published_at = (Utc::now() + Duration::hours(1)).into();

        assert!(!is_visible_to(&post, true, Some("user2")));
        assert!(is_visible_to(&post, true, Some("user1")));
    }

    #[test]
    fn test_hidden_category_hides_post_from_others() {
        let post = create_test_post("post1", "user1");

        assert!(!is_visible_to(&post, false, Some("user2")));
        assert!(is_visible_to(&post, false, Some("user1")));
    }

    #[tokio::test]
    async fn test_get_visible_masks_hidden_post_as_missing() {
        let mut post = create_test_post("post1", "user1");
        post.is_published = false;
        let category = create_test_category("cat1", true);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[post]])
            .append_query_results([[category]])
            .into_connection();

        let service = service_with(db);
        let result = service.get_visible("post1", Some("user2")).await;

        assert!(matches!(result, Err(AppError::PostNotFound(_))));
    }

    #[tokio::test]
    async fn test_get_visible_author_sees_own_draft() {
        let mut post = create_test_post("post1", "user1");
        post.is_published = false;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[post]])
            .into_connection();

        let service = service_with(db);
        let result = service.get_visible("post1", Some("user1")).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_by_non_author_is_forbidden() {
        let post = create_test_post("post1", "user1");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[post]])
            .into_connection();

        let service = service_with(db);
        let result = service
            .update(
                "post1",
                "user2",
                UpdatePostInput {
                    title: Some("Hijacked".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_by_non_author_is_forbidden() {
        let post = create_test_post("post1", "user1");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[post]])
            .into_connection();

        let service = service_with(db);
        let result = service.delete("post1", "user2").await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_list_by_category_unpublished_is_missing() {
        let category = create_test_category("cat1", false);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[category]])
            .into_connection();

        let service = service_with(db);
        let result = service.list_by_category("travel", 10, 0).await;

        assert!(matches!(result, Err(AppError::CategoryNotFound(_))));
    }
}
