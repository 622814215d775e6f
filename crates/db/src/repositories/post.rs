//! Post repository.

use std::sync::Arc;

use crate::entities::{Post, category, post};
use blogr_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, sea_query::Expr,
};

/// Post repository for database operations.
#[derive(Clone)]
pub struct PostRepository {
    db: Arc<DatabaseConnection>,
}

/// Visibility condition for posts: published, publish time passed,
/// and the post's category itself published. When a viewer is given,
/// their own posts are visible regardless.
///
/// Queries using this condition must join the category table.
fn visible_condition(viewer_id: Option<&str>) -> Condition {
    let public = Condition::all()
        .add(post::Column::IsPublished.eq(true))
        .add(post::Column::PublishedAt.lte(chrono::Utc::now()))
        .add(category::Column::IsPublished.eq(true));

    match viewer_id {
        Some(id) => Condition::any()
            .add(post::Column::AuthorId.eq(id))
            .add(public),
        None => public,
    }
}

impl PostRepository {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a post by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<post::Model>> {
        Post::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a post by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<post::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::PostNotFound(id.to_string()))
    }

    /// Create a new post.
    pub async fn create(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a post.
    pub async fn update(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a post. Comments go with it via the FK cascade.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Post::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get the public feed: published, non-future posts in published
    /// categories, newest publish time first.
    pub async fn find_feed(&self, limit: u64, offset: u64) -> AppResult<Vec<post::Model>> {
        Post::find()
            .join(JoinType::InnerJoin, post::Relation::Category.def())
            .filter(visible_condition(None))
            .order_by_desc(post::Column::PublishedAt)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count posts in the public feed.
    pub async fn count_feed(&self) -> AppResult<u64> {
        Post::find()
            .join(JoinType::InnerJoin, post::Relation::Category.def())
            .filter(visible_condition(None))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get published, non-future posts in a category, newest first.
    ///
    /// The caller is responsible for checking the category's own
    /// visibility flag first.
    pub async fn find_by_category(
        &self,
        category_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<post::Model>> {
        Post::find()
            .filter(post::Column::CategoryId.eq(category_id))
            .filter(post::Column::IsPublished.eq(true))
            .filter(post::Column::PublishedAt.lte(chrono::Utc::now()))
            .order_by_desc(post::Column::PublishedAt)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count published, non-future posts in a category.
    pub async fn count_by_category(&self, category_id: &str) -> AppResult<u64> {
        Post::find()
            .filter(post::Column::CategoryId.eq(category_id))
            .filter(post::Column::IsPublished.eq(true))
            .filter(post::Column::PublishedAt.lte(chrono::Utc::now()))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get posts by an author as seen by a viewer, newest first.
    ///
    /// The author themselves sees drafts, scheduled posts and posts in
    /// hidden categories; everyone else sees only visible posts.
    pub async fn find_by_author(
        &self,
        author_id: &str,
        viewer_id: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<post::Model>> {
        let mut query = Post::find().filter(post::Column::AuthorId.eq(author_id));

        if viewer_id != Some(author_id) {
            query = query
                .join(JoinType::InnerJoin, post::Relation::Category.def())
                .filter(visible_condition(viewer_id));
        }

        query
            .order_by_desc(post::Column::PublishedAt)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count posts by an author as seen by a viewer.
    pub async fn count_by_author(
        &self,
        author_id: &str,
        viewer_id: Option<&str>,
    ) -> AppResult<u64> {
        let mut query = Post::find().filter(post::Column::AuthorId.eq(author_id));

        if viewer_id != Some(author_id) {
            query = query
                .join(JoinType::InnerJoin, post::Relation::Category.def())
                .filter(visible_condition(viewer_id));
        }

        query
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Increment comments count atomically (single UPDATE query, no fetch).
    pub async fn increment_comments_count(&self, post_id: &str) -> AppResult<()> {
        Post::update_many()
            .col_expr(
                post::Column::CommentsCount,
                Expr::col(post::Column::CommentsCount).add(1),
            )
            .filter(post::Column::Id.eq(post_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Decrement comments count atomically (single UPDATE query, no fetch).
    pub async fn decrement_comments_count(&self, post_id: &str) -> AppResult<()> {
        Post::update_many()
            .col_expr(
                post::Column::CommentsCount,
                Expr::cust("GREATEST(comments_count - 1, 0)"),
            )
            .filter(post::Column::Id.eq(post_id))
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

    fn create_test_post(id: &str, author_id: &str, title: &str) -> post::Model {
        post::Model {
            id: id.to_string(),
            author_id: author_id.to_string(),
            category_id: "cat1".to_string(),
            location_id: None,
            title: title.to_string(),
            text: "Body text".to_string(),
            image_url: None,
            is_published: true,
            published_at: Utc::now().into(),
            comments_count: 0,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_id_found() {
        let post = create_test_post("post1", "user1", "Hello");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post.clone()]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.find_by_id("post1").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().title, "Hello");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.get_by_id("nonexistent").await;

        assert!(result.is_err());
        match result {
            Err(AppError::PostNotFound(id)) => assert_eq!(id, "nonexistent"),
            _ => panic!("Expected PostNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_find_feed() {
        let post1 = create_test_post("post1", "user1", "First");
        let post2 = create_test_post("post2", "user2", "Second");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post1, post2]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.find_feed(10, 0).await.unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_author_as_owner() {
        let post = create_test_post("post1", "user1", "Draft");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo
            .find_by_author("user1", Some("user1"), 10, 0)
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_visible_condition_anonymous_has_no_author_branch() {
        // Anonymous viewers get the pure publication predicate
        let cond = visible_condition(None);
        let debug = format!("{cond:?}");
        assert!(!debug.contains("author_id"));
    }

    #[test]
    fn test_visible_condition_viewer_includes_author_branch() {
        let cond = visible_condition(Some("user1"));
        let debug = format!("{cond:?}");
        assert!(debug.contains("author_id"));
    }
}
