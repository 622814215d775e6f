//! Comment service.

use blogr_common::{AppError, AppResult, IdGenerator};
use blogr_db::{
    entities::comment,
    repositories::{CategoryRepository, CommentRepository, PostRepository},
};
use chrono::Utc;
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::services::post::is_visible_to;

/// Comment service for business logic.
#[derive(Clone)]
pub struct CommentService {
    comment_repo: CommentRepository,
    post_repo: PostRepository,
    category_repo: CategoryRepository,
    id_gen: IdGenerator,
}

/// Input for creating a comment.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentInput {
    pub post_id: String,

    #[validate(length(min = 1, max = 8192))]
    pub text: String,
}

/// Input for updating a comment.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentInput {
    #[validate(length(min = 1, max = 8192))]
    pub text: String,
}

impl CommentService {
    /// Create a new comment service.
    #[must_use]
    pub const fn new(
        comment_repo: CommentRepository,
        post_repo: PostRepository,
        category_repo: CategoryRepository,
    ) -> Self {
        Self {
            comment_repo,
            post_repo,
            category_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// A post a viewer may not see cannot be commented on or read from,
    /// and is reported as missing.
    async fn get_commentable_post(
        &self,
        post_id: &str,
        viewer_id: Option<&str>,
    ) -> AppResult<blogr_db::entities::post::Model> {
        let post = self.post_repo.get_by_id(post_id).await?;

        if viewer_id == Some(post.author_id.as_str()) {
            return Ok(post);
        }

        let category = self.category_repo.get_by_id(&post.category_id).await?;
        if !is_visible_to(&post, category.is_published, viewer_id) {
            return Err(AppError::PostNotFound(post_id.to_string()));
        }

        Ok(post)
    }

    /// Create a comment on a post.
    pub async fn create(
        &self,
        author_id: &str,
        input: CreateCommentInput,
    ) -> AppResult<comment::Model> {
        input.validate()?;

        let post = self
            .get_commentable_post(&input.post_id, Some(author_id))
            .await?;

        let model = comment::ActiveModel {
            id: Set(self.id_gen.generate()),
            post_id: Set(post.id.clone()),
            author_id: Set(author_id.to_string()),
            text: Set(input.text),
            ..Default::default()
        };

        let comment = self.comment_repo.create(model).await?;
        self.post_repo.increment_comments_count(&post.id).await?;

        Ok(comment)
    }

    /// List comments on a post, oldest first, with total count.
    pub async fn list_for_post(
        &self,
        post_id: &str,
        viewer_id: Option<&str>,
        limit: u64,
        offset: u64,
    ) -> AppResult<(Vec<comment::Model>, u64)> {
        self.get_commentable_post(post_id, viewer_id).await?;

        let comments = self.comment_repo.find_by_post(post_id, limit, offset).await?;
        let total = self.comment_repo.count_by_post(post_id).await?;

        Ok((comments, total))
    }

    /// Update a comment.
    pub async fn update(
        &self,
        id: &str,
        author_id: &str,
        input: UpdateCommentInput,
    ) -> AppResult<comment::Model> {
        input.validate()?;

        let comment = self.comment_repo.get_by_id(id).await?;

        if comment.author_id != author_id {
            return Err(AppError::Forbidden("Not the comment author".to_string()));
        }

        let mut active: comment::ActiveModel = comment.into();
        active.text = Set(input.text);
        active.updated_at = Set(Some(Utc::now().into()));

        self.comment_repo.update(active).await
    }

    /// Delete a comment.
    pub async fn delete(&self, id: &str, author_id: &str) -> AppResult<()> {
        let comment = self.comment_repo.get_by_id(id).await?;

        if comment.author_id != author_id {
            return Err(AppError::Forbidden("Not the comment author".to_string()));
        }

        let post_id = comment.post_id.clone();
        self.comment_repo.delete(id).await?;
        self.post_repo.decrement_comments_count(&post_id).await?;

        Ok(())
    }
}
