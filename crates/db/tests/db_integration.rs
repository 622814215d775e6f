//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `blogr_test`)
//!   `TEST_DB_PASSWORD` (default: `blogr_test`)
//!   `TEST_DB_NAME` (default: `blogr_test`)

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use blogr_db::entities::{category, comment, post, user};
use blogr_db::repositories::{CategoryRepository, CommentRepository, PostRepository, UserRepository};
use blogr_db::test_utils::{TestDatabase, TestDbConfig};
use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let config = TestDbConfig::default();
    let result = TestDatabase::with_config(config).await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_migrations_apply_cleanly() {
    let test_db = TestDatabase::create_unique()
        .await
        .expect("Failed to create test database");

    let result = blogr_db::migrate(test_db.connection()).await;
    assert!(result.is_ok(), "Migration failed: {:?}", result.err());

    test_db.drop_database().await.expect("Failed to drop");
}

async fn seed_user(db: &Arc<DatabaseConnection>, id: &str) -> user::Model {
    let repo = UserRepository::new(Arc::clone(db));
    repo.create(user::ActiveModel {
        id: Set(id.to_string()),
        username: Set(format!("author_{id}")),
        username_lower: Set(format!("author_{id}")),
        ..Default::default()
    })
    .await
    .expect("Failed to insert user")
}

async fn seed_category(db: &Arc<DatabaseConnection>, id: &str) -> category::Model {
    let repo = CategoryRepository::new(Arc::clone(db));
    repo.create(category::ActiveModel {
        id: Set(id.to_string()),
        slug: Set(format!("slug-{id}")),
        title: Set("Travel".to_string()),
        is_published: Set(true),
        ..Default::default()
    })
    .await
    .expect("Failed to insert category")
}

async fn seed_post(db: &Arc<DatabaseConnection>, id: &str, author: &str, cat: &str) -> post::Model {
    let repo = PostRepository::new(Arc::clone(db));
    repo.create(post::ActiveModel {
        id: Set(id.to_string()),
        author_id: Set(author.to_string()),
        category_id: Set(cat.to_string()),
        title: Set("Title".to_string()),
        text: Set("Body".to_string()),
        is_published: Set(true),
        published_at: Set(Utc::now().into()),
        ..Default::default()
    })
    .await
    .expect("Failed to insert post")
}

async fn seed_comment(db: &Arc<DatabaseConnection>, id: &str, post: &str, author: &str) {
    let repo = CommentRepository::new(Arc::clone(db));
    repo.create(comment::ActiveModel {
        id: Set(id.to_string()),
        post_id: Set(post.to_string()),
        author_id: Set(author.to_string()),
        text: Set("Nice post".to_string()),
        ..Default::default()
    })
    .await
    .expect("Failed to insert comment");
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_deleting_post_cascades_to_comments() {
    let test_db = TestDatabase::create_unique()
        .await
        .expect("Failed to create test database");
    blogr_db::migrate(test_db.connection())
        .await
        .expect("Migration failed");

    let db = Arc::clone(&test_db.conn);

    seed_user(&db, "user1").await;
    seed_category(&db, "cat1").await;
    seed_post(&db, "post1", "user1", "cat1").await;
    seed_comment(&db, "c1", "post1", "user1").await;
    seed_comment(&db, "c2", "post1", "user1").await;

    let comment_repo = CommentRepository::new(Arc::clone(&db));
    assert_eq!(comment_repo.count_by_post("post1").await.unwrap(), 2);

    let post_repo = PostRepository::new(Arc::clone(&db));
    post_repo.delete("post1").await.expect("Failed to delete");

    // ON DELETE CASCADE removes the post's comments with it
    assert_eq!(comment_repo.count_by_post("post1").await.unwrap(), 0);
    assert!(comment_repo.find_by_id("c1").await.unwrap().is_none());
    assert!(comment_repo.find_by_id("c2").await.unwrap().is_none());

    drop(db);
    test_db.drop_database().await.expect("Failed to drop");
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_decrement_posts_count_never_underflows() {
    let test_db = TestDatabase::create_unique()
        .await
        .expect("Failed to create test database");
    blogr_db::migrate(test_db.connection())
        .await
        .expect("Migration failed");

    let db = Arc::clone(&test_db.conn);

    let created = seed_user(&db, "user1").await;
    assert_eq!(created.posts_count, 0);

    let user_repo = UserRepository::new(Arc::clone(&db));
    user_repo.decrement_posts_count("user1").await.unwrap();
    user_repo.decrement_posts_count("user1").await.unwrap();

    let user = user_repo.get_by_id("user1").await.unwrap();
    assert_eq!(user.posts_count, 0);

    drop(db);
    test_db.drop_database().await.expect("Failed to drop");
}

#[test]
fn test_config_from_env() {
    // Default config should be populated
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.username.is_empty());
    assert!(!config.database.is_empty());
}

#[test]
fn test_database_url_format() {
    let config = TestDbConfig {
        host: "testhost".to_string(),
        port: 5432,
        username: "testuser".to_string(),
        password: "testpass".to_string(),
        database: "testdb".to_string(),
    };

    let url = config.database_url();
    assert!(url.starts_with("postgres://"));
    assert!(url.contains("testhost"));
    assert!(url.contains("5432"));
    assert!(url.contains("testuser"));
    assert!(url.contains("testdb"));
}

#[test]
fn test_postgres_url_format() {
    let config = TestDbConfig::default();
    let url = config.postgres_url();
    assert!(url.ends_with("/postgres"));
}
