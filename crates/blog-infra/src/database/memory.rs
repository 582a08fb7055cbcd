//! In-memory blog post repository - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::BlogPost;
use blog_core::error::RepoError;
use blog_core::ports::BlogPostRepository;

struct Row {
    post: BlogPost,
    deleted_at: Option<DateTime<Utc>>,
}

impl Row {
    fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// In-memory repository using a HashMap with async RwLock.
///
/// Mirrors the PostgreSQL adapter, soft delete included.
/// Note: Data is lost on process restart.
pub struct InMemoryBlogPostRepository {
    rows: RwLock<HashMap<Uuid, Row>>,
}

impl InMemoryBlogPostRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryBlogPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BlogPostRepository for InMemoryBlogPostRepository {
    async fn create(&self, post: BlogPost) -> Result<BlogPost, RepoError> {
        let mut rows = self.rows.write().await;

        if rows.contains_key(&post.id) {
            return Err(RepoError::Constraint(format!(
                "duplicate key value violates unique constraint: {}",
                post.id
            )));
        }

        rows.insert(
            post.id,
            Row {
                post: post.clone(),
                deleted_at: None,
            },
        );

        Ok(post)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<BlogPost, RepoError> {
        let rows = self.rows.read().await;

        rows.get(&id)
            .filter(|row| row.is_live())
            .map(|row| row.post.clone())
            .ok_or(RepoError::NotFound)
    }

    async fn get_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        let rows = self.rows.read().await;

        let mut posts: Vec<BlogPost> = rows
            .values()
            .filter(|row| row.is_live())
            .map(|row| row.post.clone())
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(posts)
    }

    async fn update(&self, post: BlogPost) -> Result<BlogPost, RepoError> {
        let mut rows = self.rows.write().await;

        let row = rows
            .get_mut(&post.id)
            .filter(|row| row.is_live())
            .ok_or(RepoError::NotFound)?;

        row.post.title = post.title.clone();
        row.post.description = post.description.clone();
        row.post.body = post.body.clone();
        row.post.updated_at = post.updated_at;

        Ok(row.post.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.write().await;

        let row = rows
            .get_mut(&id)
            .filter(|row| row.is_live())
            .ok_or(RepoError::NotFound)?;
        row.deleted_at = Some(Utc::now());

        Ok(())
    }
}
