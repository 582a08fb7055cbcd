use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::BlogPost;
use crate::error::RepoError;

/// Blog post persistence.
///
/// Every read ignores soft-deleted rows. Id-based calls report a missing or
/// deleted row as [`RepoError::NotFound`].
#[async_trait]
pub trait BlogPostRepository: Send + Sync {
    /// Insert a new row.
    async fn create(&self, post: BlogPost) -> Result<BlogPost, RepoError>;

    /// Find a live post by its id.
    async fn get_by_id(&self, id: Uuid) -> Result<BlogPost, RepoError>;

    /// All live posts, newest first.
    async fn get_all(&self) -> Result<Vec<BlogPost>, RepoError>;

    /// Persist every mutable field of `post` by primary key.
    ///
    /// No version check is performed: concurrent writers to the same id
    /// race and the last write wins.
    async fn update(&self, post: BlogPost) -> Result<BlogPost, RepoError>;

    /// Soft-delete a post.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}
