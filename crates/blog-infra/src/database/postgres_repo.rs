//! PostgreSQL repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, NotSet, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use blog_core::domain::BlogPost;
use blog_core::error::RepoError;
use blog_core::ports::BlogPostRepository;

use super::entity::blog_post::{self, Entity as BlogPostEntity};

/// PostgreSQL blog post repository with soft delete.
pub struct PostgresBlogPostRepository {
    db: DbConn,
}

impl PostgresBlogPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    #[cfg(test)]
    pub(crate) fn into_connection(self) -> DbConn {
        self.db
    }
}

fn map_db_err(e: DbErr) -> RepoError {
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => RepoError::Connection(e.to_string()),
        other => {
            let err_str = other.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("Blog post already exists".to_string())
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}

#[async_trait]
impl BlogPostRepository for PostgresBlogPostRepository {
    async fn create(&self, post: BlogPost) -> Result<BlogPost, RepoError> {
        tracing::debug!(blog_post_id = %post.id, "Inserting blog post");

        let active_model: blog_post::ActiveModel = post.into();
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<BlogPost, RepoError> {
        tracing::debug!(blog_post_id = %id, "Finding blog post by id");

        BlogPostEntity::find_by_id(id)
            .filter(blog_post::Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .map(Into::into)
            .ok_or(RepoError::NotFound)
    }

    async fn get_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        let result = BlogPostEntity::find()
            .filter(blog_post::Column::DeletedAt.is_null())
            .order_by_desc(blog_post::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn update(&self, post: BlogPost) -> Result<BlogPost, RepoError> {
        tracing::debug!(blog_post_id = %post.id, "Updating blog post");

        // Key and creation time are immutable; only content and updated_at are written.
        let mut changes: blog_post::ActiveModel = post.clone().into();
        changes.id = NotSet;
        changes.created_at = NotSet;

        let result = BlogPostEntity::update_many()
            .set(changes)
            .filter(blog_post::Column::Id.eq(post.id))
            .filter(blog_post::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        tracing::debug!(blog_post_id = %id, "Soft-deleting blog post");

        let now: DateTimeWithTimeZone = Utc::now().into();
        let result = BlogPostEntity::update_many()
            .col_expr(blog_post::Column::DeletedAt, Expr::value(now))
            .filter(blog_post::Column::Id.eq(id))
            .filter(blog_post::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
