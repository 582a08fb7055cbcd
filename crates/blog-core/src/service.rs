//! Blog post use cases layered over the repository port.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{BlogPost, BlogPostPatch, NewBlogPost};
use crate::error::{DomainError, RepoError};
use crate::ports::BlogPostRepository;

/// Business rules for blog posts: validation, id and timestamp assignment,
/// partial updates.
#[derive(Clone)]
pub struct BlogPostService {
    repo: Arc<dyn BlogPostRepository>,
}

impl BlogPostService {
    pub fn new(repo: Arc<dyn BlogPostRepository>) -> Self {
        Self { repo }
    }

    /// Validate and persist a new post.
    ///
    /// `None` stands for an absent payload (a JSON `null` body).
    pub async fn create_blog(&self, request: Option<NewBlogPost>) -> Result<BlogPost, DomainError> {
        let request = request.ok_or_else(|| DomainError::validation("request cannot be nil"))?;
        request.validate()?;

        let post = self.repo.create(BlogPost::from(request)).await?;
        tracing::info!(blog_post_id = %post.id, "Blog post created");

        Ok(post)
    }

    pub async fn get_blog_by_id(&self, id: &str) -> Result<BlogPost, DomainError> {
        let uuid = parse_id(id)?;

        self.repo
            .get_by_id(uuid)
            .await
            .map_err(|e| lookup_error(e, id))
    }

    pub async fn get_all_blogs(&self) -> Result<Vec<BlogPost>, DomainError> {
        Ok(self.repo.get_all().await?)
    }

    /// Merge the present fields of `patch` into the stored post.
    ///
    /// `updated_at` is refreshed and the row re-persisted even when the patch
    /// carries no fields.
    pub async fn update_blog(&self, id: &str, patch: BlogPostPatch) -> Result<BlogPost, DomainError> {
        let uuid = parse_id(id)?;

        let mut post = self
            .repo
            .get_by_id(uuid)
            .await
            .map_err(|e| lookup_error(e, id))?;

        post.apply(patch)?;
        post.touch();

        let post = self
            .repo
            .update(post)
            .await
            .map_err(|e| lookup_error(e, id))?;
        tracing::info!(blog_post_id = %post.id, "Blog post updated");

        Ok(post)
    }

    pub async fn delete_blog(&self, id: &str) -> Result<(), DomainError> {
        let uuid = parse_id(id)?;

        self.repo
            .delete(uuid)
            .await
            .map_err(|e| lookup_error(e, id))?;
        tracing::info!(blog_post_id = %uuid, "Blog post deleted");

        Ok(())
    }
}

/// Empty ids are rejected; anything that is not a UUID cannot name a row.
fn parse_id(id: &str) -> Result<Uuid, DomainError> {
    if id.is_empty() {
        return Err(DomainError::validation("blog ID is required"));
    }
    Uuid::parse_str(id).map_err(|_| DomainError::blog_post_not_found(id))
}

fn lookup_error(err: RepoError, id: &str) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::blog_post_not_found(id),
        other => DomainError::Storage(other),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;

    /// Map-backed repository that counts writes.
    #[derive(Default)]
    struct FakeRepository {
        rows: Mutex<HashMap<Uuid, (BlogPost, bool)>>,
        writes: AtomicUsize,
    }

    impl FakeRepository {
        fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        fn stored(&self, id: Uuid) -> Option<BlogPost> {
            self.rows.lock().unwrap().get(&id).map(|(p, _)| p.clone())
        }
    }

    #[async_trait]
    impl BlogPostRepository for FakeRepository {
        async fn create(&self, post: BlogPost) -> Result<BlogPost, RepoError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.rows
                .lock()
                .unwrap()
                .insert(post.id, (post.clone(), false));
            Ok(post)
        }

        async fn get_by_id(&self, id: Uuid) -> Result<BlogPost, RepoError> {
            match self.rows.lock().unwrap().get(&id) {
                Some((post, false)) => Ok(post.clone()),
                _ => Err(RepoError::NotFound),
            }
        }

        async fn get_all(&self) -> Result<Vec<BlogPost>, RepoError> {
            let mut posts: Vec<_> = self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|(_, deleted)| !deleted)
                .map(|(p, _)| p.clone())
                .collect();
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(posts)
        }

        async fn update(&self, post: BlogPost) -> Result<BlogPost, RepoError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            match self.rows.lock().unwrap().get_mut(&post.id) {
                Some((row, false)) => {
                    *row = post.clone();
                    Ok(post)
                }
                _ => Err(RepoError::NotFound),
            }
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            match self.rows.lock().unwrap().get_mut(&id) {
                Some((_, deleted)) if !*deleted => {
                    *deleted = true;
                    Ok(())
                }
                _ => Err(RepoError::NotFound),
            }
        }
    }

    /// Repository whose every call fails at the storage level.
    struct UnreachableRepository;

    #[async_trait]
    impl BlogPostRepository for UnreachableRepository {
        async fn create(&self, _post: BlogPost) -> Result<BlogPost, RepoError> {
            Err(RepoError::Connection("connection refused".into()))
        }

        async fn get_by_id(&self, _id: Uuid) -> Result<BlogPost, RepoError> {
            Err(RepoError::Connection("connection refused".into()))
        }

        async fn get_all(&self) -> Result<Vec<BlogPost>, RepoError> {
            Err(RepoError::Connection("connection refused".into()))
        }

        async fn update(&self, _post: BlogPost) -> Result<BlogPost, RepoError> {
            Err(RepoError::Connection("connection refused".into()))
        }

        async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
            Err(RepoError::Connection("connection refused".into()))
        }
    }

    fn service() -> (BlogPostService, Arc<FakeRepository>) {
        let repo = Arc::new(FakeRepository::default());
        (BlogPostService::new(repo.clone()), repo)
    }

    fn new_post(title: &str, body: &str) -> Option<NewBlogPost> {
        Some(NewBlogPost {
            title: title.into(),
            description: "Description".into(),
            body: body.into(),
        })
    }

    fn assert_validation(err: DomainError, expected: &str) {
        match err {
            DomainError::Validation(reason) => assert_eq!(reason, expected),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_blog_success() {
        let (service, repo) = service();

        let post = service.create_blog(new_post("Title", "Body")).await.unwrap();

        assert_eq!(post.title, "Title");
        assert_eq!(post.description, "Description");
        assert_eq!(post.body, "Body");
        assert_eq!(post.created_at, post.updated_at);
        assert_eq!(repo.stored(post.id), Some(post.clone()));

        let other = service.create_blog(new_post("Title", "Body")).await.unwrap();
        assert_ne!(post.id, other.id);
    }

    #[tokio::test]
    async fn test_create_blog_validation_persists_nothing() {
        let (service, repo) = service();

        let err = service.create_blog(None).await.unwrap_err();
        assert_validation(err, "request cannot be nil");

        let err = service.create_blog(new_post("", "Body")).await.unwrap_err();
        assert_validation(err, "title is required");

        let err = service.create_blog(new_post("Title", "")).await.unwrap_err();
        assert_validation(err, "body is required");

        assert_eq!(repo.writes(), 0);
    }

    #[tokio::test]
    async fn test_create_blog_propagates_storage_error() {
        let service = BlogPostService::new(Arc::new(UnreachableRepository));

        let err = service.create_blog(new_post("Title", "Body")).await.unwrap_err();

        assert!(matches!(err, DomainError::Storage(RepoError::Connection(_))));
    }

    #[tokio::test]
    async fn test_get_blog_by_id() {
        let (service, _) = service();
        let created = service.create_blog(new_post("Title", "Body")).await.unwrap();

        let fetched = service
            .get_blog_by_id(&created.id.to_string())
            .await
            .unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_blog_by_id_empty_and_unknown() {
        let (service, _) = service();

        let err = service.get_blog_by_id("").await.unwrap_err();
        assert_validation(err, "blog ID is required");

        let missing = Uuid::new_v4().to_string();
        let err = service.get_blog_by_id(&missing).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { id, .. } if id == missing));

        let err = service.get_blog_by_id("not-a-uuid").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_all_blogs_newest_first() {
        let (service, _) = service();
        assert!(service.get_all_blogs().await.unwrap().is_empty());

        let first = service.create_blog(new_post("First", "Body")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = service.create_blog(new_post("Second", "Body")).await.unwrap();

        let all = service.get_all_blogs().await.unwrap();

        let ids: Vec<_> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_update_blog_merges_present_fields() {
        let (service, repo) = service();
        let created = service.create_blog(new_post("Title", "Body")).await.unwrap();

        let updated = service
            .update_blog(
                &created.id.to_string(),
                BlogPostPatch {
                    title: Some("New".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "New");
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.body, created.body);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(repo.stored(created.id), Some(updated));
    }

    #[tokio::test]
    async fn test_update_blog_empty_patch_still_persists() {
        let (service, repo) = service();
        let created = service.create_blog(new_post("Title", "Body")).await.unwrap();
        let writes_before = repo.writes();

        let updated = service
            .update_blog(&created.id.to_string(), BlogPostPatch::default())
            .await
            .unwrap();

        assert_eq!(repo.writes(), writes_before + 1);
        assert_eq!(updated.title, created.title);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_update_blog_rejects_empty_title_without_writing() {
        let (service, repo) = service();
        let created = service.create_blog(new_post("Title", "Body")).await.unwrap();
        let writes_before = repo.writes();

        let err = service
            .update_blog(
                &created.id.to_string(),
                BlogPostPatch {
                    title: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert_validation(err, "title cannot be empty");
        assert_eq!(repo.writes(), writes_before);
        assert_eq!(repo.stored(created.id), Some(created));
    }

    #[tokio::test]
    async fn test_update_blog_enforces_length_bounds_without_writing() {
        let (service, repo) = service();
        let created = service.create_blog(new_post("Title", "Body")).await.unwrap();
        let id = created.id.to_string();
        let writes_before = repo.writes();

        let err = service
            .update_blog(
                &id,
                BlogPostPatch {
                    title: Some("t".repeat(256)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_validation(err, "title must be at most 255 characters");

        let err = service
            .update_blog(
                &id,
                BlogPostPatch {
                    description: Some("d".repeat(1001)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_validation(err, "description must be at most 1000 characters");

        assert_eq!(repo.writes(), writes_before);
        assert_eq!(repo.stored(created.id), Some(created));
    }

    #[tokio::test]
    async fn test_update_blog_empty_id_and_missing() {
        let (service, repo) = service();

        let err = service
            .update_blog("", BlogPostPatch::default())
            .await
            .unwrap_err();
        assert_validation(err, "blog ID is required");

        let err = service
            .update_blog(&Uuid::new_v4().to_string(), BlogPostPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(repo.writes(), 0);
    }

    #[tokio::test]
    async fn test_delete_blog_twice() {
        let (service, _) = service();
        let created = service.create_blog(new_post("Title", "Body")).await.unwrap();
        let id = created.id.to_string();

        service.delete_blog(&id).await.unwrap();

        let err = service.get_blog_by_id(&id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        let err = service.delete_blog(&id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_blog_empty_id() {
        let (service, _) = service();

        let err = service.delete_blog("").await.unwrap_err();

        assert_validation(err, "blog ID is required");
    }

    #[tokio::test]
    async fn test_storage_errors_are_not_reported_as_missing() {
        let service = BlogPostService::new(Arc::new(UnreachableRepository));
        let id = Uuid::new_v4().to_string();

        assert!(matches!(
            service.get_blog_by_id(&id).await.unwrap_err(),
            DomainError::Storage(_)
        ));
        assert!(matches!(
            service.get_all_blogs().await.unwrap_err(),
            DomainError::Storage(_)
        ));
        assert!(matches!(
            service.delete_blog(&id).await.unwrap_err(),
            DomainError::Storage(_)
        ));
    }
}
