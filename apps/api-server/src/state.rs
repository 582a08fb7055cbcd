//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::BlogPostService;
use blog_core::ports::BlogPostRepository;
use blog_infra::{DatabaseConfig, InMemoryBlogPostRepository};

/// Which storage backend the running server ended up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    InMemory,
}

impl StorageBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::InMemory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog_posts: BlogPostService,
    pub storage: StorageBackend,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let (repo, storage): (Arc<dyn BlogPostRepository>, StorageBackend) = match db_config {
            Some(config) => match postgres_repository(config).await {
                Ok(repo) => (repo, StorageBackend::Postgres),
                Err(e) => {
                    tracing::error!(
                        "Failed to initialize database: {}. Using in-memory fallback.",
                        e
                    );
                    (Arc::new(InMemoryBlogPostRepository::new()), StorageBackend::InMemory)
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (Arc::new(InMemoryBlogPostRepository::new()), StorageBackend::InMemory)
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (repo, storage): (Arc<dyn BlogPostRepository>, StorageBackend) = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory repository");
            (Arc::new(InMemoryBlogPostRepository::new()), StorageBackend::InMemory)
        };

        tracing::info!(storage = ?storage, "Application state initialized");

        Self::with_repository(repo, storage)
    }

    pub fn with_repository(repo: Arc<dyn BlogPostRepository>, storage: StorageBackend) -> Self {
        Self {
            blog_posts: BlogPostService::new(repo),
            storage,
        }
    }
}

/// Connect, run pending migrations when enabled, and wrap the pool.
#[cfg(feature = "postgres")]
async fn postgres_repository(
    config: &DatabaseConfig,
) -> Result<Arc<dyn BlogPostRepository>, migration::DbErr> {
    use migration::{Migrator, MigratorTrait};

    let conn = blog_infra::database::connect(config).await?;

    if config.auto_migrate {
        Migrator::up(&conn, None).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(Arc::new(blog_infra::PostgresBlogPostRepository::new(conn)))
}
