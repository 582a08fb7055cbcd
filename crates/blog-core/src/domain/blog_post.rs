use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// Maximum title length, in characters.
pub const TITLE_MAX_LEN: usize = 255;

/// Maximum description length, in characters.
pub const DESCRIPTION_MAX_LEN: usize = 1000;

/// BlogPost entity - a published article.
///
/// Soft-deleted rows never surface as a `BlogPost`; the deletion marker
/// stays inside the storage adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    /// Create a new post with a fresh id and identical timestamps.
    pub fn new(title: String, description: String, body: String) -> Self {
        let now = now_micros();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            body,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the fields present in `patch`.
    ///
    /// The whole patch is validated first; on error `self` is left untouched.
    pub fn apply(&mut self, patch: BlogPostPatch) -> Result<(), DomainError> {
        patch.validate()?;

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(body) = patch.body {
            self.body = body;
        }

        Ok(())
    }

    /// Refresh `updated_at`. Never moves it backwards.
    pub fn touch(&mut self) {
        self.updated_at = now_micros().max(self.updated_at);
    }
}

/// Current time at the microsecond precision `timestamptz` stores.
fn now_micros() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

impl From<NewBlogPost> for BlogPost {
    fn from(input: NewBlogPost) -> Self {
        Self::new(input.title, input.description, input.body)
    }
}

/// Input for creating a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBlogPost {
    pub title: String,
    pub description: String,
    pub body: String,
}

impl NewBlogPost {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.is_empty() {
            return Err(DomainError::validation("title is required"));
        }
        if self.body.is_empty() {
            return Err(DomainError::validation("body is required"));
        }
        check_title_len(&self.title)?;
        check_description_len(&self.description)
    }
}

/// Partial update. `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogPostPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
}

impl BlogPostPatch {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(title) = &self.title {
            if title.is_empty() {
                return Err(DomainError::validation("title cannot be empty"));
            }
            check_title_len(title)?;
        }
        if let Some(description) = &self.description {
            check_description_len(description)?;
        }
        if let Some(body) = &self.body {
            if body.is_empty() {
                return Err(DomainError::validation("body cannot be empty"));
            }
        }
        Ok(())
    }
}

fn check_title_len(title: &str) -> Result<(), DomainError> {
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(DomainError::validation(format!(
            "title must be at most {TITLE_MAX_LEN} characters"
        )));
    }
    Ok(())
}

fn check_description_len(description: &str) -> Result<(), DomainError> {
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(DomainError::validation(format!(
            "description must be at most {DESCRIPTION_MAX_LEN} characters"
        )));
    }
    Ok(())
}
