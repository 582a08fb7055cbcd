//! Domain entities - the core business objects.

mod blog_post;

pub use blog_post::{BlogPost, BlogPostPatch, DESCRIPTION_MAX_LEN, NewBlogPost, TITLE_MAX_LEN};
