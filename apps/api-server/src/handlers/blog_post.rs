//! Blog post handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::{BlogPost, BlogPostPatch, NewBlogPost};
use blog_shared::ApiResponse;
use blog_shared::dto::{BlogPostResponse, CreateBlogPostRequest, UpdateBlogPostRequest};

use crate::middleware::error::{AppError, AppResult, BlogOperation};
use crate::state::AppState;

fn to_response(post: BlogPost) -> BlogPostResponse {
    BlogPostResponse {
        id: post.id.to_string(),
        title: post.title,
        description: post.description,
        body: post.body,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// POST /api/blog-post
///
/// A JSON `null` body reaches the service as an absent request.
pub async fn create_blog_post(
    state: web::Data<AppState>,
    body: web::Json<Option<CreateBlogPostRequest>>,
) -> AppResult<HttpResponse> {
    let request = body.into_inner().map(|req| NewBlogPost {
        title: req.title,
        description: req.description,
        body: req.body,
    });

    let post = state
        .blog_posts
        .create_blog(request)
        .await
        .map_err(|e| AppError::from_domain(BlogOperation::Create, e))?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(
        "Blog post created successfully",
        to_response(post),
    )))
}

/// GET /api/blog-post
pub async fn get_all_blog_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state
        .blog_posts
        .get_all_blogs()
        .await
        .map_err(|e| AppError::from_domain(BlogOperation::List, e))?;

    let items: Vec<BlogPostResponse> = posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::list(
        "Blog posts retrieved successfully",
        items,
    )))
}

/// GET /api/blog-post/{id}
pub async fn get_blog_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let post = state
        .blog_posts
        .get_blog_by_id(&id)
        .await
        .map_err(|e| AppError::from_domain(BlogOperation::Fetch, e))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        "Blog post retrieved successfully",
        to_response(post),
    )))
}

/// PATCH /api/blog-post/{id}
pub async fn update_blog_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateBlogPostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();
    let patch = BlogPostPatch {
        title: req.title,
        description: req.description,
        body: req.body,
    };

    let post = state
        .blog_posts
        .update_blog(&id, patch)
        .await
        .map_err(|e| AppError::from_domain(BlogOperation::Update, e))?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        "Blog post updated successfully",
        to_response(post),
    )))
}

/// DELETE /api/blog-post/{id}
pub async fn delete_blog_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    state
        .blog_posts
        .delete_blog(&id)
        .await
        .map_err(|e| AppError::from_domain(BlogOperation::Delete, e))?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::message(
        "Blog post deleted successfully",
    )))
}
