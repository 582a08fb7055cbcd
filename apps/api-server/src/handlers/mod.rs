//! HTTP handlers and route configuration.

mod blog_post;
mod health;


use actix_web::{HttpResponse, web};

use crate::middleware::error::AppError;

/// Configure all application routes, the JSON extractor and the 404 fallback.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api").service(
                web::scope("/blog-post")
                    .route("", web::post().to(blog_post::create_blog_post))
                    .route("", web::get().to(blog_post::get_all_blog_posts))
                    .route("/{id}", web::get().to(blog_post::get_blog_post))
                    .route("/{id}", web::patch().to(blog_post::update_blog_post))
                    .route("/{id}", web::delete().to(blog_post::delete_blog_post)),
            ),
        )
        .default_service(web::to(not_found));
}

/// Body parse failures are answered before any handler runs.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::invalid_body(err.to_string()).into())
}

async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::route_not_found())
}
