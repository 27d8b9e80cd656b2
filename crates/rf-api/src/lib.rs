//! # rf-api
//!
//! The web routing and orchestration layer for rusty-feed.

pub mod handlers;
pub mod middleware;

use actix_web::web;

pub use handlers::AppState;

/// Configures the routes for the feed page and its JSON helpers.
///
/// # Developer Note
/// We use a scoped configuration to allow the main binary to mount
/// the widget under a different path if needed.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            // The page itself
            .route("/", web::get().to(handlers::index))
            // Form actions
            .route("/publish", web::post().to(handlers::publish))
            .route("/clear", web::post().to(handlers::clear))
            // Live length check while typing
            .route("/api/check", web::post().to(handlers::check))
            // Stored history, oldest first
            .route("/api/posts", web::get().to(handlers::posts)),
    );
}
