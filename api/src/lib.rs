use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header},
    routing::get,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod furniture;
pub mod json;
pub mod models;
pub mod schema;
pub mod snippets;

use config::{Env, ServerConfig};
use models::CommentModel;

#[derive(Clone)]
pub struct App {
    pub config: Arc<ServerConfig>,
    pub comments: Arc<dyn CommentModel>,
}

pub fn router(ctx: App) -> Router {
    let cors = cors_layer(&ctx.config);

    Router::new()
        .route("/health", get(health))
        .nest("/snippets", snippets::routes::route())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(ctx)
}

async fn health() -> &'static str {
    "ok"
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if !config.cors_allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(AllowOrigin::list(config.cors_allowed_origins.clone()))
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE]);
    }

    match config.env {
        Env::Dev => CorsLayer::permissive(),
        // same-origin only
        Env::Staging | Env::Production => CorsLayer::new(),
    }
}
