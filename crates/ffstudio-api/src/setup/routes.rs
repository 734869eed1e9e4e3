//! Route configuration and setup

use crate::constants::{operation_path, HEALTH_PATH, OPENAPI_PATH, READY_PATH};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_DISPOSITION, HeaderValue, Method},
    middleware,
    routing::{get, post, MethodRouter},
    Json, Router,
};
use ffstudio_core::{Config, OperationKind};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let api = operation_routes()
        .route(HEALTH_PATH, get(handlers::health::liveness_check))
        .route(READY_PATH, get(handlers::health::readiness_check))
        .route(
            OPENAPI_PATH,
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .with_state(state);

    let app = if config.static_dir.is_dir() {
        let index = config.static_dir.join("index.html");
        tracing::info!(static_dir = %config.static_dir.display(), "Serving static front-end");
        api.fallback_service(ServeDir::new(&config.static_dir).fallback(ServeFile::new(index)))
    } else {
        api
    };

    tracing::info!(
        http_concurrency_limit = config.http_concurrency_limit,
        max_request_body_bytes = config.max_request_body_bytes(),
        "HTTP limits enabled"
    );

    // Per-file ceilings are enforced while streaming; the body limit only
    // bounds a whole request, and its rejection is rendered as JSON.
    let app = app
        .layer(DefaultBodyLimit::disable())
        .layer(ConcurrencyLimitLayer::new(config.http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(config.max_request_body_bytes()))
        .layer(middleware::map_response_with_state(
            config.max_upload_bytes,
            crate::error::body_limit_rejection,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn operation_handler(kind: OperationKind) -> MethodRouter<Arc<AppState>> {
    match kind {
        OperationKind::CutAudio => post(handlers::operations::cut_audio),
        OperationKind::CropVideo => post(handlers::operations::crop_video),
        OperationKind::TrimVideo => post(handlers::operations::trim_video),
        OperationKind::ReplaceAudio => post(handlers::operations::replace_audio),
        OperationKind::ImageToVideo => post(handlers::operations::image_to_video),
    }
}

/// `/api/<operation>` plus the legacy path the bundled front-end posts to
fn operation_routes() -> Router<Arc<AppState>> {
    OperationKind::ALL
        .into_iter()
        .fold(Router::new(), |router, kind| {
            router
                .route(&operation_path(kind), operation_handler(kind))
                .route(kind.legacy_path(), operation_handler(kind))
        })
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers([CONTENT_DISPOSITION]);

    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        base.allow_origin(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        base.allow_origin(origins)
    };
    Ok(cors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_cors_origin_rejected() {
        let config = Config {
            cors_origins: vec!["https://ok.example".to_string(), "bad\norigin".to_string()],
            ..Config::default()
        };
        assert!(setup_cors(&config).is_err());
    }
}
