pub mod request_id;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::controllers::{conversion::ConversionController, health};
use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;

/// Build the application router
pub fn build_router(pool: Arc<DbPool>, conversion_controller: Arc<ConversionController>) -> Router {
    let conversion_routes = Router::new()
        .route("/api/convert", post(ConversionController::convert))
        .route("/api/conversions", get(ConversionController::list_conversions))
        .route("/api/conversions/:id/audio", get(ConversionController::download_audio))
        .route("/api/conversions/:id/video", get(ConversionController::download_video))
        .route("/api/voices", get(ConversionController::list_voices))
        .with_state(conversion_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(pool)
        .merge(conversion_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_id_middleware)),
        )
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    pool: Arc<DbPool>,
    config: Arc<Config>,
    conversion_controller: Arc<ConversionController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(pool, conversion_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
