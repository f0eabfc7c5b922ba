//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! [`start_server`] loads configuration, installs the tracing subscriber,
//! builds the router with [`create_router`] and serves it until Ctrl-C.

// region: --- Imports
use crate::handlers;
use crate::middleware::{log_requests, stamp_req, RequestStamp};
use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use lib_core::config::init_config;
use lib_core::Config;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
// endregion: --- Imports

// region: --- Server Setup
/// Initialize and start the HTTP server.
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - The tracing subscriber cannot be installed
/// - Server binding fails
pub async fn start_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = init_config()?;
    init_tracing(&config.log_level)?;

    info!(" COMMUNITY VALIDATION SERVICE STARTING");
    info!(" Log level: {}", config.log_level);
    info!(" Allowed origins: {:?}", config.allowed_origins);

    let app = create_router(config)?;

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!(" SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(" Server stopped");
    Ok(())
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!(" Shutdown signal received");
}

/// Create the application router with all routes and middleware.
///
/// # Errors
///
/// Fails if `allowed_origins` holds an entry that is not an origin.
pub fn create_router(config: &Config) -> lib_core::Result<Router> {
    let allow_origin = match config.cors_origins()? {
        Some(origins) => AllowOrigin::list(origins),
        None => AllowOrigin::any(),
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let router = Router::new()
        .route(
            "/api/validate/field/{field}",
            post(handlers::validation::check_field),
        )
        .route("/api/validate/signup", post(handlers::validation::validate_signup))
        .route("/api/validate/login", post(handlers::validation::validate_login))
        .route("/api/validate/contact", post(handlers::validation::validate_contact))
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            (StatusCode::NOT_FOUND, "Route not found")
        })
        // Innermost: sees the stamp added by the outer layer
        .layer(axum::middleware::from_fn(log_requests))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_failure(
                    |error: tower_http::classify::ServerErrorsFailureClass,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::error!(
                            error = ?error,
                            latency_ms = latency.as_millis(),
                            "[HTTP FAILURE] Error: {:?}, Latency: {}ms",
                            error,
                            latency.as_millis()
                        );
                    },
                ),
        )
        .layer(axum::middleware::from_fn(stamp_req))
        .layer(cors);

    Ok(router)
}

/// Log server information
fn log_server_info() {
    info!(" VALIDATION:");
    info!("   • POST /api/validate/field/{{field}}");
    info!("   • POST /api/validate/signup");
    info!("   • POST /api/validate/login");
    info!("   • POST /api/validate/contact");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method("OPTIONS")
            .uri("/api/validate/signup")
            .header("origin", origin)
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_wildcard_origin_allows_any() {
        // Arrange
        let config = Config {
            allowed_origins: vec!["*".to_string()],
            ..Default::default()
        };

        // Act
        let app = create_router(&config).unwrap();
        let response = app.oneshot(preflight("https://maps.example.org")).await.unwrap();

        // Assert
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }

    #[tokio::test]
    async fn test_listed_origin_is_echoed() {
        let app = create_router(&Config::default()).unwrap();
        let response = app.oneshot(preflight("http://localhost:3000")).await.unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
    }

    #[test]
    fn test_unparseable_origin_is_config_error() {
        let config = Config {
            allowed_origins: vec!["not an origin".to_string()],
            ..Default::default()
        };

        let err = create_router(&config).unwrap_err();

        assert!(matches!(err, lib_core::AppError::Config(_)));
    }
}
