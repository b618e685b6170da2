//! Axum server setup
//!
//! - CORS limited to a single configured origin
//! - Security headers on every response
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C, then the pool is closed

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::{headers, routes};

/// Default port when none is configured
pub const DEFAULT_PORT: u16 = 4000;

/// Default allowed CORS origin
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:4000)
    pub bind_addr: SocketAddr,

    /// The only origin allowed by CORS (default: http://localhost:3000)
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Build the application router with all routes and middleware.
///
/// # Errors
///
/// Returns `ServerError::InvalidOrigin` if the CORS origin is not a valid
/// header value.
pub fn build_router(state: AppState, config: &ServerConfig) -> Result<Router, ServerError> {
    let origin = HeaderValue::from_str(&config.cors_origin)
        .map_err(|_| ServerError::InvalidOrigin(config.cors_origin.clone()))?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::categories::router())
        .merge(routes::products::router())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        .layer(cors);

    Ok(headers::with_security_headers(app)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state)))
}

/// Unknown path
async fn route_not_found() -> ApiError {
    ApiError::NotFound { resource: "route" }
}

/// Known path, unsupported method
async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// In-flight requests are drained before the pool is closed.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_url).await?;
/// run_server(pool, ServerConfig::default()).await?;
/// ```
pub async fn run_server(pool: PgPool, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(AppState::new(pool.clone()), &config)?;
    tracing::info!(origin = %config.cors_origin, "CORS origin configured");

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid CORS origin: {0}")]
    InvalidOrigin(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::test_support::{body_json, offline_router};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 4000);
        assert_eq!(config.cors_origin, "http://localhost:3000");
    }

    #[tokio::test]
    async fn rejects_unparseable_origin() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://storefront@127.0.0.1:1/storefront")
            .unwrap();
        let config = ServerConfig {
            cors_origin: "http://bad\norigin".into(),
            ..ServerConfig::default()
        };

        let err = build_router(AppState::new(pool), &config)
            .err()
            .expect("origin rejected");
        assert!(matches!(err, ServerError::InvalidOrigin(_)));
    }

    #[tokio::test]
    async fn preflight_from_configured_origin_is_allowed() {
        let response = offline_router()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/categories")
                    .header(header::ORIGIN, DEFAULT_CORS_ORIGIN)
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            DEFAULT_CORS_ORIGIN
        );
        let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS]
            .to_str()
            .unwrap();
        for method in ["GET", "POST", "PUT", "DELETE"] {
            assert!(methods.contains(method), "{method} not allowed: {methods}");
        }
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    }

    #[tokio::test]
    async fn other_origins_get_no_allow_origin() {
        let response = offline_router()
            .oneshot(
                Request::get("/health")
                    .header(header::ORIGIN, "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn security_headers_on_error_responses() {
        let response = offline_router()
            .oneshot(Request::get("/categories/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        for (name, value) in headers::SECURITY_HEADERS {
            assert_eq!(response.headers()[&name], value);
        }
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Category not found"})
        );
    }

    #[tokio::test]
    async fn unknown_route_has_json_error() {
        let response = offline_router()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Route not found"})
        );
    }

    #[tokio::test]
    async fn unsupported_method_has_json_error() {
        let response = offline_router()
            .oneshot(
                Request::builder()
                    .method(Method::PATCH)
                    .uri("/categories")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Method not allowed"})
        );
    }
}
