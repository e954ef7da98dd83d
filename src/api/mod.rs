//! Guestbook HTTP Server
//!
//! Hosts the guestbook page and accepts the form's native submission, built
//! with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Guestbook page with server-side entries and the sign form
//! - `POST /sign` - Form submission (`author`, `content`), redirects to `/`
//! - `GET /static/*` - Static assets, including the compiled widget
//!
//! ## Entries
//! - `GET /api/v1/entries` - List entries
//! - `POST /api/v1/entries` - Add an entry
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use guestbook::api::{serve, AppState};
//! use guestbook::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let state = AppState::from_config(&config)?;
//!     serve(state).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{AppState, SharedGuestbook};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new().route(
        "/entries",
        get(routes::entries::list_entries).post(routes::entries::create_entry),
    );

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let static_files = ServeDir::new(&state.config.static_dir);

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::index))
        .route("/sign", post(routes::sign::sign))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .nest_service("/static", static_files)
        .fallback(routes::page::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}

/// Start the server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Guestbook listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Guestbook shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::config::ServerConfig;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let state = AppState::in_memory(
            ServerConfig::default(),
            Box::new(FixedClock::new("10/18/2026, 3:04:05 PM")),
        );
        build_router(state)
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn sign_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/sign")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_index_empty() {
        let app = create_test_app();

        let response = app.oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("No entries yet. Be the first!"));
        assert!(body.contains(r#"action="/sign""#));
    }

    #[tokio::test]
    async fn test_unknown_path_not_found() {
        let app = create_test_app();

        let response = app.oneshot(get("/nope")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, "404 page not found");
    }

    #[tokio::test]
    async fn test_sign_redirects_and_renders() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(sign_request("author=Ann&content=Hi+%3Cthere%3E"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let body = body_string(app.oneshot(get("/")).await.unwrap()).await;
        assert!(body.contains("<b>Ann</b> wrote:"));
        assert!(body.contains("<pre>Hi &lt;there&gt;</pre>"));
        assert!(body.contains("<small>10/18/2026, 3:04:05 PM</small>"));
        assert!(!body.contains("No entries yet"));
    }

    #[tokio::test]
    async fn test_sign_anonymous() {
        let app = create_test_app();

        app.clone()
            .oneshot(sign_request("author=&content=Hello"))
            .await
            .unwrap();

        let body = body_string(app.oneshot(get("/")).await.unwrap()).await;
        assert!(body.contains("<b>Anonymous</b> wrote:"));
    }

    #[tokio::test]
    async fn test_sign_blank_content_rejected() {
        let app = create_test_app();

        let response = app
            .clone()
            .oneshot(sign_request("author=Ann&content=+++"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_string(response).await, "Content cannot be empty");

        let body = body_string(app.oneshot(get("/api/v1/entries")).await.unwrap()).await;
        let list: dto::EntriesResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(list.count, 0);
    }

    #[tokio::test]
    async fn test_sign_requires_post() {
        let app = create_test_app();

        let response = app.oneshot(get("/sign")).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_entries_api_newest_first() {
        let app = create_test_app();

        for body in [r#"{"author": "Ann", "content": "Hi"}"#, r#"{"content": "Yo"}"#] {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/api/v1/entries")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body))
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let body = body_string(app.oneshot(get("/api/v1/entries")).await.unwrap()).await;
        let list: dto::EntriesResponse = serde_json::from_str(&body).unwrap();

        assert_eq!(list.count, 2);
        assert_eq!(list.entries[0].author, "Anonymous");
        assert_eq!(list.entries[0].content, "Yo");
        assert_eq!(list.entries[1].author, "Ann");
    }

    #[tokio::test]
    async fn test_entries_api_blank_rejected() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/entries")
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"author": "Ann", "content": "  "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_string(response).await;
        assert!(body.contains("VALIDATION_ERROR"));
        assert!(body.contains("Message cannot be empty."));
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = create_test_app();

        for uri in ["/health/live", "/health/ready", "/health"] {
            let response = app.clone().oneshot(get(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }

        let body = body_string(app.oneshot(get("/health")).await.unwrap()).await;
        let health: dto::HealthResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.entries, Some(0));
    }

    #[tokio::test]
    async fn test_static_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("guestbook_ui.js"), "export default 1;").unwrap();

        let config = ServerConfig {
            static_dir: dir.path().to_string_lossy().to_string(),
            ..Default::default()
        };
        let app = build_router(AppState::in_memory(
            config,
            Box::new(FixedClock::new("now")),
        ));

        let response = app.oneshot(get("/static/guestbook_ui.js")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "export default 1;");
    }
}
