use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zip_radius::types::ErrorResponse;
use zip_radius::{Config, CoordinateTable, RadiusRequest, RadiusResponse, ZipError, handle_request};

/// Application state shared across all requests
#[derive(Clone)]
struct AppState {
    table: Arc<CoordinateTable>,
    metrics: Arc<Metrics>,
}

/// Server metrics
struct Metrics {
    total_requests: AtomicU64,
    requests_in_flight: AtomicU64,
    start_time: Instant,
}

/// RAII guard for tracking in-flight requests
struct RequestGuard<'a>(&'a AtomicU64);

impl<'a> RequestGuard<'a> {
    fn enter(metrics: &'a Metrics) -> Self {
        metrics.total_requests.fetch_add(1, Ordering::Relaxed);
        metrics.requests_in_flight.fetch_add(1, Ordering::Relaxed);
        Self(&metrics.requests_in_flight)
    }
}

impl<'a> Drop for RequestGuard<'a> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,zip_radius=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    // Load the table once; handlers only ever read it
    tracing::info!("Loading ZIP dataset from {}", config.dataset.display());
    let table = Arc::new(
        CoordinateTable::load(&config.dataset)
            .with_context(|| format!("Failed to load ZIP dataset {}", config.dataset.display()))?,
    );

    let app = build_app(table);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Build the Axum application with routes and middleware
fn build_app(table: Arc<CoordinateTable>) -> Router {
    let metrics = Arc::new(Metrics {
        total_requests: AtomicU64::new(0),
        requests_in_flight: AtomicU64::new(0),
        start_time: Instant::now(),
    });

    let state = AppState { table, metrics };

    Router::new()
        .route("/health", get(health_check))
        .route("/get_zips_within_radius", post(zips_within_radius))
        .route("/api/metrics", get(get_metrics))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        entries: state.table.len(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    entries: usize,
}

/// Find all ZIP codes within the requested radius of the origin
async fn zips_within_radius(
    State(state): State<AppState>,
    request: Result<Json<RadiusRequest>, JsonRejection>,
) -> Result<Json<RadiusResponse>, ApiError> {
    let _guard = RequestGuard::enter(&state.metrics);

    let Json(request) = request.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    tracing::info!(
        "Radius query: {} within {} miles",
        request.zip_code,
        request.radius
    );

    let response = handle_request(&state.table, &request).map_err(|e| {
        tracing::warn!("Radius query failed for {}: {}", request.zip_code, e);
        ApiError::from(e)
    })?;

    Ok(Json(response))
}

async fn get_metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        total_requests: state.metrics.total_requests.load(Ordering::Relaxed),
        requests_in_flight: state.metrics.requests_in_flight.load(Ordering::Relaxed),
        uptime_seconds: state.metrics.start_time.elapsed().as_secs(),
    })
}

#[derive(Serialize)]
struct MetricsResponse {
    total_requests: u64,
    requests_in_flight: u64,
    uptime_seconds: u64,
}

/// API error types
#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    InternalError(String),
}

impl From<ZipError> for ApiError {
    fn from(err: ZipError) -> Self {
        if err.is_client_error() {
            ApiError::BadRequest(err.to_string())
        } else {
            ApiError::InternalError(err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let csv = "ZIP,LAT,LNG\n10001,40.7506,-73.9971\n10002,40.7156,-73.9877\n99999,0,0\n";
        let table = CoordinateTable::from_reader(csv.as_bytes()).unwrap();
        build_app(Arc::new(table))
    }

    async fn post_json(app: Router, body: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::post("/get_zips_within_radius")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_query_success() {
        let (status, body) = post_json(test_app(), r#"{"zipCode": "10001", "radius": 5}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "zipCodes": ["10002"] }));
    }

    #[tokio::test]
    async fn test_query_default_radius() {
        let (status, body) = post_json(test_app(), r#"{"zipCode": "10002"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "zipCodes": ["10001"] }));
    }

    #[tokio::test]
    async fn test_query_not_found() {
        let (status, body) = post_json(test_app(), r#"{"zipCode": "00000", "radius": 10}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "ZIP code not found" }));
    }

    #[tokio::test]
    async fn test_query_missing_zip() {
        let (status, body) = post_json(test_app(), r#"{"radius": 10}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_health_reports_entries() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["entries"], 3);
    }

    #[test]
    fn test_request_guard_counts() {
        let metrics = Metrics {
            total_requests: AtomicU64::new(0),
            requests_in_flight: AtomicU64::new(0),
            start_time: Instant::now(),
        };
        {
            let _guard = RequestGuard::enter(&metrics);
            assert_eq!(metrics.requests_in_flight.load(Ordering::Relaxed), 1);
        }
        assert_eq!(metrics.total_requests.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.requests_in_flight.load(Ordering::Relaxed), 0);
    }
}
