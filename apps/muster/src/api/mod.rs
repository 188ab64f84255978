//! # Muster HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /status` - Stored assignment counts
//! - `GET /roster` - Eligible roster in assignment order
//! - `POST /assign` - Run the engine (`{"simulate": true}` for a dry run)
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `MUSTER_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `MUSTER_API_KEY`: If set, requires Bearer token authentication

mod auth;
mod handlers;
mod types;

pub use auth::get_api_key_from_env;
pub use handlers::{assign_handler, health_handler, roster_handler, status_handler};
pub use types::{
    AssignRequest, AssignResponse, HealthResponse, RosterEntry, RosterResponse, StatusResponse,
};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use muster_core::{ErrorPolicy, MusterError, RosterStore};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// A roster store shared across request handlers.
pub type SharedStore = Box<dyn RosterStore + Send + Sync>;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the roster store.
#[derive(Clone)]
pub struct AppState {
    /// The roster store. Assignment runs take the write lock.
    pub store: Arc<RwLock<SharedStore>>,
    /// Failure policy for runs started over HTTP.
    pub policy: ErrorPolicy,
}

impl AppState {
    /// Create new app state with the default failure policy.
    #[must_use]
    pub fn new(store: impl RosterStore + Send + Sync + 'static) -> Self {
        Self::with_policy(store, ErrorPolicy::default())
    }

    /// Create new app state with an explicit failure policy.
    #[must_use]
    pub fn with_policy(
        store: impl RosterStore + Send + Sync + 'static,
        policy: ErrorPolicy,
    ) -> Self {
        let store: SharedStore = Box::new(store);
        Self {
            store: Arc::new(RwLock::new(store)),
            policy,
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from environment configuration.
///
/// Reads `MUSTER_CORS_ORIGINS` environment variable:
/// - If "*": allows all origins
/// - If not set: defaults to localhost only
/// - Otherwise: parses comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("MUSTER_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!(
                "CORS: Allowing ALL origins (MUSTER_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in MUSTER_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            }
        }
        None => {
            tracing::info!("CORS: No MUSTER_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .filter_map(|origin| origin.parse::<HeaderValue>().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Authentication - validates API key (if configured)
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer();

    let has_auth = get_api_key_from_env().is_some();
    if has_auth {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!(
            "API key authentication DISABLED - all endpoints are publicly accessible! \
             Set MUSTER_API_KEY environment variable to enable authentication."
        );
    }

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/status", get(handlers::status_handler))
        .route("/roster", get(handlers::roster_handler))
        .route("/assign", post(handlers::assign_handler));

    if has_auth {
        router = router.layer(axum_middleware::from_fn(auth::api_key_auth_middleware));
    }

    router
        .layer(axum::extract::DefaultBodyLimit::max(64 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(
    addr: &str,
    store: impl RosterStore + Send + Sync + 'static,
    policy: ErrorPolicy,
) -> Result<(), MusterError> {
    let state = AppState::with_policy(store, policy);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| MusterError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("Muster HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| MusterError::IoError(format!("Server error: {}", e)))
}
