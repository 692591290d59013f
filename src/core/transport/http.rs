//! HTTP transport implementation.
//!
//! Serves the three HTML screens plus a small JSON API over the same
//! resolver. Every request renders its own screen state, so a slow upstream
//! answer can only ever land on the request that asked for it.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use http::StatusCode;
use serde::Deserialize;
use std::any::Any;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument, warn};

use super::{HttpConfig, TransportError, TransportResult};
use crate::core::CatalogServer;
use crate::domains::catalog::{
    CatalogError, CatalogResult, CategoryKey, CategorySelection, Entry,
};
use crate::domains::views::boundary::{fallback, panic_message};
use crate::domains::views::pages::{self, CategoryView};
use crate::domains::views::{Screen, render_page};

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    server: CatalogServer,
}

/// `?filter=` on category routes.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub filter: Option<String>,
}

impl FilterQuery {
    /// The filter value, ignoring an empty or blank selection.
    fn selected(&self) -> Option<&str> {
        self.filter
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
    }
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        self.config.address()
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: CatalogServer) -> TransportResult<()> {
        let addr = self.address();
        let app = router(server, &self.config);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        info!("  → Screens: GET /, /category/{{key}}, /pokemon/{{id}}");
        info!("  → API:     GET /api/category/{{key}}, /api/pokemon/{{id}}");
        info!("  → Health:  GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the application router.
pub fn router(server: CatalogServer, config: &HttpConfig) -> Router {
    let site_name = server.name().to_string();
    let state = AppState { server };

    let mut app = Router::new()
        .route("/", get(home_page))
        .route("/category/{category_key}", get(category_page))
        .route("/pokemon/{id}", get(entry_page))
        .route("/api/category/{category_key}", get(api_category))
        .route("/api/pokemon/{id}", get(api_entry))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(
                    move |payload: Box<dyn Any + Send>| panic_page(&site_name, payload),
                )),
        );

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(AnyOrigin)
            .allow_methods(AnyOrigin)
            .allow_headers(AnyOrigin);
        app = app.layer(cors);
    }

    app
}

/// HTTP status for a catalog failure.
pub fn status_for(error: &CatalogError) -> StatusCode {
    match error {
        CatalogError::InvalidCategory(_) | CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::InvalidFilter { .. } => StatusCode::BAD_REQUEST,
        CatalogError::Network(_) => StatusCode::BAD_GATEWAY,
    }
}

fn parse_id(raw: &str) -> CatalogResult<u32> {
    raw.trim()
        .parse()
        .map_err(|_| CatalogError::not_found(format!("pokemon {}", raw)))
}

/// Landing screen.
async fn home_page(State(state): State<AppState>) -> Html<String> {
    Html(render_page(state.server.name(), "Home", pages::home).into_string())
}

/// Category browse screen.
#[instrument(skip(state))]
async fn category_page(
    State(state): State<AppState>,
    Path(category_key): Path<String>,
    Query(query): Query<FilterQuery>,
) -> Response {
    let key = category_key.parse::<CategoryKey>().ok();
    let filter = query.selected();
    let screen: Screen<Vec<Entry>> = Screen::new();
    let mut status = StatusCode::OK;

    match (key, filter) {
        (None, _) => {
            warn!("Unknown category: {}", category_key);
            status = StatusCode::NOT_FOUND;
        }
        (Some(key), Some(filter)) => {
            screen
                .load(async {
                    let outcome = match CategorySelection::for_key(key, filter) {
                        Ok(selection) => state.server.browse(&selection).await,
                        Err(e) => Err(e),
                    };
                    if let Err(e) = &outcome {
                        warn!("Category {} / {} failed: {}", key, filter, e);
                        status = status_for(e);
                    }
                    outcome
                })
                .await;
        }
        (Some(_), None) => {}
    }

    let snapshot = screen.snapshot().await;
    let view = CategoryView {
        raw_key: &category_key,
        key,
        filter,
        state: &snapshot,
    };
    let title = key.map(|k| k.label()).unwrap_or("Unknown category");
    let page = render_page(state.server.name(), title, || pages::category(&view));

    (status, Html(page.into_string())).into_response()
}

/// Entry detail screen.
#[instrument(skip(state))]
async fn entry_page(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let screen: Screen<Entry> = Screen::new();
    let mut status = StatusCode::OK;

    screen
        .load(async {
            let outcome = match parse_id(&id) {
                Ok(id) => state.server.entry(id).await,
                Err(e) => Err(e),
            };
            if let Err(e) = &outcome {
                warn!("Entry {} failed: {}", id, e);
                status = status_for(e);
            }
            outcome
        })
        .await;

    let snapshot = screen.snapshot().await;
    let title = snapshot
        .result()
        .map(|entry| entry.name.clone())
        .unwrap_or_else(|| format!("#{}", id));
    let page = render_page(state.server.name(), &title, || pages::entry_detail(&snapshot));

    (status, Html(page.into_string())).into_response()
}

/// JSON error body for the API routes.
struct ApiError(CatalogError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": self.0.to_string(),
        }));
        (status_for(&self.0), body).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(error: CatalogError) -> Self {
        Self(error)
    }
}

/// Resolve a category as JSON.
#[instrument(skip(state))]
async fn api_category(
    State(state): State<AppState>,
    Path(category_key): Path<String>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let filter = query.filter.as_deref().unwrap_or_default();
    let entries = state.server.resolve_category(&category_key, filter).await?;
    Ok(Json(serde_json::json!({
        "category": category_key,
        "filter": filter.trim(),
        "count": entries.len(),
        "entries": entries,
    })))
}

/// Fetch one entry as JSON.
#[instrument(skip(state))]
async fn api_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Entry>, ApiError> {
    let entry = state.server.entry(parse_id(&id)?).await?;
    Ok(Json(entry))
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "name": state.server.name(),
        "version": state.server.version(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Last-resort response when a handler panics outside the render boundary.
fn panic_page(site_name: &str, payload: Box<dyn Any + Send + 'static>) -> Response {
    error!("Handler panicked: {}", panic_message(payload.as_ref()));
    let page = render_page(site_name, "Error", || Ok(fallback()));
    (StatusCode::INTERNAL_SERVER_ERROR, Html(page.into_string())).into_response()
}
