// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Application state, service-level route handlers, and router construction.
//!
//! This module is `pub` so that integration tests can build a test router directly
//! without starting the full binary.

use crate::models::backend::StoreBackend;
use crate::models::handyman::HandymanSummary;
use crate::models::search::{ErrorDetail, ErrorResponse, SearchRequest, SearchResponse, SortMode};
use crate::models::version::{HealthResponse, VersionResponse};
use crate::routes::search::{self, search_router};
use crate::services::search::SearchEngine;
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application version extracted from `Cargo.toml` at compile time.
/// The patch segment can be overridden via `HANDYMAN_SEARCH_PATCH_VERSION` (see `build.rs`).
pub const VERSION: &str = env!("HANDYMAN_SEARCH_VERSION");

pub const SERVICE_NAME: &str = "handyman-search";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Shared application state injected into every route handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
    /// Reported by `/version`
    pub store_backend: StoreBackend,
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/version",
    tag = "service",
    responses((status = 200, body = VersionResponse))
)]
pub async fn version_handler(State(state): State<AppState>) -> Json<VersionResponse> {
    Json(VersionResponse {
        service: SERVICE_NAME.to_string(),
        version: VERSION.to_string(),
        store_backend: state.store_backend.to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses((status = 200, body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

// ---------------------------------------------------------------------------
// OpenAPI
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(
        search::search_handler,
        search::search_query_handler,
        version_handler,
        health_handler
    ),
    components(schemas(
        SearchRequest,
        SearchResponse,
        SortMode,
        HandymanSummary,
        ErrorResponse,
        ErrorDetail,
        VersionResponse,
        HealthResponse
    )),
    tags(
        (name = "search", description = "Availability-aware handyman search"),
        (name = "service", description = "Service metadata")
    )
)]
pub struct SearchApiDoc;

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the Axum application router, including Swagger UI and request tracing.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/version", get(version_handler))
        .route("/health", get(health_handler))
        .merge(search_router())
        .with_state(state)
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", SearchApiDoc::openapi()),
        )
        .layer(TraceLayer::new_for_http())
}
