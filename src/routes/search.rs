// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Handyman search route handlers.

use crate::app::AppState;
use crate::errors::SearchError;
use crate::models::search::{ErrorResponse, SearchQueryParams, SearchRequest, SearchResponse};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

/// Create the router serving `/search`.
pub fn search_router() -> Router<AppState> {
    Router::new().route("/search", post(search_handler).get(search_query_handler))
}

// ============================================================================
// Errors
// ============================================================================

/// Error responses of the search routes.
#[derive(Debug)]
pub enum ApiError {
    /// Body or query string could not be decoded at all
    MalformedRequest(String),
    Search(SearchError),
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        ApiError::Search(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MalformedRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("MalformedRequest", message),
            ),
            ApiError::Search(SearchError::Validation(e)) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(e.code(), e.to_string()),
            ),
            // Store details were logged by the engine and stay server-side
            ApiError::Search(err @ SearchError::DataSource(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(err.code(), "Internal server error"),
            ),
            ApiError::Search(err @ SearchError::Timeout(_)) => (
                StatusCode::GATEWAY_TIMEOUT,
                ErrorResponse::new(err.code(), "Search timed out"),
            ),
        };
        (status, Json(body)).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /search - Search handymen with a JSON body.
#[utoipa::path(
    post,
    path = "/search",
    tag = "search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "One page of matching handymen", body = SearchResponse),
        (status = 400, description = "Invalid search parameters", body = ErrorResponse),
        (status = 500, description = "Data source failure", body = ErrorResponse),
        (status = 504, description = "Search deadline exceeded", body = ErrorResponse)
    )
)]
pub async fn search_handler(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::MalformedRequest(e.body_text()))?;
    let page = state.engine.search(&request).await?;
    Ok(Json(page.into()))
}

/// GET /search - Search handymen with query-string parameters.
#[utoipa::path(
    get,
    path = "/search",
    tag = "search",
    params(SearchQueryParams),
    responses(
        (status = 200, description = "One page of matching handymen", body = SearchResponse),
        (status = 400, description = "Invalid search parameters", body = ErrorResponse),
        (status = 500, description = "Data source failure", body = ErrorResponse),
        (status = 504, description = "Search deadline exceeded", body = ErrorResponse)
    )
)]
pub async fn search_query_handler(
    State(state): State<AppState>,
    params: Result<Query<SearchQueryParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::MalformedRequest(e.body_text()))?;
    let page = state.engine.search(&SearchRequest::from(params)).await?;
    Ok(Json(page.into()))
}
