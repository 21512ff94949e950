// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::booking::TimeWindow;
use crate::models::handyman::{HandymanRecord, HandymanSummary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::{IntoParams, ToSchema};

/// Page size used when the request does not carry a `limit`.
pub const DEFAULT_PAGE_SIZE: usize = 12;
pub const MIN_PAGE_SIZE: usize = 1;
pub const MAX_PAGE_SIZE: usize = 100;

// ============================================================================
// API Request Types
// ============================================================================

/// Raw search request as posted by the client. Nothing here is trusted until it
/// has been through the query normalizer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Required service tags, matched case-insensitively
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
    /// Exact city name, matched case-insensitively
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    /// Availability window start (ISO 8601)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Availability window end (ISO 8601)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// `rating` (default), `rate_asc` or `rate_desc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// 1-based page number (default: 1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Page size (default: 12, clamped to [1, 100])
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// Query-string flavour of [`SearchRequest`] for `GET /search`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct SearchQueryParams {
    /// Comma-separated service tags
    pub services: Option<String>,
    pub city: Option<String>,
    pub min_rate: Option<f64>,
    pub max_rate: Option<f64>,
    pub min_rating: Option<f64>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl From<SearchQueryParams> for SearchRequest {
    fn from(params: SearchQueryParams) -> Self {
        Self {
            services: params
                .services
                .map(|list| list.split(',').map(|s| s.to_string()).collect()),
            city: params.city,
            min_rate: params.min_rate,
            max_rate: params.max_rate,
            min_rating: params.min_rating,
            start: params.start,
            end: params.end,
            sort: params.sort,
            page: params.page,
            limit: params.limit,
        }
    }
}

// ============================================================================
// Normalized filter
// ============================================================================

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Rating descending, cheaper first among equal ratings
    #[default]
    RatingDesc,
    RateAsc,
    RateDesc,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::RatingDesc => "rating_desc",
            SortMode::RateAsc => "rate_asc",
            SortMode::RateDesc => "rate_desc",
        }
    }

    /// Unknown or missing values fall back to [`SortMode::RatingDesc`].
    pub fn parse_or_default(s: Option<&str>) -> Self {
        match s.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("rate_asc") => SortMode::RateAsc,
            Some("rate_desc") => SortMode::RateDesc,
            _ => SortMode::RatingDesc,
        }
    }
}

/// Optional bounds on the hourly rate. Inverted bounds are kept as given and
/// simply match nothing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RateRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RateRange {
    pub fn contains(&self, rate: f64) -> bool {
        let above_min = self.min.map_or(true, |min| rate >= min);
        let below_max = self.max.map_or(true, |max| rate <= max);
        above_min && below_max
    }
}

/// Canonical, validated search filter. Only built by the query normalizer and
/// handed around by shared reference afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilter {
    /// Lower-cased tags; empty means no service constraint
    pub required_services: BTreeSet<String>,
    /// Lower-cased city for exact matching
    pub city: Option<String>,
    pub rate_range: RateRange,
    pub min_rating: Option<f64>,
    pub availability_window: Option<TimeWindow>,
    pub sort_mode: SortMode,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            required_services: BTreeSet::new(),
            city: None,
            rate_range: RateRange::default(),
            min_rating: None,
            availability_window: None,
            sort_mode: SortMode::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// One page of ranked search results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResultPage {
    pub page: usize,
    pub page_size: usize,
    /// Matches after availability pruning, before pagination
    pub total_matches: usize,
    pub total_pages: usize,
    pub results: Vec<HandymanRecord>,
}

/// Search response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub page: usize,
    pub limit: usize,
    /// Total number of matching handymen
    pub total: usize,
    pub total_pages: usize,
    pub results: Vec<HandymanSummary>,
}

impl From<SearchResultPage> for SearchResponse {
    fn from(page: SearchResultPage) -> Self {
        Self {
            page: page.page,
            limit: page.page_size,
            total: page.total_matches,
            total_pages: page.total_pages,
            results: page.results.into_iter().map(HandymanSummary::from).collect(),
        }
    }
}

/// Error envelope returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable reason, e.g. `IncompleteWindow`
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }
}
