// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Turns a raw [`SearchRequest`] into a validated [`SearchFilter`].
//!
//! This is the only place request input is checked. Everything downstream works
//! on the typed filter and cannot fail on bad input.

use crate::errors::ValidationError;
use crate::models::booking::TimeWindow;
use crate::models::search::{
    RateRange, SearchFilter, SearchRequest, SortMode, MAX_PAGE_SIZE, MIN_PAGE_SIZE,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::collections::BTreeSet;

/// Offset-less layouts accepted for window bounds, read as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Validate and normalize a search request.
pub fn normalize(
    request: &SearchRequest,
    default_page_size: usize,
) -> Result<SearchFilter, ValidationError> {
    let rate_range = RateRange {
        min: finite("minRate", request.min_rate)?,
        max: finite("maxRate", request.max_rate)?,
    };
    let min_rating = finite("minRating", request.min_rating)?;
    let availability_window = parse_window(request.start.as_deref(), request.end.as_deref())?;

    Ok(SearchFilter {
        required_services: normalize_services(request.services.as_deref()),
        city: request
            .city
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_lowercase),
        rate_range,
        min_rating,
        availability_window,
        sort_mode: SortMode::parse_or_default(request.sort.as_deref()),
        page: clamp_page(request.page),
        page_size: clamp_page_size(request.limit, default_page_size),
    })
}

fn normalize_services(services: Option<&[String]>) -> BTreeSet<String> {
    services
        .unwrap_or_default()
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn finite(field: &'static str, value: Option<f64>) -> Result<Option<f64>, ValidationError> {
    match value {
        Some(v) if !v.is_finite() => Err(ValidationError::InvalidNumber { field }),
        other => Ok(other),
    }
}

fn clamp_page(page: Option<i64>) -> usize {
    page.map_or(1, |p| usize::try_from(p.max(1)).unwrap_or(usize::MAX))
}

fn clamp_page_size(limit: Option<i64>, default_page_size: usize) -> usize {
    let min = MIN_PAGE_SIZE as i64;
    let max = MAX_PAGE_SIZE as i64;
    match limit {
        Some(l) => l.clamp(min, max) as usize,
        None => default_page_size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE),
    }
}

/// Both bounds or neither. Blank strings count as absent.
fn parse_window(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<Option<TimeWindow>, ValidationError> {
    let start = start.map(str::trim).filter(|s| !s.is_empty());
    let end = end.map(str::trim).filter(|s| !s.is_empty());

    match (start, end) {
        (None, None) => Ok(None),
        (Some(_), None) | (None, Some(_)) => Err(ValidationError::IncompleteWindow),
        (Some(start), Some(end)) => {
            let start = parse_datetime(start)
                .ok_or(ValidationError::InvalidDateTime { field: "start" })?;
            let end =
                parse_datetime(end).ok_or(ValidationError::InvalidDateTime { field: "end" })?;
            TimeWindow::new(start, end)
                .map(Some)
                .ok_or(ValidationError::InvalidWindowOrder)
        }
    }
}

/// Parse an ISO 8601 timestamp. RFC 3339 with an offset is preferred;
/// offset-less date-times and plain dates are taken as UTC.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::search::DEFAULT_PAGE_SIZE;
    use chrono::TimeZone;

    fn normalize_default(request: &SearchRequest) -> Result<SearchFilter, ValidationError> {
        normalize(request, DEFAULT_PAGE_SIZE)
    }

    fn with_window(start: Option<&str>, end: Option<&str>) -> SearchRequest {
        SearchRequest {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_request_has_no_constraints() {
        let filter = normalize_default(&SearchRequest::default()).unwrap();
        assert_eq!(filter, SearchFilter::default());
    }

    #[test]
    fn test_services_are_lowercased_and_deduplicated() {
        let request = SearchRequest {
            services: Some(vec![
                "Plumbing".to_string(),
                "plumbing".to_string(),
                " ELECTRICAL ".to_string(),
                "".to_string(),
            ]),
            ..Default::default()
        };
        let filter = normalize_default(&request).unwrap();
        let tags: Vec<_> = filter.required_services.iter().cloned().collect();
        assert_eq!(tags, vec!["electrical", "plumbing"]);
    }

    #[test]
    fn test_empty_service_list_means_no_constraint() {
        let request = SearchRequest {
            services: Some(vec![]),
            ..Default::default()
        };
        assert!(normalize_default(&request)
            .unwrap()
            .required_services
            .is_empty());
    }

    #[test]
    fn test_city_is_trimmed_and_lowercased() {
        let request = SearchRequest {
            city: Some("  Calgary ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            normalize_default(&request).unwrap().city.as_deref(),
            Some("calgary")
        );

        let blank = SearchRequest {
            city: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(normalize_default(&blank).unwrap().city, None);
    }

    #[test]
    fn test_inverted_rate_range_is_not_an_error() {
        let request = SearchRequest {
            min_rate: Some(80.0),
            max_rate: Some(20.0),
            ..Default::default()
        };
        let filter = normalize_default(&request).unwrap();
        assert_eq!(filter.rate_range.min, Some(80.0));
        assert_eq!(filter.rate_range.max, Some(20.0));
    }

    #[test]
    fn test_non_finite_numbers_are_rejected() {
        let request = SearchRequest {
            max_rate: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(
            normalize_default(&request),
            Err(ValidationError::InvalidNumber { field: "maxRate" })
        );

        let request = SearchRequest {
            min_rating: Some(f64::INFINITY),
            ..Default::default()
        };
        assert_eq!(
            normalize_default(&request),
            Err(ValidationError::InvalidNumber { field: "minRating" })
        );
    }

    #[test]
    fn test_min_rating_out_of_range_is_kept() {
        let request = SearchRequest {
            min_rating: Some(7.5),
            ..Default::default()
        };
        assert_eq!(normalize_default(&request).unwrap().min_rating, Some(7.5));
    }

    #[test]
    fn test_only_start_is_incomplete_window() {
        assert_eq!(
            normalize_default(&with_window(Some("2025-01-10T10:00:00Z"), None)),
            Err(ValidationError::IncompleteWindow)
        );
    }

    #[test]
    fn test_only_end_is_incomplete_window() {
        assert_eq!(
            normalize_default(&with_window(None, Some("2025-01-10T12:00:00Z"))),
            Err(ValidationError::IncompleteWindow)
        );
    }

    #[test]
    fn test_incomplete_window_wins_over_bad_date() {
        assert_eq!(
            normalize_default(&with_window(Some("not a date"), None)),
            Err(ValidationError::IncompleteWindow)
        );
    }

    #[test]
    fn test_unparseable_date_is_invalid_datetime() {
        assert_eq!(
            normalize_default(&with_window(Some("tomorrow"), Some("2025-01-10T12:00:00Z"))),
            Err(ValidationError::InvalidDateTime { field: "start" })
        );
        assert_eq!(
            normalize_default(&with_window(Some("2025-01-10T10:00:00Z"), Some("2025-13-40"))),
            Err(ValidationError::InvalidDateTime { field: "end" })
        );
    }

    #[test]
    fn test_start_not_before_end_is_invalid_order() {
        assert_eq!(
            normalize_default(&with_window(
                Some("2025-01-10T12:00:00Z"),
                Some("2025-01-10T10:00:00Z")
            )),
            Err(ValidationError::InvalidWindowOrder)
        );
        assert_eq!(
            normalize_default(&with_window(
                Some("2025-01-10T10:00:00Z"),
                Some("2025-01-10T10:00:00Z")
            )),
            Err(ValidationError::InvalidWindowOrder)
        );
    }

    #[test]
    fn test_valid_window_is_parsed_to_utc() {
        let filter = normalize_default(&with_window(
            Some("2025-01-10T03:00:00-07:00"),
            Some("2025-01-10T12:00:00Z"),
        ))
        .unwrap();
        let window = filter.availability_window.unwrap();
        assert_eq!(window.start(), Utc.with_ymd_and_hms(2025, 1, 10, 10, 0, 0).unwrap());
        assert_eq!(window.end(), Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_blank_bounds_count_as_absent() {
        let filter = normalize_default(&with_window(Some(""), Some("  "))).unwrap();
        assert!(filter.availability_window.is_none());
    }

    #[test]
    fn test_parse_datetime_accepts_naive_and_date_only() {
        assert_eq!(
            parse_datetime("2025-01-10T10:30:00"),
            Some(Utc.with_ymd_and_hms(2025, 1, 10, 10, 30, 0).unwrap())
        );
        assert_eq!(
            parse_datetime("2025-01-10T10:30"),
            Some(Utc.with_ymd_and_hms(2025, 1, 10, 10, 30, 0).unwrap())
        );
        assert_eq!(
            parse_datetime("2025-01-10"),
            Some(Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_datetime("10/01/2025"), None);
    }

    #[test]
    fn test_page_size_is_clamped() {
        let big = SearchRequest {
            limit: Some(500),
            ..Default::default()
        };
        assert_eq!(normalize_default(&big).unwrap().page_size, MAX_PAGE_SIZE);

        let zero = SearchRequest {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(normalize_default(&zero).unwrap().page_size, MIN_PAGE_SIZE);

        let negative = SearchRequest {
            limit: Some(-4),
            ..Default::default()
        };
        assert_eq!(normalize_default(&negative).unwrap().page_size, MIN_PAGE_SIZE);
    }

    #[test]
    fn test_default_page_size_is_used_when_limit_missing() {
        let filter = normalize(&SearchRequest::default(), 30).unwrap();
        assert_eq!(filter.page_size, 30);
    }

    #[test]
    fn test_page_is_at_least_one() {
        for page in [Some(0), Some(-3), None] {
            let request = SearchRequest {
                page,
                ..Default::default()
            };
            assert_eq!(normalize_default(&request).unwrap().page, 1);
        }
    }

    #[test]
    fn test_unknown_sort_falls_back_to_rating() {
        let request = SearchRequest {
            sort: Some("distance".to_string()),
            ..Default::default()
        };
        assert_eq!(
            normalize_default(&request).unwrap().sort_mode,
            SortMode::RatingDesc
        );
    }
}
