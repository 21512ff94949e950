// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Error taxonomy for the search pipeline.

use std::time::Duration;
use thiserror::Error;

/// Client-caused problems with a search request. Always reported before any
/// data-source access happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("both start and end are required together")]
    IncompleteWindow,

    #[error("invalid date/time for '{field}'")]
    InvalidDateTime { field: &'static str },

    #[error("start must be earlier than end")]
    InvalidWindowOrder,

    #[error("'{field}' must be a finite number")]
    InvalidNumber { field: &'static str },
}

impl ValidationError {
    /// Machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::IncompleteWindow => "IncompleteWindow",
            ValidationError::InvalidDateTime { .. } => "InvalidDateTime",
            ValidationError::InvalidWindowOrder => "InvalidWindowOrder",
            ValidationError::InvalidNumber { .. } => "InvalidNumber",
        }
    }
}

/// Failures raised by a store adapter.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),
}

/// Everything a search can fail with.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The underlying store failed. The inner error is for logs only.
    #[error("data source error")]
    DataSource(#[source] StoreError),

    #[error("search exceeded its {0:?} deadline")]
    Timeout(Duration),
}

impl SearchError {
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::Validation(e) => e.code(),
            SearchError::DataSource(_) => "DataSourceError",
            SearchError::Timeout(_) => "Timeout",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_distinct() {
        let messages = [
            ValidationError::IncompleteWindow.to_string(),
            ValidationError::InvalidDateTime { field: "start" }.to_string(),
            ValidationError::InvalidWindowOrder.to_string(),
        ];
        assert!(messages[0].contains("start and end"));
        assert!(messages[1].contains("date/time"));
        assert!(messages[2].contains("earlier than end"));
    }

    #[test]
    fn test_codes() {
        assert_eq!(ValidationError::IncompleteWindow.code(), "IncompleteWindow");
        assert_eq!(
            SearchError::from(ValidationError::InvalidWindowOrder).code(),
            "InvalidWindowOrder"
        );
        assert_eq!(
            SearchError::Timeout(Duration::from_secs(1)).code(),
            "Timeout"
        );
        assert_eq!(
            SearchError::DataSource(StoreError::Unavailable("down".into())).code(),
            "DataSourceError"
        );
    }

    #[test]
    fn test_data_source_display_hides_detail() {
        let err = SearchError::DataSource(StoreError::Unavailable(
            "connection refused 10.0.0.4:5432".into(),
        ));
        assert!(!err.to_string().contains("10.0.0.4"));
    }
}
