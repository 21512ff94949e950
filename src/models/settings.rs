// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::search::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MIN_PAGE_SIZE};
use std::env;
use std::time::Duration;

const DEFAULT_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_AVAILABILITY_CONCURRENCY: usize = 8;

/// Tunables for the search engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    /// Deadline for all data-source reads of a single search
    pub timeout: Duration,
    /// How many candidates have their bookings checked at once
    pub availability_concurrency: usize,
    /// Page size used when the request omits `limit`
    pub default_page_size: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            availability_concurrency: DEFAULT_AVAILABILITY_CONCURRENCY,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchSettings {
    /// Load search settings from environment variables.
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let timeout_ms = lookup("SEARCH_TIMEOUT_MS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TIMEOUT_MS);
        let availability_concurrency = lookup("AVAILABILITY_CONCURRENCY")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_AVAILABILITY_CONCURRENCY);
        let default_page_size = lookup("SEARCH_DEFAULT_LIMIT")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);

        Self {
            timeout: Duration::from_millis(timeout_ms),
            availability_concurrency,
            default_page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> SearchSettings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SearchSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(settings_from(&[]), SearchSettings::default());
    }

    #[test]
    fn test_reads_values() {
        let settings = settings_from(&[
            ("SEARCH_TIMEOUT_MS", "250"),
            ("AVAILABILITY_CONCURRENCY", "3"),
            ("SEARCH_DEFAULT_LIMIT", "20"),
        ]);
        assert_eq!(settings.timeout, Duration::from_millis(250));
        assert_eq!(settings.availability_concurrency, 3);
        assert_eq!(settings.default_page_size, 20);
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        let settings = settings_from(&[
            ("SEARCH_TIMEOUT_MS", "soon"),
            ("AVAILABILITY_CONCURRENCY", "0"),
        ]);
        assert_eq!(settings.timeout, Duration::from_millis(DEFAULT_TIMEOUT_MS));
        assert_eq!(
            settings.availability_concurrency,
            DEFAULT_AVAILABILITY_CONCURRENCY
        );
    }

    #[test]
    fn test_default_limit_is_clamped() {
        assert_eq!(
            settings_from(&[("SEARCH_DEFAULT_LIMIT", "500")]).default_page_size,
            MAX_PAGE_SIZE
        );
        assert_eq!(
            settings_from(&[("SEARCH_DEFAULT_LIMIT", "0")]).default_page_size,
            MIN_PAGE_SIZE
        );
    }
}
