// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::errors::{SearchError, StoreError};
use crate::models::handyman::HandymanRecord;
use crate::models::search::{SearchFilter, SearchRequest, SearchResultPage};
use crate::models::settings::SearchSettings;
use crate::services::availability::exclude_unavailable;
use crate::services::candidate_filter::filter_candidates;
use crate::services::normalizer::normalize;
use crate::services::ranking::rank_and_paginate;
use crate::services::store::{BookingStore, HandymanStore};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Availability-aware handyman search.
///
/// Stateless apart from its injected stores; every call reads current data and
/// computes its answer independently.
pub struct SearchEngine {
    handymen: Arc<dyn HandymanStore>,
    bookings: Arc<dyn BookingStore>,
    settings: SearchSettings,
}

impl SearchEngine {
    pub fn new(
        handymen: Arc<dyn HandymanStore>,
        bookings: Arc<dyn BookingStore>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            handymen,
            bookings,
            settings,
        }
    }

    /// Validate a raw request and run it. Validation failures return before any
    /// store is touched.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResultPage, SearchError> {
        let filter = normalize(request, self.settings.default_page_size)
            .inspect_err(|e| debug!(reason = e.code(), "Rejected search request: {}", e))?;
        self.run(&filter).await
    }

    /// Run an already-validated filter.
    pub async fn run(&self, filter: &SearchFilter) -> Result<SearchResultPage, SearchError> {
        let started = Instant::now();

        let available = tokio::time::timeout(self.settings.timeout, self.collect_available(filter))
            .await
            .map_err(|_| {
                warn!(
                    timeout_ms = self.settings.timeout.as_millis() as u64,
                    "Search deadline exceeded"
                );
                SearchError::Timeout(self.settings.timeout)
            })?
            .map_err(|e| {
                error!(error = %e, "Search data source failed");
                SearchError::DataSource(e)
            })?;

        let page = rank_and_paginate(available, filter.sort_mode, filter.page, filter.page_size);

        info!(
            services = filter.required_services.len(),
            city = filter.city.as_deref().unwrap_or("*"),
            windowed = filter.availability_window.is_some(),
            sort = filter.sort_mode.as_str(),
            page = page.page,
            total = page.total_matches,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Search completed"
        );

        Ok(page)
    }

    /// Every data-source read of a search happens in here, under the deadline.
    async fn collect_available(
        &self,
        filter: &SearchFilter,
    ) -> Result<Vec<HandymanRecord>, StoreError> {
        let fetched = self.handymen.find_candidates(filter).await?;
        let candidates = filter_candidates(fetched, filter);

        match &filter.availability_window {
            Some(window) => {
                let before = candidates.len();
                let free = exclude_unavailable(
                    candidates,
                    window,
                    self.bookings.as_ref(),
                    self.settings.availability_concurrency,
                )
                .await?;
                debug!(
                    candidates = before,
                    available = free.len(),
                    "Applied availability window"
                );
                Ok(free)
            }
            None => Ok(candidates),
        }
    }
}
