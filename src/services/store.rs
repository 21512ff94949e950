// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Read-side ports the search engine depends on.
//!
//! Implementations may push filter predicates down to their backend or return a
//! superset; the engine re-applies the candidate predicates and the overlap test
//! itself, so a coarser answer is never wrong, only slower.

use crate::errors::StoreError;
use crate::models::booking::{BookingRecord, TimeWindow};
use crate::models::handyman::HandymanRecord;
use crate::models::search::SearchFilter;
use async_trait::async_trait;
use uuid::Uuid;

/// Handyman profile store.
#[async_trait]
pub trait HandymanStore: Send + Sync {
    /// Fetch handymen that may match the non-temporal part of `filter`.
    async fn find_candidates(&self, filter: &SearchFilter)
        -> Result<Vec<HandymanRecord>, StoreError>;
}

/// Booking store.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Pending or confirmed bookings of `handyman_id` overlapping `window`.
    async fn find_active_overlapping(
        &self,
        handyman_id: Uuid,
        window: &TimeWindow,
    ) -> Result<Vec<BookingRecord>, StoreError>;
}
