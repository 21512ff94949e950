// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Drops candidates whose calendar is taken during the requested window.

use crate::errors::StoreError;
use crate::models::booking::TimeWindow;
use crate::models::handyman::HandymanRecord;
use crate::services::store::BookingStore;
use futures::{stream, StreamExt, TryStreamExt};

/// Remove every candidate holding a pending or confirmed booking that overlaps
/// `window`. Bookings are looked up per candidate, at most `concurrency` at a
/// time. Surviving candidates keep their input order.
pub async fn exclude_unavailable(
    candidates: Vec<HandymanRecord>,
    window: &TimeWindow,
    bookings: &dyn BookingStore,
    concurrency: usize,
) -> Result<Vec<HandymanRecord>, StoreError> {
    if candidates.is_empty() {
        return Ok(candidates);
    }

    let checked: Vec<Option<HandymanRecord>> = stream::iter(candidates)
        .map(move |handyman| keep_if_free(handyman, window, bookings))
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;

    Ok(checked.into_iter().flatten().collect())
}

async fn keep_if_free(
    handyman: HandymanRecord,
    window: &TimeWindow,
    bookings: &dyn BookingStore,
) -> Result<Option<HandymanRecord>, StoreError> {
    let existing = bookings
        .find_active_overlapping(handyman.id, window)
        .await?;

    // Status and overlap are re-checked here in case the store over-fetches
    let busy = existing
        .iter()
        .any(|b| b.handyman_id == handyman.id && b.conflicts_with(window));

    Ok((!busy).then_some(handyman))
}
