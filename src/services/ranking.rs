// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Ordering and pagination of the final candidate set.

use crate::models::handyman::HandymanRecord;
use crate::models::search::{SearchResultPage, SortMode};
use std::cmp::Ordering;

/// Total order for `mode`. Ties on the sort keys fall back to id ascending so
/// the same data always comes back in the same order.
pub fn compare(a: &HandymanRecord, b: &HandymanRecord, mode: SortMode) -> Ordering {
    let by_keys = match mode {
        SortMode::RatingDesc => numeric(b.rating_average, a.rating_average)
            .then_with(|| numeric(a.hourly_rate, b.hourly_rate)),
        SortMode::RateAsc => numeric(a.hourly_rate, b.hourly_rate),
        SortMode::RateDesc => numeric(b.hourly_rate, a.hourly_rate),
    };
    by_keys.then_with(|| a.id.cmp(&b.id))
}

/// Numeric comparison where `-0.0 == 0.0`. Stores reject NaN on write.
fn numeric(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// `max(1, ceil(total / page_size))`
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Sort the candidates and cut out the requested page. Pages past the end are
/// served empty with the totals intact.
pub fn rank_and_paginate(
    mut candidates: Vec<HandymanRecord>,
    mode: SortMode,
    page: usize,
    page_size: usize,
) -> SearchResultPage {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total_matches = candidates.len();

    candidates.sort_by(|a, b| compare(a, b, mode));

    let offset = (page - 1).saturating_mul(page_size);
    let results = candidates
        .into_iter()
        .skip(offset)
        .take(page_size)
        .collect();

    SearchResultPage {
        page,
        page_size,
        total_matches,
        total_pages: total_pages(total_matches, page_size),
        results,
    }
}
