// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Non-temporal predicates applied to handyman records.

use crate::models::handyman::HandymanRecord;
use crate::models::search::SearchFilter;

/// Check a single record against every non-temporal predicate of the filter.
pub fn matches(record: &HandymanRecord, filter: &SearchFilter) -> bool {
    let has_services = filter
        .required_services
        .iter()
        .all(|tag| record.offers(tag));

    let rating_ok = filter
        .min_rating
        .map_or(true, |min| record.rating_average >= min);

    // Anchored equality, not substring: "calgary" must not match "calgary heights"
    let city_ok = filter
        .city
        .as_deref()
        .map_or(true, |city| record.city_key() == city);

    has_services && filter.rate_range.contains(record.hourly_rate) && rating_ok && city_ok
}

/// Keep only the records that match. Input order is preserved but carries no
/// meaning; ranking happens later.
pub fn filter_candidates(records: Vec<HandymanRecord>, filter: &SearchFilter) -> Vec<HandymanRecord> {
    records
        .into_iter()
        .filter(|record| matches(record, filter))
        .collect()
}
