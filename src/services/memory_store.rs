// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! In-process store backing both collaborators. Used for local runs, demos and
//! tests.

use crate::errors::StoreError;
use crate::models::booking::{BookingRecord, TimeWindow};
use crate::models::db::SeedData;
use crate::models::handyman::HandymanRecord;
use crate::models::search::SearchFilter;
use crate::services::candidate_filter;
use crate::services::store::{BookingStore, HandymanStore};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::Path;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryStore {
    handymen: RwLock<Vec<HandymanRecord>>,
    bookings: RwLock<Vec<BookingRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from seed data, enforcing the same invariants as the
    /// individual inserts.
    pub async fn from_seed(seed: SeedData) -> Result<Self, StoreError> {
        let store = Self::new();
        for handyman in seed.handymen {
            store.insert_handyman(handyman).await?;
        }
        for booking in seed.bookings {
            store.insert_booking(booking).await?;
        }
        Ok(store)
    }

    /// Insert or replace a handyman. Service tags are normalized to lower case
    /// on the way in.
    pub async fn insert_handyman(&self, mut handyman: HandymanRecord) -> Result<(), StoreError> {
        handyman.normalize_services();
        handyman.validate().map_err(StoreError::InvalidRecord)?;

        let mut handymen = self.handymen.write().await;
        match handymen.iter_mut().find(|h| h.id == handyman.id) {
            Some(existing) => *existing = handyman,
            None => handymen.push(handyman),
        }
        Ok(())
    }

    /// Insert or replace a booking.
    pub async fn insert_booking(&self, booking: BookingRecord) -> Result<(), StoreError> {
        booking.validate().map_err(StoreError::InvalidRecord)?;

        let mut bookings = self.bookings.write().await;
        match bookings.iter_mut().find(|b| b.id == booking.id) {
            Some(existing) => *existing = booking,
            None => bookings.push(booking),
        }
        Ok(())
    }

    pub async fn handyman_count(&self) -> usize {
        self.handymen.read().await.len()
    }

    pub async fn booking_count(&self) -> usize {
        self.bookings.read().await.len()
    }
}

/// Read a JSON seed file from disk.
pub async fn load_seed_file(path: &Path) -> Result<SeedData> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))
}

#[async_trait]
impl HandymanStore for InMemoryStore {
    async fn find_candidates(
        &self,
        filter: &SearchFilter,
    ) -> Result<Vec<HandymanRecord>, StoreError> {
        let handymen = self.handymen.read().await;
        Ok(handymen
            .iter()
            .filter(|h| candidate_filter::matches(h, filter))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn find_active_overlapping(
        &self,
        handyman_id: Uuid,
        window: &TimeWindow,
    ) -> Result<Vec<BookingRecord>, StoreError> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .iter()
            .filter(|b| b.handyman_id == handyman_id && b.conflicts_with(window))
            .cloned()
            .collect())
    }
}
