// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Postgres-backed handyman and booking stores.

use crate::errors::StoreError;
use crate::models::booking::{BookingRecord, BookingStatus, TimeWindow};
use crate::models::db::{BookingRow, HandymanRow};
use crate::models::handyman::HandymanRecord;
use crate::models::search::SearchFilter;
use crate::services::store::{BookingStore, HandymanStore};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, QueryBuilder};
use std::time::Duration;
use uuid::Uuid;

const HANDYMAN_COLUMNS: &str = "id, display_name, services_offered, hourly_rate, rating_average, \
                                city, verified, owner_user_id, created_at";

/// Postgres client for the `handymen` and `bookings` tables
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect a new pool to `database_url`
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(format!("migration failed: {}", e)))
    }

    /// Insert or update a handyman profile. Tags are normalized before writing.
    pub async fn insert_handyman(&self, mut handyman: HandymanRecord) -> Result<(), StoreError> {
        handyman.normalize_services();
        handyman.validate().map_err(StoreError::InvalidRecord)?;

        let query = "INSERT INTO handymen
                     (id, display_name, services_offered, hourly_rate, rating_average,
                      city, city_key, verified, owner_user_id, created_at)
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                     ON CONFLICT (id) DO UPDATE SET
                       display_name = EXCLUDED.display_name,
                       services_offered = EXCLUDED.services_offered,
                       hourly_rate = EXCLUDED.hourly_rate,
                       rating_average = EXCLUDED.rating_average,
                       city = EXCLUDED.city,
                       city_key = EXCLUDED.city_key,
                       verified = EXCLUDED.verified,
                       owner_user_id = EXCLUDED.owner_user_id";

        sqlx::query(query)
            .bind(handyman.id)
            .bind(&handyman.display_name)
            .bind(&handyman.services_offered)
            .bind(handyman.hourly_rate)
            .bind(handyman.rating_average)
            .bind(&handyman.city)
            .bind(handyman.city_key())
            .bind(handyman.verified)
            .bind(handyman.owner_user_id)
            .bind(handyman.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert or update a booking
    pub async fn insert_booking(&self, booking: &BookingRecord) -> Result<(), StoreError> {
        booking.validate().map_err(StoreError::InvalidRecord)?;

        let query = "INSERT INTO bookings
                     (id, handyman_id, client_id, window_start, window_end, status)
                     VALUES ($1, $2, $3, $4, $5, $6)
                     ON CONFLICT (id) DO UPDATE SET
                       window_start = EXCLUDED.window_start,
                       window_end = EXCLUDED.window_end,
                       status = EXCLUDED.status";

        sqlx::query(query)
            .bind(booking.id)
            .bind(booking.handyman_id)
            .bind(booking.client_id)
            .bind(booking.window_start)
            .bind(booking.window_end)
            .bind(booking.status.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Build the candidate query with every filter predicate pushed down.
fn candidate_query(filter: &SearchFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!("SELECT {HANDYMAN_COLUMNS} FROM handymen WHERE TRUE"));

    if !filter.required_services.is_empty() {
        let tags: Vec<String> = filter.required_services.iter().cloned().collect();
        query.push(" AND services_offered @> ").push_bind(tags);
    }
    if let Some(min) = filter.rate_range.min {
        query.push(" AND hourly_rate >= ").push_bind(min);
    }
    if let Some(max) = filter.rate_range.max {
        query.push(" AND hourly_rate <= ").push_bind(max);
    }
    if let Some(min_rating) = filter.min_rating {
        query.push(" AND rating_average >= ").push_bind(min_rating);
    }
    if let Some(city) = &filter.city {
        query.push(" AND city_key = ").push_bind(city.clone());
    }

    query
}

#[async_trait]
impl HandymanStore for PgStore {
    async fn find_candidates(
        &self,
        filter: &SearchFilter,
    ) -> Result<Vec<HandymanRecord>, StoreError> {
        let mut query = candidate_query(filter);
        let rows = query
            .build_query_as::<HandymanRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(HandymanRecord::from).collect())
    }
}

#[async_trait]
impl BookingStore for PgStore {
    async fn find_active_overlapping(
        &self,
        handyman_id: Uuid,
        window: &TimeWindow,
    ) -> Result<Vec<BookingRecord>, StoreError> {
        let query = "SELECT id, handyman_id, client_id, window_start, window_end, status
                     FROM bookings
                     WHERE handyman_id = $1
                       AND status = ANY($2)
                       AND window_start < $3
                       AND window_end > $4";

        let active: Vec<&str> = BookingStatus::ACTIVE.iter().map(|s| s.as_str()).collect();

        let rows = sqlx::query_as::<_, BookingRow>(query)
            .bind(handyman_id)
            .bind(active)
            .bind(window.end())
            .bind(window.start())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(|row| BookingRecord::try_from(row).map_err(StoreError::InvalidRecord))
            .collect()
    }
}
