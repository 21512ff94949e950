// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use crate::models::booking::{BookingRecord, BookingStatus};
use crate::models::handyman::HandymanRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row of the `handymen` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HandymanRow {
    pub id: Uuid,
    pub display_name: String,
    pub services_offered: Vec<String>,
    pub hourly_rate: f64,
    pub rating_average: f64,
    pub city: String,
    pub verified: bool,
    pub owner_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<HandymanRow> for HandymanRecord {
    fn from(row: HandymanRow) -> Self {
        Self {
            id: row.id,
            display_name: row.display_name,
            services_offered: row.services_offered,
            hourly_rate: row.hourly_rate,
            rating_average: row.rating_average,
            city: row.city,
            verified: row.verified,
            owner_user_id: row.owner_user_id,
            created_at: row.created_at,
        }
    }
}

/// Row of the `bookings` table. `status` is stored as text.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookingRow {
    pub id: Uuid,
    pub handyman_id: Uuid,
    pub client_id: Option<Uuid>,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub status: String,
}

impl TryFrom<BookingRow> for BookingRecord {
    type Error = String;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let status = BookingStatus::parse(&row.status)
            .ok_or_else(|| format!("booking {} has unknown status '{}'", row.id, row.status))?;
        Ok(Self {
            id: row.id,
            handyman_id: row.handyman_id,
            client_id: row.client_id,
            window_start: row.window_start,
            window_end: row.window_end,
            status,
        })
    }
}

/// Seed file contents used to populate a store at start-up.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub handymen: Vec<HandymanRecord>,
    #[serde(default)]
    pub bookings: Vec<BookingRecord>,
}
