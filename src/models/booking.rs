// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    /// Statuses that hold a handyman's time.
    pub const ACTIVE: [BookingStatus; 2] = [BookingStatus::Pending, BookingStatus::Confirmed];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    /// Whether a booking in this status blocks the handyman's calendar.
    /// Completed and cancelled bookings never do.
    pub fn occupies_time(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

/// Half-open time interval `[start, end)`. Only constructible through
/// [`TimeWindow::new`], so `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Build a window, returning `None` unless `start < end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Half-open overlap test. Touching endpoints do not overlap, so
    /// back-to-back bookings are allowed.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// A reservation of a handyman's time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: Uuid,
    pub handyman_id: Uuid,
    /// Client who requested the slot
    #[serde(default)]
    pub client_id: Option<Uuid>,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub status: BookingStatus,
}

impl BookingRecord {
    /// `None` for a record whose stored window is inverted or empty.
    pub fn window(&self) -> Option<TimeWindow> {
        TimeWindow::new(self.window_start, self.window_end)
    }

    /// Check the `window_start < window_end` invariant.
    pub fn validate(&self) -> Result<(), String> {
        if self.window_start >= self.window_end {
            return Err(format!(
                "booking {} window start {} is not before end {}",
                self.id, self.window_start, self.window_end
            ));
        }
        Ok(())
    }

    /// True when this booking is active and overlaps `window`.
    pub fn conflicts_with(&self, window: &TimeWindow) -> bool {
        self.status.occupies_time() && self.window().is_some_and(|w| w.overlaps(window))
    }
}
