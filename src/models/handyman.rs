// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Highest value a rating average can take.
pub const MAX_RATING: f64 = 5.0;

/// A provider's searchable profile as held by the handyman profile store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandymanRecord {
    pub id: Uuid,
    #[serde(default)]
    pub display_name: String,
    /// Lower-case service tags. Stores normalize these on write.
    #[serde(default)]
    pub services_offered: Vec<String>,
    pub hourly_rate: f64,
    #[serde(default)]
    pub rating_average: f64,
    pub city: String,
    #[serde(default)]
    pub verified: bool,
    /// Account that owns this profile (identity provider user id)
    #[serde(default)]
    pub owner_user_id: Option<Uuid>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl HandymanRecord {
    /// Lower-case, trim and deduplicate the service tags in place.
    pub fn normalize_services(&mut self) {
        let mut tags: Vec<String> = self
            .services_offered
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        tags.sort();
        tags.dedup();
        self.services_offered = tags;
    }

    /// Check the record invariants enforced at write time.
    pub fn validate(&self) -> Result<(), String> {
        if !self.hourly_rate.is_finite() || self.hourly_rate < 0.0 {
            return Err(format!(
                "hourly rate must be a non-negative number, got {}",
                self.hourly_rate
            ));
        }
        if !(0.0..=MAX_RATING).contains(&self.rating_average) {
            return Err(format!(
                "rating average must be within [0, {}], got {}",
                MAX_RATING, self.rating_average
            ));
        }
        if self
            .services_offered
            .iter()
            .any(|s| s.chars().any(char::is_uppercase))
        {
            return Err("service tags must be lower-case".to_string());
        }
        Ok(())
    }

    /// Trimmed, lower-cased city used for equality matching. Stores that push
    /// the city predicate down persist this value rather than re-deriving it.
    pub fn city_key(&self) -> String {
        self.city.trim().to_lowercase()
    }

    pub fn offers(&self, service: &str) -> bool {
        self.services_offered.iter().any(|s| s == service)
    }
}

/// Public view of a handyman returned by search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HandymanSummary {
    pub id: Uuid,
    pub display_name: String,
    pub services_offered: Vec<String>,
    pub hourly_rate: f64,
    pub rating_average: f64,
    pub city: String,
    pub verified: bool,
}

impl From<HandymanRecord> for HandymanSummary {
    fn from(record: HandymanRecord) -> Self {
        Self {
            id: record.id,
            display_name: record.display_name,
            services_offered: record.services_offered,
            hourly_rate: record.hourly_rate,
            rating_average: record.rating_average,
            city: record.city,
            verified: record.verified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(services: &[&str], rate: f64, rating: f64) -> HandymanRecord {
        HandymanRecord {
            id: Uuid::from_u128(1),
            display_name: "Sam".to_string(),
            services_offered: services.iter().map(|s| s.to_string()).collect(),
            hourly_rate: rate,
            rating_average: rating,
            city: "Calgary".to_string(),
            verified: false,
            owner_user_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_normalize_services_lowercases_and_dedups() {
        let mut r = record(&["Plumbing", " plumbing ", "ELECTRICAL", ""], 40.0, 4.0);
        r.normalize_services();
        assert_eq!(r.services_offered, vec!["electrical", "plumbing"]);
    }

    #[test]
    fn test_city_key_trims_and_lowercases() {
        let mut r = record(&[], 40.0, 4.0);
        r.city = "  Calgary ".to_string();
        assert_eq!(r.city_key(), "calgary");

        r.city = "ΣΠΑΡΤΗΣ".to_string();
        assert_eq!(r.city_key(), "σπαρτης");
    }

    #[test]
    fn test_validate_accepts_well_formed_record() {
        assert!(record(&["plumbing"], 0.0, 5.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_rate() {
        assert!(record(&["plumbing"], -1.0, 4.0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_rating_out_of_range() {
        assert!(record(&["plumbing"], 10.0, 5.1).validate().is_err());
        assert!(record(&["plumbing"], 10.0, -0.1).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_uppercase_tags() {
        assert!(record(&["Plumbing"], 10.0, 4.0).validate().is_err());
    }

    #[test]
    fn test_summary_drops_internal_fields() {
        let mut r = record(&["plumbing"], 55.0, 4.5);
        r.owner_user_id = Some(Uuid::from_u128(99));
        let json = serde_json::to_value(HandymanSummary::from(r)).unwrap();
        assert!(json.get("ownerUserId").is_none());
        assert!(json.get("createdAt").is_none());
        assert_eq!(json["hourlyRate"], 55.0);
        assert_eq!(json["servicesOffered"][0], "plumbing");
    }
}
