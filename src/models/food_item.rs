// ABOUTME: Food item model with expiry date arithmetic
// ABOUTME: Parses client-supplied expiry dates as RFC 3339 timestamps or plain calendar dates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Smart Pantry Contributors

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{AppError, ErrorCode};

/// One pantry entry owned by a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FoodItem {
    /// Row id
    pub id: i64,
    /// Display name, e.g. "Milk"
    pub title: String,
    /// Count or amount on hand
    pub quantity: i64,
    /// Best-before instant (UTC)
    pub expiry_date: DateTime<Utc>,
    /// Owner
    pub user_id: i64,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl FoodItem {
    /// Whole days from `now` until expiry, truncated toward zero.
    /// Negative once the item has been expired for a full day.
    #[must_use]
    pub fn days_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        (self.expiry_date - now).num_hours() / 24
    }

    /// True when the item expires within `days` whole days and has not
    /// been expired for a full day yet
    #[must_use]
    pub fn is_expiring_within(&self, now: DateTime<Utc>, days: i64) -> bool {
        (0..=days).contains(&self.days_until_expiry(now))
    }
}

/// Body of create and update requests
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FoodItemRequest {
    /// Display name; validated by the service layer
    #[serde(default)]
    pub title: String,
    /// Amount on hand; must not be negative
    pub quantity: i64,
    /// `2025-01-31T00:00:00Z` or `2025-01-31`
    #[serde(deserialize_with = "deserialize_expiry_date")]
    pub expiry_date: DateTime<Utc>,
}

/// Parse an expiry date given either as RFC 3339 or as `YYYY-MM-DD`
/// (interpreted as midnight UTC)
///
/// # Errors
///
/// Returns `InvalidFormat` when neither form matches
pub fn parse_expiry_date(value: &str) -> Result<DateTime<Utc>, AppError> {
    let value = value.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| {
            AppError::new(
                ErrorCode::InvalidFormat,
                format!("invalid expiry_date '{value}': expected RFC 3339 or YYYY-MM-DD"),
            )
        })
}

fn deserialize_expiry_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_expiry_date(&raw).map_err(|e| serde::de::Error::custom(e.message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn item_expiring_at(expiry_date: DateTime<Utc>) -> FoodItem {
        let now = Utc::now();
        FoodItem {
            id: 1,
            title: "Milk".to_owned(),
            quantity: 1,
            expiry_date,
            user_id: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_days_until_expiry_truncates() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(item_expiring_at(now + Duration::hours(47)).days_until_expiry(now), 1);
        assert_eq!(item_expiring_at(now + Duration::hours(5)).days_until_expiry(now), 0);
        assert_eq!(item_expiring_at(now - Duration::hours(5)).days_until_expiry(now), 0);
        assert_eq!(item_expiring_at(now - Duration::hours(30)).days_until_expiry(now), -1);
    }

    #[test]
    fn test_is_expiring_within_bounds() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        assert!(item_expiring_at(now + Duration::days(7)).is_expiring_within(now, 7));
        assert!(!item_expiring_at(now + Duration::days(8)).is_expiring_within(now, 7));
        assert!(!item_expiring_at(now - Duration::days(2)).is_expiring_within(now, 7));
    }

    #[test]
    fn test_parse_expiry_date_formats() {
        let expected = Utc.with_ymd_and_hms(2025, 1, 31, 0, 0, 0).unwrap();
        assert_eq!(parse_expiry_date("2025-01-31").unwrap(), expected);
        assert_eq!(parse_expiry_date("2025-01-31T00:00:00Z").unwrap(), expected);
        assert_eq!(
            parse_expiry_date("2025-01-31T09:00:00+09:00").unwrap(),
            expected
        );
        assert!(parse_expiry_date("31/01/2025").is_err());
    }

    #[test]
    fn test_request_deserializes_plain_date() {
        let request: FoodItemRequest = serde_json::from_str(
            r#"{"title":"Eggs","quantity":6,"expiry_date":"2025-02-10"}"#,
        )
        .unwrap();
        assert_eq!(request.title, "Eggs");
        assert_eq!(
            request.expiry_date,
            Utc.with_ymd_and_hms(2025, 2, 10, 0, 0, 0).unwrap()
        );

        let bad = serde_json::from_str::<FoodItemRequest>(
            r#"{"title":"Eggs","quantity":6,"expiry_date":"soon"}"#,
        );
        assert!(bad.is_err());
    }
}
