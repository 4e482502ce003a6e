//! Entity types - one module per database table

pub mod claim;
pub mod food;
pub mod provider;
pub mod receiver;

pub use claim::{Claim, ClaimStatus};
pub use food::{FoodListing, FoodType, MealType, NewFoodListing};
pub use provider::{NewProvider, Provider};
pub use receiver::Receiver;

use chrono::{NaiveDate, NaiveDateTime};

/// Date layouts accepted for `Food.Expiry_Date`
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y"];

/// Timestamp layouts accepted for `Claims.Timestamp`
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Parse a stored date, tolerating the layouts spreadsheets tend to export.
///
/// A trailing time component (e.g. `2025-03-17 00:00:00`) is ignored.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let date_part = s.split_whitespace().next().unwrap_or(s);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

/// Parse a stored timestamp. A bare date is read as midnight.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| parse_date(s).and_then(|d| d.and_hms_opt(0, 0, 0)))
}
