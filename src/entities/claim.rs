//! Claim entity - a receiver's request against a food listing

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Claim status
///
/// The database stores free text; the three values the dashboard counts are
/// recognised case-insensitively and anything else is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClaimStatus {
    Completed,
    Pending,
    Cancelled,
    Other(String),
}

impl ClaimStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ClaimStatus::Completed => "Completed",
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Cancelled => "Cancelled",
            ClaimStatus::Other(s) => s,
        }
    }
}

impl std::fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ClaimStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.to_lowercase().as_str() {
            "completed" => ClaimStatus::Completed,
            "pending" => ClaimStatus::Pending,
            "cancelled" | "canceled" => ClaimStatus::Cancelled,
            _ => ClaimStatus::Other(trimmed.to_string()),
        })
    }
}

impl From<&str> for ClaimStatus {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl Serialize for ClaimStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ClaimStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ClaimStatus::from(s.as_str()))
    }
}

/// A row of the `Claims` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// `Claim_ID`
    pub id: i64,

    /// Claimed food listing (`Food_ID`)
    pub food_id: i64,

    /// Claiming receiver (`Receiver_ID`)
    pub receiver_id: i64,

    pub status: ClaimStatus,

    pub timestamp: NaiveDateTime,
}
