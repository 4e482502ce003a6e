//! Receiver entity - an organisation or person that claims food

use serde::{Deserialize, Serialize};

/// A row of the `Receivers` table (read-only in this tool)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    pub id: i64,
    pub name: String,
    /// Category, e.g. "NGO", "Shelter", "Individual"
    #[serde(rename = "type")]
    pub receiver_type: String,
    pub city: String,
    pub contact: String,
}
