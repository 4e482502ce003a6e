//! Provider entity - an organisation that donates food

use serde::{Deserialize, Serialize};

/// A row of the `Providers` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Database-assigned identity (`Provider_ID`)
    pub id: i64,

    /// Display name
    pub name: String,

    /// Category, e.g. "Restaurant" or "Grocery Store"
    #[serde(rename = "type")]
    pub provider_type: String,

    pub address: String,

    pub city: String,

    /// Free-form contact string (phone or email)
    pub contact: String,
}

/// Field values for inserting a provider; the identity is assigned by the database
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProvider {
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    pub address: String,
    pub city: String,
    pub contact: String,
}

impl NewProvider {
    pub fn new(
        name: impl Into<String>,
        provider_type: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            provider_type: provider_type.into(),
            address: address.into(),
            city: city.into(),
            contact: contact.into(),
        }
    }

    /// Attach the identity the database assigned on insert
    pub fn with_id(self, id: i64) -> Provider {
        Provider {
            id,
            name: self.name,
            provider_type: self.provider_type,
            address: self.address,
            city: self.city,
            contact: self.contact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_provider_with_id() {
        let provider = NewProvider::new("Green Cafe", "Restaurant", "1 Main St", "Springfield", "555-0100")
            .with_id(42);
        assert_eq!(provider.id, 42);
        assert_eq!(provider.name, "Green Cafe");
        assert_eq!(provider.provider_type, "Restaurant");
        assert_eq!(provider.contact, "555-0100");
    }

    #[test]
    fn test_provider_serializes_type_field() {
        let provider = NewProvider::new("A", "Supermarket", "B", "C", "D").with_id(1);
        let json = serde_json::to_value(&provider).unwrap();
        assert_eq!(json["type"], "Supermarket");
        assert!(json.get("provider_type").is_none());
    }
}
