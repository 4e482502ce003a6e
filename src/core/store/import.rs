//! Bulk row insertion with caller-supplied identities

use rusqlite::{params, Connection};

use super::{schema, SqliteStore, StoreError};
use crate::entities::{Claim, FoodListing, Provider, Receiver};

/// One parsed CSV row destined for a table
#[derive(Debug, Clone)]
pub enum ImportRecord {
    Provider(Provider),
    Receiver(Receiver),
    Food(FoodListing),
    Claim(Claim),
}

impl ImportRecord {
    pub fn table(&self) -> &'static str {
        match self {
            ImportRecord::Provider(_) => "Providers",
            ImportRecord::Receiver(_) => "Receivers",
            ImportRecord::Food(_) => "Food",
            ImportRecord::Claim(_) => "Claims",
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            ImportRecord::Provider(p) => p.id,
            ImportRecord::Receiver(r) => r.id,
            ImportRecord::Food(f) => f.id,
            ImportRecord::Claim(c) => c.id,
        }
    }
}

/// A connection held open for the duration of one import
///
/// Rows are inserted one statement at a time so a bad row can be skipped
/// without losing the rows before it.
pub struct Importer {
    conn: Connection,
}

impl SqliteStore {
    pub fn importer(&self) -> Result<Importer, StoreError> {
        let conn = self.connect()?;
        schema::ensure_tables(&conn)?;
        Ok(Importer { conn })
    }
}

impl Importer {
    pub fn insert(&self, record: &ImportRecord) -> Result<(), StoreError> {
        let result = match record {
            ImportRecord::Provider(p) => self.conn.execute(
                "INSERT INTO Providers (Provider_ID, Name, Type, Address, City, Contact) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![p.id, p.name, p.provider_type, p.address, p.city, p.contact],
            ),
            ImportRecord::Receiver(r) => self.conn.execute(
                "INSERT INTO Receivers (Receiver_ID, Name, Type, City, Contact) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![r.id, r.name, r.receiver_type, r.city, r.contact],
            ),
            ImportRecord::Food(f) => self.conn.execute(
                r#"INSERT INTO Food (Food_ID, Food_Name, Quantity, Expiry_Date, Provider_ID, Provider_Type, Location, Food_Type, Meal_Type)
                   VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"#,
                params![
                    f.id,
                    f.name,
                    f.quantity,
                    f.expiry_date.format("%Y-%m-%d").to_string(),
                    f.provider_id,
                    f.provider_type,
                    f.location,
                    f.food_type,
                    f.meal_type
                ],
            ),
            ImportRecord::Claim(c) => self.conn.execute(
                "INSERT INTO Claims (Claim_ID, Food_ID, Receiver_ID, Status, Timestamp) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    c.id,
                    c.food_id,
                    c.receiver_id,
                    c.status.as_str(),
                    c.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
                ],
            ),
        };

        result.map(|_| ()).map_err(|source| StoreError::WriteFailed {
            operation: "import row",
            source,
        })
    }
}
