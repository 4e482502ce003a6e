//! Database schema initialization

use rusqlite::{params, Connection};

use super::StoreError;

/// The four tables, in load (and foreign-key) order
pub const TABLES: [&str; 4] = ["Providers", "Receivers", "Food", "Claims"];

/// Create the four tables if they are absent
pub(super) fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
        -- Food donors
        CREATE TABLE IF NOT EXISTS Providers (
            Provider_ID INTEGER PRIMARY KEY AUTOINCREMENT,
            Name TEXT NOT NULL,
            Type TEXT NOT NULL,
            Address TEXT NOT NULL DEFAULT '',
            City TEXT NOT NULL,
            Contact TEXT NOT NULL DEFAULT ''
        );
        CREATE INDEX IF NOT EXISTS idx_providers_city ON Providers(City);

        -- Food claimants
        CREATE TABLE IF NOT EXISTS Receivers (
            Receiver_ID INTEGER PRIMARY KEY AUTOINCREMENT,
            Name TEXT NOT NULL,
            Type TEXT NOT NULL,
            City TEXT NOT NULL,
            Contact TEXT NOT NULL DEFAULT ''
        );

        -- Listings; Provider_Type is a denormalized copy of Providers.Type
        CREATE TABLE IF NOT EXISTS Food (
            Food_ID INTEGER PRIMARY KEY AUTOINCREMENT,
            Food_Name TEXT NOT NULL,
            Quantity INTEGER NOT NULL CHECK (Quantity >= 0),
            Expiry_Date TEXT NOT NULL,
            Provider_ID INTEGER NOT NULL REFERENCES Providers(Provider_ID),
            Provider_Type TEXT NOT NULL,
            Location TEXT NOT NULL,
            Food_Type TEXT NOT NULL,
            Meal_Type TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_food_provider ON Food(Provider_ID);
        CREATE INDEX IF NOT EXISTS idx_food_location ON Food(Location);

        CREATE TABLE IF NOT EXISTS Claims (
            Claim_ID INTEGER PRIMARY KEY AUTOINCREMENT,
            Food_ID INTEGER NOT NULL REFERENCES Food(Food_ID),
            Receiver_ID INTEGER NOT NULL REFERENCES Receivers(Receiver_ID),
            Status TEXT NOT NULL,
            Timestamp TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_claims_food ON Claims(Food_ID);
        "#,
    )
    .map_err(StoreError::Schema)
}

/// Drop all four tables, dependents first
pub(super) fn drop_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        r#"
        DROP TABLE IF EXISTS Claims;
        DROP TABLE IF EXISTS Food;
        DROP TABLE IF EXISTS Receivers;
        DROP TABLE IF EXISTS Providers;
        "#,
    )
    .map_err(StoreError::Schema)
}

/// Fail with `NotInitialized` naming the first missing table
pub(super) fn ensure_tables(conn: &Connection) -> Result<(), StoreError> {
    for table in TABLES {
        let exists: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
                params![table],
                |row| row.get(0),
            )
            .map_err(|source| StoreError::Read { table, source })?;

        if exists == 0 {
            return Err(StoreError::NotInitialized { table });
        }
    }
    Ok(())
}
