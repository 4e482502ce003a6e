//! Whole-table reads
//!
//! Each loader issues an unparameterized `SELECT * FROM <Table>` and maps
//! columns by name, so extra columns in an externally-managed database are
//! ignored.

use rusqlite::types::Type;
use rusqlite::{Connection, Row};

use super::{InvalidValue, StoreError};
use crate::entities::{
    parse_date, parse_datetime, Claim, ClaimStatus, FoodListing, Provider, Receiver,
};

pub(super) fn load_providers(conn: &Connection) -> Result<Vec<Provider>, StoreError> {
    select_all(conn, "Providers", |row| {
        Ok(Provider {
            id: row.get("Provider_ID")?,
            name: row.get("Name")?,
            provider_type: row.get("Type")?,
            address: text_or_empty(row, "Address")?,
            city: row.get("City")?,
            contact: text_or_empty(row, "Contact")?,
        })
    })
}

pub(super) fn load_receivers(conn: &Connection) -> Result<Vec<Receiver>, StoreError> {
    select_all(conn, "Receivers", |row| {
        Ok(Receiver {
            id: row.get("Receiver_ID")?,
            name: row.get("Name")?,
            receiver_type: row.get("Type")?,
            city: row.get("City")?,
            contact: text_or_empty(row, "Contact")?,
        })
    })
}

pub(super) fn load_food(conn: &Connection) -> Result<Vec<FoodListing>, StoreError> {
    select_all(conn, "Food", |row| {
        let expiry: String = row.get("Expiry_Date")?;
        let expiry_date = parse_date(&expiry).ok_or_else(|| conversion_error(row, "Expiry_Date", "date", expiry))?;

        Ok(FoodListing {
            id: row.get("Food_ID")?,
            name: row.get("Food_Name")?,
            quantity: row.get("Quantity")?,
            expiry_date,
            provider_id: row.get("Provider_ID")?,
            provider_type: row.get("Provider_Type")?,
            location: row.get("Location")?,
            food_type: row.get("Food_Type")?,
            meal_type: row.get("Meal_Type")?,
        })
    })
}

pub(super) fn load_claims(conn: &Connection) -> Result<Vec<Claim>, StoreError> {
    select_all(conn, "Claims", |row| {
        let raw: String = row.get("Timestamp")?;
        let timestamp = parse_datetime(&raw).ok_or_else(|| conversion_error(row, "Timestamp", "timestamp", raw))?;
        let status: String = row.get("Status")?;

        Ok(Claim {
            id: row.get("Claim_ID")?,
            food_id: row.get("Food_ID")?,
            receiver_id: row.get("Receiver_ID")?,
            status: ClaimStatus::from(status.as_str()),
            timestamp,
        })
    })
}

/// Run `SELECT * FROM <table>` and map every row
fn select_all<T, F>(conn: &Connection, table: &'static str, map: F) -> Result<Vec<T>, StoreError>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    let read_err = |source| StoreError::Read { table, source };

    let mut stmt = conn
        .prepare(&format!("SELECT * FROM {}", table))
        .map_err(read_err)?;
    let rows = stmt.query_map([], map).map_err(read_err)?;
    rows.collect::<rusqlite::Result<Vec<T>>>().map_err(read_err)
}

/// Read an optional text column, mapping NULL to ""
fn text_or_empty(row: &Row<'_>, column: &str) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(column)?.unwrap_or_default())
}

fn conversion_error(row: &Row<'_>, column: &str, kind: &'static str, value: String) -> rusqlite::Error {
    let idx = row.as_ref().column_index(column).unwrap_or(0);
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(InvalidValue { kind, value }))
}
