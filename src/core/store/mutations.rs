//! Parameterized write statements
//!
//! Each function executes exactly one statement on its own connection and
//! commits immediately (SQLite autocommit). Update and delete return the
//! number of rows affected; inserts return the assigned identity.

use rusqlite::{params, Connection};

use super::StoreError;
use crate::entities::{NewFoodListing, NewProvider};

pub(super) fn insert_provider(conn: &Connection, provider: &NewProvider) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO Providers (Name, Type, Address, City, Contact) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            provider.name,
            provider.provider_type,
            provider.address,
            provider.city,
            provider.contact
        ],
    )
    .map_err(|source| StoreError::WriteFailed {
        operation: "insert provider",
        source,
    })?;

    let id = conn.last_insert_rowid();
    log::info!("inserted provider {} ({})", id, provider.name);
    Ok(id)
}

pub(super) fn update_provider_contact(
    conn: &Connection,
    provider_id: i64,
    contact: &str,
) -> Result<usize, StoreError> {
    let affected = conn
        .execute(
            "UPDATE Providers SET Contact = ?1 WHERE Provider_ID = ?2",
            params![contact, provider_id],
        )
        .map_err(|source| StoreError::WriteFailed {
            operation: "update provider contact",
            source,
        })?;

    log::info!("updated contact of provider {} ({} row(s))", provider_id, affected);
    Ok(affected)
}

pub(super) fn delete_provider(conn: &Connection, provider_id: i64) -> Result<usize, StoreError> {
    let affected = conn
        .execute(
            "DELETE FROM Providers WHERE Provider_ID = ?1",
            params![provider_id],
        )
        .map_err(|source| StoreError::WriteFailed {
            operation: "delete provider",
            source,
        })?;

    log::info!("deleted provider {} ({} row(s))", provider_id, affected);
    Ok(affected)
}

pub(super) fn insert_food(conn: &Connection, food: &NewFoodListing) -> Result<i64, StoreError> {
    conn.execute(
        r#"INSERT INTO Food (Food_Name, Quantity, Expiry_Date, Provider_ID, Provider_Type, Location, Food_Type, Meal_Type)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"#,
        params![
            food.name,
            food.quantity,
            food.expiry_date.format("%Y-%m-%d").to_string(),
            food.provider_id,
            food.provider_type,
            food.location,
            food.food_type.to_string(),
            food.meal_type.to_string()
        ],
    )
    .map_err(|source| StoreError::WriteFailed {
        operation: "insert food listing",
        source,
    })?;

    let id = conn.last_insert_rowid();
    log::info!("inserted food listing {} ({})", id, food.name);
    Ok(id)
}

pub(super) fn delete_food(conn: &Connection, food_id: i64) -> Result<usize, StoreError> {
    let affected = conn
        .execute("DELETE FROM Food WHERE Food_ID = ?1", params![food_id])
        .map_err(|source| StoreError::WriteFailed {
            operation: "delete food listing",
            source,
        })?;

    log::info!("deleted food listing {} ({} row(s))", food_id, affected);
    Ok(affected)
}
