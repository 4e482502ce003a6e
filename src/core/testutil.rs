//! Shared fixtures for unit tests

use chrono::NaiveDate;

use crate::core::dataset::Dataset;
use crate::entities::{Claim, ClaimStatus, FoodListing, Provider, Receiver};

fn provider(id: i64, name: &str, provider_type: &str, city: &str) -> Provider {
    Provider {
        id,
        name: name.to_string(),
        provider_type: provider_type.to_string(),
        address: format!("{} Market Street", id),
        city: city.to_string(),
        contact: format!("555-01{:02}", id),
    }
}

fn receiver(id: i64, name: &str, city: &str) -> Receiver {
    Receiver {
        id,
        name: name.to_string(),
        receiver_type: "NGO".to_string(),
        city: city.to_string(),
        contact: format!("555-02{:02}", id),
    }
}

fn food(
    id: i64,
    name: &str,
    quantity: i64,
    provider_id: i64,
    provider_type: &str,
    location: &str,
    meal_type: &str,
) -> FoodListing {
    FoodListing {
        id,
        name: name.to_string(),
        quantity,
        expiry_date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
        provider_id,
        provider_type: provider_type.to_string(),
        location: location.to_string(),
        food_type: "Vegetarian".to_string(),
        meal_type: meal_type.to_string(),
    }
}

fn claim(id: i64, food_id: i64, receiver_id: i64, status: &str) -> Claim {
    Claim {
        id,
        food_id,
        receiver_id,
        status: ClaimStatus::from(status),
        timestamp: NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(10, id as u32, 0)
            .unwrap(),
    }
}

/// Four providers in two cities, one receiver-only city, six listings and
/// eight claims (one of which references a listing that no longer exists).
///
/// Totals: quantity 62; claims 3 completed, 3 pending, 1 cancelled, 1 "On Hold".
pub fn sample_dataset() -> Dataset {
    Dataset {
        providers: vec![
            provider(1, "Green Cafe", "Restaurant", "Springfield"),
            provider(2, "Fresh Mart", "Supermarket", "Shelbyville"),
            provider(3, "Daily Deli", "Supermarket", "Springfield"),
            provider(4, "Noodle House", "Restaurant", "Shelbyville"),
        ],
        receivers: vec![
            receiver(1, "Hope Shelter", "Springfield"),
            receiver(2, "Food Bank", "Ogdenville"),
        ],
        food: vec![
            food(1, "Rice", 10, 1, "Restaurant", "Springfield", "Lunch"),
            food(2, "Soup", 5, 2, "Supermarket", "Shelbyville", "Dinner"),
            food(3, "Bread", 20, 3, "Supermarket", "Springfield", "Breakfast"),
            food(4, "Salad", 8, 1, "Restaurant", "Springfield", "Lunch"),
            food(5, "Noodles", 15, 4, "Restaurant", "Shelbyville", "Dinner"),
            food(6, "Milk", 4, 2, "Supermarket", "Shelbyville", "Lunch"),
        ],
        claims: vec![
            claim(1, 1, 1, "Completed"),
            claim(2, 2, 2, "Pending"),
            claim(3, 4, 1, "Completed"),
            claim(4, 3, 2, "Cancelled"),
            claim(5, 5, 1, "Pending"),
            claim(6, 1, 2, "Completed"),
            claim(7, 6, 1, "On Hold"),
            claim(8, 99, 1, "Pending"),
        ],
    }
}
