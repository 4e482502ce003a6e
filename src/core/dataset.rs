//! The four loaded tables

use serde::Serialize;

use crate::entities::{Claim, FoodListing, Provider, Receiver};

/// One full snapshot of the database, as returned by a single load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dataset {
    pub providers: Vec<Provider>,
    pub receivers: Vec<Receiver>,
    pub food: Vec<FoodListing>,
    pub claims: Vec<Claim>,
}

impl Dataset {
    pub fn provider(&self, id: i64) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn receiver(&self, id: i64) -> Option<&Receiver> {
        self.receivers.iter().find(|r| r.id == id)
    }

    pub fn food_listing(&self, id: i64) -> Option<&FoodListing> {
        self.food.iter().find(|f| f.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
            && self.receivers.is_empty()
            && self.food.is_empty()
            && self.claims.is_empty()
    }
}

/// Distinct values in first-seen order
pub fn distinct<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(*v))
        .map(String::from)
        .collect()
}
