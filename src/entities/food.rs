//! Food listing entity - a quantity of food offered by a provider

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Dietary category offered when creating a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum FoodType {
    Vegetarian,
    #[serde(rename = "Non-Vegetarian")]
    #[value(name = "non-vegetarian")]
    NonVegetarian,
    Vegan,
}

impl std::fmt::Display for FoodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FoodType::Vegetarian => write!(f, "Vegetarian"),
            FoodType::NonVegetarian => write!(f, "Non-Vegetarian"),
            FoodType::Vegan => write!(f, "Vegan"),
        }
    }
}

impl FoodType {
    pub const ALL: [FoodType; 3] = [FoodType::Vegetarian, FoodType::NonVegetarian, FoodType::Vegan];
}

/// Meal category offered when creating a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MealType::Breakfast => write!(f, "Breakfast"),
            MealType::Lunch => write!(f, "Lunch"),
            MealType::Dinner => write!(f, "Dinner"),
            MealType::Snacks => write!(f, "Snacks"),
        }
    }
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snacks,
    ];
}

/// A row of the `Food` table
///
/// Categories are kept as the strings stored in the database; rows written by
/// other tools are not required to use the [`FoodType`]/[`MealType`] spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodListing {
    /// `Food_ID`
    pub id: i64,

    /// `Food_Name`
    pub name: String,

    pub quantity: i64,

    pub expiry_date: NaiveDate,

    /// Owning provider (`Provider_ID`)
    pub provider_id: i64,

    /// Copy of the owning provider's type, stored on the row
    pub provider_type: String,

    /// City where the food can be collected
    pub location: String,

    pub food_type: String,

    pub meal_type: String,
}

/// Field values for inserting a food listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFoodListing {
    pub name: String,
    pub quantity: i64,
    pub expiry_date: NaiveDate,
    pub provider_id: i64,
    pub provider_type: String,
    pub location: String,
    pub food_type: FoodType,
    pub meal_type: MealType,
}

impl NewFoodListing {
    /// Attach the identity the database assigned on insert
    pub fn with_id(self, id: i64) -> FoodListing {
        FoodListing {
            id,
            name: self.name,
            quantity: self.quantity,
            expiry_date: self.expiry_date,
            provider_id: self.provider_id,
            provider_type: self.provider_type,
            location: self.location,
            food_type: self.food_type.to_string(),
            meal_type: self.meal_type.to_string(),
        }
    }
}
