//! City / provider-type / meal-type narrowing of the loaded tables

use serde::Serialize;

use crate::core::dataset::{distinct, Dataset};
use crate::entities::{Claim, FoodListing, Provider};

/// The values each filter can take, drawn from the loaded data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Provider cities followed by receiver cities, deduplicated
    pub cities: Vec<String>,
    pub provider_types: Vec<String>,
    pub meal_types: Vec<String>,
}

impl FilterOptions {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let cities = distinct(
            dataset
                .providers
                .iter()
                .map(|p| p.city.as_str())
                .chain(dataset.receivers.iter().map(|r| r.city.as_str())),
        );
        let provider_types = distinct(dataset.providers.iter().map(|p| p.provider_type.as_str()));
        let meal_types = distinct(dataset.food.iter().map(|f| f.meal_type.as_str()));

        Self {
            cities,
            provider_types,
            meal_types,
        }
    }

    /// Resolve requested values, defaulting each unset one to its first option
    ///
    /// Each filter resolves on its own; one with no options that was not set
    /// stays `None`.
    pub fn select(
        &self,
        city: Option<&str>,
        provider_type: Option<&str>,
        meal_type: Option<&str>,
    ) -> Selection {
        let pick = |requested: Option<&str>, options: &[String]| {
            requested
                .map(String::from)
                .or_else(|| options.first().cloned())
        };

        Selection {
            city: pick(city, &self.cities),
            provider_type: pick(provider_type, &self.provider_types),
            meal_type: pick(meal_type, &self.meal_types),
        }
    }
}

/// One value per filter; `None` where a filter could not be resolved
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub city: Option<String>,
    pub provider_type: Option<String>,
    pub meal_type: Option<String>,
}

impl Selection {
    pub fn new(
        city: impl Into<String>,
        provider_type: impl Into<String>,
        meal_type: impl Into<String>,
    ) -> Self {
        Self {
            city: Some(city.into()),
            provider_type: Some(provider_type.into()),
            meal_type: Some(meal_type.into()),
        }
    }

    /// True if the provider is in the selected city
    pub fn matches_provider(&self, provider: &Provider) -> bool {
        self.city.as_deref() == Some(provider.city.as_str())
    }

    /// True if the listing matches all three predicates
    ///
    /// An unresolved filter matches nothing.
    pub fn matches_food(&self, food: &FoodListing) -> bool {
        self.city.as_deref() == Some(food.location.as_str())
            && self.meal_type.as_deref() == Some(food.meal_type.as_str())
            && self.provider_type.as_deref() == Some(food.provider_type.as_str())
    }
}

/// A claim joined with the food listing it references
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimWithFood<'a> {
    pub claim: &'a Claim,
    pub food: &'a FoodListing,
}

/// The tables narrowed by a [`Selection`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilteredView<'a> {
    pub selection: Selection,
    /// Providers in the selected city (city is the only predicate applied)
    pub providers: Vec<&'a Provider>,
    /// Listings matching city, provider type and meal type
    pub food: Vec<&'a FoodListing>,
    /// Claims whose food listing survived the filter
    pub claims: Vec<ClaimWithFood<'a>>,
}

impl<'a> FilteredView<'a> {
    pub fn apply(dataset: &'a Dataset, selection: Selection) -> Self {
        let providers = dataset
            .providers
            .iter()
            .filter(|p| selection.matches_provider(p))
            .collect();

        let food: Vec<&FoodListing> = dataset
            .food
            .iter()
            .filter(|f| selection.matches_food(f))
            .collect();

        // Inner join, claims order preserved; a duplicated Food_ID would
        // yield one joined row per matching listing.
        let claims = dataset
            .claims
            .iter()
            .flat_map(|claim| {
                food.iter()
                    .filter(move |f| f.id == claim.food_id)
                    .map(move |f| ClaimWithFood { claim, food: *f })
            })
            .collect();

        Self {
            selection,
            providers,
            food,
            claims,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testutil::sample_dataset;

    #[test]
    fn test_options_from_dataset() {
        let dataset = sample_dataset();
        let options = FilterOptions::from_dataset(&dataset);

        // Receiver-only city appears after provider cities
        assert_eq!(options.cities, vec!["Springfield", "Shelbyville", "Ogdenville"]);
        assert_eq!(options.provider_types, vec!["Restaurant", "Supermarket"]);
        assert_eq!(options.meal_types, vec!["Lunch", "Dinner", "Breakfast"]);
    }

    #[test]
    fn test_select_defaults_to_first_option() {
        let options = FilterOptions::from_dataset(&sample_dataset());
        let selection = options.select(None, Some("Supermarket"), None);
        assert_eq!(selection, Selection::new("Springfield", "Supermarket", "Lunch"));
    }

    #[test]
    fn test_select_without_options() {
        let options = FilterOptions::default();
        assert_eq!(options.select(None, None, None), Selection::default());
        assert_eq!(
            options.select(Some("A"), Some("B"), Some("C")),
            Selection::new("A", "B", "C")
        );
    }

    #[test]
    fn test_providers_only_dataset_still_narrows_by_city() {
        let mut dataset = sample_dataset();
        dataset.food.clear();
        dataset.claims.clear();

        let options = FilterOptions::from_dataset(&dataset);
        assert!(options.meal_types.is_empty());

        let selection = options.select(None, None, None);
        assert_eq!(selection.city.as_deref(), Some("Springfield"));
        assert_eq!(selection.provider_type.as_deref(), Some("Restaurant"));
        assert_eq!(selection.meal_type, None);

        let view = FilteredView::apply(&dataset, selection);
        let ids: Vec<i64> = view.providers.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(view.food.is_empty());
        assert!(view.claims.is_empty());
    }

    #[test]
    fn test_unresolved_meal_type_matches_no_food() {
        let dataset = sample_dataset();
        let selection = Selection {
            meal_type: None,
            ..Selection::new("Springfield", "Restaurant", "Lunch")
        };
        let view = FilteredView::apply(&dataset, selection);
        assert!(!view.providers.is_empty());
        assert!(view.food.is_empty());
        assert!(view.claims.is_empty());
    }

    #[test]
    fn test_filter_matches_all_three_predicates() {
        let dataset = sample_dataset();
        let selection = Selection::new("Springfield", "Restaurant", "Lunch");
        let view = FilteredView::apply(&dataset, selection.clone());

        let expected: Vec<&FoodListing> = dataset
            .food
            .iter()
            .filter(|f| {
                f.location == "Springfield" && f.provider_type == "Restaurant" && f.meal_type == "Lunch"
            })
            .collect();
        assert_eq!(view.food, expected);
        assert_eq!(view.food.iter().map(|f| f.id).collect::<Vec<_>>(), vec![1, 4]);
    }

    #[test]
    fn test_filter_providers_by_city_only() {
        let dataset = sample_dataset();
        let view = FilteredView::apply(&dataset, Selection::new("Springfield", "Supermarket", "Dinner"));
        let ids: Vec<i64> = view.providers.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_filtered_claims_reference_surviving_food() {
        let dataset = sample_dataset();
        let view = FilteredView::apply(&dataset, Selection::new("Springfield", "Restaurant", "Lunch"));

        let surviving: Vec<i64> = view.food.iter().map(|f| f.id).collect();
        let expected: Vec<i64> = dataset
            .claims
            .iter()
            .filter(|c| surviving.contains(&c.food_id))
            .map(|c| c.id)
            .collect();
        let shown: Vec<i64> = view.claims.iter().map(|c| c.claim.id).collect();

        assert_eq!(shown, expected);
        assert!(view.claims.iter().all(|c| c.claim.food_id == c.food.id));
    }

    #[test]
    fn test_filter_with_no_match_is_empty() {
        let dataset = sample_dataset();
        let view = FilteredView::apply(&dataset, Selection::new("Nowhere", "Restaurant", "Lunch"));
        assert!(view.providers.is_empty());
        assert!(view.food.is_empty());
        assert!(view.claims.is_empty());
    }
}
