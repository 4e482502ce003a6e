//! Dashboard aggregates
//!
//! Everything here is recomputed from a [`Dataset`] on every pass; nothing is
//! maintained incrementally. Metrics and charts always use the full tables,
//! never a filtered view.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::core::dataset::Dataset;
use crate::entities::ClaimStatus;

/// Number of providers in the default top-providers chart
pub const DEFAULT_TOP_N: usize = 5;

/// The metric tiles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyMetrics {
    /// Sum of `Quantity` over every food listing
    pub total_food: i64,
    pub completed_claims: usize,
    pub pending_claims: usize,
    pub cancelled_claims: usize,
    pub total_claims: usize,
}

pub fn key_metrics(dataset: &Dataset) -> KeyMetrics {
    let mut metrics = KeyMetrics {
        total_food: dataset.food.iter().map(|f| f.quantity).sum(),
        total_claims: dataset.claims.len(),
        ..Default::default()
    };

    for claim in &dataset.claims {
        match claim.status {
            ClaimStatus::Completed => metrics.completed_claims += 1,
            ClaimStatus::Pending => metrics.pending_claims += 1,
            ClaimStatus::Cancelled => metrics.cancelled_claims += 1,
            ClaimStatus::Other(_) => {}
        }
    }

    metrics
}

/// How a chart should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    /// Parts of a whole; drawn with percentages
    Pie,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: i64,
}

impl ChartPoint {
    fn new(label: impl Into<String>, value: i64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A labelled series ready for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    /// Axis / legend label for the categories
    pub label_name: &'static str,
    /// Axis label for the values
    pub value_name: &'static str,
    pub points: Vec<ChartPoint>,
}

impl Chart {
    pub fn total(&self) -> i64 {
        self.points.iter().map(|p| p.value).sum()
    }

    pub fn max_value(&self) -> i64 {
        self.points.iter().map(|p| p.value).max().unwrap_or(0)
    }
}

/// Sort by value descending, then label ascending
fn sort_desc(points: &mut [ChartPoint]) {
    points.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.label.cmp(&b.label)));
}

/// Providers ranked by total quantity listed
///
/// Food rows whose provider is missing from the providers table are dropped
/// (inner join). Ties are broken by ascending provider id.
pub fn top_providers(dataset: &Dataset, n: usize) -> Chart {
    let mut by_provider: BTreeMap<i64, i64> = BTreeMap::new();
    for food in &dataset.food {
        *by_provider.entry(food.provider_id).or_insert(0) += food.quantity;
    }

    let mut ranked: Vec<(i64, &str, i64)> = by_provider
        .into_iter()
        .filter_map(|(id, qty)| dataset.provider(id).map(|p| (id, p.name.as_str(), qty)))
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);

    Chart {
        title: format!("Top {} Providers by Donations", n),
        kind: ChartKind::Bar,
        label_name: "Name",
        value_name: "Quantity",
        points: ranked
            .into_iter()
            .map(|(_, name, qty)| ChartPoint::new(name, qty))
            .collect(),
    }
}

/// Count of claims per status over the full claims table
pub fn claim_status_distribution(dataset: &Dataset) -> Chart {
    let mut counts: HashMap<&str, i64> = HashMap::new();
    for claim in &dataset.claims {
        *counts.entry(claim.status.as_str()).or_insert(0) += 1;
    }

    let mut points: Vec<ChartPoint> = counts
        .into_iter()
        .map(|(status, count)| ChartPoint::new(status, count))
        .collect();
    sort_desc(&mut points);

    Chart {
        title: "Claims Status".to_string(),
        kind: ChartKind::Pie,
        label_name: "Status",
        value_name: "Count",
        points,
    }
}

/// Count of claims per meal type of the claimed listing
///
/// Claims referencing a listing that is not loaded are not counted.
pub fn claims_per_meal_type(dataset: &Dataset) -> Chart {
    let meal_by_food: HashMap<i64, &str> = dataset
        .food
        .iter()
        .map(|f| (f.id, f.meal_type.as_str()))
        .collect();

    let mut counts: HashMap<&str, i64> = HashMap::new();
    for claim in &dataset.claims {
        if let Some(meal) = meal_by_food.get(&claim.food_id) {
            *counts.entry(*meal).or_insert(0) += 1;
        }
    }

    let mut points: Vec<ChartPoint> = counts
        .into_iter()
        .map(|(meal, count)| ChartPoint::new(meal, count))
        .collect();
    sort_desc(&mut points);

    Chart {
        title: "Claims per Meal Type".to_string(),
        kind: ChartKind::Bar,
        label_name: "Meal_Type",
        value_name: "Count",
        points,
    }
}

/// Total quantity listed per city, ordered by city name
pub fn food_by_city(dataset: &Dataset) -> Chart {
    let mut by_city: BTreeMap<&str, i64> = BTreeMap::new();
    for food in &dataset.food {
        *by_city.entry(food.location.as_str()).or_insert(0) += food.quantity;
    }

    Chart {
        title: "Food Availability by City".to_string(),
        kind: ChartKind::Bar,
        label_name: "Location",
        value_name: "Quantity",
        points: by_city
            .into_iter()
            .map(|(city, qty)| ChartPoint::new(city, qty))
            .collect(),
    }
}

/// The four dashboard charts, in display order
pub fn dashboard_charts(dataset: &Dataset, top_n: usize) -> Vec<Chart> {
    vec![
        top_providers(dataset, top_n),
        claim_status_distribution(dataset),
        claims_per_meal_type(dataset),
        food_by_city(dataset),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::{FilteredView, Selection};
    use crate::core::testutil::sample_dataset;

    fn labels(chart: &Chart) -> Vec<&str> {
        chart.points.iter().map(|p| p.label.as_str()).collect()
    }

    fn values(chart: &Chart) -> Vec<i64> {
        chart.points.iter().map(|p| p.value).collect()
    }

    #[test]
    fn test_key_metrics() {
        let metrics = key_metrics(&sample_dataset());
        assert_eq!(
            metrics,
            KeyMetrics {
                total_food: 62,
                completed_claims: 3,
                pending_claims: 3,
                cancelled_claims: 1,
                total_claims: 8,
            }
        );
    }

    #[test]
    fn test_total_food_ignores_filter() {
        let dataset = sample_dataset();
        let view = FilteredView::apply(&dataset, Selection::new("Springfield", "Restaurant", "Lunch"));
        let filtered_sum: i64 = view.food.iter().map(|f| f.quantity).sum();

        let metrics = key_metrics(&dataset);
        assert_eq!(metrics.total_food, dataset.food.iter().map(|f| f.quantity).sum::<i64>());
        assert_ne!(metrics.total_food, filtered_sum);
    }

    #[test]
    fn test_key_metrics_empty() {
        assert_eq!(key_metrics(&Dataset::default()), KeyMetrics::default());
    }

    #[test]
    fn test_top_providers() {
        let chart = top_providers(&sample_dataset(), DEFAULT_TOP_N);
        assert_eq!(chart.title, "Top 5 Providers by Donations");
        assert_eq!(labels(&chart), vec!["Daily Deli", "Green Cafe", "Noodle House", "Fresh Mart"]);
        assert_eq!(values(&chart), vec![20, 18, 15, 9]);
    }

    #[test]
    fn test_top_providers_truncates() {
        let chart = top_providers(&sample_dataset(), 2);
        assert_eq!(labels(&chart), vec!["Daily Deli", "Green Cafe"]);
    }

    #[test]
    fn test_top_providers_tie_breaks_by_id() {
        let mut dataset = sample_dataset();
        // Green Cafe (id 1) now matches Daily Deli (id 3) at 20
        dataset.food[0].quantity = 12;
        let chart = top_providers(&dataset, 2);
        assert_eq!(labels(&chart), vec!["Green Cafe", "Daily Deli"]);
    }

    #[test]
    fn test_claim_status_partitions_claims() {
        let dataset = sample_dataset();
        let chart = claim_status_distribution(&dataset);
        assert_eq!(chart.kind, ChartKind::Pie);
        assert_eq!(labels(&chart), vec!["Completed", "Pending", "Cancelled", "On Hold"]);
        assert_eq!(values(&chart), vec![3, 3, 1, 1]);
        assert_eq!(chart.total(), dataset.claims.len() as i64);
    }

    #[test]
    fn test_claims_per_meal_type_inner_join() {
        let chart = claims_per_meal_type(&sample_dataset());
        assert_eq!(labels(&chart), vec!["Lunch", "Dinner", "Breakfast"]);
        assert_eq!(values(&chart), vec![4, 2, 1]);
        // Claim 8 references a missing listing
        assert_eq!(chart.total(), 7);
    }

    #[test]
    fn test_food_by_city() {
        let dataset = sample_dataset();
        let chart = food_by_city(&dataset);
        assert_eq!(labels(&chart), vec!["Shelbyville", "Springfield"]);
        assert_eq!(values(&chart), vec![24, 38]);
        assert_eq!(chart.total(), key_metrics(&dataset).total_food);
        assert_eq!(chart.max_value(), 38);
    }

    #[test]
    fn test_dashboard_charts_order() {
        let charts = dashboard_charts(&sample_dataset(), 3);
        let titles: Vec<&str> = charts.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Top 3 Providers by Donations",
                "Claims Status",
                "Claims per Meal Type",
                "Food Availability by City"
            ]
        );
    }

    #[test]
    fn test_charts_on_empty_dataset() {
        for chart in dashboard_charts(&Dataset::default(), DEFAULT_TOP_N) {
            assert!(chart.points.is_empty());
            assert_eq!(chart.max_value(), 0);
        }
    }
}
