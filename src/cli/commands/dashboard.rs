//! `fwms dashboard` command - Metrics, filtered tables and charts
//!
//! One top-to-bottom pass: load the four tables, compute the metric tiles,
//! resolve the filter selection, print the filtered tables, draw the charts.

use clap::ValueEnum;
use console::style;
use miette::Result;

use super::claim::{claim_to_row, CLAIM_COLUMNS};
use super::food::{food_to_row, FOOD_COLUMNS};
use super::provider::{provider_to_row, PROVIDER_COLUMNS};
use super::utils::{open_session, print_json};
use crate::cli::chart::render_chart;
use crate::cli::table::{TableConfig, TableFormatter};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::metrics::{dashboard_charts, key_metrics};
use crate::core::{Chart, Config, Dataset, FilterOptions, FilteredView, KeyMetrics, Selection};

/// A part of the dashboard that can be shown on its own
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    /// Metric tiles
    Metrics,
    /// Filter options and the current selection
    Filters,
    /// Providers in the selected city
    Providers,
    /// Food listings matching the selection
    Food,
    /// Claims on the matching listings
    Claims,
    /// The four charts
    Charts,
}

#[derive(clap::Args, Debug)]
pub struct DashboardArgs {
    /// City filter (default: first city in the data)
    #[arg(long)]
    pub city: Option<String>,

    /// Provider type filter (default: first provider type in the data)
    #[arg(long)]
    pub provider_type: Option<String>,

    /// Meal type filter (default: first meal type in the data)
    #[arg(long)]
    pub meal_type: Option<String>,

    /// Show only one section
    #[arg(long, value_enum)]
    pub section: Option<Section>,

    /// Number of providers in the top-providers chart (default: config `top_n`, then 5)
    #[arg(long, short = 'n')]
    pub top: Option<usize>,
}

impl DashboardArgs {
    fn shows(&self, section: Section) -> bool {
        self.section.map_or(true, |s| s == section)
    }
}

pub fn run(args: DashboardArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let top_n = args.top.unwrap_or_else(|| config.top_n()).max(1);
    let format = global
        .format
        .resolve(config.default_format.as_deref(), OutputFormat::Auto);

    let mut session = open_session(global, &config)?;
    let dataset = session.dataset()?;

    let metrics = key_metrics(dataset);
    let options = FilterOptions::from_dataset(dataset);
    let selection = options.select(
        args.city.as_deref(),
        args.provider_type.as_deref(),
        args.meal_type.as_deref(),
    );
    let view = FilteredView::apply(dataset, selection);
    let charts = dashboard_charts(dataset, top_n);
    log::debug!("dashboard selection: {:?}", view.selection);

    if format == OutputFormat::Json {
        let dashboard = serde_json::json!({
            "metrics": metrics,
            "filters": options,
            "selection": &view.selection,
            "providers": &view.providers,
            "food": &view.food,
            "claims": view.claims.iter().map(|c| c.claim).collect::<Vec<_>>(),
            "charts": charts,
        });
        return print_json(&dashboard);
    }

    // Table sections honour an explicit tabular format; everything else is text
    let table_format = match format {
        OutputFormat::Csv | OutputFormat::Md | OutputFormat::Id => format,
        _ => OutputFormat::Tsv,
    };

    let width = 68;
    if args.section.is_none() {
        println!("{}", style("Food Wastage Management Dashboard").bold().underlined());
        println!("{}", "═".repeat(width));
        println!();
    }

    if args.shows(Section::Metrics) {
        print_two_columns(
            "FOOD",
            &format_food_metrics(&metrics, dataset),
            "CLAIMS",
            &format_claim_metrics(&metrics),
        );
        println!();
    }

    if args.shows(Section::Filters) {
        print_section("FILTERS", &format_filters(&options, &view.selection));
        if !is_resolved(&view.selection) {
            println!(
                "  {}",
                style("Some filters have no options; load data with `fwms import` first.").dim()
            );
        }
        println!();
    }

    let city = view.selection.city.as_deref().unwrap_or("-");
    let summary = TableConfig::for_pipe();
    if args.shows(Section::Providers) {
        println!(
            "{}",
            style(format!("PROVIDERS IN {}", city.to_uppercase())).bold()
        );
        if view.providers.is_empty() {
            println!("  {}", style("(none)").dim());
        } else {
            TableFormatter::new(PROVIDER_COLUMNS, "provider")
                .with_config(summary.clone())
                .output(view.providers.iter().map(|p| provider_to_row(p)), table_format);
        }
        println!();
    }

    if args.shows(Section::Food) {
        println!(
            "{}",
            style(format!(
                "FOOD LISTINGS ({} / {} / {})",
                city,
                view.selection.provider_type.as_deref().unwrap_or("-"),
                view.selection.meal_type.as_deref().unwrap_or("-")
            ))
            .bold()
        );
        if view.food.is_empty() {
            println!("  {}", style("(none)").dim());
        } else {
            TableFormatter::new(FOOD_COLUMNS, "food listing")
                .with_config(summary.clone())
                .output(view.food.iter().map(|f| food_to_row(f)), table_format);
        }
        println!();
    }

    if args.shows(Section::Claims) {
        println!("{}", style("CLAIMS ON THESE LISTINGS").bold());
        if view.claims.is_empty() {
            println!("  {}", style("(none)").dim());
        } else {
            TableFormatter::new(CLAIM_COLUMNS, "claim")
                .with_config(summary)
                .output(view.claims.iter().map(|c| claim_to_row(c.claim, dataset)), table_format);
        }
        println!();
    }

    if args.shows(Section::Charts) {
        print_charts(&charts);
    }

    Ok(())
}

fn format_food_metrics(metrics: &KeyMetrics, dataset: &Dataset) -> Vec<String> {
    vec![
        format!("Total quantity:   {}", style(metrics.total_food).cyan().bold()),
        format!("Listings:         {}", dataset.food.len()),
        format!("Providers:        {}", dataset.providers.len()),
        format!("Receivers:        {}", dataset.receivers.len()),
    ]
}

fn format_claim_metrics(metrics: &KeyMetrics) -> Vec<String> {
    vec![
        format!("Completed: {}", style(metrics.completed_claims).green()),
        format!("Pending:   {}", style(metrics.pending_claims).yellow()),
        format!("Cancelled: {}", style(metrics.cancelled_claims).red()),
        format!("Total:     {}", metrics.total_claims),
    ]
}

fn is_resolved(selection: &Selection) -> bool {
    selection.city.is_some() && selection.provider_type.is_some() && selection.meal_type.is_some()
}

fn format_filters(options: &FilterOptions, selection: &Selection) -> Vec<String> {
    let line = |name: &str, selected: Option<&str>, values: &[String]| {
        format!(
            "{:<14} {}  {}",
            name,
            style(selected.unwrap_or("-")).cyan(),
            style(format!("[{}]", values.join(", "))).dim()
        )
    };
    vec![
        line("City:", selection.city.as_deref(), &options.cities),
        line(
            "Provider type:",
            selection.provider_type.as_deref(),
            &options.provider_types,
        ),
        line("Meal type:", selection.meal_type.as_deref(), &options.meal_types),
    ]
}

fn print_charts(charts: &[Chart]) {
    for chart in charts {
        print!("{}", render_chart(chart));
        println!();
    }
}

fn print_two_columns(title1: &str, lines1: &[String], title2: &str, lines2: &[String]) {
    let col_width = 32;

    println!("{:<col_width$} {}", style(title1).bold(), style(title2).bold());
    println!("{:-<col_width$} {:-<col_width$}", "", "");

    let max_lines = lines1.len().max(lines2.len());
    for i in 0..max_lines {
        let l1 = lines1.get(i).map(|s| s.as_str()).unwrap_or("");
        let l2 = lines2.get(i).map(|s| s.as_str()).unwrap_or("");
        // Pad on visible width; the lines carry color codes
        let pad = 30usize.saturating_sub(console::measure_text_width(l1));
        println!("  {}{} {}", l1, " ".repeat(pad), l2);
    }
}

fn print_section(title: &str, lines: &[String]) {
    println!("{}", style(title).bold());
    println!("{:-<64}", "");
    for line in lines {
        println!("  {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testutil::sample_dataset;

    #[test]
    fn test_section_selection() {
        let mut args = DashboardArgs {
            city: None,
            provider_type: None,
            meal_type: None,
            section: None,
            top: None,
        };
        assert!(args.shows(Section::Charts));
        args.section = Some(Section::Metrics);
        assert!(args.shows(Section::Metrics));
        assert!(!args.shows(Section::Charts));
    }

    #[test]
    fn test_format_filters_marks_selection() {
        console::set_colors_enabled(false);
        let dataset = sample_dataset();
        let options = FilterOptions::from_dataset(&dataset);
        let selection = Selection::new("Shelbyville", "Restaurant", "Dinner");
        let lines = format_filters(&options, &selection);
        assert!(lines[0].contains("Shelbyville"));
        assert!(lines[0].contains("[Springfield, Shelbyville, Ogdenville]"));
        assert!(lines[2].contains("Dinner"));

        let empty = format_filters(&FilterOptions::default(), &Selection::default());
        assert!(empty[0].contains(" -  []"));
    }

    #[test]
    fn test_partial_selection_is_unresolved() {
        let mut selection = Selection::new("Springfield", "Restaurant", "Lunch");
        assert!(is_resolved(&selection));
        selection.meal_type = None;
        assert!(!is_resolved(&selection));
    }

    #[test]
    fn test_claim_metrics_lines() {
        console::set_colors_enabled(false);
        let lines = format_claim_metrics(&key_metrics(&sample_dataset()));
        assert_eq!(lines[0], "Completed: 3");
        assert_eq!(lines[3], "Total:     8");
    }
}
