//! `fwms report` command - Chart data as markdown tables

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use super::utils::open_session;
use crate::cli::chart::percentage;
use crate::cli::GlobalOpts;
use crate::core::metrics::{claim_status_distribution, claims_per_meal_type, food_by_city, top_providers};
use crate::core::{Chart, ChartKind, Config};

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Providers ranked by total quantity donated
    TopProviders(TopProvidersArgs),

    /// Claim counts per status, with shares
    ClaimStatus(ReportArgs),

    /// Claim counts per meal type
    MealClaims(ReportArgs),

    /// Food quantity available per city
    CityFood(ReportArgs),
}

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct TopProvidersArgs {
    /// Number of providers to include (default: config `top_n`, then 5)
    #[arg(long, short = 'n')]
    pub top: Option<usize>,

    #[command(flatten)]
    pub report: ReportArgs,
}

pub fn run(cmd: ReportCommands, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let mut session = open_session(global, &config)?;
    let dataset = session.dataset()?;

    let (chart, output) = match cmd {
        ReportCommands::TopProviders(args) => (
            top_providers(dataset, args.top.unwrap_or_else(|| config.top_n()).max(1)),
            args.report.output,
        ),
        ReportCommands::ClaimStatus(args) => (claim_status_distribution(dataset), args.output),
        ReportCommands::MealClaims(args) => (claims_per_meal_type(dataset), args.output),
        ReportCommands::CityFood(args) => (food_by_city(dataset), args.output),
    };

    write_output(&chart_markdown(&chart), output)
}

/// Render a chart as a markdown section with a table and a total line
pub(crate) fn chart_markdown(chart: &Chart) -> String {
    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", chart.title));

    if chart.points.is_empty() {
        output.push_str("*No data.*\n");
        return output;
    }

    let total = chart.total();
    let mut builder = Builder::default();
    match chart.kind {
        ChartKind::Bar => builder.push_record([chart.label_name, chart.value_name]),
        ChartKind::Pie => builder.push_record([chart.label_name, chart.value_name, "Share"]),
    }
    for point in &chart.points {
        let label = point.label.replace('|', "\\|");
        match chart.kind {
            ChartKind::Bar => builder.push_record([label, point.value.to_string()]),
            ChartKind::Pie => builder.push_record([
                label,
                point.value.to_string(),
                format!("{:.1}%", percentage(point.value, total)),
            ]),
        }
    }
    output.push_str(&builder.build().with(Style::markdown()).to_string());
    output.push_str(&format!("\n\n**Total:** {}\n", total));
    output
}

fn write_output(content: &str, output_path: Option<PathBuf>) -> Result<()> {
    if let Some(path) = output_path {
        let file = File::create(&path).into_diagnostic()?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes()).into_diagnostic()?;
        writer.flush().into_diagnostic()?;
        println!("{} Report written to {}", style("✓").green(), style(path.display()).cyan());
    } else {
        print!("{}", content);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testutil::sample_dataset;
    use tempfile::tempdir;

    #[test]
    fn test_bar_report_markdown() {
        let md = chart_markdown(&food_by_city(&sample_dataset()));
        assert!(md.starts_with("# Food Availability by City\n"));
        assert!(md.contains("| Location"));
        assert!(md.contains("| Springfield"));
        assert!(md.contains("**Total:** 62"));
    }

    #[test]
    fn test_pie_report_has_shares() {
        let md = chart_markdown(&claim_status_distribution(&sample_dataset()));
        assert!(md.contains("Share"));
        assert!(md.contains("37.5%"));
        assert!(md.contains("12.5%"));
    }

    #[test]
    fn test_empty_report() {
        let md = chart_markdown(&food_by_city(&crate::core::Dataset::default()));
        assert!(md.contains("*No data.*"));
    }

    #[test]
    fn test_write_output_to_missing_directory_fails() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("missing").join("report.md");
        assert!(write_output("# Title\n", Some(path.clone())).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_write_output_to_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("report.md");
        write_output("# Title\n", Some(path.clone())).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Title\n");
    }
}
