//! `fwms claim` command - Claim listing

use clap::Subcommand;
use miette::Result;

use super::utils::{list_format, open_session, print_json};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Dataset};
use crate::entities::{Claim, ClaimStatus};

#[derive(Subcommand, Debug)]
pub enum ClaimCommands {
    /// List claims
    List(ListArgs),
}

/// Column definitions for claim list output
pub(crate) const CLAIM_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 6),
    ColumnDef::new("food", "FOOD", 6),
    ColumnDef::new("food-name", "FOOD NAME", 24),
    ColumnDef::new("receiver", "RECEIVER", 24),
    ColumnDef::new("status", "STATUS", 12),
    ColumnDef::new("timestamp", "TIMESTAMP", 16),
];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only claims with this status (Completed, Pending, Cancelled, or any stored value)
    #[arg(long, short = 's')]
    pub status: Option<String>,

    /// Show count only
    #[arg(long)]
    pub count: bool,
}

pub fn run(cmd: ClaimCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ClaimCommands::List(args) => run_list(args, global),
    }
}

/// Build a claim row, resolving food and receiver names where they exist
pub(crate) fn claim_to_row(claim: &Claim, dataset: &Dataset) -> TableRow {
    let food_name = dataset
        .food_listing(claim.food_id)
        .map_or(CellValue::Empty, |f| CellValue::Text(f.name.clone()));
    let receiver = dataset
        .receiver(claim.receiver_id)
        .map_or(CellValue::Number(claim.receiver_id), |r| CellValue::Text(r.name.clone()));

    TableRow::new(claim.id)
        .cell("id", CellValue::Id(claim.id))
        .cell("food", CellValue::Number(claim.food_id))
        .cell("food-name", food_name)
        .cell("receiver", receiver)
        .cell("status", CellValue::Status(claim.status.clone()))
        .cell("timestamp", CellValue::DateTime(claim.timestamp))
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let format = list_format(global, &config);
    let mut session = open_session(global, &config)?;
    let dataset = session.dataset()?;

    let wanted = args.status.as_deref().map(ClaimStatus::from);
    let claims: Vec<&Claim> = dataset
        .claims
        .iter()
        .filter(|c| wanted.as_ref().map_or(true, |s| c.status.as_str().eq_ignore_ascii_case(s.as_str())))
        .collect();

    if args.count {
        println!("{}", claims.len());
        return Ok(());
    }

    if format == OutputFormat::Json {
        return print_json(&claims);
    }

    if claims.is_empty() {
        if !global.quiet {
            println!("No claims found.");
        }
        return Ok(());
    }

    TableFormatter::new(CLAIM_COLUMNS, "claim")
        .output(claims.into_iter().map(|c| claim_to_row(c, dataset)), format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testutil::sample_dataset;

    #[test]
    fn test_claim_row_resolves_names() {
        let dataset = sample_dataset();
        let row = claim_to_row(&dataset.claims[0], &dataset);
        assert_eq!(row.get("food-name").map(|v| v.raw()), Some("Rice".to_string()));
        assert_eq!(row.get("receiver").map(|v| v.raw()), Some("Hope Shelter".to_string()));
    }

    #[test]
    fn test_claim_row_with_missing_listing() {
        let dataset = sample_dataset();
        // Claim 8 references food 99, which is not loaded
        let row = claim_to_row(&dataset.claims[7], &dataset);
        assert!(matches!(row.get("food-name"), Some(CellValue::Empty)));
        assert_eq!(row.get("food").map(|v| v.raw()), Some("99".to_string()));
    }
}
