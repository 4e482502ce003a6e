//! `fwms import` command - Bulk-load table rows from CSV files
//!
//! Headers use the database column names (`Provider_ID`, `Food_Name`, ...),
//! matched case-insensitively. Identities are taken from the file so claims
//! and listings keep pointing at the right rows.

use clap::ValueEnum;
use console::style;
use csv::ReaderBuilder;
use miette::{IntoDiagnostic, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use super::utils::database_path;
use crate::cli::GlobalOpts;
use crate::core::store::{ImportRecord, Importer};
use crate::core::{Config, SqliteStore};
use crate::entities::{parse_date, parse_datetime, Claim, ClaimStatus, FoodListing, Provider, Receiver};

/// Table to import into
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportTable {
    Providers,
    Receivers,
    Food,
    Claims,
}

impl ImportTable {
    fn as_str(self) -> &'static str {
        match self {
            ImportTable::Providers => "providers",
            ImportTable::Receivers => "receivers",
            ImportTable::Food => "food",
            ImportTable::Claims => "claims",
        }
    }

    /// CSV headers, in database column order
    fn headers(self) -> &'static [&'static str] {
        match self {
            ImportTable::Providers => &["Provider_ID", "Name", "Type", "Address", "City", "Contact"],
            ImportTable::Receivers => &["Receiver_ID", "Name", "Type", "City", "Contact"],
            ImportTable::Food => &[
                "Food_ID",
                "Food_Name",
                "Quantity",
                "Expiry_Date",
                "Provider_ID",
                "Provider_Type",
                "Location",
                "Food_Type",
                "Meal_Type",
            ],
            ImportTable::Claims => &["Claim_ID", "Food_ID", "Receiver_ID", "Status", "Timestamp"],
        }
    }

    fn example(self) -> &'static [&'static str] {
        match self {
            ImportTable::Providers => &["1", "Green Cafe", "Restaurant", "12 Market Street", "Springfield", "555-0101"],
            ImportTable::Receivers => &["1", "Hope Shelter", "Shelter", "Springfield", "555-0201"],
            ImportTable::Food => &[
                "1",
                "Rice",
                "10",
                "2025-03-20",
                "1",
                "Restaurant",
                "Springfield",
                "Vegetarian",
                "Lunch",
            ],
            ImportTable::Claims => &["1", "1", "1", "Pending", "2025-03-18 10:30:00"],
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Table to import into
    #[arg(value_enum)]
    pub table: ImportTable,

    /// CSV file to import
    pub file: Option<PathBuf>,

    /// Print a CSV template for the table instead of importing
    #[arg(long)]
    pub template: bool,

    /// Validate the CSV without writing to the database
    #[arg(long)]
    pub dry_run: bool,

    /// Continue importing after errors (default: stop on first error)
    #[arg(long)]
    pub skip_errors: bool,
}

/// Import statistics
#[derive(Debug, Default, PartialEq, Eq)]
struct ImportStats {
    rows_processed: usize,
    rows_imported: usize,
    errors: usize,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    if args.template {
        return generate_template(args.table);
    }

    let file_path = args.file.clone().ok_or_else(|| {
        miette::miette!(
            "CSV file required. Usage: fwms import {} data.csv",
            args.table.as_str()
        )
    })?;

    if !file_path.exists() {
        return Err(miette::miette!("File not found: {}", file_path.display()));
    }

    let importer = if args.dry_run {
        None
    } else {
        let config = Config::load();
        let store = SqliteStore::open(database_path(global, &config))?;
        Some(store.importer()?)
    };

    if !global.quiet {
        println!(
            "{} Importing {} from {}{}",
            style("→").blue(),
            style(args.table.as_str()).cyan(),
            style(file_path.display()).yellow(),
            if args.dry_run {
                style(" (dry run)").dim().to_string()
            } else {
                String::new()
            }
        );
    }

    let stats = import_file(&file_path, &args, importer.as_ref())?;
    log::info!(
        "import of {}: {} row(s) processed, {} imported, {} error(s)",
        args.table.as_str(),
        stats.rows_processed,
        stats.rows_imported,
        stats.errors
    );

    if !global.quiet {
        println!();
        println!("{}", style("─".repeat(50)).dim());
        println!("{}", style("Import Summary").bold());
        println!("{}", style("─".repeat(50)).dim());
        println!("  Rows processed: {}", style(stats.rows_processed).cyan());
        if args.dry_run {
            println!("  Rows valid:     {}", style(stats.rows_imported).green());
        } else {
            println!("  Rows imported:  {}", style(stats.rows_imported).green());
        }
        if stats.errors > 0 {
            println!("  Errors:         {}", style(stats.errors).red());
        }

        if args.dry_run {
            println!();
            println!("{}", style("Dry run complete. Nothing was written.").yellow());
        }
    }

    Ok(())
}

/// Print a CSV template for a table
fn generate_template(table: ImportTable) -> Result<()> {
    // Output to stdout (can be redirected to file)
    println!("{}", table.headers().join(","));
    println!("{}", table.example().join(","));

    // Usage hint on stderr so it doesn't interfere with redirected output
    eprintln!();
    eprintln!(
        "{} Template generated. Redirect to file: fwms import --template {} > {}.csv",
        style("→").blue(),
        table.as_str(),
        table.as_str()
    );

    Ok(())
}

fn import_file(path: &Path, args: &ImportArgs, importer: Option<&Importer>) -> Result<ImportStats> {
    let mut stats = ImportStats::default();

    let file = File::open(path).into_diagnostic()?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers = rdr.headers().into_diagnostic()?.clone();
    let header_map = build_header_map(&headers);

    let missing: Vec<&str> = args
        .table
        .headers()
        .iter()
        .copied()
        .filter(|h| !header_map.contains_key(&h.to_lowercase()))
        .collect();
    if !missing.is_empty() {
        return Err(miette::miette!(
            help = format!("run `fwms import --template {}` for the expected layout", args.table.as_str()),
            "{} is missing column(s): {}",
            path.display(),
            missing.join(", ")
        ));
    }

    for (row_idx, result) in rdr.records().enumerate() {
        // Header is line 1
        let row_num = row_idx + 2;
        stats.rows_processed += 1;

        let outcome = result
            .map_err(|e| format!("CSV parse error: {}", e))
            .and_then(|record| parse_record(args.table, &record, &header_map))
            .and_then(|record| match importer {
                Some(importer) => importer.insert(&record).map_err(|e| {
                    let cause = std::error::Error::source(&e)
                        .map(|s| s.to_string())
                        .unwrap_or_default();
                    format!("{} {} rejected: {}", record.table(), record.id(), cause)
                }),
                None => Ok(()),
            });

        match outcome {
            Ok(()) => stats.rows_imported += 1,
            Err(message) => {
                eprintln!("{} Row {}: {}", style("✗").red(), row_num, message);
                stats.errors += 1;
                if !args.skip_errors {
                    return Err(miette::miette!(
                        help = "use --skip-errors to import the remaining rows",
                        "import stopped at row {}: {}",
                        row_num,
                        message
                    ));
                }
            }
        }
    }

    Ok(stats)
}

/// Build a map of lowercase header name to column index
fn build_header_map(headers: &csv::StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect()
}

/// Get a field value from a CSV record
fn get_field<'r>(
    record: &'r csv::StringRecord,
    header_map: &HashMap<String, usize>,
    field: &str,
) -> Option<&'r str> {
    header_map
        .get(&field.to_lowercase())
        .and_then(|&idx| record.get(idx))
        .map(str::trim)
}

/// Required text field; empty values are allowed
fn text(record: &csv::StringRecord, header_map: &HashMap<String, usize>, field: &str) -> String {
    get_field(record, header_map, field).unwrap_or_default().to_string()
}

fn integer(
    record: &csv::StringRecord,
    header_map: &HashMap<String, usize>,
    field: &str,
) -> std::result::Result<i64, String> {
    let raw = get_field(record, header_map, field).unwrap_or_default();
    raw.parse()
        .map_err(|_| format!("{} must be an integer, got {:?}", field, raw))
}

fn parse_record(
    table: ImportTable,
    record: &csv::StringRecord,
    header_map: &HashMap<String, usize>,
) -> std::result::Result<ImportRecord, String> {
    let text = |field| text(record, header_map, field);
    let integer = |field| integer(record, header_map, field);

    let parsed = match table {
        ImportTable::Providers => ImportRecord::Provider(Provider {
            id: integer("Provider_ID")?,
            name: text("Name"),
            provider_type: text("Type"),
            address: text("Address"),
            city: text("City"),
            contact: text("Contact"),
        }),
        ImportTable::Receivers => ImportRecord::Receiver(Receiver {
            id: integer("Receiver_ID")?,
            name: text("Name"),
            receiver_type: text("Type"),
            city: text("City"),
            contact: text("Contact"),
        }),
        ImportTable::Food => {
            let quantity = integer("Quantity")?;
            if quantity < 0 {
                return Err(format!("Quantity must not be negative, got {}", quantity));
            }
            let expiry = text("Expiry_Date");
            ImportRecord::Food(FoodListing {
                id: integer("Food_ID")?,
                name: text("Food_Name"),
                quantity,
                expiry_date: parse_date(&expiry)
                    .ok_or_else(|| format!("Expiry_Date is not a date: {:?}", expiry))?,
                provider_id: integer("Provider_ID")?,
                provider_type: text("Provider_Type"),
                location: text("Location"),
                food_type: text("Food_Type"),
                meal_type: text("Meal_Type"),
            })
        }
        ImportTable::Claims => {
            let timestamp = text("Timestamp");
            ImportRecord::Claim(Claim {
                id: integer("Claim_ID")?,
                food_id: integer("Food_ID")?,
                receiver_id: integer("Receiver_ID")?,
                status: ClaimStatus::from(text("Status").as_str()),
                timestamp: parse_datetime(&timestamp)
                    .ok_or_else(|| format!("Timestamp is not a date/time: {:?}", timestamp))?,
            })
        }
    };

    Ok(parsed)
}
