//! `fwms food` command - Food listing management

use chrono::NaiveDate;
use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};

use super::provider::field_or_prompt;
use super::utils::{list_format, missing_option, open_session, print_json, report_affected};
use crate::cli::helpers::print_success;
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Session, SqliteStore};
use crate::entities::{parse_date, FoodListing, FoodType, MealType, NewFoodListing};

#[derive(Subcommand, Debug)]
pub enum FoodCommands {
    /// List food listings with optional filtering
    List(ListArgs),

    /// Add a new food listing
    New(NewArgs),

    /// Delete a food listing
    Delete(DeleteArgs),
}

/// Column definitions for food list output
pub(crate) const FOOD_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 6),
    ColumnDef::new("name", "FOOD", 24),
    ColumnDef::new("quantity", "QTY", 6),
    ColumnDef::new("expiry", "EXPIRY", 10),
    ColumnDef::new("provider", "PROVIDER", 8),
    ColumnDef::new("provider-type", "PROVIDER TYPE", 18),
    ColumnDef::new("location", "LOCATION", 20),
    ColumnDef::new("food-type", "FOOD TYPE", 14),
    ColumnDef::new("meal-type", "MEAL", 10),
];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only listings collectable in this city
    #[arg(long)]
    pub city: Option<String>,

    /// Only listings for this meal type
    #[arg(long)]
    pub meal_type: Option<String>,

    /// Only listings from this type of provider
    #[arg(long)]
    pub provider_type: Option<String>,

    /// Show count only
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Food name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Quantity (at least 1)
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..))]
    pub quantity: Option<i64>,

    /// Expiry date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_expiry)]
    pub expiry: Option<NaiveDate>,

    /// Donating provider's ID
    #[arg(long)]
    pub provider_id: Option<i64>,

    /// Donating provider's type
    #[arg(long)]
    pub provider_type: Option<String>,

    /// City where the food can be collected
    #[arg(long)]
    pub location: Option<String>,

    #[arg(long, value_enum)]
    pub food_type: Option<FoodType>,

    #[arg(long, value_enum)]
    pub meal_type: Option<MealType>,

    /// Prompt for each field
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Food listing ID
    pub id: i64,
}

fn parse_expiry(s: &str) -> std::result::Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("'{}' is not a date (expected YYYY-MM-DD)", s))
}

pub fn run(cmd: FoodCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        FoodCommands::List(args) => run_list(args, global),
        FoodCommands::New(args) => run_new(args, global),
        FoodCommands::Delete(args) => run_delete(args, global),
    }
}

pub(crate) fn food_to_row(food: &FoodListing) -> TableRow {
    TableRow::new(food.id)
        .cell("id", CellValue::Id(food.id))
        .cell("name", CellValue::Text(food.name.clone()))
        .cell("quantity", CellValue::Number(food.quantity))
        .cell("expiry", CellValue::Date(food.expiry_date))
        .cell("provider", CellValue::Number(food.provider_id))
        .cell("provider-type", CellValue::Type(food.provider_type.clone()))
        .cell("location", CellValue::Text(food.location.clone()))
        .cell("food-type", CellValue::Type(food.food_type.clone()))
        .cell("meal-type", CellValue::Type(food.meal_type.clone()))
}

fn matches(filter: &Option<String>, value: &str) -> bool {
    filter
        .as_ref()
        .map_or(true, |wanted| value.eq_ignore_ascii_case(wanted))
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let format = list_format(global, &config);
    let mut session = open_session(global, &config)?;
    let dataset = session.dataset()?;

    let food: Vec<&FoodListing> = dataset
        .food
        .iter()
        .filter(|f| matches(&args.city, &f.location))
        .filter(|f| matches(&args.meal_type, &f.meal_type))
        .filter(|f| matches(&args.provider_type, &f.provider_type))
        .collect();

    if args.count {
        println!("{}", food.len());
        return Ok(());
    }

    if format == OutputFormat::Json {
        return print_json(&food);
    }

    if food.is_empty() {
        if !global.quiet {
            println!("No food listings found.");
        }
        return Ok(());
    }

    TableFormatter::new(FOOD_COLUMNS, "food listing")
        .output(food.into_iter().map(food_to_row), format);
    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let mut session = open_session(global, &config)?;

    let listing = if args.interactive {
        prompt_listing(args, &mut session)?
    } else {
        listing_from_args(args)?
    };

    let created = session.add_food(listing)?;

    let format = list_format(global, &config);
    if format == OutputFormat::Json {
        return print_json(&created);
    }
    if format == OutputFormat::Id {
        println!("{}", created.id);
        return Ok(());
    }

    print_success(
        global.quiet,
        &format!(
            "Created food listing {} {} x{} (expires {})",
            style(created.id).cyan(),
            style(&created.name).yellow(),
            created.quantity,
            created.expiry_date
        ),
    );
    Ok(())
}

fn listing_from_args(args: NewArgs) -> Result<NewFoodListing> {
    Ok(NewFoodListing {
        name: args.name.ok_or_else(|| missing_option("--name"))?,
        quantity: args.quantity.ok_or_else(|| missing_option("--quantity"))?,
        expiry_date: args.expiry.ok_or_else(|| missing_option("--expiry"))?,
        provider_id: args.provider_id.ok_or_else(|| missing_option("--provider-id"))?,
        provider_type: args.provider_type.ok_or_else(|| missing_option("--provider-type"))?,
        location: args.location.ok_or_else(|| missing_option("--location"))?,
        food_type: args.food_type.ok_or_else(|| missing_option("--food-type"))?,
        meal_type: args.meal_type.ok_or_else(|| missing_option("--meal-type"))?,
    })
}

/// Index of `current` in `options`, defaulting to the first entry
fn default_index<T: PartialEq>(options: &[T], current: Option<T>) -> usize {
    current
        .and_then(|c| options.iter().position(|o| *o == c))
        .unwrap_or(0)
}

fn prompt_listing(args: NewArgs, session: &mut Session<SqliteStore>) -> Result<NewFoodListing> {
    let theme = ColorfulTheme::default();
    println!("{} New food listing", style("◆").cyan());

    let name = field_or_prompt(Some(&theme), args.name, "Food name", "--name")?;

    let mut quantity = Input::<i64>::with_theme(&theme)
        .with_prompt("Quantity")
        .validate_with(|q: &i64| if *q >= 1 { Ok(()) } else { Err("quantity must be at least 1") });
    if let Some(q) = args.quantity {
        quantity = quantity.default(q);
    }
    let quantity = quantity.interact_text().into_diagnostic()?;

    let mut expiry = Input::<String>::with_theme(&theme)
        .with_prompt("Expiry date (YYYY-MM-DD)")
        .validate_with(|s: &String| parse_expiry(s).map(|_| ()));
    if let Some(date) = args.expiry {
        expiry = expiry.default(date.format("%Y-%m-%d").to_string());
    }
    let expiry_date = parse_expiry(&expiry.interact_text().into_diagnostic()?)
        .map_err(|e| miette::miette!("{}", e))?;

    let mut provider_id = Input::<i64>::with_theme(&theme).with_prompt("Provider ID");
    if let Some(id) = args.provider_id {
        provider_id = provider_id.default(id);
    }
    let provider_id = provider_id.interact_text().into_diagnostic()?;

    // Offer the known provider's type and city as defaults
    let known = session
        .dataset()?
        .provider(provider_id)
        .map(|p| (p.provider_type.clone(), p.city.clone()));
    let (known_type, known_city) = known.unzip();

    let provider_type = field_or_prompt(
        Some(&theme),
        args.provider_type.or(known_type),
        "Provider type",
        "--provider-type",
    )?;
    let location = field_or_prompt(Some(&theme), args.location.or(known_city), "Location", "--location")?;

    let food_type = FoodType::ALL[Select::with_theme(&theme)
        .with_prompt("Food type")
        .items(&FoodType::ALL)
        .default(default_index(&FoodType::ALL, args.food_type))
        .interact()
        .into_diagnostic()?];

    let meal_type = MealType::ALL[Select::with_theme(&theme)
        .with_prompt("Meal type")
        .items(&MealType::ALL)
        .default(default_index(&MealType::ALL, args.meal_type))
        .interact()
        .into_diagnostic()?];

    Ok(NewFoodListing {
        name,
        quantity,
        expiry_date,
        provider_id,
        provider_type,
        location,
        food_type,
        meal_type,
    })
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let mut session = open_session(global, &config)?;

    let rows = session.delete_food(args.id)?;
    if report_affected(rows, "food listing", args.id, global.quiet) {
        print_success(
            global.quiet,
            &format!("Deleted food listing {}", style(args.id).cyan()),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> NewArgs {
        NewArgs {
            name: Some("Rice".to_string()),
            quantity: Some(10),
            expiry: NaiveDate::from_ymd_opt(2025, 3, 20),
            provider_id: Some(1),
            provider_type: Some("Restaurant".to_string()),
            location: Some("Springfield".to_string()),
            food_type: Some(FoodType::Vegan),
            meal_type: Some(MealType::Lunch),
            interactive: false,
        }
    }

    #[test]
    fn test_listing_from_args() {
        let listing = listing_from_args(args()).unwrap();
        assert_eq!(listing.name, "Rice");
        assert_eq!(listing.food_type, FoodType::Vegan);
        assert_eq!(listing.meal_type, MealType::Lunch);
    }

    #[test]
    fn test_listing_from_args_reports_missing_flag() {
        let mut incomplete = args();
        incomplete.meal_type = None;
        let err = listing_from_args(incomplete).unwrap_err();
        assert!(err.to_string().contains("--meal-type"));
    }

    #[test]
    fn test_parse_expiry() {
        assert_eq!(parse_expiry("2025-03-20"), Ok(NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()));
        assert!(parse_expiry("tomorrow").is_err());
    }

    #[test]
    fn test_default_index() {
        assert_eq!(default_index(&MealType::ALL, Some(MealType::Dinner)), 2);
        assert_eq!(default_index(&MealType::ALL, None), 0);
    }

    #[test]
    fn test_list_filter_is_case_insensitive() {
        assert!(matches(&Some("springfield".to_string()), "Springfield"));
        assert!(matches(&None, "anything"));
        assert!(!matches(&Some("Lunch".to_string()), "Dinner"));
    }
}
