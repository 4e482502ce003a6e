//! `fwms provider` command - Food provider management

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use miette::{IntoDiagnostic, Result};

use super::utils::{list_format, missing_option, open_session, print_json, report_affected};
use crate::cli::helpers::print_success;
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::entities::{NewProvider, Provider};

#[derive(Subcommand, Debug)]
pub enum ProviderCommands {
    /// List providers with optional filtering
    List(ListArgs),

    /// Add a new provider
    New(NewArgs),

    /// Change a provider's contact details
    UpdateContact(UpdateContactArgs),

    /// Delete a provider
    Delete(DeleteArgs),
}

/// Column definitions for provider list output
pub(crate) const PROVIDER_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 6),
    ColumnDef::new("name", "NAME", 30),
    ColumnDef::new("type", "TYPE", 18),
    ColumnDef::new("address", "ADDRESS", 36),
    ColumnDef::new("city", "CITY", 20),
    ColumnDef::new("contact", "CONTACT", 22),
];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only providers in this city
    #[arg(long)]
    pub city: Option<String>,

    /// Only providers of this type (e.g. Restaurant, Supermarket)
    #[arg(long = "type", short = 't')]
    pub provider_type: Option<String>,

    /// Show count only
    #[arg(long)]
    pub count: bool,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Provider name
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Provider type (e.g. Restaurant, Grocery Store, Supermarket)
    #[arg(long = "type", short = 't')]
    pub provider_type: Option<String>,

    /// Street address
    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub city: Option<String>,

    /// Phone number or email
    #[arg(long)]
    pub contact: Option<String>,

    /// Prompt for each field
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

#[derive(clap::Args, Debug)]
pub struct UpdateContactArgs {
    /// Provider ID
    pub id: i64,

    /// New contact value
    #[arg(long)]
    pub contact: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Provider ID
    pub id: i64,
}

pub fn run(cmd: ProviderCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ProviderCommands::List(args) => run_list(args, global),
        ProviderCommands::New(args) => run_new(args, global),
        ProviderCommands::UpdateContact(args) => run_update_contact(args, global),
        ProviderCommands::Delete(args) => run_delete(args, global),
    }
}

pub(crate) fn provider_to_row(provider: &Provider) -> TableRow {
    TableRow::new(provider.id)
        .cell("id", CellValue::Id(provider.id))
        .cell("name", CellValue::Text(provider.name.clone()))
        .cell("type", CellValue::Type(provider.provider_type.clone()))
        .cell("address", CellValue::Text(provider.address.clone()))
        .cell("city", CellValue::Text(provider.city.clone()))
        .cell("contact", CellValue::Text(provider.contact.clone()))
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let format = list_format(global, &config);
    let mut session = open_session(global, &config)?;
    let dataset = session.dataset()?;

    let providers: Vec<&Provider> = dataset
        .providers
        .iter()
        .filter(|p| {
            args.city
                .as_ref()
                .map_or(true, |city| p.city.eq_ignore_ascii_case(city))
        })
        .filter(|p| {
            args.provider_type
                .as_ref()
                .map_or(true, |t| p.provider_type.eq_ignore_ascii_case(t))
        })
        .collect();

    if args.count {
        println!("{}", providers.len());
        return Ok(());
    }

    if format == OutputFormat::Json {
        return print_json(&providers);
    }

    if providers.is_empty() {
        if !global.quiet {
            println!("No providers found.");
        }
        return Ok(());
    }

    TableFormatter::new(PROVIDER_COLUMNS, "provider")
        .output(providers.into_iter().map(provider_to_row), format);
    Ok(())
}

/// Take a field from the command line, prompting for it in interactive mode
pub(crate) fn field_or_prompt(
    theme: Option<&ColorfulTheme>,
    value: Option<String>,
    prompt: &str,
    flag: &str,
) -> Result<String> {
    match theme {
        Some(theme) => {
            let mut input = Input::<String>::with_theme(theme).with_prompt(prompt);
            if let Some(default) = value {
                input = input.default(default);
            }
            input.interact_text().into_diagnostic()
        }
        None => value.ok_or_else(|| missing_option(flag)),
    }
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let mut session = open_session(global, &config)?;

    let theme = ColorfulTheme::default();
    let theme = args.interactive.then_some(&theme);
    if theme.is_some() {
        println!("{} New provider", style("◆").cyan());
    }

    let provider = NewProvider::new(
        field_or_prompt(theme, args.name, "Name", "--name")?,
        field_or_prompt(theme, args.provider_type, "Type", "--type")?,
        field_or_prompt(theme, args.address, "Address", "--address")?,
        field_or_prompt(theme, args.city, "City", "--city")?,
        field_or_prompt(theme, args.contact, "Contact", "--contact")?,
    );

    let created = session.add_provider(provider)?;

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
            "Created provider {} {}",
            style(created.id).cyan(),
            style(&created.name).yellow()
        ),
    );
    Ok(())
}

fn run_update_contact(args: UpdateContactArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let mut session = open_session(global, &config)?;

    let rows = session.update_provider_contact(args.id, &args.contact)?;
    if report_affected(rows, "provider", args.id, global.quiet) {
        print_success(
            global.quiet,
            &format!(
                "Updated contact of provider {} to {}",
                style(args.id).cyan(),
                style(&args.contact).yellow()
            ),
        );
    }
    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let mut session = open_session(global, &config)?;

    let rows = session.delete_provider(args.id)?;
    if report_affected(rows, "provider", args.id, global.quiet) {
        print_success(
            global.quiet,
            &format!("Deleted provider {}", style(args.id).cyan()),
        );
    }
    Ok(())
}
