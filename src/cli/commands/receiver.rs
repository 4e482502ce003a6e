//! `fwms receiver` command - Receiver listing

use clap::Subcommand;
use miette::Result;

use super::utils::{list_format, open_session, print_json};
use crate::cli::table::{CellValue, ColumnDef, TableFormatter, TableRow};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::entities::Receiver;

#[derive(Subcommand, Debug)]
pub enum ReceiverCommands {
    /// List receivers
    List(ListArgs),
}

const RECEIVER_COLUMNS: &[ColumnDef] = &[
    ColumnDef::new("id", "ID", 6),
    ColumnDef::new("name", "NAME", 30),
    ColumnDef::new("type", "TYPE", 16),
    ColumnDef::new("city", "CITY", 20),
    ColumnDef::new("contact", "CONTACT", 22),
];

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only receivers in this city
    #[arg(long)]
    pub city: Option<String>,

    /// Show count only
    #[arg(long)]
    pub count: bool,
}

pub fn run(cmd: ReceiverCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ReceiverCommands::List(args) => run_list(args, global),
    }
}

fn receiver_to_row(receiver: &Receiver) -> TableRow {
    TableRow::new(receiver.id)
        .cell("id", CellValue::Id(receiver.id))
        .cell("name", CellValue::Text(receiver.name.clone()))
        .cell("type", CellValue::Type(receiver.receiver_type.clone()))
        .cell("city", CellValue::Text(receiver.city.clone()))
        .cell("contact", CellValue::Text(receiver.contact.clone()))
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let format = list_format(global, &config);
    let mut session = open_session(global, &config)?;
    let dataset = session.dataset()?;

    let receivers: Vec<&Receiver> = dataset
        .receivers
        .iter()
        .filter(|r| {
            args.city
                .as_ref()
                .map_or(true, |city| r.city.eq_ignore_ascii_case(city))
        })
        .collect();

    if args.count {
        println!("{}", receivers.len());
        return Ok(());
    }

    if format == OutputFormat::Json {
        return print_json(&receivers);
    }

    if receivers.is_empty() {
        if !global.quiet {
            println!("No receivers found.");
        }
        return Ok(());
    }

    TableFormatter::new(RECEIVER_COLUMNS, "receiver")
        .output(receivers.into_iter().map(receiver_to_row), format);
    Ok(())
}
