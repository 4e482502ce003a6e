//! `fwms init` command - Create the database tables

use console::style;
use miette::Result;

use super::utils::database_path;
use crate::cli::GlobalOpts;
use crate::core::{Config, SqliteStore};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Drop and recreate the tables if they already exist (deletes all rows)
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let path = database_path(global, &config);
    let existed = path.exists();

    let store = SqliteStore::create(&path, args.force)?;

    if global.quiet {
        return Ok(());
    }

    let verb = match (existed, args.force) {
        (true, true) => "Reinitialized",
        (true, false) => "Checked",
        (false, _) => "Initialized",
    };
    println!(
        "{} {} database at {}",
        style("✓").green(),
        verb,
        style(store.path().display()).cyan()
    );
    println!();
    println!("Tables:");
    for (table, rows) in store.table_counts()? {
        println!("  {:<10} {} row(s)", table, style(rows).cyan());
    }
    println!();
    println!("Next steps:");
    println!(
        "  {} Load providers from a CSV export",
        style("fwms import providers providers.csv").yellow()
    );
    println!(
        "  {} Show the dashboard",
        style("fwms dashboard").yellow()
    );

    Ok(())
}
