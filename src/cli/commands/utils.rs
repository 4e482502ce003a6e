//! Shared utilities for command implementations

use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::print_warning;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Session, SqliteStore};

/// Database path: `--db` / `FWMS_DB`, then config, then the default file
pub fn database_path(global: &GlobalOpts, config: &Config) -> PathBuf {
    global.db.clone().unwrap_or_else(|| config.database())
}

/// Open a session over the configured database
pub fn open_session(global: &GlobalOpts, config: &Config) -> Result<Session<SqliteStore>> {
    let path = database_path(global, config);
    log::debug!("using database {}", path.display());
    let store = SqliteStore::open(&path)?;
    Ok(Session::new(store))
}

/// Output format for list-style commands (`auto` becomes the configured default or TSV)
pub fn list_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    global
        .format
        .resolve(config.default_format.as_deref(), OutputFormat::Tsv)
}

/// Warn when an update or delete matched no row
///
/// Returns true if something was changed.
pub fn report_affected(rows: usize, entity: &str, id: i64, quiet: bool) -> bool {
    if rows == 0 {
        print_warning(quiet, &format!("no {} with id {}", entity, id));
        false
    } else {
        true
    }
}

/// Error for a form field that was neither passed nor prompted for
pub fn missing_option(flag: &str) -> miette::Report {
    miette::miette!(
        help = "pass the value or use --interactive to be prompted",
        "missing required option {}",
        flag
    )
}

/// Print a value as pretty JSON
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| miette::miette!("failed to serialize output: {}", e))?;
    println!("{}", json);
    Ok(())
}
