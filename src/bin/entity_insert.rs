//! `entity-insert` – insert an entity together with its taxonomy
//! classifications. The conservation code and every rank label resolve
//! against existing rows, and the whole flow runs in one transaction.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use taxorec::config::Settings;
use taxorec::dispatch::{TaxonomyPair, insert_entity};
use taxorec::error::Result;
use taxorec::persist::Store;

#[derive(Parser, Debug)]
#[command(
    name = "entity-insert",
    about = "Insert an entity and its taxonomy into the database"
)]
struct Cli {
    /// The entity's common name (if any, otherwise its genus-species name)
    #[arg(value_name = "NAME")]
    name: String,
    /// Estimated population of this entity
    #[arg(short = 'p', long = "pop", value_name = "POPEST")]
    pop_est: Option<i64>,
    /// Conservation status, as a 2-character code
    #[arg(short = 'c', long = "conservation", value_name = "CONS_CD")]
    cons_cd: Option<String>,
    /// The entity's taxonomy, each rank label and its value joined by an
    /// equals sign
    #[arg(
        short = 't',
        long = "taxonomy",
        value_name = "LABEL=VALUE",
        num_args = 1..
    )]
    taxonomy: Vec<TaxonomyPair>,
    /// Database file, overriding the configured path
    #[arg(long = "db", value_name = "PATH")]
    db: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load()?;
    let path = cli.db.unwrap_or_else(|| PathBuf::from(settings.database));
    let store = Store::open(&path)?;
    store.ensure_schema()?;
    insert_entity(
        &store,
        &cli.name,
        cli.cons_cd.as_deref(),
        cli.pop_est,
        &cli.taxonomy,
    )?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(%e, "insert failed");
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
