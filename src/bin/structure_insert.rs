//! `structure-insert` – insert one structure record (rank, field, genus type
//! or suffix) into the taxonomy database, with upsert semantics on the
//! record's natural key.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use taxorec::config::Settings;
use taxorec::dispatch::insert_record;
use taxorec::error::Result;
use taxorec::persist::Store;
use taxorec::record::Record;
use taxorec::validate::{ArgSet, RawArgs, RecordKind};

#[derive(Parser, Debug)]
#[command(
    name = "structure-insert",
    about = "Insert a structure record into the taxonomy database"
)]
struct Cli {
    /// Type of record being inserted: RANK, FIELD, GENUSTYPE, SUFFIX or ENTITY
    #[arg(value_name = "TYPE")]
    kind: String,
    /// Primary value of the record ("name" for RANK, FIELD and GENUSTYPE,
    /// "suffix" for SUFFIX)
    #[arg(value_name = "VALUE")]
    value: String,
    /// Label of the record (for RANK)
    #[arg(short = 'l', long = "label", value_name = "LABEL")]
    label: Option<String>,
    /// Rank id of the record (for SUFFIX)
    #[arg(short = 'r', long = "rankid", value_name = "RANKID")]
    rank_id: Option<i64>,
    /// Genus type id of the record (for SUFFIX)
    #[arg(short = 'g', long = "genusid", value_name = "GENUSTYPEID")]
    genus_id: Option<i64>,
    /// Field id of the record (for RANK)
    #[arg(short = 'f', long = "fieldid", value_name = "FIELDID")]
    field_id: Option<i64>,
    /// Whether this rank is one of the main divisions of life (for RANK)
    #[arg(
        short = 'm',
        long = "ismain",
        value_name = "ISMAIN",
        value_parser = clap::value_parser!(i64).range(0..=1)
    )]
    is_main: Option<i64>,
    /// Relative index of this rank, for testing whether two ranks are
    /// synonymous (for RANK)
    #[arg(short = 'i', long = "index", value_name = "INDEX")]
    rel_index: Option<i64>,
    /// Database file, overriding the configured path
    #[arg(long = "db", value_name = "PATH")]
    db: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<()> {
    let kind: RecordKind = cli.kind.parse()?;
    let raw = RawArgs {
        value: Some(cli.value.to_uppercase()),
        label: cli.label,
        is_main: cli.is_main,
        rel_index: cli.rel_index,
        field_id: cli.field_id,
        rank_id: cli.rank_id,
        genus_type_id: cli.genus_id,
    };
    let args = ArgSet::filter(kind, &raw);
    args.validate()?;
    let record = Record::build(kind, &args)?;

    let settings = Settings::load()?;
    let path = cli.db.unwrap_or_else(|| PathBuf::from(settings.database));
    let store = Store::open(&path)?;
    store.ensure_schema()?;
    insert_record(&store, &record)
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
