//! Runtime configuration for the command-line tools.

use serde::Deserialize;

use crate::error::Result;

/// Settings resolved from defaults, an optional `taxorec.toml` in the working
/// directory, and `TAXOREC_*` environment variables, in that order. The
/// `--db` flag on either binary overrides the resolved path.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Path of the SQLite database file.
    pub database: String,
}

impl Settings {
    pub fn load() -> Result<Settings> {
        let cfg = config::Config::builder()
            .set_default("database", "taxonomy.db")?
            .add_source(config::File::with_name("taxorec").required(false))
            .add_source(config::Environment::with_prefix("TAXOREC"))
            .build()?;
        Ok(cfg.try_deserialize()?)
    }
}
