use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaxorecError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Unknown record type '{0}'")]
    UnknownType(String),
    #[error("Missing required field '{field}' for {kind}")]
    MissingField { kind: &'static str, field: &'static str },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Statement error: {0}")]
    Statement(String),
    #[error("No {entity} found for '{key}'")]
    LookupMiss { entity: &'static str, key: String },
}

pub type Result<T> = std::result::Result<T, TaxorecError>;

impl TaxorecError {
    /// Process exit code for the CLI surfaces: 2 for anything the caller can
    /// fix in the invocation, 3 for storage-side failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_)
            | Self::UnknownType(_)
            | Self::MissingField { .. }
            | Self::InvalidArgument(_) => 2,
            Self::Connection(_) | Self::Statement(_) | Self::LookupMiss { .. } => 3,
        }
    }
}

// Helper conversions
impl From<rusqlite::Error> for TaxorecError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Statement(e.to_string())
    }
}

impl From<config::ConfigError> for TaxorecError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
