//! Error types.

/// Errors raised by the result repositories.
///
/// These are propagated to the caller unchanged; nothing is retried.
#[derive(thiserror::Error, Debug)]
pub enum RepositoryError {
    #[error("SQLite query failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("problem reading TSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid SQL identifier: {0:?}")]
    InvalidIdentifier(String),
    #[error("invalid value in column {column}: {value}")]
    InvalidValue { column: String, value: String },
}

/// Errors raised when building results for one phecode.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("no association records for phecode {phecode:?}")]
    EmptyDataset { phecode: String },
    #[error("no phenotype information for phecode {phecode:?}")]
    PhenotypeNotFound { phecode: String },
    #[error("invalid genome-wide significance threshold {value}, must be positive")]
    InvalidThreshold { value: f64 },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("problem writing output: {0}")]
    Output(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
