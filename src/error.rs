use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrantError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
    #[error("Transaction failed")]
    TransactionFailed,
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    StorageError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, GrantError>;
