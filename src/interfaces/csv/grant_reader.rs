use crate::error::{GrantError, Result};
use serde::Deserialize;
use std::io::Read;

/// One row of a batch grant file.
///
/// The amount stays a raw string here; parsing and normalization belong to
/// the engine so batch rows fail with the same error kinds as single grants.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct GrantRecord {
    pub player: u64,
    pub name: String,
    pub amount: String,
    pub currency: Option<String>,
}

/// Reads grant rows from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over
/// `Result<GrantRecord>`. It handles whitespace trimming and flexible
/// record lengths automatically.
pub struct GrantReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> GrantReader<R> {
    /// Creates a new `GrantReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes grant rows.
    ///
    /// This allows for processing large files in a streaming fashion without
    /// loading the entire dataset into memory.
    pub fn grants(self) -> impl Iterator<Item = Result<GrantRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(GrantError::from))
    }
}
