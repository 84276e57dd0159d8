use crate::domain::denomination::DenominationTable;
use crate::domain::ports::DenominationSource;
use crate::error::{CalculatorError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

/// One `currency,denomination` row.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct DenominationRecord {
    pub currency: String,
    pub denomination: Decimal,
}

/// Reads denomination records from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over `Result<DenominationRecord>`.
/// Whitespace around fields is trimmed.
pub struct DenominationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> DenominationReader<R> {
    /// Creates a new `DenominationReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes records.
    pub fn records(self) -> impl Iterator<Item = Result<DenominationRecord>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CalculatorError::from))
    }

    /// Collects every record into a table.
    ///
    /// Rows of one currency may be interleaved with others; currencies keep the
    /// order in which they first appear, denominations the order of their rows.
    pub fn into_table(self) -> Result<DenominationTable> {
        let mut grouped: Vec<(String, Vec<Decimal>)> = Vec::new();
        for record in self.records() {
            let record = record?;
            match grouped.iter_mut().find(|(code, _)| *code == record.currency) {
                Some((_, values)) => values.push(record.denomination),
                None => grouped.push((record.currency, vec![record.denomination])),
            }
        }

        let mut table = DenominationTable::new();
        for (currency, values) in grouped {
            table.insert(&currency, values)?;
        }
        Ok(table)
    }
}

/// A denomination table stored as a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvDenominationFile {
    path: PathBuf,
}

impl CsvDenominationFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DenominationSource for CsvDenominationFile {
    fn load(&self) -> Result<DenominationTable> {
        let file = File::open(&self.path)?;
        let table = DenominationReader::new(file).into_table()?;
        info!(
            path = %self.path.display(),
            currencies = table.len(),
            "loaded denomination table"
        );
        Ok(table)
    }
}
