//! CSV price source.
//!
//! Reads a comma-delimited file with a header row and yields one
//! [`PriceObservation`] per data row, in file order. Rows are assumed to be
//! sorted oldest first; nothing here reorders them.

use csv::{Reader, StringRecord, StringRecordsIntoIter};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{AnalysisError, Result};
use crate::models::{PriceObservation, PriceRecord};

pub struct PriceSource<R> {
    records: StringRecordsIntoIter<R>,
    timestamp_idx: usize,
    price_idx: usize,
}

impl PriceSource<File> {
    pub fn from_path(path: &Path, timestamp_column: &str, price_column: &str) -> Result<Self> {
        let file = File::open(path).map_err(|e| AnalysisError::io(path, e))?;
        debug!("Opened price history {:?}", path);
        Self::from_reader(file, timestamp_column, price_column)
    }
}

impl<R: Read> PriceSource<R> {
    pub fn from_reader(reader: R, timestamp_column: &str, price_column: &str) -> Result<Self> {
        let mut rdr = Reader::from_reader(reader);
        let headers = rdr.headers()?.clone();

        let column = |name: &str| {
            find_column(&headers, name).ok_or_else(|| AnalysisError::MalformedInput {
                line: 1,
                reason: format!("header has no '{}' column", name),
            })
        };
        let timestamp_idx = column(timestamp_column)?;
        let price_idx = column(price_column)?;

        Ok(Self {
            records: rdr.into_records(),
            timestamp_idx,
            price_idx,
        })
    }
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

impl<R: Read> Iterator for PriceSource<R> {
    type Item = Result<PriceObservation>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.records.next()? {
            Ok(row) => row,
            Err(e) => return Some(Err(e.into())),
        };
        let line = row.position().map_or(0, |p| p.line());
        let record = PriceRecord {
            line,
            timestamp: row.get(self.timestamp_idx),
            price: row.get(self.price_idx),
        };
        Some(PriceObservation::try_from(record))
    }
}
