// src/lib.rs

pub mod changes;
pub mod chart;
pub mod classifier;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod source;
pub mod timestamp;

use crate::changes::PercentageChanges;
use crate::classifier::{JumpCountTable, JumpCounter, JumpRange};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::models::PriceObservation;
use crate::source::PriceSource;

use std::io::Read;
use tracing::{debug, info, warn};

/// Streams observations through the change builder into the classifier.
///
/// The first error (bad row, zero price) aborts the run; no partial table is
/// returned.
pub fn analyze_observations<I>(observations: I, ranges: &[JumpRange]) -> Result<JumpCountTable>
where
    I: IntoIterator<Item = Result<PriceObservation>>,
{
    let mut counter = JumpCounter::new(ranges);
    let mut first_error = None;
    let mut rows = 0usize;

    // Prices are pulled lazily; a row error is parked and ends the stream.
    let prices = observations.into_iter().map_while(|obs| match obs {
        Ok(obs) => {
            rows += 1;
            Some(obs.price)
        }
        Err(e) => {
            first_error = Some(e);
            None
        }
    });

    for change in PercentageChanges::new(prices) {
        let change = change?;
        debug!("Change: {:+.4}%", change);
        counter.record(change);
    }

    if let Some(e) = first_error {
        return Err(e);
    }

    let table = counter.finish();
    info!(
        "Processed {} observations: {} classified, {} outside all ranges",
        rows,
        table.total(),
        table.unclassified()
    );
    Ok(table)
}

/// Classifies a plain price sequence.
pub fn analyze_prices(prices: &[f64], ranges: &[JumpRange]) -> Result<JumpCountTable> {
    let changes = changes::percentage_changes(prices)?;
    Ok(classifier::count_jumps(changes, ranges))
}

/// Runs the pipeline over CSV data from any reader.
pub fn analyze_reader<R: Read>(reader: R, cfg: &AnalysisConfig) -> Result<JumpCountTable> {
    let source = PriceSource::from_reader(reader, &cfg.timestamp_column, &cfg.price_column)?;
    analyze_observations(source, &cfg.ranges)
}

/// Reads `cfg.input`, classifies every daily change and, when `cfg.output`
/// is set, writes the chart image there.
pub fn run(cfg: &AnalysisConfig) -> Result<JumpCountTable> {
    cfg.validate()?;
    info!("Reading price history from {:?}", cfg.input);

    let source = PriceSource::from_path(&cfg.input, &cfg.timestamp_column, &cfg.price_column)?;
    let table = analyze_observations(source, &cfg.ranges)?;

    if table.unclassified() > 0 {
        warn!(
            "{} daily changes exceeded every configured range and were not counted",
            table.unclassified()
        );
    }

    if let Some(output) = &cfg.output {
        chart::write_svg(&table, &cfg.asset, output)?;
    }
    Ok(table)
}
