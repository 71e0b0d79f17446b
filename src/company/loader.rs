//! Load a decision schedule from CSV
//!
//! Expected header:
//! `year,price,target_production,sales_fraction,marketing_fraction,dividend_request`
//!
//! `year` is the 1-based projection year. Rows may appear in any order but
//! must cover consecutive years starting at 1. Years after the last row are
//! filled by carrying the last row forward with no dividend request.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use super::{DecisionSchedule, YearDecisions};
use crate::error::{ProjectionError, Result};

#[derive(Debug, Deserialize)]
struct DecisionRecord {
    year: u32,
    price: f64,
    target_production: f64,
    sales_fraction: f64,
    marketing_fraction: f64,
    dividend_request: f64,
}

impl From<DecisionRecord> for YearDecisions {
    fn from(record: DecisionRecord) -> Self {
        YearDecisions {
            price: record.price,
            target_production: record.target_production,
            sales_fraction: record.sales_fraction,
            marketing_fraction: record.marketing_fraction,
            dividend_request: record.dividend_request,
        }
    }
}

/// Load decisions from a CSV file, extended to `years` years
pub fn load_decisions<P: AsRef<Path>>(path: P, years: u32) -> Result<DecisionSchedule> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let schedule = load_decisions_from_reader(file, years)?;
    info!("Loaded {} years of decisions from {}", schedule.len(), path.display());
    Ok(schedule)
}

/// Load decisions from any CSV reader, extended to `years` years
pub fn load_decisions_from_reader<R: Read>(reader: R, years: u32) -> Result<DecisionSchedule> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut records: Vec<DecisionRecord> = Vec::new();
    for result in rdr.deserialize() {
        records.push(result?);
    }
    records.sort_by_key(|r| r.year);

    for (idx, record) in records.iter().enumerate() {
        let expected = idx as u32 + 1;
        if record.year != expected {
            return Err(ProjectionError::MissingDecisions { year: expected });
        }
    }

    let supplied = records.len();
    let mut schedule = DecisionSchedule::new(records.into_iter().map(YearDecisions::from).collect());
    if supplied == 0 && years > 0 {
        return Err(ProjectionError::MissingDecisions { year: 1 });
    }
    schedule.extend_to(years);
    if schedule.len() > supplied {
        debug!("Carried decisions forward from year {} to year {}", supplied, schedule.len());
    }

    schedule.validate()?;
    Ok(schedule)
}
