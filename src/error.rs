//! Error type shared by the assumptions, company and projection modules

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectionError {
    /// A decision input outside its permitted domain, rejected before it reaches the engine
    #[error("year {year}: invalid decision `{field}` = {value}")]
    InvalidDecision {
        year: u32,
        field: &'static str,
        value: f64,
    },

    #[error("invalid assumption `{field}` = {value}")]
    InvalidAssumption { field: &'static str, value: f64 },

    /// Total assets and total liabilities + equity disagree beyond tolerance.
    /// This is an engine defect, never a user error.
    #[error("year {year}: balance sheet does not balance (assets {assets:.2}, liabilities + equity {liabilities_and_equity:.2})")]
    Unbalanced {
        year: String,
        assets: f64,
        liabilities_and_equity: f64,
    },

    /// Lines or workers needed for the target exceed what the counters can hold
    #[error("{resource} needed for a target of {target_production} units is out of range")]
    CapacityOutOfRange {
        resource: &'static str,
        target_production: f64,
    },

    #[error("no decisions supplied for year {year}")]
    MissingDecisions { year: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
