//! Load assumption overrides from a JSON file
//!
//! Any field left out of the file keeps its default value, so a file holding
//! only `{"financing": {"tax_rate": 0.33}}` is a valid override.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::info;

use super::Assumptions;
use crate::error::Result;

/// Load assumptions from a JSON file and validate them
pub fn load_assumptions<P: AsRef<Path>>(path: P) -> Result<Assumptions> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let assumptions = load_assumptions_from_reader(BufReader::new(file))?;
    info!("Loaded assumptions from {}", path.display());
    Ok(assumptions)
}

/// Load assumptions from any JSON reader and validate them
pub fn load_assumptions_from_reader<R: Read>(reader: R) -> Result<Assumptions> {
    let assumptions: Assumptions = serde_json::from_reader(reader)?;
    assumptions.validate()?;
    Ok(assumptions)
}
