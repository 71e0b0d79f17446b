//! Fixed operating and financing parameters for the projection

mod production;
mod overhead;
mod financing;
pub mod loader;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use production::{ProductionAssumptions, LINE_USEFUL_LIFE_YEARS};
pub use overhead::OverheadAssumptions;
pub use financing::FinancingAssumptions;
pub use loader::{load_assumptions, load_assumptions_from_reader};

/// Combined assumptions used by every projection step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    pub production: ProductionAssumptions,
    pub overhead: OverheadAssumptions,
    pub financing: FinancingAssumptions,
}

impl Assumptions {
    pub fn validate(&self) -> Result<()> {
        self.production.validate()?;
        self.financing.validate()
    }
}
