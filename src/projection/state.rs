//! State carried from one year to the next

use serde::{Deserialize, Serialize};

use crate::company::{initial_balance_sheet, initial_fleet, initial_workforce, BalanceSheet, LineFleet, Workforce};

/// Balance sheet, fleet and workforce at a year boundary.
///
/// Each projected year consumes one snapshot and produces a new one; nothing
/// is mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyState {
    pub balance_sheet: BalanceSheet,
    pub fleet: LineFleet,
    pub workforce: Workforce,
}

impl CompanyState {
    pub fn new(balance_sheet: BalanceSheet, fleet: LineFleet, workforce: Workforce) -> Self {
        Self {
            balance_sheet,
            fleet,
            workforce,
        }
    }

    /// Opening position of the reference case
    pub fn initial() -> Self {
        Self::new(initial_balance_sheet(), initial_fleet(), initial_workforce())
    }
}
