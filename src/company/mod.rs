//! Company state records: balance sheet, line fleet, workforce, and decisions

mod balance_sheet;
mod fleet;
mod workforce;
mod decisions;
pub mod initial;
pub mod loader;

pub use balance_sheet::BalanceSheet;
pub use fleet::{FleetAging, LineFleet};
pub use workforce::Workforce;
pub use decisions::{DecisionSchedule, YearDecisions};
pub use initial::{initial_balance_sheet, initial_fleet, initial_workforce, INITIAL_WORKERS};
pub use loader::{load_decisions, load_decisions_from_reader};
