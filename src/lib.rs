//! Financial Projection - multi-year planning model for a single-product manufacturer
//!
//! This library provides:
//! - Capacity planning for production lines and workers
//! - Income statement, cash flow and balance sheet compilation
//! - Overdraft interest resolution and balance sheet integrity checks
//! - Production line aging over a five-year useful life
//! - CSV decision loading and batch scenario runs

pub mod error;
pub mod assumptions;
pub mod company;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{ProjectionError, Result};
pub use assumptions::Assumptions;
pub use company::{BalanceSheet, DecisionSchedule, LineFleet, Workforce, YearDecisions};
pub use projection::{CompanyState, ProjectionConfig, ProjectionEngine, ProjectionResult, YearOutputs};
pub use scenario::{Scenario, ScenarioOutcome, ScenarioRunner};
