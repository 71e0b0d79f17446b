//! Year-by-year projection of the company's statements
//!
//! Each year runs capacity planning, the income statement, cash and interest
//! resolution, the closing balance sheet and fleet aging, in that order.

mod capacity;
mod income;
mod cash;
mod closing;
mod state;
mod outputs;
mod engine;

pub use capacity::{plan_capacity, CapacityPlan};
pub use income::{compile_statement, marketing_expense, CompiledStatement, IncomeStatement, InventoryFlow};
pub use cash::{
    debt_repayment, dividends_payable, overdraft_interest, resolve_cash, CashFlowStatement, CashInputs,
    CashResolution,
};
pub use closing::{close_balance_sheet, ensure_balanced};
pub use state::CompanyState;
pub use outputs::{FinancialRatios, FleetFlow, ProjectionResult, YearOutputs, YearSummaryRow};
pub use engine::{ProjectedYear, ProjectionConfig, ProjectionEngine};
