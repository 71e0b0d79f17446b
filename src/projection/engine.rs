//! Year driver: runs the projection steps for one year and threads the
//! resulting state into the next

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::capacity::plan_capacity;
use super::cash::{resolve_cash, CashInputs};
use super::closing::{close_balance_sheet, ensure_balanced};
use super::income::compile_statement;
use super::outputs::{FinancialRatios, FleetFlow, ProjectionResult, YearOutputs};
use super::state::CompanyState;
use crate::assumptions::Assumptions;
use crate::company::{DecisionSchedule, YearDecisions};
use crate::error::Result;

/// Run-level settings chosen by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Number of years to project
    pub projection_years: u32,

    /// 1-based year in which the scheduled debt repayment falls (None = never)
    pub debt_repayment_year: Option<u32>,

    /// Number shown in the label of the first projected year
    pub first_year_number: u32,

    /// Prefix of year labels ("X" gives X7, X8, ...)
    pub year_label_prefix: String,

    /// Allowed relative gap between assets and liabilities + equity
    pub balance_tolerance: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            projection_years: 5,
            debt_repayment_year: Some(2),
            first_year_number: 7,
            year_label_prefix: "X".to_string(),
            balance_tolerance: 0.001,
        }
    }
}

/// One projected year and the state it hands to the next
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedYear {
    pub outputs: YearOutputs,
    pub next_state: CompanyState,
}

/// Projection engine for a single company
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(assumptions: Assumptions, config: ProjectionConfig) -> Self {
        Self { assumptions, config }
    }

    /// Display label for a 1-based year index
    pub fn year_label(&self, year_index: u32) -> String {
        format!(
            "{}{}",
            self.config.year_label_prefix,
            self.config.first_year_number + year_index.saturating_sub(1)
        )
    }

    /// Project a single year from `state`.
    ///
    /// Order: capacity, income statement, cash and interest, closing balance
    /// sheet, fleet aging. Lines are scrapped only after the year's capacity
    /// has been decided.
    pub fn project_year(
        &self,
        year_index: u32,
        state: &CompanyState,
        decisions: &YearDecisions,
    ) -> Result<ProjectedYear> {
        decisions.validate(year_index)?;
        let label = self.year_label(year_index);
        let prod = &self.assumptions.production;
        let opening = &state.balance_sheet;
        debug!("[{}] Projecting year {} from {} lines", label, year_index, state.fleet.total());

        let plan = plan_capacity(decisions.target_production, &state.fleet, state.workforce, prod)?;

        let compiled = compile_statement(&plan, opening, decisions, &self.assumptions);

        let repayment_due = self.config.debt_repayment_year == Some(year_index);
        let resolution = resolve_cash(&CashInputs {
            opening,
            compiled: &compiled,
            investment: plan.investment,
            dividend_request: decisions.dividend_request,
            repayment_due,
            financing: &self.assumptions.financing,
        });

        let closing = close_balance_sheet(opening, &plan, &compiled, &resolution, &self.assumptions.financing);
        ensure_balanced(&closing, &label, self.config.balance_tolerance)?;

        let aging = state.fleet.age_one_year(plan.lines_purchased);
        if aging.scrapped > 0 {
            debug!("[{}] {} lines scrapped at year end", label, aging.scrapped);
        }

        let fleet_flow = FleetFlow {
            opening_composition: state.fleet.lines_by_age(),
            opening_lines: plan.opening_lines,
            opening_capacity: plan.opening_line_capacity,
            purchased: plan.lines_purchased,
            capacity_purchased: prod.line_capacity(plan.lines_purchased),
            capacity_during_year: plan.line_capacity,
            scrapped: aging.scrapped,
            capacity_scrapped: prod.line_capacity(aging.scrapped),
            ending_lines: aging.fleet.total(),
            capacity_next_year: prod.line_capacity(aging.fleet.total()),
            closing_composition: aging.fleet.lines_by_age(),
        };

        info!(
            "[{}] revenue={:.0} ebit={:.0} net_income={:.0} ending_net_cash={:.0}",
            label,
            resolution.income.sales_revenue,
            resolution.income.ebit,
            resolution.income.net_income,
            resolution.cash_flow.ending_net_cash
        );

        if closing.bank_overdraft > 0.0 {
            warn!("[{}] Year closes in overdraft of {:.2}", label, closing.bank_overdraft);
        }

        let outputs = YearOutputs {
            year_index,
            label,
            production: plan.production,
            workers: plan.workforce.workers(),
            workers_hired: plan.workers_hired,
            ratios: FinancialRatios::from_balance_sheet(&closing),
            income: resolution.income,
            cash_flow: resolution.cash_flow,
            closing_balance_sheet: closing.clone(),
            fleet_flow,
            inventory_flow: compiled.inventory,
        };

        Ok(ProjectedYear {
            outputs,
            next_state: CompanyState::new(closing, aging.fleet, plan.workforce),
        })
    }

    /// Project `projection_years` consecutive years from `initial`
    pub fn project(&self, initial: &CompanyState, schedule: &DecisionSchedule) -> Result<ProjectionResult> {
        self.assumptions.validate()?;

        let mut state = initial.clone();
        let mut years = Vec::with_capacity(self.config.projection_years as usize);

        for year_index in 1..=self.config.projection_years {
            let decisions = schedule.for_year(year_index)?;
            let projected = self.project_year(year_index, &state, decisions)?;
            years.push(projected.outputs);
            state = projected.next_state;
        }

        Ok(ProjectionResult {
            years,
            final_state: state,
        })
    }
}
