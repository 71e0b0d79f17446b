//! Cash-flow statement and overdraft interest
//!
//! Overdraft interest depends on whether the year ends overdrawn, and the
//! interest is itself a cash outflow of the same year. The resolver runs a
//! tentative pass with no overdraft interest; if that pass ends with a
//! shortfall `s`, the overdraft must fund both the shortfall and its own
//! interest, so the draw `d` satisfies `d = s + r * d` and the interest is
//! `r * d = s * r / (1 - r)`. A final pass then rebuilds the statement with
//! the full financial charges.
//!
//! The correction is applied once. Tax on the final EBT is only paid next
//! year, so it does not feed back into this year's cash.

use log::debug;
use serde::{Deserialize, Serialize};

use super::income::{CompiledStatement, IncomeStatement};
use crate::assumptions::FinancingAssumptions;
use crate::company::BalanceSheet;

/// Cash-flow statement for one year.
///
/// Individual inflow and outflow lines are positive amounts; the section
/// totals (operating, investing, financing, net) are signed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashFlowStatement {
    /// Opening cash minus opening overdraft
    pub opening_net_cash: f64,

    /// Prior-year receivables collected this year
    pub collections_prior_year: f64,
    /// Share of current-year sales collected this year
    pub collections_current_year: f64,

    /// Prior-year payables settled this year
    pub payables_paid: f64,
    /// Share of current-year material purchases paid this year
    pub purchases_paid_current: f64,
    pub personnel_paid: f64,
    pub external_and_marketing_paid: f64,
    pub interest_paid: f64,
    /// Prior-year income tax settled this year
    pub taxes_paid: f64,
    pub total_operating_outflow: f64,

    pub operating_cash_flow: f64,
    pub investing_cash_flow: f64,

    pub dividends_paid: f64,
    pub debt_repaid: f64,
    pub financing_cash_flow: f64,

    pub net_cash_flow: f64,
    pub ending_net_cash: f64,
}

/// Everything the resolver needs about the year
#[derive(Debug, Clone, Copy)]
pub struct CashInputs<'a> {
    pub opening: &'a BalanceSheet,
    pub compiled: &'a CompiledStatement,
    /// Cash spent on new lines
    pub investment: f64,
    pub dividend_request: f64,
    /// Whether this is the scheduled debt-repayment year
    pub repayment_due: bool,
    pub financing: &'a FinancingAssumptions,
}

/// Finalized income statement and cash flows
#[derive(Debug, Clone, PartialEq)]
pub struct CashResolution {
    pub income: IncomeStatement,
    pub cash_flow: CashFlowStatement,
    pub debt_interest: f64,
    pub overdraft_interest: f64,
    /// Ending net cash of the pass without overdraft interest
    pub tentative_ending_net_cash: f64,
}

/// Interest on an overdraft that must also fund its own interest.
/// Zero when there is no shortfall.
pub fn overdraft_interest(shortfall: f64, rate: f64) -> f64 {
    if shortfall <= 0.0 {
        return 0.0;
    }
    shortfall * rate / (1.0 - rate)
}

/// Dividends actually paid: never more than the prior year's net income.
/// After a loss year the amount is negative and flows back into cash.
pub fn dividends_payable(request: f64, prior_net_income: f64) -> f64 {
    request.min(prior_net_income)
}

/// Lump-sum debt repayment for the year
pub fn debt_repayment(opening_debt: f64, scheduled: f64, due: bool) -> f64 {
    if due {
        opening_debt.min(scheduled).max(0.0)
    } else {
        0.0
    }
}

fn build_cash_flow(
    inputs: &CashInputs<'_>,
    interest_paid: f64,
    dividends_paid: f64,
    debt_repaid: f64,
) -> CashFlowStatement {
    let opening = inputs.opening;
    let income = &inputs.compiled.income;
    let fin = inputs.financing;

    let opening_net_cash = opening.net_cash();

    let collections_prior_year = opening.accounts_receivable;
    let collections_current_year = income.sales_revenue * fin.sales_collected_same_year;

    let payables_paid = opening.accounts_payable;
    let purchases_paid_current = inputs.compiled.material_purchases * fin.purchases_paid_same_year;
    let personnel_paid = income.personnel_expense;
    let external_and_marketing_paid = income.external_expense + income.marketing_expense;
    let taxes_paid = opening.income_tax_payable;

    let total_operating_outflow = payables_paid
        + purchases_paid_current
        + personnel_paid
        + external_and_marketing_paid
        + interest_paid
        + taxes_paid;

    let operating_cash_flow = collections_prior_year + collections_current_year - total_operating_outflow;
    let investing_cash_flow = -inputs.investment;
    let financing_cash_flow = -dividends_paid - debt_repaid;
    let net_cash_flow = operating_cash_flow + investing_cash_flow + financing_cash_flow;

    CashFlowStatement {
        opening_net_cash,
        collections_prior_year,
        collections_current_year,
        payables_paid,
        purchases_paid_current,
        personnel_paid,
        external_and_marketing_paid,
        interest_paid,
        taxes_paid,
        total_operating_outflow,
        operating_cash_flow,
        investing_cash_flow,
        dividends_paid,
        debt_repaid,
        financing_cash_flow,
        net_cash_flow,
        ending_net_cash: opening_net_cash + net_cash_flow,
    }
}

/// Resolve financial charges, finalize the income statement and build the
/// cash-flow statement
pub fn resolve_cash(inputs: &CashInputs<'_>) -> CashResolution {
    let opening = inputs.opening;
    let fin = inputs.financing;

    let debt_interest = opening.long_term_debt * fin.debt_interest_rate;
    let dividends_paid = dividends_payable(inputs.dividend_request, opening.net_income_previous_year);
    let debt_repaid = debt_repayment(opening.long_term_debt, fin.scheduled_repayment, inputs.repayment_due);
    if debt_repaid > 0.0 {
        debug!("Repaying {:.0} of long-term debt", debt_repaid);
    }
    if dividends_paid < inputs.dividend_request {
        debug!(
            "Dividend request {:.0} capped at {:.0} by prior-year net income",
            inputs.dividend_request, dividends_paid
        );
    }

    let tentative = build_cash_flow(inputs, debt_interest, dividends_paid, debt_repaid);
    let tentative_ending_net_cash = tentative.ending_net_cash;

    let overdraft_interest = overdraft_interest(-tentative_ending_net_cash, fin.overdraft_interest_rate);
    if overdraft_interest > 0.0 {
        debug!(
            "Shortfall {:.2} before overdraft interest; overdraft interest {:.2}",
            -tentative_ending_net_cash, overdraft_interest
        );
    }

    let income = inputs
        .compiled
        .income
        .with_financial_charges(debt_interest + overdraft_interest, fin);
    let cash_flow = build_cash_flow(inputs, income.financial_charges, dividends_paid, debt_repaid);

    CashResolution {
        income,
        cash_flow,
        debt_interest,
        overdraft_interest,
        tentative_ending_net_cash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::Assumptions;
    use crate::company::{initial_balance_sheet, initial_fleet, initial_workforce, YearDecisions};
    use crate::projection::capacity::plan_capacity;
    use crate::projection::income::compile_statement;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    struct Year {
        opening: BalanceSheet,
        compiled: CompiledStatement,
        investment: f64,
        assumptions: Assumptions,
    }

    fn year(opening: BalanceSheet, decisions: &YearDecisions) -> Year {
        let assumptions = Assumptions::default();
        let plan = plan_capacity(
            decisions.target_production,
            &initial_fleet(),
            initial_workforce(),
            &assumptions.production,
        ).unwrap();
        let compiled = compile_statement(&plan, &opening, decisions, &assumptions);
        Year {
            opening,
            compiled,
            investment: plan.investment,
            assumptions,
        }
    }

    fn resolve(y: &Year, dividend_request: f64, repayment_due: bool) -> CashResolution {
        resolve_cash(&CashInputs {
            opening: &y.opening,
            compiled: &y.compiled,
            investment: y.investment,
            dividend_request,
            repayment_due,
            financing: &y.assumptions.financing,
        })
    }

    #[test]
    fn test_overdraft_interest_closed_form() {
        assert_relative_eq!(overdraft_interest(10_000.0, 0.10), 1_111.111_111, max_relative = 1e-9);
        assert_eq!(overdraft_interest(0.0, 0.10), 0.0);
        assert_eq!(overdraft_interest(-5_000.0, 0.10), 0.0);
    }

    #[test]
    fn test_dividend_cap() {
        assert_eq!(dividends_payable(12_500.0, 90_000.0), 12_500.0);
        assert_eq!(dividends_payable(150_000.0, 90_000.0), 90_000.0);
        assert_eq!(dividends_payable(0.0, 90_000.0), 0.0);
    }

    #[test]
    fn test_dividends_after_loss_year() {
        assert_eq!(dividends_payable(10_000.0, -40_000.0), -40_000.0);
        assert_eq!(dividends_payable(0.0, -40_000.0), -40_000.0);

        let mut opening = initial_balance_sheet();
        opening.net_income_previous_year = -40_000.0;
        opening.retained_earnings += 130_000.0;
        let y = year(opening, &YearDecisions::default());
        let res = resolve(&y, 12_500.0, false);

        assert_eq!(res.cash_flow.dividends_paid, -40_000.0);
        assert_eq!(res.cash_flow.financing_cash_flow, 40_000.0);
    }

    #[test]
    fn test_debt_repayment_only_when_due() {
        assert_eq!(debt_repayment(200_000.0, 200_000.0, false), 0.0);
        assert_eq!(debt_repayment(200_000.0, 200_000.0, true), 200_000.0);
        assert_eq!(debt_repayment(120_000.0, 200_000.0, true), 120_000.0);
        assert_eq!(debt_repayment(0.0, 200_000.0, true), 0.0);
    }

    #[test]
    fn test_reference_year_one_cash_flow() {
        let y = year(initial_balance_sheet(), &YearDecisions::default());
        let res = resolve(&y, 12_500.0, false);
        let cf = &res.cash_flow;

        assert_eq!(res.debt_interest, 16_000.0);
        assert_eq!(res.overdraft_interest, 0.0);
        assert_eq!(res.income.financial_charges, 16_000.0);
        assert_eq!(res.income.income_tax, 174_000.0);

        assert_eq!(cf.opening_net_cash, 70_000.0);
        assert_eq!(cf.collections_prior_year, 350_000.0);
        assert_relative_eq!(cf.collections_current_year, 3_748_500.0, max_relative = 1e-12);
        assert_relative_eq!(cf.purchases_paid_current, 1_458_000.0, max_relative = 1e-12);
        assert_relative_eq!(cf.total_operating_outflow, 3_691_222.222_222, max_relative = 1e-9);
        assert_relative_eq!(cf.operating_cash_flow, 407_277.777_778, max_relative = 1e-9);
        assert_eq!(cf.investing_cash_flow, -50_000.0);
        assert_eq!(cf.dividends_paid, 12_500.0);
        assert_eq!(cf.financing_cash_flow, -12_500.0);
        assert_relative_eq!(cf.ending_net_cash, 414_777.777_778, max_relative = 1e-9);
    }

    #[test]
    fn test_repayment_enters_financing() {
        let y = year(initial_balance_sheet(), &YearDecisions::default());
        let res = resolve(&y, 0.0, true);

        assert_eq!(res.cash_flow.debt_repaid, 200_000.0);
        assert_eq!(res.cash_flow.dividends_paid, 0.0);
        assert_eq!(res.cash_flow.financing_cash_flow, -200_000.0);
        // Interest is charged on the opening balance, before repayment
        assert_eq!(res.debt_interest, 16_000.0);
    }

    #[test]
    fn test_overdraft_reconciles() {
        // Strip the opening cash and receivables so the year ends overdrawn
        let mut opening = initial_balance_sheet();
        opening.cash = 0.0;
        opening.accounts_receivable = 0.0;
        let decisions = YearDecisions { price: 30.0, ..Default::default() };
        let y = year(opening, &decisions);
        let res = resolve(&y, 0.0, false);

        let shortfall = -res.tentative_ending_net_cash;
        assert!(shortfall > 0.0);

        let rate = y.assumptions.financing.overdraft_interest_rate;
        assert_relative_eq!(res.overdraft_interest, shortfall * rate / (1.0 - rate), max_relative = 1e-12);
        assert_relative_eq!(
            res.income.financial_charges,
            res.debt_interest + res.overdraft_interest,
            max_relative = 1e-12
        );

        // The overdraft funds the shortfall plus its own interest, and the
        // interest is exactly the overdraft rate on that balance
        let overdraft = -res.cash_flow.ending_net_cash;
        assert_relative_eq!(overdraft, shortfall / (1.0 - rate), max_relative = 1e-9);
        assert_relative_eq!(res.overdraft_interest, overdraft * rate, max_relative = 1e-9);
        assert_abs_diff_eq!(
            res.cash_flow.opening_net_cash + res.cash_flow.net_cash_flow,
            -overdraft,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_loss_year_pays_no_tax() {
        let decisions = YearDecisions { price: 30.0, ..Default::default() };
        let y = year(initial_balance_sheet(), &decisions);
        let res = resolve(&y, 0.0, false);

        assert!(res.income.ebt < 0.0);
        assert_eq!(res.income.income_tax, 0.0);
        assert_eq!(res.income.net_income, res.income.ebt);
    }
}
