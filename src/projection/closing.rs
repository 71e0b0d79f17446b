//! Closing balance sheet and the balance integrity check

use log::error;

use super::capacity::CapacityPlan;
use super::cash::CashResolution;
use super::income::CompiledStatement;
use crate::assumptions::FinancingAssumptions;
use crate::company::BalanceSheet;
use crate::error::{ProjectionError, Result};

/// Roll the opening balance sheet forward through the year's results
pub fn close_balance_sheet(
    opening: &BalanceSheet,
    plan: &CapacityPlan,
    compiled: &CompiledStatement,
    resolution: &CashResolution,
    financing: &FinancingAssumptions,
) -> BalanceSheet {
    let income = &resolution.income;
    let cash_flow = &resolution.cash_flow;
    let inventory = &compiled.inventory;

    let (cash, bank_overdraft) = BalanceSheet::split_net_cash(cash_flow.ending_net_cash);

    BalanceSheet {
        cash,
        accounts_receivable: financing.closing_receivable(income.sales_revenue),
        finished_goods_units: inventory.finished_closing,
        finished_goods_value: inventory.finished_closing_value,
        raw_materials_units: inventory.materials_closing,
        raw_materials_value: inventory.materials_closing_value,
        gross_fixed_assets: opening.gross_fixed_assets + plan.investment,
        accumulated_depreciation: opening.accumulated_depreciation + income.depreciation_expense,

        accounts_payable: financing.closing_payable(compiled.material_purchases),
        income_tax_payable: income.income_tax,
        bank_overdraft,
        long_term_debt: opening.long_term_debt - cash_flow.debt_repaid,

        capital_stock: opening.capital_stock,
        // Last year's profit is retained net of the dividends paid from it this year
        retained_earnings: opening.retained_earnings + opening.net_income_previous_year - cash_flow.dividends_paid,
        net_income_previous_year: income.net_income,
    }
}

/// Fail loudly if assets and liabilities + equity disagree beyond tolerance
pub fn ensure_balanced(sheet: &BalanceSheet, year: &str, relative_tolerance: f64) -> Result<()> {
    if sheet.is_balanced(relative_tolerance) {
        return Ok(());
    }
    let assets = sheet.total_assets();
    let liabilities_and_equity = sheet.total_liabilities_and_equity();
    error!(
        "[{}] Balance sheet out of balance: assets {:.2} vs liabilities + equity {:.2}",
        year, assets, liabilities_and_equity
    );
    Err(ProjectionError::Unbalanced {
        year: year.to_string(),
        assets,
        liabilities_and_equity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::Assumptions;
    use crate::company::{initial_balance_sheet, initial_fleet, initial_workforce, YearDecisions};
    use crate::projection::capacity::plan_capacity;
    use crate::projection::cash::{resolve_cash, CashInputs};
    use crate::projection::income::compile_statement;
    use approx::assert_relative_eq;

    fn close(opening: &BalanceSheet, decisions: &YearDecisions, repayment_due: bool) -> BalanceSheet {
        let assumptions = Assumptions::default();
        let plan = plan_capacity(
            decisions.target_production,
            &initial_fleet(),
            initial_workforce(),
            &assumptions.production,
        ).unwrap();
        let compiled = compile_statement(&plan, opening, decisions, &assumptions);
        let resolution = resolve_cash(&CashInputs {
            opening,
            compiled: &compiled,
            investment: plan.investment,
            dividend_request: decisions.dividend_request,
            repayment_due,
            financing: &assumptions.financing,
        });
        close_balance_sheet(opening, &plan, &compiled, &resolution, &assumptions.financing)
    }

    #[test]
    fn test_reference_year_one_closing() {
        let closing = close(&initial_balance_sheet(), &YearDecisions::default(), false);

        assert_relative_eq!(closing.cash, 414_777.777_778, max_relative = 1e-9);
        assert_eq!(closing.bank_overdraft, 0.0);
        assert_relative_eq!(closing.accounts_receivable, 661_500.0, max_relative = 1e-12);
        assert_eq!(closing.finished_goods_units, 0.0);
        assert_eq!(closing.raw_materials_units, 0.0);
        assert_eq!(closing.gross_fixed_assets, 500_000.0);
        assert_eq!(closing.accumulated_depreciation, 340_000.0);
        assert_relative_eq!(closing.accounts_payable, 162_000.0, max_relative = 1e-12);
        assert_eq!(closing.income_tax_payable, 174_000.0);
        assert_eq!(closing.long_term_debt, 200_000.0);
        assert_eq!(closing.capital_stock, 250_000.0);
        // 110,000 + 90,000 - 12,500
        assert_eq!(closing.retained_earnings, 187_500.0);
        assert_relative_eq!(closing.net_income_previous_year, 262_777.777_778, max_relative = 1e-9);

        assert_relative_eq!(closing.total_assets(), 1_236_277.777_778, max_relative = 1e-9);
        assert!(ensure_balanced(&closing, "X7", 1e-9).is_ok());
    }

    #[test]
    fn test_overdrawn_year_still_balances() {
        let mut opening = initial_balance_sheet();
        // Move the opening cash into an overdraft, keeping the sheet balanced
        opening.cash = 0.0;
        opening.bank_overdraft = 100_000.0;
        opening.accounts_receivable += 170_000.0;
        let decisions = YearDecisions { price: 30.0, ..Default::default() };
        let closing = close(&opening, &decisions, true);

        assert_eq!(closing.cash, 0.0);
        assert!(closing.bank_overdraft > 0.0);
        assert_eq!(closing.long_term_debt, 0.0);
        assert!(ensure_balanced(&closing, "X8", 1e-9).is_ok());
    }

    #[test]
    fn test_imbalance_is_reported() {
        let mut sheet = initial_balance_sheet();
        sheet.retained_earnings += 50_000.0;

        match ensure_balanced(&sheet, "X9", 0.001) {
            Err(ProjectionError::Unbalanced { year, assets, liabilities_and_equity }) => {
                assert_eq!(year, "X9");
                assert_eq!(assets, 945_000.0);
                assert_eq!(liabilities_and_equity, 995_000.0);
            }
            other => panic!("expected imbalance, got {:?}", other),
        }
    }
}
