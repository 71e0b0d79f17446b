//! Opening position of the reference case (end of year X6)

use super::{BalanceSheet, LineFleet, Workforce};

/// Production workers employed at the start of the first projected year
pub const INITIAL_WORKERS: u32 = 50;

/// Balance sheet at the end of year X6
pub fn initial_balance_sheet() -> BalanceSheet {
    BalanceSheet {
        cash: 70_000.0,
        accounts_receivable: 350_000.0,
        finished_goods_units: 5_000.0,
        finished_goods_value: 135_000.0, // 5,000 units at 27
        raw_materials_units: 10_000.0,
        raw_materials_value: 180_000.0, // 10,000 units at 18
        gross_fixed_assets: 450_000.0,
        accumulated_depreciation: 240_000.0,
        accounts_payable: 235_000.0,
        income_tax_payable: 60_000.0,
        bank_overdraft: 0.0,
        long_term_debt: 200_000.0,
        capital_stock: 250_000.0,
        retained_earnings: 110_000.0,
        net_income_previous_year: 90_000.0,
    }
}

/// Fleet at the end of year X6: nine lines, two of them in their final year
pub fn initial_fleet() -> LineFleet {
    LineFleet::new([0, 1, 3, 3, 2])
}

pub fn initial_workforce() -> Workforce {
    Workforce::new(INITIAL_WORKERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_composition() {
        assert_eq!(initial_fleet().total(), 9);
        assert_eq!(initial_workforce().workers(), 50);

        let bs = initial_balance_sheet();
        // Cash and overdraft are never both positive
        assert!(bs.cash == 0.0 || bs.bank_overdraft == 0.0);
    }
}
