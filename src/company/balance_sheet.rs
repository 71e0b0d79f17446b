//! Balance sheet snapshot taken at a year boundary

use serde::{Deserialize, Serialize};

/// Opening or closing balance sheet.
///
/// `net_income_previous_year` holds the most recent year's net income: on a
/// closing sheet it is the year just projected, which makes it the "prior
/// year" figure for the next year's dividend cap and retained-earnings carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
    // Assets
    pub cash: f64,
    pub accounts_receivable: f64,
    pub finished_goods_units: f64,
    pub finished_goods_value: f64,
    pub raw_materials_units: f64,
    pub raw_materials_value: f64,
    pub gross_fixed_assets: f64,
    pub accumulated_depreciation: f64,

    // Liabilities
    pub accounts_payable: f64,
    pub income_tax_payable: f64,
    pub bank_overdraft: f64,
    pub long_term_debt: f64,

    // Equity
    pub capital_stock: f64,
    pub retained_earnings: f64,
    pub net_income_previous_year: f64,
}

impl BalanceSheet {
    /// Cash minus overdraft
    pub fn net_cash(&self) -> f64 {
        self.cash - self.bank_overdraft
    }

    /// Split a signed net cash position into cash and overdraft.
    /// At most one of the two is positive.
    pub fn split_net_cash(net_cash: f64) -> (f64, f64) {
        if net_cash >= 0.0 {
            (net_cash, 0.0)
        } else {
            (0.0, -net_cash)
        }
    }

    pub fn net_fixed_assets(&self) -> f64 {
        self.gross_fixed_assets - self.accumulated_depreciation
    }

    pub fn total_current_assets(&self) -> f64 {
        self.raw_materials_value + self.finished_goods_value + self.accounts_receivable + self.cash
    }

    pub fn total_assets(&self) -> f64 {
        self.net_fixed_assets() + self.total_current_assets()
    }

    pub fn total_equity(&self) -> f64 {
        self.capital_stock + self.retained_earnings + self.net_income_previous_year
    }

    pub fn total_current_liabilities(&self) -> f64 {
        self.bank_overdraft + self.accounts_payable + self.income_tax_payable
    }

    pub fn total_liabilities(&self) -> f64 {
        self.long_term_debt + self.total_current_liabilities()
    }

    pub fn total_liabilities_and_equity(&self) -> f64 {
        self.total_liabilities() + self.total_equity()
    }

    /// Whether assets equal liabilities + equity within `relative_tolerance`
    /// of total assets (absolute tolerance when assets are zero)
    pub fn is_balanced(&self, relative_tolerance: f64) -> bool {
        let assets = self.total_assets();
        let diff = (assets - self.total_liabilities_and_equity()).abs();
        let scale = assets.abs();
        if scale > 0.0 {
            diff <= scale * relative_tolerance
        } else {
            diff <= relative_tolerance
        }
    }

    /// Net income over total equity; 0 when equity is 0
    pub fn return_on_equity(&self) -> f64 {
        let equity = self.total_equity();
        if equity != 0.0 {
            self.net_income_previous_year / equity
        } else {
            0.0
        }
    }

    /// Current assets over current liabilities; 0 when there are no current liabilities
    pub fn current_ratio(&self) -> f64 {
        let liabilities = self.total_current_liabilities();
        if liabilities > 0.0 {
            self.total_current_assets() / liabilities
        } else {
            0.0
        }
    }
}
