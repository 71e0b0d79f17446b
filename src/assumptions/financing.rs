//! Financing terms: interest rates, tax, collection and payment timing
//!
//! Collection and payment fractions describe how much of the current year's
//! sales and purchases settle in cash within the same year. The remainder is
//! carried on the balance sheet as receivables / payables and settles in
//! full the following year.

use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancingAssumptions {
    /// Annual rate on opening long-term debt
    pub debt_interest_rate: f64,

    /// Annual rate on the bank overdraft drawn to cover a year-end shortfall
    pub overdraft_interest_rate: f64,

    /// Corporate income tax rate
    pub tax_rate: f64,

    /// Income tax is truncated down to a multiple of this amount
    pub tax_rounding_step: f64,

    /// Fraction of current-year sales collected in the same year
    pub sales_collected_same_year: f64,

    /// Fraction of current-year material purchases paid in the same year
    pub purchases_paid_same_year: f64,

    /// Lump sum due in the repayment year (capped at the outstanding balance)
    pub scheduled_repayment: f64,
}

impl Default for FinancingAssumptions {
    fn default() -> Self {
        Self {
            debt_interest_rate: 0.08,
            overdraft_interest_rate: 0.10,
            tax_rate: 0.40,
            tax_rounding_step: 1_000.0,
            sales_collected_same_year: 0.85,
            purchases_paid_same_year: 0.90,
            scheduled_repayment: 200_000.0,
        }
    }
}

impl FinancingAssumptions {
    /// Income tax on earnings before tax.
    ///
    /// Truncated down to the rounding step and floored at zero: losses
    /// produce no refund.
    pub fn income_tax(&self, ebt: f64) -> f64 {
        let raw = ebt * self.tax_rate;
        let truncated = if self.tax_rounding_step > 0.0 {
            (raw / self.tax_rounding_step).floor() * self.tax_rounding_step
        } else {
            raw
        };
        truncated.max(0.0)
    }

    /// Receivable left at year end from current-year sales
    pub fn closing_receivable(&self, revenue: f64) -> f64 {
        revenue * (1.0 - self.sales_collected_same_year)
    }

    /// Payable left at year end from current-year purchases
    pub fn closing_payable(&self, purchases: f64) -> f64 {
        purchases * (1.0 - self.purchases_paid_same_year)
    }

    pub fn validate(&self) -> Result<()> {
        let fractions = [
            ("debt_interest_rate", self.debt_interest_rate),
            ("tax_rate", self.tax_rate),
            ("sales_collected_same_year", self.sales_collected_same_year),
            ("purchases_paid_same_year", self.purchases_paid_same_year),
        ];
        for (field, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(ProjectionError::InvalidAssumption { field, value });
            }
        }

        // The overdraft closed form divides by (1 - rate)
        if !(0.0..1.0).contains(&self.overdraft_interest_rate) {
            return Err(ProjectionError::InvalidAssumption {
                field: "overdraft_interest_rate",
                value: self.overdraft_interest_rate,
            });
        }

        let non_negative = [
            ("tax_rounding_step", self.tax_rounding_step),
            ("scheduled_repayment", self.scheduled_repayment),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ProjectionError::InvalidAssumption { field, value });
            }
        }
        Ok(())
    }
}
