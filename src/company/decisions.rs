//! Yearly management decisions and the multi-year schedule that holds them
//!
//! Decisions are validated here, at the boundary, so the engine only ever
//! sees inputs within their permitted domains.

use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, Result};

/// Decisions for a single year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearDecisions {
    /// Unit selling price (> 0)
    pub price: f64,

    /// Units management wants to produce (>= 0). Lines and workers are added
    /// automatically to reach it.
    pub target_production: f64,

    /// Fraction of available finished goods sold, in [0, 1]
    pub sales_fraction: f64,

    /// Marketing as a fraction of total cost including marketing, in [0, 1)
    pub marketing_fraction: f64,

    /// Dividend requested out of the prior year's net income (>= 0)
    pub dividend_request: f64,
}

impl Default for YearDecisions {
    /// First-year decisions of the reference case
    fn default() -> Self {
        Self {
            price: 42.0,
            target_production: 100_000.0,
            sales_fraction: 1.0,
            marketing_fraction: 0.10,
            dividend_request: 12_500.0,
        }
    }
}

impl YearDecisions {
    /// Reject decisions outside their domain. `year` is only used for reporting.
    pub fn validate(&self, year: u32) -> Result<()> {
        let invalid = |field: &'static str, value: f64| ProjectionError::InvalidDecision { year, field, value };

        if !(self.price.is_finite() && self.price > 0.0) {
            return Err(invalid("price", self.price));
        }
        if !(self.target_production.is_finite() && self.target_production >= 0.0) {
            return Err(invalid("target_production", self.target_production));
        }
        if !(0.0..=1.0).contains(&self.sales_fraction) {
            return Err(invalid("sales_fraction", self.sales_fraction));
        }
        if !(0.0..1.0).contains(&self.marketing_fraction) {
            return Err(invalid("marketing_fraction", self.marketing_fraction));
        }
        if !(self.dividend_request.is_finite() && self.dividend_request >= 0.0) {
            return Err(invalid("dividend_request", self.dividend_request));
        }
        Ok(())
    }

    /// Default decisions for the following year: same operating choices,
    /// no dividend request
    pub fn carried_forward(&self) -> Self {
        Self {
            dividend_request: 0.0,
            ..self.clone()
        }
    }
}

/// Decisions for consecutive years, index 0 = year 1
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionSchedule {
    years: Vec<YearDecisions>,
}

impl DecisionSchedule {
    pub fn new(years: Vec<YearDecisions>) -> Self {
        Self { years }
    }

    /// Schedule of `years` years where every year after the first repeats
    /// the prior year's operating decisions with a zero dividend request
    pub fn carry_forward_from(first: YearDecisions, years: u32) -> Self {
        let mut schedule = Self::new(vec![first]);
        schedule.extend_to(years);
        schedule.years.truncate(years as usize);
        schedule
    }

    /// Fill missing trailing years by carrying the last supplied year forward.
    /// An empty schedule stays empty.
    pub fn extend_to(&mut self, years: u32) {
        while self.years.len() < years as usize {
            match self.years.last() {
                Some(last) => {
                    let next = last.carried_forward();
                    self.years.push(next);
                }
                None => break,
            }
        }
    }

    /// Decisions for the 1-based year index
    pub fn for_year(&self, year: u32) -> Result<&YearDecisions> {
        year.checked_sub(1)
            .and_then(|idx| self.years.get(idx as usize))
            .ok_or(ProjectionError::MissingDecisions { year })
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &YearDecisions> {
        self.years.iter()
    }

    /// Validate every year in the schedule
    pub fn validate(&self) -> Result<()> {
        for (idx, decisions) in self.years.iter().enumerate() {
            decisions.validate(idx as u32 + 1)?;
        }
        Ok(())
    }
}
