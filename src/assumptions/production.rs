//! Production parameters: unit costs, worker and line capacity, line economics

use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, Result};

/// Number of age buckets a production line passes through before it is scrapped
pub const LINE_USEFUL_LIFE_YEARS: usize = 5;

/// Fixed production parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionAssumptions {
    /// Raw material cost per unit produced
    pub material_cost_per_unit: f64,

    /// Annual cost of one production worker
    pub labor_cost_per_worker: f64,

    /// Units one worker can produce in a year
    pub units_per_worker: f64,

    /// Units one production line can produce in a year
    pub units_per_line: f64,

    /// Purchase price of a new production line (paid in full the year it is bought)
    pub cost_per_line: f64,

    /// Straight-line depreciation charged per line in service per year
    pub depreciation_per_line: f64,
}

impl Default for ProductionAssumptions {
    fn default() -> Self {
        Self {
            material_cost_per_unit: 18.0,
            labor_cost_per_worker: 18_000.0,
            units_per_worker: 2_000.0,
            units_per_line: 10_000.0,
            cost_per_line: 50_000.0,
            depreciation_per_line: 10_000.0, // 50k over a 5-year life
        }
    }
}

impl ProductionAssumptions {
    /// Labor cost absorbed by one unit of output (9.0 with the default figures)
    pub fn labor_cost_per_unit(&self) -> f64 {
        self.labor_cost_per_worker / self.units_per_worker
    }

    /// Unit cost used for cost of goods: material only
    pub fn cogs_unit_cost(&self) -> f64 {
        self.material_cost_per_unit
    }

    /// Full absorption cost used to value finished goods: material + labor
    pub fn inventory_unit_cost(&self) -> f64 {
        self.material_cost_per_unit + self.labor_cost_per_unit()
    }

    /// Capacity of `lines` production lines
    pub fn line_capacity(&self, lines: u32) -> f64 {
        lines as f64 * self.units_per_line
    }

    /// Capacity of `workers` production workers
    pub fn worker_capacity(&self, workers: u32) -> f64 {
        workers as f64 * self.units_per_worker
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("units_per_worker", self.units_per_worker),
            ("units_per_line", self.units_per_line),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ProjectionError::InvalidAssumption { field, value });
            }
        }

        let non_negative = [
            ("material_cost_per_unit", self.material_cost_per_unit),
            ("labor_cost_per_worker", self.labor_cost_per_worker),
            ("cost_per_line", self.cost_per_line),
            ("depreciation_per_line", self.depreciation_per_line),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ProjectionError::InvalidAssumption { field, value });
            }
        }
        Ok(())
    }
}
