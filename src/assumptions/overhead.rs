//! Fixed period costs that do not depend on volume

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverheadAssumptions {
    /// Administrative salaries, charged to personnel expense
    pub admin_salaries: f64,
    pub factory_rent: f64,
    pub property_tax: f64,
    pub audit_fees: f64,
}

impl Default for OverheadAssumptions {
    fn default() -> Self {
        Self {
            admin_salaries: 300_000.0,
            factory_rent: 300_000.0,
            property_tax: 40_000.0,
            audit_fees: 0.0,
        }
    }
}

impl OverheadAssumptions {
    /// External expenses: rent + property tax + audit fee
    pub fn external_expenses(&self) -> f64 {
        self.factory_rent + self.property_tax + self.audit_fees
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_expenses() {
        let overhead = OverheadAssumptions::default();
        assert_eq!(overhead.external_expenses(), 340_000.0);

        let audited = OverheadAssumptions {
            audit_fees: 15_000.0,
            ..Default::default()
        };
        assert_eq!(audited.external_expenses(), 355_000.0);
    }
}
