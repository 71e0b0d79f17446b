//! Income statement through EBIT, plus the inventory movements behind it
//!
//! Finished goods are valued at full absorption cost (material + labor per
//! unit) while raw materials are valued at material cost. Operating revenue
//! is sales plus the change in finished-goods value, so units produced but
//! not sold still count toward the year's result.

use log::debug;
use serde::{Deserialize, Serialize};

use super::capacity::CapacityPlan;
use crate::assumptions::{Assumptions, FinancingAssumptions};
use crate::company::{BalanceSheet, YearDecisions};

/// Income statement line items.
///
/// Lines below EBIT are zero until [`IncomeStatement::with_financial_charges`]
/// finalizes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
    pub sales_revenue: f64,
    /// Closing minus opening finished-goods value
    pub finished_goods_change: f64,
    pub operating_revenue: f64,

    pub material_expense: f64,
    pub personnel_expense: f64,
    pub external_expense: f64,
    pub marketing_expense: f64,
    pub depreciation_expense: f64,
    pub operating_expense: f64,
    pub ebit: f64,

    pub financial_charges: f64,
    pub ebt: f64,
    pub income_tax: f64,
    pub net_income: f64,
}

impl IncomeStatement {
    /// Complete the statement below EBIT for the given financial charges
    pub fn with_financial_charges(&self, financial_charges: f64, financing: &FinancingAssumptions) -> Self {
        let ebt = self.ebit - financial_charges;
        let income_tax = financing.income_tax(ebt);
        Self {
            financial_charges,
            ebt,
            income_tax,
            net_income: ebt - income_tax,
            ..self.clone()
        }
    }
}

/// Unit movements of finished goods and raw materials over the year
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryFlow {
    pub finished_opening: f64,
    pub finished_produced: f64,
    pub finished_sold: f64,
    pub finished_closing: f64,
    pub finished_closing_value: f64,

    pub materials_opening: f64,
    pub materials_purchased: f64,
    pub materials_used: f64,
    pub materials_closing: f64,
    pub materials_closing_value: f64,
}

/// Output of the statement compiler
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledStatement {
    pub income: IncomeStatement,
    pub inventory: InventoryFlow,
    /// Units sold (continuous quantity)
    pub sales_volume: f64,
    /// Cost of raw materials bought this year
    pub material_purchases: f64,
}

/// Marketing spend that makes up `fraction` of total cost including itself.
///
/// Solves marketing = fraction * (cost_base + marketing). A fraction of 1 or
/// more has no solution; marketing then equals the cost base.
pub fn marketing_expense(cost_base: f64, fraction: f64) -> f64 {
    if fraction < 1.0 {
        cost_base * fraction / (1.0 - fraction)
    } else {
        cost_base
    }
}

/// Compile the income statement through EBIT
pub fn compile_statement(
    plan: &CapacityPlan,
    opening: &BalanceSheet,
    decisions: &YearDecisions,
    assumptions: &Assumptions,
) -> CompiledStatement {
    let prod = &assumptions.production;
    let production = plan.production;

    // Sales
    let available = opening.finished_goods_units + production;
    let sales_volume = available * decisions.sales_fraction;
    let sales_revenue = sales_volume * decisions.price;
    debug!(
        "Sales: available={:.0}, sold={:.0} ({:.0}%), revenue={:.2}",
        available,
        sales_volume,
        decisions.sales_fraction * 100.0,
        sales_revenue
    );

    // Finished goods
    let finished_closing = available - sales_volume;
    let finished_closing_value = finished_closing * prod.inventory_unit_cost();
    let finished_goods_change = finished_closing_value - opening.finished_goods_value;
    let operating_revenue = sales_revenue + finished_goods_change;

    // Raw materials: draw from stock first, buy the shortfall
    let material_unit_cost = prod.cogs_unit_cost();
    let materials_used = production;
    let materials_purchased = (materials_used - opening.raw_materials_units).max(0.0);
    let material_purchases = materials_purchased * material_unit_cost;
    let materials_closing = opening.raw_materials_units - materials_used + materials_purchased;
    let materials_closing_value = materials_closing * material_unit_cost;
    let material_expense = material_purchases + (opening.raw_materials_value - materials_closing_value);

    let personnel_expense =
        plan.workforce.workers() as f64 * prod.labor_cost_per_worker + assumptions.overhead.admin_salaries;
    let external_expense = assumptions.overhead.external_expenses();
    let depreciation_expense = plan.lines_in_service as f64 * prod.depreciation_per_line;

    let cost_base = material_expense + personnel_expense + external_expense + depreciation_expense;
    let marketing = marketing_expense(cost_base, decisions.marketing_fraction);

    let operating_expense = cost_base + marketing;
    let ebit = operating_revenue - operating_expense;

    let income = IncomeStatement {
        sales_revenue,
        finished_goods_change,
        operating_revenue,
        material_expense,
        personnel_expense,
        external_expense,
        marketing_expense: marketing,
        depreciation_expense,
        operating_expense,
        ebit,
        ..Default::default()
    };

    let inventory = InventoryFlow {
        finished_opening: opening.finished_goods_units,
        finished_produced: production,
        finished_sold: sales_volume,
        finished_closing,
        finished_closing_value,
        materials_opening: opening.raw_materials_units,
        materials_purchased,
        materials_used,
        materials_closing,
        materials_closing_value,
    };

    CompiledStatement {
        income,
        inventory,
        sales_volume,
        material_purchases,
    }
}
