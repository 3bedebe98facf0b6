//! Budget-vs-actual variance analysis.
//!
//! Amounts accumulate at full precision and are rounded to 2 decimals only in
//! the returned results.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use agrolytics_core::{ParcelId, ValueObject, VariancePolicy, round2};

use crate::records::{BudgetLine, TransactionRecord};

/// Planned vs executed spend for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarianceResult {
    pub category: String,
    pub budgeted_amount: f64,
    pub executed_amount: f64,
    /// `budgeted_amount - executed_amount`; positive means under budget.
    pub difference: f64,
    pub alert: bool,
}

impl ValueObject for VarianceResult {}

/// Planned vs executed spend across all categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalSummary {
    pub budget_total: f64,
    pub executed_total: f64,
    pub difference_total: f64,
    pub global_alert: bool,
}

impl ValueObject for GlobalSummary {}

/// Executed spend for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyExecution {
    /// 1..=12
    pub month: u32,
    pub executed_amount: f64,
}

impl ValueObject for MonthlyExecution {}

/// Variance analysis with an explicit alert policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct VarianceAnalyzer {
    policy: VariancePolicy,
}

impl VarianceAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: VariancePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Per-category comparison over the union of budgeted and spent categories.
    ///
    /// Results are ordered by category name.
    pub fn compare_by_category(
        &self,
        budgets: &[BudgetLine],
        transactions: &[TransactionRecord],
        year: i32,
        parcel_id: Option<ParcelId>,
    ) -> Vec<VarianceResult> {
        // category -> (budgeted, executed)
        let mut totals: BTreeMap<&str, (f64, f64)> = BTreeMap::new();

        for line in budgets.iter().filter(|b| b.matches(year, parcel_id)) {
            totals.entry(line.category.as_str()).or_default().0 += line.estimated_amount;
        }
        for tx in transactions.iter().filter(|t| t.is_expense_in(year, parcel_id)) {
            totals.entry(tx.category.as_str()).or_default().1 += tx.amount;
        }

        let results: Vec<VarianceResult> = totals
            .into_iter()
            .map(|(category, (budgeted, executed))| {
                let difference = budgeted - executed;
                VarianceResult {
                    category: category.to_string(),
                    budgeted_amount: round2(budgeted),
                    executed_amount: round2(executed),
                    difference: round2(difference),
                    alert: self.policy.is_alert(budgeted, difference),
                }
            })
            .collect();

        tracing::debug!(
            year,
            parcel = ?parcel_id,
            categories = results.len(),
            alerts = results.iter().filter(|r| r.alert).count(),
            "computed category variance"
        );

        results
    }

    /// One comparison over the totals of every category.
    pub fn global_summary(
        &self,
        budgets: &[BudgetLine],
        transactions: &[TransactionRecord],
        year: i32,
        parcel_id: Option<ParcelId>,
    ) -> GlobalSummary {
        let budget_total: f64 = budgets
            .iter()
            .filter(|b| b.matches(year, parcel_id))
            .map(|b| b.estimated_amount)
            .sum();
        let executed_total: f64 = transactions
            .iter()
            .filter(|t| t.is_expense_in(year, parcel_id))
            .map(|t| t.amount)
            .sum();
        let difference = budget_total - executed_total;

        GlobalSummary {
            budget_total: round2(budget_total),
            executed_total: round2(executed_total),
            difference_total: round2(difference),
            global_alert: self.policy.is_alert(budget_total, difference),
        }
    }

    /// Executed spend per calendar month, ascending; months without spend are absent.
    pub fn monthly_breakdown(
        &self,
        transactions: &[TransactionRecord],
        year: i32,
        category: Option<&str>,
        parcel_id: Option<ParcelId>,
    ) -> Vec<MonthlyExecution> {
        let mut by_month: BTreeMap<u32, f64> = BTreeMap::new();

        for tx in transactions
            .iter()
            .filter(|t| t.is_expense_in(year, parcel_id))
            .filter(|t| category.is_none_or(|c| t.category == c))
        {
            *by_month.entry(tx.date.month()).or_default() += tx.amount;
        }

        by_month
            .into_iter()
            .map(|(month, executed)| MonthlyExecution {
                month,
                executed_amount: round2(executed),
            })
            .collect()
    }
}

/// [`VarianceAnalyzer::compare_by_category`] with the default 15% policy.
pub fn compare_by_category(
    budgets: &[BudgetLine],
    transactions: &[TransactionRecord],
    year: i32,
    parcel_id: Option<ParcelId>,
) -> Vec<VarianceResult> {
    VarianceAnalyzer::new().compare_by_category(budgets, transactions, year, parcel_id)
}

/// [`VarianceAnalyzer::global_summary`] with the default 15% policy.
pub fn global_summary(
    budgets: &[BudgetLine],
    transactions: &[TransactionRecord],
    year: i32,
    parcel_id: Option<ParcelId>,
) -> GlobalSummary {
    VarianceAnalyzer::new().global_summary(budgets, transactions, year, parcel_id)
}

pub fn monthly_breakdown(
    transactions: &[TransactionRecord],
    year: i32,
    category: Option<&str>,
    parcel_id: Option<ParcelId>,
) -> Vec<MonthlyExecution> {
    VarianceAnalyzer::new().monthly_breakdown(transactions, year, category, parcel_id)
}
