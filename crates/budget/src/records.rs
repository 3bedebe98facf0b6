use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use agrolytics_core::{ParcelId, ValueObject};

/// Planned spend for one category in one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub year: i32,
    /// Opaque category name; never validated against a fixed list.
    pub category: String,
    #[serde(default)]
    pub parcel_id: Option<ParcelId>,
    pub estimated_amount: f64,
}

impl ValueObject for BudgetLine {}

impl BudgetLine {
    pub fn new(year: i32, category: impl Into<String>, estimated_amount: f64) -> Self {
        Self {
            year,
            category: category.into(),
            parcel_id: None,
            estimated_amount,
        }
    }

    pub fn for_parcel(mut self, parcel_id: ParcelId) -> Self {
        self.parcel_id = Some(parcel_id);
        self
    }

    pub(crate) fn matches(&self, year: i32, parcel_id: Option<ParcelId>) -> bool {
        self.year == year && parcel_id.is_none_or(|p| self.parcel_id == Some(p))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

/// Executed financial movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    pub amount: f64,
    pub parcel_id: ParcelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ValueObject for TransactionRecord {}

impl TransactionRecord {
    pub fn expense(
        date: NaiveDate,
        category: impl Into<String>,
        amount: f64,
        parcel_id: ParcelId,
    ) -> Self {
        Self {
            date,
            transaction_type: TransactionType::Expense,
            category: category.into(),
            amount,
            parcel_id,
            description: None,
        }
    }

    pub fn income(
        date: NaiveDate,
        category: impl Into<String>,
        amount: f64,
        parcel_id: ParcelId,
    ) -> Self {
        Self {
            transaction_type: TransactionType::Income,
            ..Self::expense(date, category, amount, parcel_id)
        }
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// Expense in `year`, optionally restricted to one parcel.
    pub(crate) fn is_expense_in(&self, year: i32, parcel_id: Option<ParcelId>) -> bool {
        self.is_expense()
            && self.date.year() == year
            && parcel_id.is_none_or(|p| self.parcel_id == p)
    }
}
