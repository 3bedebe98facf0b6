//! Budget module (planned vs executed spend).
//!
//! Pure domain logic only: records come in as in-memory slices, results go out
//! as plain values. The reference year is always an argument.

pub mod records;
pub mod report;
pub mod variance;

pub use records::{BudgetLine, TransactionRecord, TransactionType};
pub use report::{ReportError, filter_categories, write_csv};
pub use variance::{
    GlobalSummary, MonthlyExecution, VarianceAnalyzer, VarianceResult, compare_by_category,
    global_summary, monthly_breakdown,
};
