//! Explicit analytics configuration.
//!
//! Thresholds are plain values passed into each computation. Nothing here is
//! read from the environment or stored process-wide; a caller builds (or
//! deserializes) one `AnalyticsConfig` per batch and hands it down.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Thresholds used by the parcel health classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthThresholds {
    /// A parcel whose last activity is at most this many days old is `Active`.
    pub active_max_days: i64,
    /// Upper bound (inclusive) for `PendingIntervention`.
    pub pending_max_days: i64,
    /// A harvest at most this many days old marks the parcel `RecentlyHarvested`.
    pub harvest_window_days: i64,
    /// Size of the trailing window counted for `HighTaskLoad`.
    pub task_window_days: i64,
    /// Minimum activity count inside the trailing window for `HighTaskLoad`.
    pub high_task_count: usize,
}

impl Default for HealthThresholds {
    fn default() -> Self {
        Self {
            active_max_days: 5,
            pending_max_days: 10,
            harvest_window_days: 3,
            task_window_days: 3,
            high_task_count: 3,
        }
    }
}

impl HealthThresholds {
    pub fn validate(&self) -> DomainResult<()> {
        if self.active_max_days < 0 {
            return Err(DomainError::validation("active_max_days must be >= 0"));
        }
        if self.pending_max_days < self.active_max_days {
            return Err(DomainError::validation(
                "pending_max_days must be >= active_max_days",
            ));
        }
        if self.harvest_window_days < 0 || self.task_window_days < 0 {
            return Err(DomainError::validation("day windows must be >= 0"));
        }
        if self.high_task_count == 0 {
            return Err(DomainError::validation("high_task_count must be >= 1"));
        }
        Ok(())
    }
}

/// Alerting policy for budget variance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariancePolicy {
    /// A category alerts when `|difference| > alert_ratio * budgeted`.
    pub alert_ratio: f64,
}

impl Default for VariancePolicy {
    fn default() -> Self {
        Self { alert_ratio: 0.15 }
    }
}

impl VariancePolicy {
    pub fn validate(&self) -> DomainResult<()> {
        if !(self.alert_ratio.is_finite() && self.alert_ratio >= 0.0) {
            return Err(DomainError::validation(
                "alert_ratio must be a finite non-negative number",
            ));
        }
        Ok(())
    }

    /// Alert rule shared by the per-category and global comparisons.
    ///
    /// Returns `false` whenever nothing was budgeted, so unbudgeted spend never
    /// alerts under this rule.
    pub fn is_alert(&self, budgeted: f64, difference: f64) -> bool {
        budgeted > 0.0 && difference.abs() > self.alert_ratio * budgeted
    }
}

/// Full configuration for one analytics batch.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub health: HealthThresholds,
    pub variance: VariancePolicy,
}

impl AnalyticsConfig {
    pub fn validate(&self) -> DomainResult<()> {
        self.health.validate()?;
        self.variance.validate()
    }
}
