//! Reduction of per-parcel label sets into dashboard display buckets.

use serde::{Deserialize, Serialize};

use agrolytics_core::{ParcelId, ValueObject, round2};

use crate::label::{StatusLabel, StatusLabelSet};

/// Dashboard-facing reduction of a label set.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayCategory {
    Optimal,
    Attention,
    Critical,
}

impl DisplayCategory {
    /// Traffic-light colour used by maps and dashboards.
    pub fn color(&self) -> &'static str {
        match self {
            DisplayCategory::Optimal => "green",
            DisplayCategory::Attention => "yellow",
            DisplayCategory::Critical => "red",
        }
    }
}

impl core::fmt::Display for DisplayCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            DisplayCategory::Optimal => "Optimal",
            DisplayCategory::Attention => "Attention",
            DisplayCategory::Critical => "Critical",
        };
        f.write_str(s)
    }
}

// First match wins; order matters (an inactive parcel is critical even if it
// also carries other labels).
const DISPLAY_RULES: [(StatusLabel, DisplayCategory); 3] = [
    (StatusLabel::Inactive, DisplayCategory::Critical),
    (StatusLabel::PendingIntervention, DisplayCategory::Attention),
    (StatusLabel::Active, DisplayCategory::Optimal),
];

const FALLBACK_CATEGORY: DisplayCategory = DisplayCategory::Attention;

/// Reduce a single parcel's labels to its display category.
pub fn classify_display(labels: &StatusLabelSet) -> DisplayCategory {
    DISPLAY_RULES
        .iter()
        .find(|(label, _)| labels.contains(*label))
        .map(|(_, category)| *category)
        .unwrap_or(FALLBACK_CATEGORY)
}

/// Parcel counts per display category.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusSummary {
    pub optimal: usize,
    pub attention: usize,
    pub critical: usize,
}

impl ValueObject for StatusSummary {}

impl StatusSummary {
    pub fn count(&self, category: DisplayCategory) -> usize {
        match category {
            DisplayCategory::Optimal => self.optimal,
            DisplayCategory::Attention => self.attention,
            DisplayCategory::Critical => self.critical,
        }
    }

    pub fn total(&self) -> usize {
        self.optimal + self.attention + self.critical
    }

    /// Percentage of parcels in `category`, rounded to 2 decimals (0 when empty).
    pub fn share(&self, category: DisplayCategory) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        round2(self.count(category) as f64 * 100.0 / total as f64)
    }

    fn record(&mut self, category: DisplayCategory) {
        match category {
            DisplayCategory::Optimal => self.optimal += 1,
            DisplayCategory::Attention => self.attention += 1,
            DisplayCategory::Critical => self.critical += 1,
        }
    }
}

/// Count parcels per display category.
///
/// Accepts any map of parcel → labels (`&BTreeMap`, `&HashMap`, ...). The
/// three counts always sum to the number of parcels.
pub fn summarize<'a, I>(labels_by_parcel: I) -> StatusSummary
where
    I: IntoIterator<Item = (&'a ParcelId, &'a StatusLabelSet)>,
{
    let mut summary = StatusSummary::default();
    for (_, labels) in labels_by_parcel {
        summary.record(classify_display(labels));
    }
    summary
}
