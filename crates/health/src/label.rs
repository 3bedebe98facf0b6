use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use agrolytics_core::ValueObject;

/// One aspect of a parcel's operational state at evaluation time.
///
/// The declaration order is the output order: the recency label first, then
/// the secondary labels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatusLabel {
    Active,
    PendingIntervention,
    Inactive,
    RecentlyHarvested,
    HighTaskLoad,
    HasProductivity,
}

impl StatusLabel {
    pub const ALL: [StatusLabel; 6] = [
        StatusLabel::Active,
        StatusLabel::PendingIntervention,
        StatusLabel::Inactive,
        StatusLabel::RecentlyHarvested,
        StatusLabel::HighTaskLoad,
        StatusLabel::HasProductivity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLabel::Active => "Active",
            StatusLabel::PendingIntervention => "PendingIntervention",
            StatusLabel::Inactive => "Inactive",
            StatusLabel::RecentlyHarvested => "RecentlyHarvested",
            StatusLabel::HighTaskLoad => "HighTaskLoad",
            StatusLabel::HasProductivity => "HasProductivity",
        }
    }

    /// True for the three mutually exclusive recency labels.
    pub fn is_recency(&self) -> bool {
        matches!(
            self,
            StatusLabel::Active | StatusLabel::PendingIntervention | StatusLabel::Inactive
        )
    }
}

impl core::fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered set of labels for one parcel at one evaluation instant.
///
/// Serializes as a JSON array of tag strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusLabelSet(BTreeSet<StatusLabel>);

impl ValueObject for StatusLabelSet {}

impl StatusLabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: StatusLabel) -> bool {
        self.0.insert(label)
    }

    pub fn contains(&self, label: StatusLabel) -> bool {
        self.0.contains(&label)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = StatusLabel> + '_ {
        self.0.iter().copied()
    }

    /// The recency label, if one was assigned.
    pub fn recency(&self) -> Option<StatusLabel> {
        self.iter().find(StatusLabel::is_recency)
    }
}

impl FromIterator<StatusLabel> for StatusLabelSet {
    fn from_iter<T: IntoIterator<Item = StatusLabel>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[StatusLabel; N]> for StatusLabelSet {
    fn from(labels: [StatusLabel; N]) -> Self {
        labels.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a StatusLabelSet {
    type Item = StatusLabel;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, StatusLabel>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().copied()
    }
}
