//! Parcel health module.
//!
//! Maps each parcel's activity history to a set of status labels, and reduces
//! many label sets to dashboard display buckets. Pure functions only: the
//! reference instant is always an argument, never sampled from a clock here.

pub mod activity;
pub mod classifier;
pub mod label;
pub mod summary;

pub use activity::{ActivityRecord, ActivityType, parse_timestamp};
pub use classifier::{classify, classify_with, evaluate_parcels, evaluate_parcels_with};
pub use label::{StatusLabel, StatusLabelSet};
pub use summary::{DisplayCategory, StatusSummary, classify_display, summarize};
