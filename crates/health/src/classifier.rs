//! Parcel health classification.
//!
//! Both cascades are data: an ordered table of `(predicate, label)` pairs.
//! The recency table is first-match-wins; every matching secondary rule adds
//! its label.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDateTime, NaiveTime, Utc};

use agrolytics_core::{HealthThresholds, ParcelId};

use crate::activity::{ActivityRecord, ActivityType};
use crate::label::{StatusLabel, StatusLabelSet};

/// Facts derived once from a parcel's history; every rule reads only these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ParcelFacts {
    /// Whole days from the latest dated activity to the start of `now`'s day,
    /// floored; negative for records dated after that midnight.
    days_elapsed: i64,
    /// Days since the most recent dated harvest, if any.
    days_since_harvest: Option<i64>,
    /// Dated activities on or after `now.date - task_window_days`.
    recent_task_count: usize,
    has_productive_activity: bool,
}

type RecencyPredicate = fn(i64, &HealthThresholds) -> bool;
type SecondaryPredicate = fn(&ParcelFacts, &HealthThresholds) -> bool;

const RECENCY_RULES: [(RecencyPredicate, StatusLabel); 3] = [
    (within_active_window, StatusLabel::Active),
    (within_pending_window, StatusLabel::PendingIntervention),
    (always, StatusLabel::Inactive),
];

const SECONDARY_RULES: [(SecondaryPredicate, StatusLabel); 3] = [
    (harvested_recently, StatusLabel::RecentlyHarvested),
    (high_task_load, StatusLabel::HighTaskLoad),
    (has_productivity, StatusLabel::HasProductivity),
];

/// Label assigned when no activity carries a usable timestamp.
const EMPTY_HISTORY_LABEL: StatusLabel = StatusLabel::Inactive;

fn within_active_window(days: i64, t: &HealthThresholds) -> bool {
    days <= t.active_max_days
}

fn within_pending_window(days: i64, t: &HealthThresholds) -> bool {
    days <= t.pending_max_days
}

fn always(_: i64, _: &HealthThresholds) -> bool {
    true
}

fn harvested_recently(facts: &ParcelFacts, t: &HealthThresholds) -> bool {
    facts
        .days_since_harvest
        .is_some_and(|days| days <= t.harvest_window_days)
}

fn high_task_load(facts: &ParcelFacts, t: &HealthThresholds) -> bool {
    facts.recent_task_count >= t.high_task_count
}

fn has_productivity(facts: &ParcelFacts, _: &HealthThresholds) -> bool {
    facts.has_productive_activity
}

const SECONDS_PER_DAY: i64 = 86_400;

fn days_since(timestamp: DateTime<Utc>, day_start: NaiveDateTime) -> i64 {
    (day_start - timestamp.naive_utc())
        .num_seconds()
        .div_euclid(SECONDS_PER_DAY)
}

fn derive_facts(
    activities: &[&ActivityRecord],
    now: DateTime<Utc>,
    thresholds: &HealthThresholds,
) -> Option<ParcelFacts> {
    let today = now.date_naive();
    let day_start = today.and_time(NaiveTime::MIN);
    let task_window_start = today - Duration::days(thresholds.task_window_days);

    let dated: Vec<(&ActivityType, DateTime<Utc>)> = activities
        .iter()
        .filter_map(|a| a.timestamp.map(|ts| (&a.activity_type, ts)))
        .collect();

    let last = dated.iter().map(|(_, ts)| *ts).max()?;

    let days_since_harvest = dated
        .iter()
        .filter(|(kind, _)| **kind == ActivityType::Harvest)
        .map(|(_, ts)| *ts)
        .max()
        .map(|ts| days_since(ts, day_start));

    let recent_task_count = dated
        .iter()
        .filter(|(_, ts)| ts.date_naive() >= task_window_start)
        .count();

    // Productivity looks at every record, dated or not.
    let has_productive_activity = activities.iter().any(|a| a.activity_type.is_productive());

    Some(ParcelFacts {
        days_elapsed: days_since(last, day_start),
        days_since_harvest,
        recent_task_count,
        has_productive_activity,
    })
}

fn labels_for(facts: &ParcelFacts, thresholds: &HealthThresholds) -> StatusLabelSet {
    let mut labels = StatusLabelSet::new();

    if let Some((_, label)) = RECENCY_RULES
        .iter()
        .find(|(applies, _)| applies(facts.days_elapsed, thresholds))
    {
        labels.insert(*label);
    }

    for (applies, label) in SECONDARY_RULES.iter() {
        if applies(facts, thresholds) {
            labels.insert(*label);
        }
    }

    labels
}

fn classify_records(
    activities: &[&ActivityRecord],
    now: DateTime<Utc>,
    thresholds: &HealthThresholds,
) -> StatusLabelSet {
    match derive_facts(activities, now, thresholds) {
        Some(facts) => labels_for(&facts, thresholds),
        None => {
            tracing::debug!(
                records = activities.len(),
                "no dated activity; falling back to inactive"
            );
            StatusLabelSet::from([EMPTY_HISTORY_LABEL])
        }
    }
}

/// Classify one parcel's activity history with the default thresholds.
///
/// All records are expected to belong to the same parcel; grouping is the
/// caller's job (see [`evaluate_parcels`]).
pub fn classify(activities: &[ActivityRecord], now: DateTime<Utc>) -> StatusLabelSet {
    classify_with(activities, now, &HealthThresholds::default())
}

/// Classify one parcel's activity history with explicit thresholds.
pub fn classify_with(
    activities: &[ActivityRecord],
    now: DateTime<Utc>,
    thresholds: &HealthThresholds,
) -> StatusLabelSet {
    let refs: Vec<&ActivityRecord> = activities.iter().collect();
    classify_records(&refs, now, thresholds)
}

/// Group a mixed collection by parcel and classify every group against the same `now`.
pub fn evaluate_parcels(
    activities: &[ActivityRecord],
    now: DateTime<Utc>,
) -> BTreeMap<ParcelId, StatusLabelSet> {
    evaluate_parcels_with(activities, now, &HealthThresholds::default())
}

pub fn evaluate_parcels_with(
    activities: &[ActivityRecord],
    now: DateTime<Utc>,
    thresholds: &HealthThresholds,
) -> BTreeMap<ParcelId, StatusLabelSet> {
    let mut by_parcel: BTreeMap<ParcelId, Vec<&ActivityRecord>> = BTreeMap::new();
    for activity in activities {
        by_parcel.entry(activity.parcel_id).or_default().push(activity);
    }

    let evaluated: BTreeMap<ParcelId, StatusLabelSet> = by_parcel
        .into_iter()
        .map(|(parcel_id, records)| (parcel_id, classify_records(&records, now, thresholds)))
        .collect();

    tracing::debug!(
        parcels = evaluated.len(),
        records = activities.len(),
        now = %now,
        "evaluated parcel health"
    );

    evaluated
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    const PARCEL: ParcelId = ParcelId::new(1);

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 14, 0, 0).unwrap()
    }

    /// Midnight `days` days before `now`'s date.
    fn days_ago(days: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap() - Duration::days(days)
    }

    /// A June 2025 instant.
    fn june(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, hour, 0, 0).unwrap()
    }

    fn activity_at(kind: &str, at: DateTime<Utc>) -> ActivityRecord {
        ActivityRecord::new(PARCEL, kind, at, "")
    }

    fn facts(records: &[ActivityRecord]) -> ParcelFacts {
        let refs: Vec<&ActivityRecord> = records.iter().collect();
        derive_facts(&refs, now(), &HealthThresholds::default()).unwrap()
    }

    fn activity(kind: &str, days: i64) -> ActivityRecord {
        ActivityRecord::new(PARCEL, kind, days_ago(days), "")
    }

    #[test]
    fn recency_table_boundaries() {
        // (days since last activity, expected recency label)
        let table = [
            (0, StatusLabel::Active),
            (5, StatusLabel::Active),
            (6, StatusLabel::PendingIntervention),
            (10, StatusLabel::PendingIntervention),
            (11, StatusLabel::Inactive),
            (400, StatusLabel::Inactive),
        ];
        for (days, expected) in table {
            let labels = classify(&[activity("Irrigation", days)], now());
            assert_eq!(labels.recency(), Some(expected), "days={days}");
        }
    }

    #[test]
    fn recent_irrigation_is_active_only() {
        let labels = classify(&[activity("Irrigation", 1)], now());
        assert!(labels.contains(StatusLabel::Active));
        assert!(!labels.contains(StatusLabel::Inactive));
        assert!(!labels.contains(StatusLabel::PendingIntervention));
    }

    #[test]
    fn eight_days_without_harvest_is_pending_intervention() {
        let labels = classify(&[activity("Fertilization", 8)], now());
        assert_eq!(labels, StatusLabelSet::from([StatusLabel::PendingIntervention]));
    }

    #[test]
    fn old_harvest_counts_as_productivity_but_not_recent() {
        let labels = classify(&[activity("Irrigation", 12), activity("Harvest", 20)], now());
        assert_eq!(
            labels,
            StatusLabelSet::from([StatusLabel::Inactive, StatusLabel::HasProductivity])
        );
    }

    #[test]
    fn harvest_within_three_days_is_recent() {
        let labels = classify(&[activity("Cosecha", 3)], now());
        assert_eq!(
            labels,
            StatusLabelSet::from([
                StatusLabel::Active,
                StatusLabel::RecentlyHarvested,
                StatusLabel::HasProductivity
            ])
        );

        let labels = classify(&[activity("Harvest", 4)], now());
        assert!(!labels.contains(StatusLabel::RecentlyHarvested));
    }

    #[test]
    fn harvest_four_full_days_before_afternoon_now_is_still_recent() {
        // 2025-06-11T14:00 is 3 days and 10 hours before 2025-06-15T00:00.
        let labels = classify(&[activity_at("Harvest", june(11, 14))], now());
        assert!(labels.contains(StatusLabel::RecentlyHarvested));

        let labels = classify(&[activity_at("Harvest", june(10, 23))], now());
        assert!(!labels.contains(StatusLabel::RecentlyHarvested));
    }

    #[test]
    fn latest_harvest_drives_the_harvest_window() {
        let records = [activity("Harvest", 30), activity_at("Harvest", june(12, 6))];
        assert_eq!(facts(&records).days_since_harvest, Some(2));
    }

    #[test]
    fn three_tasks_in_trailing_window_is_high_load() {
        let busy = [activity("Irrigation", 0), activity("Sowing", 2), activity("Irrigation", 3)];
        assert!(classify(&busy, now()).contains(StatusLabel::HighTaskLoad));

        let spread = [activity("Irrigation", 0), activity("Sowing", 2), activity("Irrigation", 4)];
        assert!(!classify(&spread, now()).contains(StatusLabel::HighTaskLoad));
    }

    #[test]
    fn elapsed_days_count_from_the_start_of_today() {
        // (latest activity, expected recency label); `now` is 2025-06-15T14:00.
        let table = [
            (june(14, 23), StatusLabel::Active),
            (june(10, 23), StatusLabel::Active),
            (june(9, 8), StatusLabel::Active),
            (june(9, 0), StatusLabel::PendingIntervention),
            (june(4, 8), StatusLabel::PendingIntervention),
            (june(4, 0), StatusLabel::Inactive),
            (june(3, 23), StatusLabel::Inactive),
        ];
        for (at, expected) in table {
            let labels = classify(&[activity_at("Irrigation", at)], now());
            assert_eq!(labels.recency(), Some(expected), "at={at}");
        }
    }

    #[test]
    fn future_dated_records_floor_to_negative_days() {
        // Later the same day is under a day past midnight, which floors to -1.
        assert_eq!(facts(&[activity_at("Irrigation", june(15, 9))]).days_elapsed, -1);
        assert_eq!(facts(&[activity_at("Irrigation", june(15, 0))]).days_elapsed, 0);
        assert_eq!(facts(&[activity_at("Irrigation", june(16, 10))]).days_elapsed, -2);

        let future = [
            activity_at("Harvest", june(16, 10)),
            activity_at("Irrigation", june(17, 0)),
            activity_at("Sowing", june(20, 12)),
        ];
        assert_eq!(facts(&future).days_since_harvest, Some(-2));
        assert_eq!(
            classify(&future, now()),
            StatusLabelSet::from([
                StatusLabel::Active,
                StatusLabel::RecentlyHarvested,
                StatusLabel::HighTaskLoad,
                StatusLabel::HasProductivity,
            ])
        );
    }

    #[test]
    fn empty_history_falls_back_to_inactive() {
        assert_eq!(classify(&[], now()), StatusLabelSet::from([StatusLabel::Inactive]));
    }

    #[test]
    fn undated_history_falls_back_without_secondary_labels() {
        let undated = [
            ActivityRecord::from_raw(PARCEL, "Harvest", "garbage", ""),
            ActivityRecord::from_raw(PARCEL, "Milking", "", ""),
        ];
        assert_eq!(classify(&undated, now()), StatusLabelSet::from([StatusLabel::Inactive]));
    }

    #[test]
    fn undated_records_are_ignored_for_recency() {
        let mixed = [
            activity("Irrigation", 9),
            ActivityRecord::from_raw(PARCEL, "Irrigation", "n/a", ""),
        ];
        let labels = classify(&mixed, now());
        assert_eq!(labels, StatusLabelSet::from([StatusLabel::PendingIntervention]));
    }

    #[test]
    fn custom_thresholds_shift_the_cascade() {
        let t = HealthThresholds {
            active_max_days: 1,
            pending_max_days: 2,
            ..HealthThresholds::default()
        };
        let labels = classify_with(&[activity("Irrigation", 3)], now(), &t);
        assert_eq!(labels.recency(), Some(StatusLabel::Inactive));
    }

    #[test]
    fn batch_evaluation_groups_by_parcel_with_one_now() {
        let records = vec![
            ActivityRecord::new(ParcelId::new(2), "Irrigation", days_ago(1), ""),
            ActivityRecord::new(ParcelId::new(1), "Irrigation", days_ago(30), ""),
            ActivityRecord::new(ParcelId::new(2), "Weighing", days_ago(7), ""),
            ActivityRecord::from_raw(ParcelId::new(3), "Irrigation", "??", ""),
        ];
        let result = evaluate_parcels(&records, now());

        assert_eq!(result.len(), 3);
        assert_eq!(result[&ParcelId::new(1)], StatusLabelSet::from([StatusLabel::Inactive]));
        assert_eq!(
            result[&ParcelId::new(2)],
            StatusLabelSet::from([StatusLabel::Active, StatusLabel::HasProductivity])
        );
        assert_eq!(result[&ParcelId::new(3)], StatusLabelSet::from([StatusLabel::Inactive]));
    }

    proptest! {
        /// Property: anything done today keeps the parcel active.
        #[test]
        fn activity_today_is_always_active(
            older in prop::collection::vec(0i64..60, 0..8),
            hour in 0u32..24,
        ) {
            let today = Utc.with_ymd_and_hms(2025, 6, 15, hour, 0, 0).unwrap();
            let mut records: Vec<ActivityRecord> =
                older.iter().map(|d| activity("Irrigation", *d)).collect();
            records.push(ActivityRecord::new(PARCEL, "Irrigation", today, ""));

            let labels = classify(&records, now());
            prop_assert!(labels.contains(StatusLabel::Active));
            prop_assert!(!labels.contains(StatusLabel::Inactive));
        }

        /// Property: exactly one recency label is assigned.
        #[test]
        fn exactly_one_recency_label(days in prop::collection::vec(0i64..40, 0..10)) {
            let records: Vec<ActivityRecord> =
                days.iter().map(|d| activity("Harvest", *d)).collect();
            let labels = classify(&records, now());
            prop_assert_eq!(labels.iter().filter(StatusLabel::is_recency).count(), 1);
        }
    }
}
