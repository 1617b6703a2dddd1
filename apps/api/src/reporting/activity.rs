use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::models::interaction::InteractionFact;
use crate::models::status::InteractionType;
use crate::reporting::dates::parse_stored_date;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub interaction_type: String,
    pub count: i64,
    /// False for stored labels outside the known interaction types.
    pub classified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyActivity {
    /// Monday of the week.
    pub week_start: NaiveDate,
    pub count: i64,
}

/// Counts interactions per stored type label. Sorted by count descending,
/// then label, so the output is deterministic.
pub fn compute_interaction_distribution(facts: &[InteractionFact]) -> Vec<TypeCount> {
    let mut counts: HashMap<&str, i64> = HashMap::new();
    for fact in facts {
        *counts.entry(fact.interaction_type.trim()).or_insert(0) += 1;
    }

    let mut distribution: Vec<TypeCount> = counts
        .into_iter()
        .map(|(interaction_type, count)| TypeCount {
            classified: InteractionType::from_label(interaction_type).is_some(),
            interaction_type: interaction_type.to_string(),
            count,
        })
        .collect();
    distribution.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.interaction_type.cmp(&b.interaction_type))
    });
    distribution
}

/// Monday of the week containing `date`, or `None` when that Monday falls
/// before the earliest representable date.
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
}

/// Counts interactions per Monday-based calendar week, oldest week first.
///
/// Sparse: weeks without interactions are not emitted. Interactions with a
/// date that cannot be parsed or placed in a week are skipped.
pub fn compute_weekly_activity(facts: &[InteractionFact]) -> Vec<WeeklyActivity> {
    let mut weeks: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for monday in facts
        .iter()
        .filter_map(|f| f.interaction_date.as_deref())
        .filter_map(parse_stored_date)
        .filter_map(week_start)
    {
        *weeks.entry(monday).or_insert(0) += 1;
    }

    weeks
        .into_iter()
        .map(|(week_start, count)| WeeklyActivity { week_start, count })
        .collect()
}
