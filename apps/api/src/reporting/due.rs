use chrono::NaiveDate;
use serde::Serialize;

use crate::models::contact::DueCandidateRow;
use crate::reporting::dates::parse_stored_date;

/// Position of a due date relative to the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DueStatus {
    Overdue,
    DueToday,
    Upcoming,
}

pub fn classify_due_date(date: NaiveDate, reference: NaiveDate) -> DueStatus {
    match date.cmp(&reference) {
        std::cmp::Ordering::Less => DueStatus::Overdue,
        std::cmp::Ordering::Equal => DueStatus::DueToday,
        std::cmp::Ordering::Greater => DueStatus::Upcoming,
    }
}

/// Classifies a stored date value; `None` when missing or unparseable.
pub fn classify_stored_date(raw: Option<&str>, reference: NaiveDate) -> Option<DueStatus> {
    raw.and_then(parse_stored_date)
        .map(|date| classify_due_date(date, reference))
}

/// How long ago the last interaction happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecencyBand {
    /// Seven days or less.
    Recent,
    /// Eight to thirty days.
    Stale,
    Cold,
    Never,
}

pub fn classify_recency(raw: Option<&str>, reference: NaiveDate) -> RecencyBand {
    let Some(date) = raw.and_then(parse_stored_date) else {
        return RecencyBand::Never;
    };
    match (reference - date).num_days() {
        days if days <= 7 => RecencyBand::Recent,
        days if days <= 30 => RecencyBand::Stale,
        _ => RecencyBand::Cold,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueAction {
    pub contact_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub account_name: String,
    pub next_action_notes: Option<String>,
    pub next_action_date: NaiveDate,
    pub status: DueStatus,
}

/// Contacts whose next action falls on or before `reference`, earliest first.
/// Equal dates are ordered by contact id. Missing or unparseable dates are
/// excluded.
pub fn compute_due_actions(rows: &[DueCandidateRow], reference: NaiveDate) -> Vec<DueAction> {
    let mut due: Vec<DueAction> = rows
        .iter()
        .filter_map(|row| {
            let date = row.next_action_date.as_deref().and_then(parse_stored_date)?;
            (date <= reference).then(|| DueAction {
                contact_id: row.contact_id,
                first_name: row.first_name.clone(),
                last_name: row.last_name.clone(),
                account_name: row.account_name.clone(),
                next_action_notes: row.next_action_notes.clone(),
                next_action_date: date,
                status: classify_due_date(date, reference),
            })
        })
        .collect();
    due.sort_by(|a, b| {
        a.next_action_date
            .cmp(&b.next_action_date)
            .then_with(|| a.contact_id.cmp(&b.contact_id))
    });
    due
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(contact_id: i64, date: Option<&str>) -> DueCandidateRow {
        DueCandidateRow {
            contact_id,
            first_name: "Ada".to_string(),
            last_name: format!("Contact{contact_id}"),
            account_name: "Acme".to_string(),
            next_action_notes: Some("Follow up".to_string()),
            next_action_date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_classify_due_date() {
        let today = ymd(2024, 3, 10);
        assert_eq!(classify_due_date(ymd(2024, 3, 9), today), DueStatus::Overdue);
        assert_eq!(classify_due_date(today, today), DueStatus::DueToday);
        assert_eq!(classify_due_date(ymd(2024, 3, 11), today), DueStatus::Upcoming);
    }

    #[test]
    fn test_classify_stored_date_tolerates_garbage() {
        let today = ymd(2024, 3, 10);
        assert_eq!(classify_stored_date(None, today), None);
        assert_eq!(classify_stored_date(Some("soon"), today), None);
        assert_eq!(
            classify_stored_date(Some("2024-03-10"), today),
            Some(DueStatus::DueToday)
        );
    }

    #[test]
    fn test_due_list_filters_and_sorts() {
        let today = ymd(2024, 3, 10);
        let rows = vec![
            row(5, Some("2024-03-10")),
            row(4, Some("2024-03-11")),
            row(3, Some("2024-02-01")),
            row(2, None),
            row(1, Some("2024-03-10")),
            row(6, Some("not a date")),
        ];

        let due = compute_due_actions(&rows, today);
        let ids: Vec<_> = due.iter().map(|d| d.contact_id).collect();
        assert_eq!(ids, vec![3, 1, 5]);
        assert!(due.iter().all(|d| d.next_action_date <= today));
        assert!(due
            .windows(2)
            .all(|w| w[0].next_action_date <= w[1].next_action_date));
        assert_eq!(due[0].status, DueStatus::Overdue);
        assert_eq!(due[1].status, DueStatus::DueToday);
    }

    #[test]
    fn test_recency_bands() {
        let today = ymd(2024, 3, 31);
        assert_eq!(classify_recency(Some("2024-03-24"), today), RecencyBand::Recent);
        assert_eq!(classify_recency(Some("2024-03-23"), today), RecencyBand::Stale);
        assert_eq!(classify_recency(Some("2024-03-01"), today), RecencyBand::Stale);
        assert_eq!(classify_recency(Some("2024-02-29"), today), RecencyBand::Cold);
        assert_eq!(classify_recency(None, today), RecencyBand::Never);
        assert_eq!(classify_recency(Some("??"), today), RecencyBand::Never);
    }
}
