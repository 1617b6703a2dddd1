use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::contact::ContactOverviewRow;
use crate::models::status::ContactStatus;
use crate::reporting::due::{classify_recency, classify_stored_date, DueStatus, RecencyBand};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverviewFilter {
    /// Case-insensitive match on first or last name.
    #[serde(default)]
    pub search: Option<String>,
    /// Exact account name.
    #[serde(default)]
    pub account: Option<String>,
    /// Prospecting status label. Known labels also match stored values that
    /// differ only in surrounding whitespace; unknown labels match exactly.
    #[serde(default)]
    pub status: Option<String>,
}

impl OverviewFilter {
    pub fn matches(&self, row: &ContactOverviewRow) -> bool {
        if let Some(search) = non_blank(&self.search) {
            let needle = search.to_lowercase();
            if !row.first_name.to_lowercase().contains(&needle)
                && !row.last_name.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if let Some(account) = non_blank(&self.account) {
            if row.account_name != account {
                return false;
            }
        }
        if let Some(status) = non_blank(&self.status) {
            let stored = row.prospecting_status.as_deref();
            let matched = match ContactStatus::from_label(status) {
                Some(wanted) => stored.and_then(ContactStatus::from_label) == Some(wanted),
                None => stored == Some(status),
            };
            if !matched {
                return false;
            }
        }
        true
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewEntry {
    #[serde(flatten)]
    pub contact: ContactOverviewRow,
    pub next_action_status: Option<DueStatus>,
    pub recency: RecencyBand,
    /// False when the stored prospecting status is missing or not a known label.
    pub status_classified: bool,
}

pub fn compute_overview(
    rows: &[ContactOverviewRow],
    filter: &OverviewFilter,
    reference: NaiveDate,
) -> Vec<OverviewEntry> {
    rows.iter()
        .filter(|row| filter.matches(row))
        .map(|row| OverviewEntry {
            next_action_status: classify_stored_date(row.next_action_date.as_deref(), reference),
            recency: classify_recency(row.last_interaction_date.as_deref(), reference),
            status_classified: row
                .prospecting_status
                .as_deref()
                .and_then(ContactStatus::from_label)
                .is_some(),
            contact: row.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(
        id: i64,
        first: &str,
        last: &str,
        account: &str,
        status: Option<&str>,
    ) -> ContactOverviewRow {
        ContactOverviewRow {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            prospecting_status: status.map(str::to_string),
            next_action_date: None,
            next_action_notes: None,
            last_interaction_date: None,
            email: None,
            external_profile: None,
            account_name: account.to_string(),
        }
    }

    fn rows() -> Vec<ContactOverviewRow> {
        vec![
            row(1, "Ada", "Lovelace", "Acme", Some("Interested")),
            row(2, "Grace", "Hopper", "Acme", Some("Contacted")),
            row(3, "Alan", "Turing", "Globex", None),
        ]
    }

    fn ids(entries: &[OverviewEntry]) -> Vec<i64> {
        entries.iter().map(|e| e.contact.id).collect()
    }

    #[test]
    fn test_no_filter_keeps_everything() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let entries = compute_overview(&rows(), &OverviewFilter::default(), today);
        assert_eq!(ids(&entries), vec![1, 2, 3]);
        assert!(entries.iter().all(|e| e.recency == RecencyBand::Never));
    }

    #[test]
    fn test_search_is_case_insensitive_on_either_name() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let filter = OverviewFilter {
            search: Some("AL".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&compute_overview(&rows(), &filter, today)), vec![3]);

        let filter = OverviewFilter {
            search: Some("hop".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&compute_overview(&rows(), &filter, today)), vec![2]);
    }

    #[test]
    fn test_account_and_status_filters_combine() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let filter = OverviewFilter {
            search: Some("  ".to_string()),
            account: Some("Acme".to_string()),
            status: Some("Interested".to_string()),
        };
        assert_eq!(ids(&compute_overview(&rows(), &filter, today)), vec![1]);
    }

    #[test]
    fn test_status_filter_tolerates_stored_whitespace() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut rows = rows();
        rows[1].prospecting_status = Some(" Contacted ".to_string());
        let filter = OverviewFilter {
            status: Some("Contacted".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&compute_overview(&rows, &filter, today)), vec![2]);
    }

    #[test]
    fn test_rows_flag_unclassified_status() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut rows = rows();
        rows[0].prospecting_status = Some("Maybe later".to_string());
        let flags: Vec<bool> = compute_overview(&rows, &OverviewFilter::default(), today)
            .iter()
            .map(|e| e.status_classified)
            .collect();
        assert_eq!(flags, vec![false, true, false]);
    }
}
