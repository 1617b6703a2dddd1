use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;
use crate::models::status::ContactStatus;
use crate::models::tag::TagRow;
use crate::models::{normalize_text, require_text};

/// Full contact row. Dates and status are kept as stored text so rows written
/// by external import tools never fail to load.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContactRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<String>,
    pub email: Option<String>,
    pub external_profile: Option<String>,
    pub prospecting_status: Option<String>,
    pub last_action_notes: Option<String>,
    pub next_action_date: Option<String>,
    pub next_action_notes: Option<String>,
    pub last_interaction_date: Option<String>,
    pub account_id: i64,
}

/// Contact line shown under an account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContactSummaryRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<String>,
    pub email: Option<String>,
    pub prospecting_status: Option<String>,
}

/// Validated contact fields. `account_id` is fixed at creation; updates
/// overwrite every other field.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactRecord {
    pub first_name: String,
    pub last_name: String,
    pub role: Option<String>,
    pub email: Option<String>,
    pub external_profile: Option<String>,
    pub prospecting_status: ContactStatus,
    pub last_action_notes: Option<String>,
    pub next_action_date: Option<NaiveDate>,
    pub next_action_notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactInput {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub external_profile: Option<String>,
    #[serde(default)]
    pub prospecting_status: ContactStatus,
    #[serde(default)]
    pub last_action_notes: Option<String>,
    #[serde(default)]
    pub next_action_date: Option<NaiveDate>,
    #[serde(default)]
    pub next_action_notes: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl ContactInput {
    pub fn validate(self) -> Result<(ContactRecord, BTreeSet<String>), AppError> {
        let record = ContactRecord {
            first_name: require_text("First name", &self.first_name)?,
            last_name: require_text("Last name", &self.last_name)?,
            role: normalize_text(self.role),
            email: normalize_text(self.email),
            external_profile: normalize_text(self.external_profile),
            prospecting_status: self.prospecting_status,
            last_action_notes: normalize_text(self.last_action_notes),
            next_action_date: self.next_action_date,
            next_action_notes: normalize_text(self.next_action_notes),
        };
        Ok((record, self.tags))
    }
}

/// Which account a new contact belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountChoice {
    Existing(i64),
    New(String),
}

/// POST /api/v1/contacts payload: either `account_id` or `new_account_name`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewContactRequest {
    #[serde(default)]
    pub account_id: Option<i64>,
    #[serde(default)]
    pub new_account_name: Option<String>,
    #[serde(flatten)]
    pub contact: ContactInput,
}

impl NewContactRequest {
    pub fn account_choice(&self) -> Result<AccountChoice, AppError> {
        match (self.account_id, normalize_text(self.new_account_name.clone())) {
            (Some(id), None) => Ok(AccountChoice::Existing(id)),
            (None, Some(name)) => Ok(AccountChoice::New(name)),
            (Some(_), Some(_)) => Err(AppError::Validation(
                "Provide either account_id or new_account_name, not both".to_string(),
            )),
            (None, None) => Err(AppError::Validation(
                "A contact must belong to an account".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactDetail {
    #[serde(flatten)]
    pub contact: ContactRow,
    pub account_name: String,
    pub tags: Vec<TagRow>,
}

/// Contact fields the assistant uses to build its context.
#[derive(Debug, Clone, FromRow)]
pub struct ContactAiContext {
    pub first_name: String,
    pub last_name: String,
    pub role: Option<String>,
    pub last_action_notes: Option<String>,
    pub last_interaction_date: Option<String>,
    pub next_action_notes: Option<String>,
    pub next_action_date: Option<String>,
    pub account_name: String,
}

/// Contact with a pending next action, joined with its account name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DueCandidateRow {
    pub contact_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub account_name: String,
    pub next_action_notes: Option<String>,
    pub next_action_date: Option<String>,
}

/// One line of the contact overview, joined with its account name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContactOverviewRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub prospecting_status: Option<String>,
    pub next_action_date: Option<String>,
    pub next_action_notes: Option<String>,
    pub last_interaction_date: Option<String>,
    pub email: Option<String>,
    pub external_profile: Option<String>,
    pub account_name: String,
}
