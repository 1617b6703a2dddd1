use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;
use crate::models::contact::ContactSummaryRow;
use crate::models::status::AccountStatus;
use crate::models::tag::TagRow;
use crate::models::{normalize_text, require_text};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccountRow {
    pub id: i64,
    pub name: String,
    /// Raw stored label; may fall outside `AccountStatus`.
    pub status: Option<String>,
    pub notes: Option<String>,
    pub external_link: Option<String>,
    pub is_client: bool,
}

/// Validated account fields. Updates overwrite every one of them.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRecord {
    pub name: String,
    pub status: AccountStatus,
    pub notes: Option<String>,
    pub external_link: Option<String>,
    pub is_client: bool,
}

impl AccountRecord {
    /// Account created on the fly from the contact form.
    pub fn new_prospect(name: &str) -> Result<Self, AppError> {
        Ok(AccountRecord {
            name: require_text("Account name", name)?,
            status: AccountStatus::ToQualify,
            notes: None,
            external_link: None,
            is_client: false,
        })
    }
}

/// Create/update payload: the account fields plus its desired tag names.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInput {
    pub name: String,
    #[serde(default)]
    pub status: AccountStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub external_link: Option<String>,
    #[serde(default)]
    pub is_client: bool,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl AccountInput {
    pub fn validate(self) -> Result<(AccountRecord, BTreeSet<String>), AppError> {
        let record = AccountRecord {
            name: require_text("Account name", &self.name)?,
            status: self.status,
            notes: normalize_text(self.notes),
            external_link: normalize_text(self.external_link),
            is_client: self.is_client,
        };
        Ok((record, self.tags))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountDetail {
    #[serde(flatten)]
    pub account: AccountRow,
    pub tags: Vec<TagRow>,
    pub contacts: Vec<ContactSummaryRow>,
}
