use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::normalize_text;
use crate::models::status::InteractionType;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InteractionRow {
    pub id: i64,
    pub contact_id: i64,
    pub interaction_date: String,
    pub interaction_type: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewInteraction {
    pub date: NaiveDate,
    pub interaction_type: InteractionType,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewInteraction {
    pub fn normalized(self) -> Self {
        NewInteraction {
            date: self.date,
            interaction_type: self.interaction_type,
            notes: normalize_text(self.notes),
        }
    }
}

/// Type and raw date of one interaction, the input of the activity reports.
#[derive(Debug, Clone, FromRow)]
pub struct InteractionFact {
    pub interaction_type: String,
    pub interaction_date: Option<String>,
}
