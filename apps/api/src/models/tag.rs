use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::AppError;
use crate::models::{normalize_text, require_text};

pub const DEFAULT_TAG_COLOR: &str = "#4e8ec6";

/// Tag name to tag id, as of the moment it was loaded.
pub type TagLookup = HashMap<String, i64>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TagRow {
    pub id: i64,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagInput {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl TagInput {
    /// Returns the trimmed name and the color, defaulting the latter.
    pub fn validate(self) -> Result<(String, String), AppError> {
        let name = require_text("Tag name", &self.name)?;
        let color = normalize_text(self.color).unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string());
        Ok((name, color))
    }
}

/// The two kinds of entity that can carry tags. Both share one link-table
/// layout, `(<entity>_id, tag_id)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Account,
    Contact,
}

impl EntityKind {
    pub fn entity_table(self) -> &'static str {
        match self {
            EntityKind::Account => "accounts",
            EntityKind::Contact => "contacts",
        }
    }

    pub fn link_table(self) -> &'static str {
        match self {
            EntityKind::Account => "account_tags",
            EntityKind::Contact => "contact_tags",
        }
    }

    pub fn link_column(self) -> &'static str {
        match self {
            EntityKind::Account => "account_id",
            EntityKind::Contact => "contact_id",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Account => "Account",
            EntityKind::Contact => "Contact",
        }
    }
}
