//! Fixed enumerations for account pipeline status, contact prospecting status
//! and interaction type.
//!
//! Values are persisted as their display label. Reads never parse them back
//! into these enums on the way out of the store: a label outside the
//! enumeration is "unclassified" and must not fail a query.

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum AccountStatus {
    #[default]
    #[serde(rename = "To qualify")]
    ToQualify,
    #[serde(rename = "Contact made")]
    ContactMade,
    #[serde(rename = "Negotiating")]
    Negotiating,
    #[serde(rename = "Won")]
    Won,
    #[serde(rename = "Lost")]
    Lost,
}

impl AccountStatus {
    pub const ALL: [AccountStatus; 5] = [
        AccountStatus::ToQualify,
        AccountStatus::ContactMade,
        AccountStatus::Negotiating,
        AccountStatus::Won,
        AccountStatus::Lost,
    ];

    /// Pipeline stages shown in the funnel, in pipeline order. `Lost` is a
    /// valid account status but not a funnel stage.
    pub const FUNNEL_STAGES: [AccountStatus; 4] = [
        AccountStatus::ToQualify,
        AccountStatus::ContactMade,
        AccountStatus::Negotiating,
        AccountStatus::Won,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AccountStatus::ToQualify => "To qualify",
            AccountStatus::ContactMade => "Contact made",
            AccountStatus::Negotiating => "Negotiating",
            AccountStatus::Won => "Won",
            AccountStatus::Lost => "Lost",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContactStatus {
    #[default]
    #[serde(rename = "To contact")]
    ToContact,
    #[serde(rename = "Contacted")]
    Contacted,
    #[serde(rename = "Interested")]
    Interested,
    #[serde(rename = "Not interested")]
    NotInterested,
}

impl ContactStatus {
    pub const ALL: [ContactStatus; 4] = [
        ContactStatus::ToContact,
        ContactStatus::Contacted,
        ContactStatus::Interested,
        ContactStatus::NotInterested,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ContactStatus::ToContact => "To contact",
            ContactStatus::Contacted => "Contacted",
            ContactStatus::Interested => "Interested",
            ContactStatus::NotInterested => "Not interested",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionType {
    Email,
    Call,
    LinkedIn,
    Meeting,
}

impl InteractionType {
    pub const ALL: [InteractionType; 4] = [
        InteractionType::Email,
        InteractionType::Call,
        InteractionType::LinkedIn,
        InteractionType::Meeting,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InteractionType::Email => "Email",
            InteractionType::Call => "Call",
            InteractionType::LinkedIn => "LinkedIn",
            InteractionType::Meeting => "Meeting",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}
