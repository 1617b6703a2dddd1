use serde::Deserialize;

use crate::llm_client::prompts::GROUNDED_ANSWER_INSTRUCTION;
use crate::models::contact::ContactAiContext;

pub const ASSISTANT_ROLE: &str = "You are an expert B2B sales assistant helping a \
    prospector follow up with accounts and contacts.";

pub fn assistant_system_prompt() -> String {
    format!("{ASSISTANT_ROLE} {GROUNDED_ANSWER_INSTRUCTION}")
}

/// One-click questions offered next to the free-text prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickPrompt {
    FollowUpEmail,
    SummarizeNotes,
    PrepareCall,
}

impl QuickPrompt {
    pub fn question(self) -> &'static str {
        match self {
            QuickPrompt::FollowUpEmail => "Write a short, effective follow-up email.",
            QuickPrompt::SummarizeNotes => "Summarize all the notes on this contact concisely.",
            QuickPrompt::PrepareCall => "Write a three-point script to prepare a call.",
        }
    }
}

fn or_none(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("none")
}

/// Renders what the CRM knows about a contact as prompt context.
pub fn build_contact_context(contact: &ContactAiContext) -> String {
    format!(
        "Contact context:\n\
         - Name: {} {}\n\
         - Role: {}\n\
         - Account: {}\n\
         - Last action ({}): {}\n\
         - Next action ({}): {}",
        contact.first_name,
        contact.last_name,
        or_none(contact.role.as_deref()),
        contact.account_name,
        or_none(contact.last_interaction_date.as_deref()),
        or_none(contact.last_action_notes.as_deref()),
        or_none(contact.next_action_date.as_deref()),
        or_none(contact.next_action_notes.as_deref()),
    )
}

pub fn build_prompt(context: Option<&str>, question: &str) -> String {
    format!(
        "Prospecting context:\n---\n{}\n---\nQuestion: {question}",
        context.unwrap_or("No contact selected.")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactAiContext {
        ContactAiContext {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: Some("CTO".to_string()),
            last_action_notes: Some("Sent deck".to_string()),
            last_interaction_date: Some("2024-03-01".to_string()),
            next_action_notes: None,
            next_action_date: None,
            account_name: "Acme".to_string(),
        }
    }

    #[test]
    fn test_context_lists_known_fields() {
        let context = build_contact_context(&contact());
        assert!(context.contains("Name: Ada Lovelace"));
        assert!(context.contains("Account: Acme"));
        assert!(context.contains("Last action (2024-03-01): Sent deck"));
        assert!(context.contains("Next action (none): none"));
    }

    #[test]
    fn test_prompt_without_contact() {
        let prompt = build_prompt(None, "How do I open?");
        assert!(prompt.contains("No contact selected."));
        assert!(prompt.ends_with("Question: How do I open?"));
    }

    #[test]
    fn test_quick_prompt_deserializes_from_snake_case() {
        let quick: QuickPrompt = serde_json::from_str("\"prepare_call\"").unwrap();
        assert_eq!(quick, QuickPrompt::PrepareCall);
    }
}
