//! Pass-through assistant: builds a contact context and forwards it with the
//! user's question to a text-generation service.

pub mod handlers;
pub mod prompts;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};
use crate::store;
use prompts::{assistant_system_prompt, build_contact_context, build_prompt, QuickPrompt};

/// Text-generation backend behind the assistant.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, system).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantRequest {
    #[serde(default)]
    pub contact_id: Option<i64>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub quick_prompt: Option<QuickPrompt>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssistantResponse {
    pub answer: String,
    pub context: Option<String>,
}

impl AssistantRequest {
    /// A quick prompt wins over free text.
    fn question(&self) -> Result<String, AppError> {
        if let Some(quick) = self.quick_prompt {
            return Ok(quick.question().to_string());
        }
        self.prompt
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("prompt cannot be empty".to_string()))
    }
}

pub async fn ask(
    generator: &dyn TextGenerator,
    pool: &SqlitePool,
    request: &AssistantRequest,
) -> Result<AssistantResponse, AppError> {
    let question = request.question()?;

    let context = match request.contact_id {
        Some(id) => {
            let contact = store::contacts::contact_ai_context(pool, id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Contact {id} not found")))?;
            Some(build_contact_context(&contact))
        }
        None => None,
    };

    let prompt = build_prompt(context.as_deref(), &question);
    let answer = generator
        .generate(&assistant_system_prompt(), &prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Assistant call failed: {e}")))?;

    info!(
        "Assistant answered ({} chars) for contact {:?}",
        answer.len(),
        request.contact_id
    );
    Ok(AssistantResponse { answer, context })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::db::test_pool;
    use crate::models::status::AccountStatus;
    use crate::testing::{seed_account, seed_contact};

    /// Echoes the prompt back and remembers it.
    #[derive(Default)]
    pub(crate) struct EchoGenerator {
        pub(crate) prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(&self, _system: &str, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(format!("echo: {prompt}"))
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _system: &str, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    fn request(
        contact_id: Option<i64>,
        prompt: Option<&str>,
        quick: Option<QuickPrompt>,
    ) -> AssistantRequest {
        AssistantRequest {
            contact_id,
            prompt: prompt.map(str::to_string),
            quick_prompt: quick,
        }
    }

    #[tokio::test]
    async fn test_contact_context_is_forwarded() {
        let pool = test_pool().await;
        let account = seed_account(&pool, "Acme", AccountStatus::ToQualify).await;
        let contact = seed_contact(&pool, account, "Ada", "Lovelace").await;
        let generator = EchoGenerator::default();

        let response = ask(
            &generator,
            &pool,
            &request(Some(contact), None, Some(QuickPrompt::FollowUpEmail)),
        )
        .await
        .unwrap();

        let sent = generator.prompts.lock().unwrap()[0].clone();
        assert!(sent.contains("Name: Ada Lovelace"));
        assert!(sent.contains(QuickPrompt::FollowUpEmail.question()));
        assert!(response.context.unwrap().contains("Account: Acme"));
    }

    #[tokio::test]
    async fn test_blank_prompt_rejected_before_calling_out() {
        let pool = test_pool().await;
        let generator = EchoGenerator::default();
        let result = ask(&generator, &pool, &request(None, Some("   "), None)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_contact() {
        let pool = test_pool().await;
        let generator = EchoGenerator::default();
        let result = ask(&generator, &pool, &request(Some(8), Some("Hi"), None)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_generator_failure_is_llm_error() {
        let pool = test_pool().await;
        let result = ask(&FailingGenerator, &pool, &request(None, Some("Hi"), None)).await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }
}
