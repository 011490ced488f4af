use std::time::Duration;

use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;

use crate::config::ProviderConfig;
use crate::errors::ProviderError;

/// Sampling parameters for one completion call.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionOptions {
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }
}

/// A chat-completion backend returning plain text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Provider for any OpenAI-compatible endpoint (Groq, OpenRouter, ...).
pub struct OpenAiCompatibleProvider {
    name: String,
    client: Client<OpenAIConfig>,
}

impl OpenAiCompatibleProvider {
    pub fn new(name: impl Into<String>, config: &ProviderConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_base(config.api_base.clone())
            .with_api_key(config.api_key.expose_secret());

        Self {
            name: name.into(),
            client: Client::with_config(openai_config),
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompatibleProvider {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        log::debug!(
            "{}: requesting completion from model {} (max_tokens={})",
            self.name,
            options.model,
            options.max_tokens
        );

        let response: ChatResponse = self
            .client
            .chat()
            .create_byot(json!({
                "model": options.model,
                "messages": [
                    { "role": "system", "content": system_prompt },
                    { "role": "user", "content": user_prompt }
                ],
                "temperature": options.temperature,
                "max_tokens": options.max_tokens
            }))
            .await?;

        extract_content(response)
    }
}

fn extract_content(response: ChatResponse) -> Result<String, ProviderError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ProviderError::MalformedResponse("response had no message content".into()))
}

/// Runs one completion under a deadline; an elapsed deadline is a `Timeout`.
pub async fn complete_with_timeout(
    provider: &dyn CompletionProvider,
    timeout: Duration,
    system_prompt: &str,
    user_prompt: &str,
    options: &CompletionOptions,
) -> Result<String, ProviderError> {
    match tokio::time::timeout(timeout, provider.complete(system_prompt, user_prompt, options)).await
    {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout(timeout.as_secs())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> CompletionOptions {
        CompletionOptions {
            model: "test-model".to_string(),
            temperature: 0.7,
            max_tokens: 100,
        }
    }

    struct SlowProvider;

    #[async_trait]
    impl CompletionProvider for SlowProvider {
        async fn complete(
            &self,
            _system_prompt: &str,
            _user_prompt: &str,
            _options: &CompletionOptions,
        ) -> Result<String, ProviderError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("too late".to_string())
        }
    }

    #[test]
    fn extract_content_takes_first_choice() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Q: One?\nA: 1" } },
                { "message": { "role": "assistant", "content": "ignored" } }
            ]
        }))
        .unwrap();

        assert_eq!(extract_content(response).unwrap(), "Q: One?\nA: 1");
    }

    #[test]
    fn extract_content_rejects_empty_choices() {
        let response: ChatResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert!(matches!(
            extract_content(response),
            Err(ProviderError::MalformedResponse(_))
        ));
    }

    #[test]
    fn options_from_config_and_override() {
        let config = crate::config::Config::test_config();
        let opts = CompletionOptions::from_config(&config.primary_provider).with_sampling(0.1, 100);

        assert_eq!(opts.model, "primary-test-model");
        assert_eq!(opts.temperature, 0.1);
        assert_eq!(opts.max_tokens, 100);
    }

    #[tokio::test]
    async fn complete_with_timeout_passes_through_result() {
        let mut provider = MockCompletionProvider::new();
        provider
            .expect_complete()
            .times(1)
            .returning(|_, _, _| Ok("CORRECT".to_string()));

        let result =
            complete_with_timeout(&provider, Duration::from_secs(1), "sys", "user", &options()).await;
        assert_eq!(result.unwrap(), "CORRECT");
    }

    #[tokio::test]
    async fn complete_with_timeout_maps_elapsed_deadline() {
        let result = complete_with_timeout(
            &SlowProvider,
            Duration::from_millis(50),
            "sys",
            "user",
            &options(),
        )
        .await;
        assert!(matches!(result, Err(ProviderError::Timeout(_))));
    }
}
