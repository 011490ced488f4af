#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use secrecy::SecretString;

use study_royale_server::{
    config::Config,
    errors::{AppResult, ProviderError},
    models::domain::SourceDocument,
    repositories::SourceDocumentRepository,
    services::provider::{CompletionOptions, CompletionProvider},
};

/// Replays canned replies in order and records every user prompt it receives.
/// Once the script runs out every call fails.
#[derive(Default)]
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = Result<String, ProviderError>>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())))
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(
        &self,
        _system_prompt: &str,
        user_prompt: &str,
        _options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(user_prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::Api("service unavailable".to_string())))
    }
}

#[derive(Default)]
pub struct InMemoryDocuments {
    documents: HashMap<String, SourceDocument>,
}

impl InMemoryDocuments {
    pub fn with(documents: Vec<SourceDocument>) -> Self {
        Self {
            documents: documents.into_iter().map(|d| (d.id.clone(), d)).collect(),
        }
    }
}

#[async_trait]
impl SourceDocumentRepository for InMemoryDocuments {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<SourceDocument>> {
        Ok(self.documents.get(id).cloned())
    }
}

pub fn test_config() -> Config {
    let mut config = Config::from_env();
    config.jwt_secret = SecretString::from("integration-secret-that-is-long-enough".to_string());
    config.provider_timeout_secs = 5;
    config.max_generation_attempts = 2;
    config
}

pub fn document(id: &str, owner: &str) -> SourceDocument {
    SourceDocument {
        id: id.to_string(),
        user_id: owner.to_string(),
        title: "biology.pdf".to_string(),
        text_extracted: "Mitochondria produce ATP. Ribosomes synthesise proteins.".to_string(),
        created_at: None,
    }
}
