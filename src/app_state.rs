use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoSourceDocumentRepository, SourceDocumentRepository},
    services::{
        answer_checker::AnswerChecker,
        generation_service::{GenerationService, GenerationSettings},
        provider::{CompletionProvider, OpenAiCompatibleProvider},
    },
};

const TOKEN_EXPIRATION_HOURS: i64 = 24;

#[derive(Clone)]
pub struct AppState {
    pub documents: Arc<dyn SourceDocumentRepository>,
    pub generation_service: Arc<GenerationService>,
    pub answer_checker: Arc<AnswerChecker>,
    pub jwt_service: JwtService,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;
        let documents = Arc::new(MongoSourceDocumentRepository::new(
            &db,
            &config.documents_collection,
        ));

        let primary = Arc::new(OpenAiCompatibleProvider::new(
            "primary",
            &config.primary_provider,
        ));
        let secondary = Arc::new(OpenAiCompatibleProvider::new(
            "secondary",
            &config.secondary_provider,
        ));
        log::info!(
            "providers ready: primary={} secondary={}",
            config.primary_provider.model,
            config.secondary_provider.model
        );

        Ok(Self::from_parts(config, documents, primary, secondary))
    }

    /// Wires the services around already-built collaborators. The answer
    /// checker shares the primary provider.
    pub fn from_parts(
        config: Config,
        documents: Arc<dyn SourceDocumentRepository>,
        primary: Arc<dyn CompletionProvider>,
        secondary: Arc<dyn CompletionProvider>,
    ) -> Self {
        let generation_service = Arc::new(GenerationService::new(
            Arc::clone(&primary),
            secondary,
            GenerationSettings::from_config(&config),
        ));
        let answer_checker = Arc::new(AnswerChecker::from_config(primary, &config));
        let jwt_service = JwtService::new(&config.jwt_secret, TOKEN_EXPIRATION_HOURS);

        Self {
            documents,
            generation_service,
            answer_checker,
            jwt_service,
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<AppState>();
    }
}
