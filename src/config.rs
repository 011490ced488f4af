use std::env;
use std::time::Duration;

use secrecy::SecretString;

const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";
const DEFAULT_PROVIDER_KEY: &str = "provider_api_key";

/// Connection and sampling settings for one OpenAI-compatible backend.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub api_base: String,
    pub api_key: SecretString,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub app_env: String,
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub documents_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub primary_provider: ProviderConfig,
    pub secondary_provider: ProviderConfig,
    pub checker_temperature: f32,
    pub checker_max_tokens: u32,
    pub provider_timeout_secs: u64,
    pub max_generation_attempts: u32,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            app_env: env_or("APP_ENV", "development"),
            mongo_conn_string: env_or("MONGO_CONN_STRING", "mongodb://localhost:27017"),
            mongo_db_name: env_or("MONGO_DB_NAME", "study-royale-local"),
            documents_collection: env_or("DOCUMENTS_COLLECTION", "reviewers"),
            web_server_host: env_or("WEB_SERVER_HOST", "localhost"),
            web_server_port: env_parse("WEB_SERVER_PORT", 8080),
            jwt_secret: SecretString::from(env_or("JWT_SECRET", DEFAULT_JWT_SECRET)),
            primary_provider: ProviderConfig {
                api_base: env_or("PRIMARY_API_BASE", "https://api.groq.com/openai/v1"),
                api_key: SecretString::from(env_or("GROQ_API_KEY", DEFAULT_PROVIDER_KEY)),
                model: env_or("PRIMARY_MODEL", "llama-3.3-70b-versatile"),
                temperature: env_parse("PRIMARY_TEMPERATURE", 0.7),
                max_tokens: env_parse("PRIMARY_MAX_TOKENS", 3000),
            },
            secondary_provider: ProviderConfig {
                api_base: env_or("SECONDARY_API_BASE", "https://openrouter.ai/api/v1"),
                api_key: SecretString::from(env_or("OPENROUTER_API_KEY", DEFAULT_PROVIDER_KEY)),
                model: env_or("SECONDARY_MODEL", "google/gemini-flash-1.5"),
                temperature: env_parse("SECONDARY_TEMPERATURE", 0.4),
                max_tokens: env_parse("SECONDARY_MAX_TOKENS", 2500),
            },
            checker_temperature: env_parse("CHECKER_TEMPERATURE", 0.1),
            checker_max_tokens: env_parse("CHECKER_MAX_TOKENS", 100),
            provider_timeout_secs: env_parse("PROVIDER_TIMEOUT_SECS", 45),
            max_generation_attempts: env_parse("MAX_GENERATION_ATTEMPTS", 2),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            panic!(
                "FATAL: JWT_SECRET is using default value! Set JWT_SECRET environment variable to a secure random string."
            );
        }

        if jwt_secret.len() < 32 {
            panic!(
                "FATAL: JWT_SECRET is too short ({}). Must be at least 32 characters for security.",
                jwt_secret.len()
            );
        }

        if self.primary_provider.api_key.expose_secret() == DEFAULT_PROVIDER_KEY {
            panic!("FATAL: GROQ_API_KEY is not set! Set GROQ_API_KEY environment variable.");
        }

        if self.secondary_provider.api_key.expose_secret() == DEFAULT_PROVIDER_KEY {
            panic!(
                "FATAL: OPENROUTER_API_KEY is not set! Set OPENROUTER_API_KEY environment variable."
            );
        }

        if self.max_generation_attempts == 0 {
            panic!("FATAL: MAX_GENERATION_ATTEMPTS must be at least 1.");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            app_env: "test".to_string(),
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "study-royale-test".to_string(),
            documents_collection: "reviewers".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            primary_provider: ProviderConfig {
                api_base: "http://localhost:9001/v1".to_string(),
                api_key: SecretString::from("primary-test-key".to_string()),
                model: "primary-test-model".to_string(),
                temperature: 0.7,
                max_tokens: 3000,
            },
            secondary_provider: ProviderConfig {
                api_base: "http://localhost:9002/v1".to_string(),
                api_key: SecretString::from("secondary-test-key".to_string()),
                model: "secondary-test-model".to_string(),
                temperature: 0.4,
                max_tokens: 2500,
            },
            checker_temperature: 0.1,
            checker_max_tokens: 100,
            provider_timeout_secs: 5,
            max_generation_attempts: 2,
        }
    }
}
