use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

use crate::config::Config;
use crate::constants::prompts::{ANSWER_CHECKER_SYSTEM_PROMPT, ANSWER_CHECKER_USER_TEMPLATE};
use crate::services::provider::{complete_with_timeout, CompletionOptions, CompletionProvider};

static CHECKER_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{(question|reference|answer)\}")
        .expect("CHECKER_PLACEHOLDER is a valid regex pattern")
});

pub const FALLBACK_EXPLANATION: &str = "Basic comparison used";
pub const BLANK_ANSWER_EXPLANATION: &str = "No answer provided";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckMethod {
    Model,
    ExactMatch,
    Blank,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerVerdict {
    pub is_correct: bool,
    pub explanation: String,
    pub method: CheckMethod,
}

/// Reads a grader reply: it must mention "correct" and must not open with
/// "incorrect".
pub fn interpret_verdict(response: &str) -> bool {
    let lower = response.to_lowercase();
    lower.contains("correct") && !lower.trim_start().starts_with("incorrect")
}

/// Fills the grader template in one pass, so placeholder-like text inside a
/// field is never substituted again.
fn fill_checker_prompt(question: &str, reference: &str, answer: &str) -> String {
    CHECKER_PLACEHOLDER
        .replace_all(ANSWER_CHECKER_USER_TEMPLATE, |caps: &Captures| match &caps[1] {
            "question" => question.to_string(),
            "reference" => reference.to_string(),
            _ => answer.to_string(),
        })
        .into_owned()
}

/// Trimmed, case-insensitive equality.
pub fn exact_match(user_answer: &str, reference_answer: &str) -> bool {
    user_answer.trim().to_lowercase() == reference_answer.trim().to_lowercase()
}

/// Lenient free-text grading through a completion provider, falling back to
/// exact matching when the provider is unavailable.
pub struct AnswerChecker {
    provider: Arc<dyn CompletionProvider>,
    options: CompletionOptions,
    timeout: Duration,
}

impl AnswerChecker {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        options: CompletionOptions,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            options,
            timeout,
        }
    }

    pub fn from_config(provider: Arc<dyn CompletionProvider>, config: &Config) -> Self {
        let options = CompletionOptions::from_config(&config.primary_provider)
            .with_sampling(config.checker_temperature, config.checker_max_tokens);
        Self::new(provider, options, config.provider_timeout())
    }

    pub async fn check(
        &self,
        user_answer: &str,
        reference_answer: &str,
        question_text: &str,
    ) -> AnswerVerdict {
        if user_answer.trim().is_empty() {
            return AnswerVerdict {
                is_correct: false,
                explanation: BLANK_ANSWER_EXPLANATION.to_string(),
                method: CheckMethod::Blank,
            };
        }

        let user_prompt = fill_checker_prompt(question_text, reference_answer, user_answer);

        match complete_with_timeout(
            self.provider.as_ref(),
            self.timeout,
            ANSWER_CHECKER_SYSTEM_PROMPT,
            &user_prompt,
            &self.options,
        )
        .await
        {
            Ok(response) => AnswerVerdict {
                is_correct: interpret_verdict(&response),
                explanation: response.trim().to_string(),
                method: CheckMethod::Model,
            },
            Err(err) => {
                log::warn!("answer check fell back to exact match: {}", err);
                AnswerVerdict {
                    is_correct: exact_match(user_answer, reference_answer),
                    explanation: FALLBACK_EXPLANATION.to_string(),
                    method: CheckMethod::ExactMatch,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ProviderError;
    use crate::services::provider::MockCompletionProvider;

    fn checker(provider: MockCompletionProvider) -> AnswerChecker {
        AnswerChecker::from_config(Arc::new(provider), &Config::test_config())
    }

    #[test]
    fn verdict_heuristic() {
        assert!(interpret_verdict("CORRECT - same meaning"));
        assert!(interpret_verdict("  Correct."));
        assert!(!interpret_verdict("INCORRECT - wrong city"));
        assert!(!interpret_verdict("  incorrect"));
        assert!(!interpret_verdict("The student is wrong."));
    }

    #[test]
    fn exact_match_ignores_case_and_padding() {
        assert!(exact_match("Paris", " paris "));
        assert!(!exact_match("Paris", "Lyon"));
    }

    #[tokio::test]
    async fn model_verdict_is_used_when_available() {
        let mut provider = MockCompletionProvider::new();
        provider
            .expect_complete()
            .times(1)
            .withf(|system, user, options| {
                system == ANSWER_CHECKER_SYSTEM_PROMPT
                    && user.contains("Student Answer: Pari")
                    && user.contains("Correct Answer: Paris")
                    && options.temperature == 0.1
                    && options.max_tokens == 100
            })
            .returning(|_, _, _| Ok("CORRECT - minor spelling mistake".to_string()));

        let verdict = checker(provider)
            .check("Pari", "Paris", "Capital of France?")
            .await;

        assert!(verdict.is_correct);
        assert_eq!(verdict.method, CheckMethod::Model);
        assert_eq!(verdict.explanation, "CORRECT - minor spelling mistake");
    }

    #[tokio::test]
    async fn provider_failure_falls_back_to_exact_match() {
        let mut provider = MockCompletionProvider::new();
        provider
            .expect_complete()
            .returning(|_, _, _| Err(ProviderError::Api("unavailable".to_string())));

        let verdict = checker(provider)
            .check("Paris", " paris ", "Capital of France?")
            .await;

        assert!(verdict.is_correct);
        assert_eq!(verdict.explanation, FALLBACK_EXPLANATION);
        assert_eq!(verdict.method, CheckMethod::ExactMatch);
    }

    #[tokio::test]
    async fn blank_answer_is_incorrect_without_provider_call() {
        let provider = MockCompletionProvider::new();

        let verdict = checker(provider).check("   ", "Paris", "Capital?").await;

        assert!(!verdict.is_correct);
        assert_eq!(verdict.method, CheckMethod::Blank);
    }

    #[test]
    fn placeholder_text_in_fields_is_left_alone() {
        let prompt = fill_checker_prompt("Explain {answer} and {reference}", "Paris", "Lyon");

        assert!(prompt.starts_with("Question: Explain {answer} and {reference}\n"));
        assert!(prompt.contains("Correct Answer: Paris\n"));
        assert!(prompt.contains("Student Answer: Lyon\n"));
    }
}
