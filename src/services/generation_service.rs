use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Config;
use crate::constants::prompts::MATCHING_HEADER;
use crate::errors::{AppError, AppResult, ProviderError};
use crate::models::domain::generation::GenerationRequest;
use crate::models::domain::question_type::QuestionTypeId;
use crate::models::domain::validation::{Deficit, ValidationResult};
use crate::services::line_grammar::MATCHING_HEADER_PREFIX;
use crate::services::prompt_builder;
use crate::services::provider::{complete_with_timeout, CompletionOptions, CompletionProvider};
use crate::services::question_validator;

static PRIMARY_INTRO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(Here are|Here's|Below are|I've generated).*?:\s*")
        .expect("PRIMARY_INTRO is a valid regex pattern")
});

static SECONDARY_INTRO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(Here are|Here's|Below are|I've|This is|Generate).*?:\s*")
        .expect("SECONDARY_INTRO is a valid regex pattern")
});

static SECTION_HEADER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?im)^(Case Study|Multiple Choice|True/False|Identification|Odd One Out|Enumeration|Matching|Association|Flashcard|Fill|Except)[^\n]*\n",
    )
    .expect("SECTION_HEADER_LINE is a valid regex pattern")
});

/// Strips a leading "Here are ...:" intro from primary output.
pub fn clean_primary_output(text: &str) -> String {
    PRIMARY_INTRO.replace(text, "").trim().to_string()
}

/// Cleans secondary output: intro text and stray section headers are removed,
/// and matching fills get their column header back.
pub fn clean_secondary_output(text: &str, question_type: QuestionTypeId) -> String {
    let text = SECONDARY_INTRO.replace(text.trim(), "");
    let text = SECTION_HEADER_LINE.replace_all(&text, "");
    let text = text.trim();

    if question_type == QuestionTypeId::Matching && !text.starts_with(MATCHING_HEADER_PREFIX) {
        return format!("{}\n{}", MATCHING_HEADER, text);
    }
    text.to_string()
}

fn append_block(buffer: &mut String, block: &str) {
    if block.trim().is_empty() {
        return;
    }
    if !buffer.is_empty() {
        buffer.push_str("\n\n");
    }
    buffer.push_str(block);
}

/// Explicit knobs for one orchestrator instance.
#[derive(Clone, Debug)]
pub struct GenerationSettings {
    pub max_attempts: u32,
    pub call_timeout: Duration,
    pub primary_options: CompletionOptions,
    pub secondary_options: CompletionOptions,
}

impl GenerationSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_attempts: config.max_generation_attempts,
            call_timeout: config.provider_timeout(),
            primary_options: CompletionOptions::from_config(&config.primary_provider),
            secondary_options: CompletionOptions::from_config(&config.secondary_provider),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenerationOutput {
    pub raw_text: String,
    pub validation: ValidationResult,
    pub attempts: u32,
}

impl GenerationOutput {
    fn delivered_units(&self, types: &[QuestionTypeId]) -> usize {
        types.iter().map(|t| self.validation.count(*t)).sum()
    }

    fn rank(&self, types: &[QuestionTypeId]) -> (usize, bool) {
        (self.delivered_units(types), !self.raw_text.trim().is_empty())
    }
}

pub struct GenerationService {
    primary: Arc<dyn CompletionProvider>,
    secondary: Arc<dyn CompletionProvider>,
    settings: GenerationSettings,
}

impl GenerationService {
    pub fn new(
        primary: Arc<dyn CompletionProvider>,
        secondary: Arc<dyn CompletionProvider>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            primary,
            secondary,
            settings,
        }
    }

    /// Generates raw quiz text for `request`, back-filling deficits through the
    /// secondary provider and retrying the whole cycle while attempts remain.
    /// Returns the best attempt when none validates completely.
    pub async fn generate(&self, request: &GenerationRequest) -> AppResult<GenerationOutput> {
        let types = &request.requested_types;
        let max_attempts = self.settings.max_attempts.max(1);
        let mut best: Option<GenerationOutput> = None;
        let mut last_error: Option<ProviderError> = None;

        for attempt in 1..=max_attempts {
            log::info!(
                "generation attempt {}/{}: {} questions across {} types",
                attempt,
                max_attempts,
                request.total_count,
                types.len()
            );

            let (mut raw_text, errors) = self.primary_pass(request).await;
            if let Some(err) = errors.into_iter().last() {
                last_error = Some(err);
            }

            let mut validation =
                question_validator::validate(&raw_text, types, request.total_count);

            if !validation.is_complete {
                let fill_errors = self
                    .fill_deficits(request, &validation.deficits, &mut raw_text)
                    .await;
                if let Some(err) = fill_errors.into_iter().last() {
                    last_error = Some(err);
                }
                validation = question_validator::validate(&raw_text, types, request.total_count);
            }

            let output = GenerationOutput {
                raw_text,
                validation,
                attempts: attempt,
            };

            if output.validation.is_complete {
                log::info!(
                    "generation complete after {} attempt(s): {} questions",
                    attempt,
                    output.delivered_units(types)
                );
                return Ok(output);
            }

            log::warn!(
                "attempt {} incomplete, still missing {} questions",
                attempt,
                output.validation.total_needed()
            );

            let replace = best
                .as_ref()
                .map_or(true, |b| output.rank(types) >= b.rank(types));
            if replace {
                best = Some(output);
            }
        }

        let best = best.ok_or_else(|| {
            AppError::InternalError("generation finished without any attempt".to_string())
        })?;

        if best.raw_text.trim().is_empty() {
            if let Some(err) = last_error {
                log::error!("generation produced no output: {}", err);
                return Err(err.into());
            }
        }

        log::warn!(
            "returning best-effort output with {} of {} questions",
            best.delivered_units(types),
            request.total_count
        );
        Ok(best)
    }

    /// One primary call per requested type, issued concurrently and joined in
    /// request order. Failed types contribute nothing.
    async fn primary_pass(&self, request: &GenerationRequest) -> (String, Vec<ProviderError>) {
        let plan: Vec<(QuestionTypeId, usize)> = request
            .distribution()
            .into_iter()
            .filter(|(question_type, count)| {
                if *count == 0 {
                    log::debug!("{}: nothing to generate", question_type);
                }
                *count > 0
            })
            .collect();

        let calls = plan.into_iter().map(|(question_type, count)| {
            let system = prompt_builder::primary_system_prompt(question_type, count);
            let user = prompt_builder::build_prompt(
                &request.source_text,
                question_type,
                count,
                request.special_instructions.as_deref(),
                request.true_false_variant,
            );
            async move {
                let result = complete_with_timeout(
                    self.primary.as_ref(),
                    self.settings.call_timeout,
                    &system,
                    &user,
                    &self.settings.primary_options,
                )
                .await;
                (question_type, count, result)
            }
        });

        let mut text = String::new();
        let mut errors = Vec::new();
        for (question_type, count, result) in join_all(calls).await {
            match result {
                Ok(content) => {
                    log::info!("primary generated {} {}", count, question_type.prompt_noun());
                    log::debug!("{} output:\n{}", question_type, content);
                    append_block(&mut text, &clean_primary_output(&content));
                }
                Err(err) => {
                    log::warn!("primary generation failed for {}: {}", question_type, err);
                    errors.push(err);
                }
            }
        }

        (text, errors)
    }

    /// One secondary call per deficit for exactly the missing count. Results
    /// are appended in deficit order; failures leave the deficit open.
    async fn fill_deficits(
        &self,
        request: &GenerationRequest,
        deficits: &[Deficit],
        buffer: &mut String,
    ) -> Vec<ProviderError> {
        let calls = deficits.iter().map(|deficit| {
            let question_type = deficit.question_type;
            let needed = deficit.needed;
            let system = prompt_builder::secondary_system_prompt(question_type, needed);
            let user = prompt_builder::build_fill_prompt(&request.source_text, question_type, needed);
            log::info!(
                "secondary filling {} missing {} (have {}, need {})",
                needed,
                question_type,
                deficit.actual,
                deficit.expected
            );
            async move {
                let result = complete_with_timeout(
                    self.secondary.as_ref(),
                    self.settings.call_timeout,
                    &system,
                    &user,
                    &self.settings.secondary_options,
                )
                .await;
                (question_type, result)
            }
        });

        let mut errors = Vec::new();
        for (question_type, result) in join_all(calls).await {
            match result {
                Ok(content) => {
                    log::debug!("{} fill output:\n{}", question_type, content);
                    append_block(buffer, &clean_secondary_output(&content, question_type));
                }
                Err(err) => {
                    log::warn!("secondary fill failed for {}: {}", question_type, err);
                    errors.push(err);
                }
            }
        }
        errors
    }
}
