use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::domain::question_type::{unique_types, QuestionTypeId};

/// Rejects an empty selection and flashcards mixed with other types.
pub fn check_type_selection(types: &[QuestionTypeId]) -> AppResult<()> {
    let types = unique_types(types);
    if types.is_empty() {
        return Err(AppError::ValidationError(
            "at least one question type is required".to_string(),
        ));
    }

    if types.contains(&QuestionTypeId::Flashcard) && types.len() > 1 {
        return Err(AppError::ValidationError(
            "flashcard cannot be combined with other question types".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrueFalseVariant {
    #[default]
    Traditional,
    Conditional,
}

/// Everything the orchestrator needs for one generation run.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationRequest {
    pub source_text: String,
    pub requested_types: Vec<QuestionTypeId>,
    pub total_count: usize,
    pub special_instructions: Option<String>,
    pub true_false_variant: TrueFalseVariant,
}

impl GenerationRequest {
    /// Builds a request, dropping duplicate types and resolving `true-false`
    /// to its conditional form when that variant is selected.
    pub fn new(
        source_text: impl Into<String>,
        requested_types: &[QuestionTypeId],
        total_count: usize,
        special_instructions: Option<String>,
        true_false_variant: TrueFalseVariant,
    ) -> AppResult<Self> {
        if total_count == 0 {
            return Err(AppError::ValidationError(
                "count must be at least 1".to_string(),
            ));
        }

        let resolved: Vec<QuestionTypeId> = requested_types
            .iter()
            .map(|t| match (t, true_false_variant) {
                (QuestionTypeId::TrueFalse, TrueFalseVariant::Conditional) => {
                    QuestionTypeId::TrueFalseConditional
                }
                (other, _) => *other,
            })
            .collect();
        let resolved = unique_types(&resolved);
        check_type_selection(&resolved)?;

        let special_instructions = special_instructions
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            source_text: source_text.into(),
            requested_types: resolved,
            total_count,
            special_instructions,
            true_false_variant,
        })
    }

    pub fn distribution(&self) -> Vec<(QuestionTypeId, usize)> {
        distribute(self.total_count, &self.requested_types)
    }
}

/// Expected count for the type at `index` when `total` is spread over
/// `type_count` types: floor share, plus one for the first `total % type_count`.
pub fn expected_count(total: usize, type_count: usize, index: usize) -> usize {
    if type_count == 0 {
        return 0;
    }
    total / type_count + usize::from(index < total % type_count)
}

pub fn distribute(total: usize, types: &[QuestionTypeId]) -> Vec<(QuestionTypeId, usize)> {
    types
        .iter()
        .enumerate()
        .map(|(index, t)| (*t, expected_count(total, types.len(), index)))
        .collect()
}
