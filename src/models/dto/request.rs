use serde::Deserialize;
use validator::Validate;

use crate::models::domain::generation::TrueFalseVariant;
use crate::models::domain::question_type::QuestionTypeId;

fn default_count() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequestDto {
    #[validate(length(min = 1, message = "reviewerId is required"))]
    pub reviewer_id: String,

    #[serde(default)]
    pub question_types: Option<Vec<QuestionTypeId>>,

    /// Single-type form, used only when `questionTypes` is absent.
    #[serde(default)]
    pub question_type: Option<QuestionTypeId>,

    #[serde(default = "default_count")]
    #[validate(range(min = 1, max = 100, message = "count must be between 1 and 100"))]
    pub count: usize,

    #[validate(length(max = 1000))]
    pub special_instructions: Option<String>,

    #[serde(default)]
    pub true_false_variant: TrueFalseVariant,
}

impl GenerateRequestDto {
    pub fn requested_types(&self) -> Vec<QuestionTypeId> {
        match (&self.question_types, self.question_type) {
            (Some(types), _) => types.clone(),
            (None, Some(single)) => vec![single],
            (None, None) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckAnswerRequestDto {
    #[validate(required(message = "userAnswer is required"))]
    pub user_answer: Option<String>,

    #[validate(required(message = "correctAnswer is required"))]
    pub correct_answer: Option<String>,

    #[serde(default)]
    pub question_text: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ParseRequestDto {
    pub raw_text: String,

    #[validate(length(min = 1, message = "at least one question type is required"))]
    pub question_types: Vec<QuestionTypeId>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ValidateRequestDto {
    pub raw_text: String,

    #[validate(length(min = 1, message = "at least one question type is required"))]
    pub question_types: Vec<QuestionTypeId>,

    #[validate(range(min = 1, max = 100))]
    pub total_count: usize,
}
