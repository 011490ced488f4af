use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::domain::question_type::QuestionTypeId;
use crate::services::answer_checker::AnswerVerdict;
use crate::services::generation_service::GenerationOutput;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub question_types: Vec<QuestionTypeId>,
    pub questions: String,
    pub reviewer_id: String,
    pub is_complete: bool,
    pub counts: BTreeMap<QuestionTypeId, usize>,
    pub attempts: u32,
}

impl GenerateResponse {
    pub fn new(reviewer_id: String, question_types: Vec<QuestionTypeId>, output: GenerationOutput) -> Self {
        GenerateResponse {
            success: true,
            question_types,
            questions: output.raw_text,
            reviewer_id,
            is_complete: output.validation.is_complete,
            counts: output.validation.counts_by_type,
            attempts: output.attempts,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAnswerResponse {
    pub success: bool,
    pub is_correct: bool,
    pub explanation: String,
}

impl From<AnswerVerdict> for CheckAnswerResponse {
    fn from(verdict: AnswerVerdict) -> Self {
        CheckAnswerResponse {
            success: true,
            is_correct: verdict.is_correct,
            explanation: verdict.explanation,
        }
    }
}
