use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::domain::question_type::QuestionTypeId;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deficit {
    pub question_type: QuestionTypeId,
    pub expected: usize,
    pub actual: usize,
    pub needed: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub counts_by_type: BTreeMap<QuestionTypeId, usize>,
    pub deficits: Vec<Deficit>,
    pub is_complete: bool,
}

impl ValidationResult {
    pub fn count(&self, question_type: QuestionTypeId) -> usize {
        self.counts_by_type.get(&question_type).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts_by_type.values().sum()
    }

    pub fn total_needed(&self) -> usize {
        self.deficits.iter().map(|d| d.needed).sum()
    }
}
