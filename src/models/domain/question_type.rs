use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The eleven question shapes the generator can be asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionTypeId {
    MultipleChoice,
    TrueFalse,
    TrueFalseConditional,
    Identification,
    Enumeration,
    Flashcard,
    Matching,
    Association,
    CaseStudy,
    OddOneOut,
    ExceptQuestions,
}

impl QuestionTypeId {
    pub const ALL: [QuestionTypeId; 11] = [
        QuestionTypeId::MultipleChoice,
        QuestionTypeId::TrueFalse,
        QuestionTypeId::TrueFalseConditional,
        QuestionTypeId::Identification,
        QuestionTypeId::Enumeration,
        QuestionTypeId::Flashcard,
        QuestionTypeId::Matching,
        QuestionTypeId::Association,
        QuestionTypeId::CaseStudy,
        QuestionTypeId::OddOneOut,
        QuestionTypeId::ExceptQuestions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionTypeId::MultipleChoice => "multiple-choice",
            QuestionTypeId::TrueFalse => "true-false",
            QuestionTypeId::TrueFalseConditional => "true-false-conditional",
            QuestionTypeId::Identification => "identification",
            QuestionTypeId::Enumeration => "enumeration",
            QuestionTypeId::Flashcard => "flashcard",
            QuestionTypeId::Matching => "matching",
            QuestionTypeId::Association => "association",
            QuestionTypeId::CaseStudy => "case-study",
            QuestionTypeId::OddOneOut => "odd-one-out",
            QuestionTypeId::ExceptQuestions => "except-questions",
        }
    }

    /// Noun used in prompts ("Generate EXACTLY 4 {noun}").
    pub fn prompt_noun(&self) -> &'static str {
        match self {
            QuestionTypeId::MultipleChoice => "multiple choice questions",
            QuestionTypeId::TrueFalse => "true/false questions",
            QuestionTypeId::TrueFalseConditional => "conditional true/false questions",
            QuestionTypeId::Identification => "identification questions",
            QuestionTypeId::Enumeration => "enumeration questions",
            QuestionTypeId::Flashcard => "flashcards",
            QuestionTypeId::Matching => "matching pairs",
            QuestionTypeId::Association => "association questions",
            QuestionTypeId::CaseStudy => "case study questions",
            QuestionTypeId::OddOneOut => "odd one out questions",
            QuestionTypeId::ExceptQuestions => "EXCEPT questions",
        }
    }

    /// Answered by typing rather than by picking an option.
    pub fn is_free_text(&self) -> bool {
        matches!(
            self,
            QuestionTypeId::Identification | QuestionTypeId::Enumeration | QuestionTypeId::CaseStudy
        )
    }
}

/// Drops repeated ids, keeping first-seen order.
pub fn unique_types(types: &[QuestionTypeId]) -> Vec<QuestionTypeId> {
    let mut unique = Vec::with_capacity(types.len());
    for t in types {
        if !unique.contains(t) {
            unique.push(*t);
        }
    }
    unique
}

impl fmt::Display for QuestionTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionTypeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionTypeId::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| format!("unknown question type '{}'", s))
    }
}
