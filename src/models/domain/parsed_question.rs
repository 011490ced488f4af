use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::domain::question_type::QuestionTypeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::D];

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(OptionLabel::A),
            'B' => Some(OptionLabel::B),
            'C' => Some(OptionLabel::C),
            'D' => Some(OptionLabel::D),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            OptionLabel::A => 'A',
            OptionLabel::B => 'B',
            OptionLabel::C => 'C',
            OptionLabel::D => 'D',
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChoiceOption {
    pub label: OptionLabel,
    pub text: String,
}

impl ChoiceOption {
    /// Display form, e.g. `B) Paris`.
    pub fn display(&self) -> String {
        format!("{}) {}", self.label, self.text)
    }
}

/// Shared shape of multiple-choice, odd-one-out and except questions.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceQuestion {
    pub prompt: String,
    pub options: Vec<ChoiceOption>,
    pub correct_label: OptionLabel,
}

/// Statement with two Roman-numeral items and four options. Used by both
/// association and conditional true/false; for the latter `statement` is the
/// header line.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RomanChoiceQuestion {
    pub statement: String,
    pub item_i: String,
    pub item_ii: String,
    pub options: Vec<ChoiceOption>,
    pub correct_label: OptionLabel,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrueFalseQuestion {
    pub statement: String,
    pub correct_value: bool,
    pub explanation: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreeTextQuestion {
    pub prompt: String,
    pub reference_answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct FlashcardQuestion {
    pub front: String,
    pub back: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MatchingPair {
    pub left: String,
    pub right: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MatchingQuestion {
    pub pairs: Vec<MatchingPair>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudyQuestion {
    pub scenario: String,
    pub prompt: String,
    pub model_answer: String,
}

/// One question recovered from generated text.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ParsedQuestion {
    MultipleChoice(ChoiceQuestion),
    TrueFalse(TrueFalseQuestion),
    TrueFalseConditional(RomanChoiceQuestion),
    Identification(FreeTextQuestion),
    Enumeration(FreeTextQuestion),
    Flashcard(FlashcardQuestion),
    Matching(MatchingQuestion),
    Association(RomanChoiceQuestion),
    CaseStudy(CaseStudyQuestion),
    OddOneOut(ChoiceQuestion),
    ExceptQuestions(ChoiceQuestion),
}

impl ParsedQuestion {
    pub fn question_type(&self) -> QuestionTypeId {
        match self {
            ParsedQuestion::MultipleChoice(_) => QuestionTypeId::MultipleChoice,
            ParsedQuestion::TrueFalse(_) => QuestionTypeId::TrueFalse,
            ParsedQuestion::TrueFalseConditional(_) => QuestionTypeId::TrueFalseConditional,
            ParsedQuestion::Identification(_) => QuestionTypeId::Identification,
            ParsedQuestion::Enumeration(_) => QuestionTypeId::Enumeration,
            ParsedQuestion::Flashcard(_) => QuestionTypeId::Flashcard,
            ParsedQuestion::Matching(_) => QuestionTypeId::Matching,
            ParsedQuestion::Association(_) => QuestionTypeId::Association,
            ParsedQuestion::CaseStudy(_) => QuestionTypeId::CaseStudy,
            ParsedQuestion::OddOneOut(_) => QuestionTypeId::OddOneOut,
            ParsedQuestion::ExceptQuestions(_) => QuestionTypeId::ExceptQuestions,
        }
    }

    /// How many generated units this record accounts for. Matching is
    /// generated and counted per pair; everything else counts once.
    pub fn unit_count(&self) -> usize {
        match self {
            ParsedQuestion::Matching(m) => m.pairs.len(),
            _ => 1,
        }
    }

    /// Label of the correct option for choice-shaped questions.
    pub fn correct_label(&self) -> Option<OptionLabel> {
        match self {
            ParsedQuestion::MultipleChoice(q)
            | ParsedQuestion::OddOneOut(q)
            | ParsedQuestion::ExceptQuestions(q) => Some(q.correct_label),
            ParsedQuestion::Association(q) | ParsedQuestion::TrueFalseConditional(q) => {
                Some(q.correct_label)
            }
            _ => None,
        }
    }

    pub fn options(&self) -> Option<&[ChoiceOption]> {
        match self {
            ParsedQuestion::MultipleChoice(q)
            | ParsedQuestion::OddOneOut(q)
            | ParsedQuestion::ExceptQuestions(q) => Some(&q.options),
            ParsedQuestion::Association(q) | ParsedQuestion::TrueFalseConditional(q) => {
                Some(&q.options)
            }
            _ => None,
        }
    }

    /// Question text handed to the answer checker for free-text types.
    pub fn question_text(&self) -> String {
        match self {
            ParsedQuestion::MultipleChoice(q)
            | ParsedQuestion::OddOneOut(q)
            | ParsedQuestion::ExceptQuestions(q) => q.prompt.clone(),
            ParsedQuestion::Association(q) | ParsedQuestion::TrueFalseConditional(q) => {
                format!("{}\nI. {}\nII. {}", q.statement, q.item_i, q.item_ii)
            }
            ParsedQuestion::TrueFalse(q) => q.statement.clone(),
            ParsedQuestion::Identification(q) | ParsedQuestion::Enumeration(q) => q.prompt.clone(),
            ParsedQuestion::Flashcard(q) => q.front.clone(),
            ParsedQuestion::Matching(_) => "Match items from Column A with Column B".to_string(),
            ParsedQuestion::CaseStudy(q) => q.prompt.clone(),
        }
    }

    /// Reference answer text for free-text types.
    pub fn reference_answer(&self) -> Option<&str> {
        match self {
            ParsedQuestion::Identification(q) | ParsedQuestion::Enumeration(q) => {
                Some(&q.reference_answer)
            }
            ParsedQuestion::CaseStudy(q) => Some(&q.model_answer),
            _ => None,
        }
    }

    /// Text revealed after submission.
    pub fn explanation(&self) -> String {
        match self {
            ParsedQuestion::TrueFalse(q) => {
                let answer = if q.correct_value { "True" } else { "False" };
                if q.explanation.is_empty() {
                    format!("Correct Answer: {}", answer)
                } else {
                    format!("Correct Answer: {}\nExplanation: {}", answer, q.explanation)
                }
            }
            ParsedQuestion::CaseStudy(q) => format!("Model Answer: {}", q.model_answer),
            ParsedQuestion::Identification(q) | ParsedQuestion::Enumeration(q) => {
                format!("Correct Answer: {}", q.reference_answer)
            }
            ParsedQuestion::Flashcard(q) => q.back.clone(),
            ParsedQuestion::Matching(q) => q
                .pairs
                .iter()
                .map(|p| format!("{} | {}", p.left, p.right))
                .collect::<Vec<_>>()
                .join("\n"),
            other => {
                let label = other.correct_label();
                let option = other
                    .options()
                    .and_then(|opts| opts.iter().find(|o| Some(o.label) == label));
                match option {
                    Some(o) => format!("Correct Answer: {}", o.display()),
                    None => String::new(),
                }
            }
        }
    }
}
