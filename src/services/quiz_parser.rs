use serde::Serialize;

use crate::models::domain::parsed_question::ParsedQuestion;
use crate::models::domain::question_type::QuestionTypeId;
use crate::services::line_grammar;

/// Result of parsing generated text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "questions", rename_all = "lowercase")]
pub enum ParseOutcome {
    Parsed(Vec<ParsedQuestion>),
    Unparseable,
}

impl ParseOutcome {
    pub fn questions(&self) -> &[ParsedQuestion] {
        match self {
            ParseOutcome::Parsed(questions) => questions,
            ParseOutcome::Unparseable => &[],
        }
    }

    pub fn into_questions(self) -> Vec<ParsedQuestion> {
        match self {
            ParseOutcome::Parsed(questions) => questions,
            ParseOutcome::Unparseable => Vec::new(),
        }
    }

    pub fn is_unparseable(&self) -> bool {
        matches!(self, ParseOutcome::Unparseable)
    }
}

/// Converts raw generated text into ordered, typed question records.
pub fn parse(raw_text: &str, requested_types: &[QuestionTypeId]) -> ParseOutcome {
    let questions = line_grammar::scan(raw_text, requested_types);

    if questions.is_empty() {
        log::warn!(
            "could not parse any questions from {} characters of generated text",
            raw_text.len()
        );
        return ParseOutcome::Unparseable;
    }

    log::info!("parsed {} questions", questions.len());
    ParseOutcome::Parsed(questions)
}
