use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use thiserror::Error;

use crate::models::domain::parsed_question::{FlashcardQuestion, OptionLabel, ParsedQuestion};
use crate::models::domain::question_type::QuestionTypeId;
use crate::services::answer_checker::{AnswerChecker, AnswerVerdict};
use crate::services::quiz_parser::ParseOutcome;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Idle,
    TypeSelection,
    Generating,
    Rendering,
    InProgress,
    Submitting,
    Scored,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot {action} while the session is {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: SessionState,
    },

    #[error("select at least one question type")]
    NoTypesSelected,

    #[error("question {0} does not exist")]
    UnknownQuestion(usize),

    #[error("question {index} is not answered with {kind}")]
    WrongAnswerKind { index: usize, kind: &'static str },

    #[error("pair {0} does not exist")]
    UnknownPair(usize),

    #[error("flashcard decks are not graded")]
    NotGradable,
}

pub type SessionResult<T> = Result<T, SessionError>;

/// What the user has entered for one question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAnswer {
    Choice(OptionLabel),
    TrueFalse(bool),
    Text(String),
    Matching(BTreeSet<usize>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchFeedback {
    Correct {
        matched: usize,
        total: usize,
        complete: bool,
    },
    Incorrect,
    AlreadyMatched,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub index: usize,
    pub question_type: QuestionTypeId,
    pub is_correct: bool,
    pub explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grader_note: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizScore {
    pub correct: usize,
    pub total: usize,
    pub percentage: f64,
    pub feedback: &'static str,
    pub results: Vec<QuestionResult>,
    pub submitted_at: DateTime<Utc>,
}

pub fn feedback_message(percentage: f64) -> &'static str {
    if percentage >= 90.0 {
        "Outstanding! You've mastered this material!"
    } else if percentage >= 80.0 {
        "Excellent work! You have a strong understanding!"
    } else if percentage >= 70.0 {
        "Good job! Review the explanations to improve further."
    } else if percentage >= 60.0 {
        "Keep practicing! Check the explanations below."
    } else {
        "Don't give up! Review and try again."
    }
}

/// Flip-card navigation for flashcard sessions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlashcardDeck {
    cards: Vec<FlashcardQuestion>,
    index: usize,
    flipped: bool,
}

impl FlashcardDeck {
    pub fn new(cards: Vec<FlashcardQuestion>) -> Self {
        Self {
            cards,
            index: 0,
            flipped: false,
        }
    }

    pub fn current(&self) -> Option<&FlashcardQuestion> {
        self.cards.get(self.index)
    }

    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.cards.len())
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Visible side of the current card.
    pub fn visible_text(&self) -> Option<&str> {
        self.current().map(|card| {
            if self.flipped {
                card.back.as_str()
            } else {
                card.front.as_str()
            }
        })
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn next(&mut self) -> bool {
        if self.index + 1 < self.cards.len() {
            self.index += 1;
            self.flipped = false;
            return true;
        }
        false
    }

    pub fn previous(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            self.flipped = false;
            return true;
        }
        false
    }
}

/// One quiz attempt from type selection through scoring.
#[derive(Debug)]
pub struct QuizSession {
    state: SessionState,
    selected_types: Vec<QuestionTypeId>,
    questions: Vec<ParsedQuestion>,
    answers: Vec<Option<UserAnswer>>,
    deck: Option<FlashcardDeck>,
    score: Option<QuizScore>,
    last_error: Option<String>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            selected_types: Vec::new(),
            questions: Vec::new(),
            answers: Vec::new(),
            deck: None,
            score: None,
            last_error: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn selected_types(&self) -> &[QuestionTypeId] {
        &self.selected_types
    }

    pub fn questions(&self) -> &[ParsedQuestion] {
        &self.questions
    }

    pub fn answer(&self, index: usize) -> Option<&UserAnswer> {
        self.answers.get(index).and_then(Option::as_ref)
    }

    pub fn score(&self) -> Option<&QuizScore> {
        self.score.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn require(&self, expected: SessionState, action: &'static str) -> SessionResult<()> {
        if self.state != expected {
            return Err(SessionError::InvalidTransition {
                action,
                state: self.state,
            });
        }
        Ok(())
    }

    pub fn open(&mut self) -> SessionResult<()> {
        self.require(SessionState::Idle, "open type selection")?;
        self.state = SessionState::TypeSelection;
        Ok(())
    }

    /// Flashcard is exclusive: picking it clears every other type, and picking
    /// any other type clears it. Other types toggle.
    pub fn toggle_type(&mut self, question_type: QuestionTypeId) -> SessionResult<()> {
        self.require(SessionState::TypeSelection, "change question types")?;

        if question_type == QuestionTypeId::Flashcard {
            self.selected_types = vec![QuestionTypeId::Flashcard];
        } else if self.selected_types.contains(&QuestionTypeId::Flashcard) {
            self.selected_types.retain(|t| *t != QuestionTypeId::Flashcard);
            self.selected_types.push(question_type);
        } else if let Some(pos) = self.selected_types.iter().position(|t| *t == question_type) {
            self.selected_types.remove(pos);
        } else {
            self.selected_types.push(question_type);
        }
        Ok(())
    }

    pub fn start_generation(&mut self) -> SessionResult<Vec<QuestionTypeId>> {
        self.require(SessionState::TypeSelection, "start generation")?;
        if self.selected_types.is_empty() {
            return Err(SessionError::NoTypesSelected);
        }
        self.last_error = None;
        self.state = SessionState::Generating;
        Ok(self.selected_types.clone())
    }

    pub fn generation_failed(&mut self, message: impl Into<String>) -> SessionResult<()> {
        self.require(SessionState::Generating, "report a generation failure")?;
        self.last_error = Some(message.into());
        self.state = SessionState::TypeSelection;
        Ok(())
    }

    /// Accepts parser output. An unparseable result returns to type selection
    /// with an error instead of rendering an empty quiz.
    pub fn load_questions(&mut self, outcome: ParseOutcome) -> SessionResult<()> {
        self.require(SessionState::Generating, "load questions")?;

        let questions = match outcome {
            ParseOutcome::Parsed(questions) => questions,
            ParseOutcome::Unparseable => {
                self.last_error = Some(
                    "Could not parse questions from the generated text. Try regenerating the quiz."
                        .to_string(),
                );
                self.state = SessionState::TypeSelection;
                return Ok(());
            }
        };

        let cards: Vec<FlashcardQuestion> = questions
            .iter()
            .filter_map(|q| match q {
                ParsedQuestion::Flashcard(card) => Some(card.clone()),
                _ => None,
            })
            .collect();
        self.deck = (!cards.is_empty() && cards.len() == questions.len())
            .then(|| FlashcardDeck::new(cards));

        self.answers = questions
            .iter()
            .map(|q| match q {
                ParsedQuestion::Matching(_) => Some(UserAnswer::Matching(BTreeSet::new())),
                _ => None,
            })
            .collect();
        self.questions = questions;
        self.score = None;
        self.state = SessionState::Rendering;
        Ok(())
    }

    pub fn start_attempt(&mut self) -> SessionResult<()> {
        self.require(SessionState::Rendering, "start the attempt")?;
        self.state = SessionState::InProgress;
        Ok(())
    }

    pub fn is_flashcard_session(&self) -> bool {
        self.deck.is_some()
    }

    pub fn deck_mut(&mut self) -> SessionResult<&mut FlashcardDeck> {
        let state = self.state;
        match (&mut self.deck, state) {
            (Some(deck), SessionState::InProgress) => Ok(deck),
            _ => Err(SessionError::InvalidTransition {
                action: "navigate flashcards",
                state,
            }),
        }
    }

    fn question_for_answer(&self, index: usize) -> SessionResult<&ParsedQuestion> {
        self.require(SessionState::InProgress, "change answers")?;
        self.questions
            .get(index)
            .ok_or(SessionError::UnknownQuestion(index))
    }

    pub fn select_option(&mut self, index: usize, label: OptionLabel) -> SessionResult<()> {
        if self.question_for_answer(index)?.options().is_none() {
            return Err(SessionError::WrongAnswerKind {
                index,
                kind: "an option",
            });
        }
        self.answers[index] = Some(UserAnswer::Choice(label));
        Ok(())
    }

    pub fn answer_true_false(&mut self, index: usize, value: bool) -> SessionResult<()> {
        if !matches!(self.question_for_answer(index)?, ParsedQuestion::TrueFalse(_)) {
            return Err(SessionError::WrongAnswerKind {
                index,
                kind: "true or false",
            });
        }
        self.answers[index] = Some(UserAnswer::TrueFalse(value));
        Ok(())
    }

    pub fn enter_text(&mut self, index: usize, text: impl Into<String>) -> SessionResult<()> {
        if !self.question_for_answer(index)?.question_type().is_free_text() {
            return Err(SessionError::WrongAnswerKind {
                index,
                kind: "text",
            });
        }
        self.answers[index] = Some(UserAnswer::Text(text.into()));
        Ok(())
    }

    /// Judges one pairing immediately. Correct pairings are remembered; a
    /// left item can only be matched once.
    pub fn attempt_match(
        &mut self,
        index: usize,
        left_index: usize,
        right: &str,
    ) -> SessionResult<MatchFeedback> {
        let pairs = match self.question_for_answer(index)? {
            ParsedQuestion::Matching(m) => &m.pairs,
            _ => {
                return Err(SessionError::WrongAnswerKind {
                    index,
                    kind: "matching pairs",
                })
            }
        };
        let total = pairs.len();
        let expected = pairs
            .get(left_index)
            .ok_or(SessionError::UnknownPair(left_index))?
            .right
            .clone();

        let slot = &mut self.answers[index];
        if !matches!(slot, Some(UserAnswer::Matching(_))) {
            *slot = Some(UserAnswer::Matching(BTreeSet::new()));
        }
        let Some(UserAnswer::Matching(matched)) = slot else {
            return Err(SessionError::UnknownQuestion(index));
        };

        if matched.contains(&left_index) {
            return Ok(MatchFeedback::AlreadyMatched);
        }
        if expected != right.trim() {
            return Ok(MatchFeedback::Incorrect);
        }

        matched.insert(left_index);
        Ok(MatchFeedback::Correct {
            matched: matched.len(),
            total,
            complete: matched.len() == total,
        })
    }

    /// Questions still lacking an answer. Matching progress is tracked during
    /// play and never counts as unanswered.
    pub fn unanswered_count(&self) -> usize {
        self.questions
            .iter()
            .zip(&self.answers)
            .filter(|(question, answer)| match (question, answer) {
                (ParsedQuestion::Matching(_), _) | (ParsedQuestion::Flashcard(_), _) => false,
                (_, Some(UserAnswer::Text(text))) => text.trim().is_empty(),
                (_, Some(_)) => false,
                (_, None) => true,
            })
            .count()
    }

    /// Grades every question, free-text answers concurrently through the
    /// checker, and freezes the session in `Scored`.
    pub async fn submit(&mut self, checker: &AnswerChecker) -> SessionResult<&QuizScore> {
        self.require(SessionState::InProgress, "submit")?;
        if self.is_flashcard_session() {
            return Err(SessionError::NotGradable);
        }
        self.state = SessionState::Submitting;

        let checks = self
            .questions
            .iter()
            .zip(&self.answers)
            .enumerate()
            .filter_map(|(index, (question, answer))| {
                let reference = question.reference_answer()?;
                let user_answer = match answer {
                    Some(UserAnswer::Text(text)) => text.clone(),
                    _ => String::new(),
                };
                let question_text = question.question_text();
                Some(async move {
                    let verdict = checker.check(&user_answer, reference, &question_text).await;
                    (index, verdict)
                })
            });
        let mut verdicts: HashMap<usize, AnswerVerdict> = join_all(checks).await.into_iter().collect();

        let mut results = Vec::with_capacity(self.questions.len());
        for (index, (question, answer)) in self.questions.iter().zip(&self.answers).enumerate() {
            if matches!(question, ParsedQuestion::Flashcard(_)) {
                continue;
            }

            let verdict = verdicts.remove(&index);
            let is_correct = match (question, answer, &verdict) {
                (_, _, Some(verdict)) => verdict.is_correct,
                (ParsedQuestion::TrueFalse(q), Some(UserAnswer::TrueFalse(value)), _) => {
                    q.correct_value == *value
                }
                (ParsedQuestion::Matching(m), Some(UserAnswer::Matching(matched)), _) => {
                    !m.pairs.is_empty() && matched.len() == m.pairs.len()
                }
                (q, Some(UserAnswer::Choice(label)), _) => q.correct_label() == Some(*label),
                _ => false,
            };

            results.push(QuestionResult {
                index,
                question_type: question.question_type(),
                is_correct,
                explanation: question.explanation(),
                grader_note: verdict.map(|v| v.explanation),
            });
        }

        let total = results.len();
        let correct = results.iter().filter(|r| r.is_correct).count();
        let percentage = if total == 0 {
            0.0
        } else {
            ((correct as f64 / total as f64) * 1000.0).round() / 10.0
        };

        log::info!("quiz submitted: {}/{} ({}%)", correct, total, percentage);

        self.state = SessionState::Scored;
        Ok(self.score.insert(QuizScore {
            correct,
            total,
            percentage,
            feedback: feedback_message(percentage),
            results,
            submitted_at: Utc::now(),
        }))
    }

    /// Explanation for a question, revealed only once the quiz is scored.
    pub fn explanation(&self, index: usize) -> Option<String> {
        if self.state != SessionState::Scored {
            return None;
        }
        self.questions.get(index).map(ParsedQuestion::explanation)
    }

    /// Discards the attempt and returns to type selection.
    pub fn exit(&mut self) {
        self.questions.clear();
        self.answers.clear();
        self.deck = None;
        self.score = None;
        self.last_error = None;
        self.state = SessionState::TypeSelection;
    }
}
