mod common;

use std::sync::Arc;

use common::{test_config, ScriptedProvider};
use study_royale_server::{
    models::domain::{parsed_question::OptionLabel, ParsedQuestion, QuestionTypeId},
    services::{
        answer_checker::AnswerChecker,
        question_validator, quiz_parser,
        quiz_session_service::{MatchFeedback, QuizSession, SessionState},
    },
};

const GENERATED: &str = "Q: Which organelle produces ATP?\n\
    A) Nucleus\nB) Mitochondria\nC) Ribosome\nD) Vacuole\nCorrect: B\n\n\
    Statement: Plant cells have cell walls.\nAnswer: True\nExplanation: Made of cellulose.\n\n\
    Statement: Which organelle contains chlorophyll?\nI. Chloroplast\nII. Lysosome\n\
    A) If \"I\" is associated\nB) If \"II\" is associated\nC) If both are associated\nD) Neither are associated\n\
    Correct: A\n\n\
    Q: Name the powerhouse of the cell.\nA: Mitochondria\n\n\
    Column A | Column B\nDNA | Genetic code\nATP | Energy currency";

fn requested() -> Vec<QuestionTypeId> {
    vec![
        QuestionTypeId::MultipleChoice,
        QuestionTypeId::TrueFalse,
        QuestionTypeId::Association,
        QuestionTypeId::Identification,
        QuestionTypeId::Matching,
    ]
}

#[test]
fn validator_and_parser_agree_on_generated_text() {
    let types = requested();
    let parsed = quiz_parser::parse(GENERATED, &types).into_questions();
    let validation = question_validator::validate(GENERATED, &types, 5);

    assert_eq!(question_validator::tally(&parsed), validation.counts_by_type);
    assert!(validation.is_complete);
    assert!(matches!(parsed[2], ParsedQuestion::Association(_)));
    assert_eq!(parsed[4].unit_count(), 2);
}

#[test]
fn matching_pairs_do_not_depend_on_header() {
    let types = [QuestionTypeId::Matching];
    let with_header = quiz_parser::parse("Column A | Column B\nDNA | Genetic code", &types);
    let without_header = quiz_parser::parse("DNA | Genetic code", &types);

    assert_eq!(with_header, without_header);
}

#[tokio::test]
async fn full_session_from_generated_text_to_score() {
    let types = requested();
    let checker = AnswerChecker::from_config(
        Arc::new(ScriptedProvider::replying(&["CORRECT - matches the reference"])),
        &test_config(),
    );

    let mut session = QuizSession::new();
    session.open().unwrap();
    for t in &types {
        session.toggle_type(*t).unwrap();
    }
    let selected = session.start_generation().unwrap();
    session
        .load_questions(quiz_parser::parse(GENERATED, &selected))
        .unwrap();
    session.start_attempt().unwrap();
    assert_eq!(session.unanswered_count(), 4);

    session.select_option(0, OptionLabel::B).unwrap();
    session.answer_true_false(1, true).unwrap();
    session.select_option(2, OptionLabel::C).unwrap();
    session.enter_text(3, "mitochondrion").unwrap();
    assert_eq!(
        session.attempt_match(4, 1, "Energy currency").unwrap(),
        MatchFeedback::Correct {
            matched: 1,
            total: 2,
            complete: false
        }
    );
    assert!(matches!(
        session.attempt_match(4, 0, "Genetic code").unwrap(),
        MatchFeedback::Correct { complete: true, .. }
    ));

    let score = session.submit(&checker).await.unwrap().clone();

    assert_eq!(session.state(), SessionState::Scored);
    assert_eq!(score.total, 5);
    assert_eq!(score.correct, 4);
    assert_eq!(score.percentage, 80.0);
    assert_eq!(
        score.feedback,
        "Excellent work! You have a strong understanding!"
    );
    assert!(!score.results[2].is_correct);
    assert_eq!(
        session.explanation(1).as_deref(),
        Some("Correct Answer: True\nExplanation: Made of cellulose.")
    );

    session.exit();
    assert_eq!(session.state(), SessionState::TypeSelection);
}
