pub mod answer_checker;
pub mod generation_service;
pub mod line_grammar;
pub mod prompt_builder;
pub mod provider;
pub mod question_validator;
pub mod quiz_parser;
pub mod quiz_session_service;
