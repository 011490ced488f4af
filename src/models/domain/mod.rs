pub mod generation;
pub mod parsed_question;
pub mod question_type;
pub mod source_document;
pub mod validation;

pub use generation::{GenerationRequest, TrueFalseVariant};
pub use parsed_question::ParsedQuestion;
pub use question_type::QuestionTypeId;
pub use source_document::SourceDocument;
pub use validation::{Deficit, ValidationResult};
