use crate::constants::prompts;
use crate::models::domain::generation::TrueFalseVariant;
use crate::models::domain::question_type::QuestionTypeId;

pub const PRIMARY_SOURCE_LIMIT: usize = 3000;
pub const FILL_SOURCE_LIMIT: usize = 2500;

/// Prefix of `text` holding at most `limit` characters.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

fn render(template: &str, count: usize, material: &str) -> String {
    template
        .replace("{count}", &count.to_string())
        .replace("{material}", material)
}

fn primary_template(question_type: QuestionTypeId, variant: TrueFalseVariant) -> &'static str {
    match question_type {
        QuestionTypeId::MultipleChoice => prompts::MULTIPLE_CHOICE_TEMPLATE,
        QuestionTypeId::TrueFalse => match variant {
            TrueFalseVariant::Traditional => prompts::TRUE_FALSE_TEMPLATE,
            TrueFalseVariant::Conditional => prompts::TRUE_FALSE_CONDITIONAL_TEMPLATE,
        },
        QuestionTypeId::TrueFalseConditional => prompts::TRUE_FALSE_CONDITIONAL_TEMPLATE,
        QuestionTypeId::Identification => prompts::IDENTIFICATION_TEMPLATE,
        QuestionTypeId::Enumeration => prompts::ENUMERATION_TEMPLATE,
        QuestionTypeId::Flashcard => prompts::FLASHCARD_TEMPLATE,
        QuestionTypeId::Matching => prompts::MATCHING_TEMPLATE,
        QuestionTypeId::Association => prompts::ASSOCIATION_TEMPLATE,
        QuestionTypeId::CaseStudy => prompts::CASE_STUDY_TEMPLATE,
        QuestionTypeId::OddOneOut => prompts::ODD_ONE_OUT_TEMPLATE,
        QuestionTypeId::ExceptQuestions => prompts::EXCEPT_TEMPLATE,
    }
}

fn fill_template(question_type: QuestionTypeId) -> &'static str {
    match question_type {
        QuestionTypeId::MultipleChoice => prompts::FILL_MULTIPLE_CHOICE_TEMPLATE,
        QuestionTypeId::TrueFalse => prompts::FILL_TRUE_FALSE_TEMPLATE,
        QuestionTypeId::TrueFalseConditional => prompts::FILL_TRUE_FALSE_CONDITIONAL_TEMPLATE,
        QuestionTypeId::Identification => prompts::FILL_IDENTIFICATION_TEMPLATE,
        QuestionTypeId::Enumeration => prompts::FILL_ENUMERATION_TEMPLATE,
        QuestionTypeId::Flashcard => prompts::FILL_FLASHCARD_TEMPLATE,
        QuestionTypeId::Matching => prompts::FILL_MATCHING_TEMPLATE,
        QuestionTypeId::Association => prompts::FILL_ASSOCIATION_TEMPLATE,
        QuestionTypeId::CaseStudy => prompts::FILL_CASE_STUDY_TEMPLATE,
        QuestionTypeId::OddOneOut => prompts::FILL_ODD_ONE_OUT_TEMPLATE,
        QuestionTypeId::ExceptQuestions => prompts::FILL_EXCEPT_TEMPLATE,
    }
}

/// User prompt for the primary per-type generation call.
pub fn build_prompt(
    source_text: &str,
    question_type: QuestionTypeId,
    count: usize,
    special_instructions: Option<&str>,
    variant: TrueFalseVariant,
) -> String {
    let material = truncate_chars(source_text, PRIMARY_SOURCE_LIMIT);
    let mut prompt = render(primary_template(question_type, variant), count, material);

    if let Some(extra) = special_instructions.map(str::trim).filter(|s| !s.is_empty()) {
        prompt.push_str(prompts::ADDITIONAL_REQUIREMENT_PREFIX);
        prompt.push_str(extra);
    }

    prompt
}

/// Narrower prompt used by the secondary provider to fill a deficit.
pub fn build_fill_prompt(source_text: &str, question_type: QuestionTypeId, count: usize) -> String {
    let material = truncate_chars(source_text, FILL_SOURCE_LIMIT);
    render(fill_template(question_type), count, material)
}

pub fn primary_system_prompt(question_type: QuestionTypeId, count: usize) -> String {
    prompts::PRIMARY_SYSTEM_PROMPT
        .replace("{count}", &count.to_string())
        .replace("{noun}", question_type.prompt_noun())
}

pub fn secondary_system_prompt(question_type: QuestionTypeId, count: usize) -> String {
    prompts::SECONDARY_SYSTEM_PROMPT
        .replace("{count}", &count.to_string())
        .replace("{noun}", question_type.prompt_noun())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_chars_respects_multibyte_boundaries() {
        let text = "é".repeat(10);
        assert_eq!(truncate_chars(&text, 3), "ééé");
        assert_eq!(truncate_chars("short", 100), "short");
    }

    #[test]
    fn primary_prompt_truncates_source_to_limit() {
        let source = "a".repeat(PRIMARY_SOURCE_LIMIT + 500);
        let prompt = build_prompt(
            &source,
            QuestionTypeId::Identification,
            4,
            None,
            TrueFalseVariant::Traditional,
        );

        assert!(prompt.contains(&"a".repeat(PRIMARY_SOURCE_LIMIT)));
        assert!(!prompt.contains(&"a".repeat(PRIMARY_SOURCE_LIMIT + 1)));
        assert!(prompt.contains("Generate EXACTLY 4 identification questions."));
    }

    #[test]
    fn fill_prompt_uses_shorter_limit() {
        let source = "b".repeat(FILL_SOURCE_LIMIT + 10);
        let prompt = build_fill_prompt(&source, QuestionTypeId::MultipleChoice, 4);

        assert!(!prompt.contains(&"b".repeat(FILL_SOURCE_LIMIT + 1)));
        assert!(prompt.contains("Repeat 4 times."));
    }

    #[test]
    fn special_instructions_are_appended() {
        let prompt = build_prompt(
            "text",
            QuestionTypeId::MultipleChoice,
            2,
            Some("Focus on chapter 3"),
            TrueFalseVariant::Traditional,
        );
        assert!(prompt.ends_with("ADDITIONAL REQUIREMENT: Focus on chapter 3"));

        let prompt = build_prompt(
            "text",
            QuestionTypeId::MultipleChoice,
            2,
            Some("   "),
            TrueFalseVariant::Traditional,
        );
        assert!(!prompt.contains("ADDITIONAL REQUIREMENT"));
    }

    #[test]
    fn true_false_variant_selects_template() {
        let traditional = build_prompt(
            "text",
            QuestionTypeId::TrueFalse,
            3,
            None,
            TrueFalseVariant::Traditional,
        );
        let conditional = build_prompt(
            "text",
            QuestionTypeId::TrueFalse,
            3,
            None,
            TrueFalseVariant::Conditional,
        );

        assert!(traditional.contains("Answer: [True/False]"));
        assert!(conditional.contains("II. [second statement]"));
        assert!(conditional.contains("D) Neither I nor II is true"));
    }

    #[test]
    fn every_template_carries_its_label_vocabulary() {
        let expectations = [
            (QuestionTypeId::MultipleChoice, "Correct: [A/B/C/D]"),
            (QuestionTypeId::Identification, "Q: [question]"),
            (QuestionTypeId::Enumeration, "A: 1. [item]"),
            (QuestionTypeId::Flashcard, "Front: [term/question]"),
            (QuestionTypeId::Matching, "Column A | Column B"),
            (QuestionTypeId::Association, "II. [item]"),
            (QuestionTypeId::CaseStudy, "ModelAnswer:"),
            (QuestionTypeId::OddOneOut, "Q: Which is the odd one out?"),
            (QuestionTypeId::ExceptQuestions, "EXCEPT:"),
        ];

        for (question_type, label) in expectations {
            let prompt = build_prompt("text", question_type, 5, None, TrueFalseVariant::Traditional);
            assert!(prompt.contains(label), "{} prompt lacks {}", question_type, label);
            assert!(prompt.contains("EXACTLY 5"), "{} prompt lacks count", question_type);
            assert!(!prompt.contains("{count}") && !prompt.contains("{material}"));
        }
    }

    #[test]
    fn system_prompts_name_count_and_noun() {
        assert_eq!(
            primary_system_prompt(QuestionTypeId::Matching, 6),
            "You are a quiz generator. Generate EXACTLY 6 matching pairs in the EXACT format specified. No extra text, no numbering, no section headers. Just the questions."
        );
        assert!(secondary_system_prompt(QuestionTypeId::ExceptQuestions, 2)
            .starts_with("Generate EXACTLY 2 EXCEPT questions."));
    }
}
