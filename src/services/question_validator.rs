use std::collections::BTreeMap;

use crate::models::domain::generation::distribute;
use crate::models::domain::parsed_question::ParsedQuestion;
use crate::models::domain::question_type::{unique_types, QuestionTypeId};
use crate::models::domain::validation::{Deficit, ValidationResult};
use crate::services::line_grammar;

/// Per-type unit tally of already-recognised questions, with every type present.
pub fn tally(questions: &[ParsedQuestion]) -> BTreeMap<QuestionTypeId, usize> {
    let mut counts: BTreeMap<QuestionTypeId, usize> =
        QuestionTypeId::ALL.iter().map(|t| (*t, 0)).collect();
    for question in questions {
        *counts.entry(question.question_type()).or_insert(0) += question.unit_count();
    }
    counts
}

/// Counts well-formed questions per type in `raw_text` and compares them with
/// the share of `expected_total` each requested type should receive.
pub fn validate(
    raw_text: &str,
    expected_types: &[QuestionTypeId],
    expected_total: usize,
) -> ValidationResult {
    let expected_types = unique_types(expected_types);
    let questions = line_grammar::scan(raw_text, &expected_types);
    let counts_by_type = tally(&questions);

    let deficits: Vec<Deficit> = distribute(expected_total, &expected_types)
        .into_iter()
        .filter_map(|(question_type, expected)| {
            let actual = counts_by_type.get(&question_type).copied().unwrap_or(0);
            (actual < expected).then(|| Deficit {
                question_type,
                expected,
                actual,
                needed: expected - actual,
            })
        })
        .collect();

    for deficit in &deficits {
        log::debug!(
            "{}: got {}, expected {}",
            deficit.question_type,
            deficit.actual,
            deficit.expected
        );
    }

    ValidationResult {
        is_complete: deficits.is_empty(),
        counts_by_type,
        deficits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multiple_choice_block(n: usize) -> String {
        (0..n)
            .map(|i| {
                format!(
                    "Q: Question {}?\nA) one\nB) two\nC) three\nD) four\nCorrect: B\n",
                    i
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn identification_only_is_complete() {
        let result = validate("Q: What is 2+2?\nA: 4\n", &[QuestionTypeId::Identification], 1);

        assert!(result.is_complete);
        assert!(result.deficits.is_empty());
        assert_eq!(result.count(QuestionTypeId::Identification), 1);
        assert_eq!(result.total(), 1);
    }

    #[test]
    fn enumeration_answer_is_counted_as_enumeration() {
        let result = validate(
            "Q: List three colors.\nA: 1. red, 2. blue, 3. green\n",
            &[QuestionTypeId::Enumeration],
            1,
        );

        assert!(result.is_complete);
        assert_eq!(result.count(QuestionTypeId::Enumeration), 1);
        assert_eq!(result.count(QuestionTypeId::Identification), 0);
    }

    #[test]
    fn short_multiple_choice_reports_deficit() {
        let result = validate(
            &multiple_choice_block(6),
            &[QuestionTypeId::MultipleChoice],
            10,
        );

        assert!(!result.is_complete);
        assert_eq!(
            result.deficits,
            vec![Deficit {
                question_type: QuestionTypeId::MultipleChoice,
                expected: 10,
                actual: 6,
                needed: 4,
            }]
        );
        assert_eq!(result.total_needed(), 4);
    }

    #[test]
    fn deficits_follow_request_order_and_distribution() {
        let text = "Statement: A\nAnswer: True\nQ: What is 2+2?\nA: 4";
        let result = validate(
            text,
            &[
                QuestionTypeId::Matching,
                QuestionTypeId::TrueFalse,
                QuestionTypeId::Identification,
            ],
            5,
        );

        let summary: Vec<(QuestionTypeId, usize, usize)> = result
            .deficits
            .iter()
            .map(|d| (d.question_type, d.expected, d.actual))
            .collect();
        assert_eq!(
            summary,
            vec![
                (QuestionTypeId::Matching, 2, 0),
                (QuestionTypeId::TrueFalse, 2, 1),
            ]
        );
    }

    #[test]
    fn matching_header_is_not_counted() {
        let result = validate(
            "Column A | Column B\nRIP | Distance vector\nOSPF | Link state\nBGP | Path vector",
            &[QuestionTypeId::Matching],
            3,
        );

        assert!(result.is_complete);
        assert_eq!(result.count(QuestionTypeId::Matching), 3);
    }

    #[test]
    fn surplus_is_not_a_deficit() {
        let result = validate(
            &multiple_choice_block(4),
            &[QuestionTypeId::MultipleChoice],
            2,
        );
        assert!(result.is_complete);
        assert_eq!(result.count(QuestionTypeId::MultipleChoice), 4);
    }

    #[test]
    fn empty_text_never_fails() {
        let result = validate("", &[QuestionTypeId::CaseStudy], 3);

        assert!(!result.is_complete);
        assert_eq!(result.deficits[0].needed, 3);
        assert_eq!(result.counts_by_type.len(), QuestionTypeId::ALL.len());
    }

    #[test]
    fn repeated_types_share_one_allotment() {
        let raw = multiple_choice_block(3);
        let repeated = validate(
            &raw,
            &[QuestionTypeId::MultipleChoice, QuestionTypeId::MultipleChoice],
            4,
        );

        assert!(!repeated.is_complete);
        assert_eq!(repeated.deficits.len(), 1);
        assert_eq!(repeated.deficits[0].expected, 4);
        assert_eq!(repeated.deficits[0].needed, 1);
        assert_eq!(repeated, validate(&raw, &[QuestionTypeId::MultipleChoice], 4));
    }
}
