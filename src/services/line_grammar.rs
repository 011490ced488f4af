//! Line grammar shared by the question-count validator and the quiz parser.
//!
//! Generated text is split into trimmed, non-blank lines with section
//! headings removed, then scanned by an ordered rule list where the first
//! matching rule wins. Both consumers run the same scan, so a count reported
//! by the validator is always the count the parser materialises.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::domain::parsed_question::{
    CaseStudyQuestion, ChoiceOption, ChoiceQuestion, FlashcardQuestion, FreeTextQuestion,
    MatchingPair, MatchingQuestion, OptionLabel, ParsedQuestion, RomanChoiceQuestion,
    TrueFalseQuestion,
};
use crate::models::domain::question_type::QuestionTypeId;

static BOILERPLATE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(here are|and here are|case study|multiple choice|true/false|identification|enumeration|association|matching|fill in|odd one out|except)",
    )
    .expect("BOILERPLATE_LINE is a valid regex pattern")
});

static NUMBERED_SCENARIO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d+\.\s*Scenario:").expect("NUMBERED_SCENARIO is a valid regex pattern")
});

static NUMBER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("NUMBER_PREFIX is a valid regex pattern"));

static OPTION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-D])\)\s*(.*)$").expect("OPTION_LINE is a valid regex pattern")
});

static NUMBERED_ANSWER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s").expect("NUMBERED_ANSWER is a valid regex pattern"));

/// Lines searched for options and the answer marker after a question line.
pub const CHOICE_WINDOW: usize = 7;

pub const MATCHING_HEADER_PREFIX: &str = "Column A |";
pub const ODD_ONE_OUT_PREFIX: &str = "Q: Which is the odd one out?";

/// Trimmed, non-blank lines with section headings and intros removed.
pub fn prepare_lines(raw: &str) -> Vec<&str> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !BOILERPLATE_LINE.is_match(line))
        .collect()
}

/// Which Roman-numeral shape a `Statement:`/`I.`/`II.` block becomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RomanPreference {
    Association,
    Conditional,
    Either,
}

/// Request-dependent knobs for one scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrammarContext {
    roman: RomanPreference,
    flashcard_only: bool,
}

impl GrammarContext {
    pub fn for_types(types: &[QuestionTypeId]) -> Self {
        let association = types.contains(&QuestionTypeId::Association);
        let conditional = types.contains(&QuestionTypeId::TrueFalseConditional);
        let roman = match (association, conditional) {
            (false, true) => RomanPreference::Conditional,
            (true, true) => RomanPreference::Either,
            _ => RomanPreference::Association,
        };

        Self {
            roman,
            flashcard_only: types.contains(&QuestionTypeId::Flashcard),
        }
    }
}

struct Step {
    advance: usize,
    item: Option<ParsedQuestion>,
}

impl Step {
    fn emit(advance: usize, item: ParsedQuestion) -> Option<Step> {
        Some(Step {
            advance,
            item: Some(item),
        })
    }

    fn skip(advance: usize) -> Option<Step> {
        Some(Step {
            advance,
            item: None,
        })
    }
}

type RuleFn = fn(&[&str], usize, &GrammarContext) -> Option<Step>;

struct Rule {
    name: &'static str,
    apply: RuleFn,
}

const RULES: &[Rule] = &[
    Rule { name: "case-study", apply: case_study_rule },
    Rule { name: "legacy-case", apply: legacy_case_rule },
    Rule { name: "roman-numeral", apply: roman_rule },
    Rule { name: "true-false", apply: true_false_rule },
    Rule { name: "matching", apply: matching_rule },
    Rule { name: "flashcard", apply: flashcard_rule },
    Rule { name: "odd-one-out", apply: odd_one_out_rule },
    Rule { name: "except", apply: except_rule },
    Rule { name: "multiple-choice", apply: multiple_choice_rule },
    Rule { name: "question-answer", apply: question_answer_rule },
];

/// Runs the grammar over `raw` and returns every question it recognises, in
/// text order.
pub fn scan(raw: &str, types: &[QuestionTypeId]) -> Vec<ParsedQuestion> {
    let lines = prepare_lines(raw);
    let ctx = GrammarContext::for_types(types);

    if ctx.flashcard_only {
        return scan_flashcards(&lines);
    }

    let mut questions = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let step = RULES
            .iter()
            .find_map(|rule| (rule.apply)(&lines, i, &ctx).map(|step| (rule.name, step)));
        match step {
            Some((name, step)) => {
                log::trace!("line {}: {} rule advanced {}", i, name, step.advance);
                questions.extend(step.item);
                i += step.advance.max(1);
            }
            None => i += 1,
        }
    }

    questions
}

/// Dedicated `Front:`/`Back:` pass used when flashcards are requested.
fn scan_flashcards(lines: &[&str]) -> Vec<ParsedQuestion> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| {
            let front = label_value(line, "Front:")?;
            let back = lines
                .get(i + 1)
                .and_then(|next| label_value(next, "Back:"))
                .unwrap_or_default();
            Some(ParsedQuestion::Flashcard(FlashcardQuestion {
                front: front.to_string(),
                back: back.to_string(),
            }))
        })
        .collect()
}

fn label_value<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.strip_prefix(label).map(str::trim)
}

fn line_at<'a>(lines: &[&'a str], index: usize) -> Option<&'a str> {
    lines.get(index).copied()
}

fn starts_new_question(line: &str) -> bool {
    ["Q:", "A:", "Statement:", "Scenario:", "Front:", MATCHING_HEADER_PREFIX]
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

struct ChoiceBlock {
    options: Vec<ChoiceOption>,
    correct_label: OptionLabel,
    answer_index: usize,
}

/// Reads four `A)`..`D)` options and a `Correct:`/`Answer:` marker starting at
/// `start`. Gives up at the window edge or when another question begins.
fn choice_block(lines: &[&str], start: usize) -> Option<ChoiceBlock> {
    let end = (start + CHOICE_WINDOW).min(lines.len());
    let mut options = Vec::new();

    for (index, line) in lines.iter().enumerate().take(end).skip(start) {
        if let Some(caps) = OPTION_LINE.captures(line) {
            let label = caps
                .get(1)
                .and_then(|m| m.as_str().chars().next())
                .and_then(OptionLabel::from_char)?;
            let text = caps.get(2).map_or("", |m| m.as_str()).trim();
            options.push(ChoiceOption {
                label,
                text: text.to_string(),
            });
            continue;
        }

        let marker = label_value(line, "Correct:").or_else(|| label_value(line, "Answer:"));
        if let Some(value) = marker {
            let correct_label = value.chars().next().and_then(OptionLabel::from_char)?;
            let in_order = options.len() == 4
                && options
                    .iter()
                    .zip(OptionLabel::ALL)
                    .all(|(option, expected)| option.label == expected);
            if !in_order {
                return None;
            }
            return Some(ChoiceBlock {
                options,
                correct_label,
                answer_index: index,
            });
        }

        if starts_new_question(line) {
            return None;
        }
    }

    None
}

fn case_study_rule(lines: &[&str], i: usize, _ctx: &GrammarContext) -> Option<Step> {
    let line = lines[i];
    let numbered = NUMBERED_SCENARIO.is_match(line);
    if !numbered && !line.starts_with("Scenario:") {
        return None;
    }

    let scenario = label_value(&NUMBER_PREFIX.replace(line, ""), "Scenario:")
        .unwrap_or_default()
        .to_string();
    let prompt = line_at(lines, i + 1).and_then(|l| label_value(l, "Question:"));
    let answer = line_at(lines, i + 2).and_then(|l| label_value(l, "ModelAnswer:"));

    match (prompt, answer) {
        (Some(prompt), Some(model_answer)) => Step::emit(
            3,
            ParsedQuestion::CaseStudy(CaseStudyQuestion {
                scenario,
                prompt: prompt.to_string(),
                model_answer: model_answer.to_string(),
            }),
        ),
        _ if numbered => Step::skip(1),
        _ => None,
    }
}

fn legacy_case_rule(lines: &[&str], i: usize, _ctx: &GrammarContext) -> Option<Step> {
    let scenario = label_value(lines[i], "Case:")?;
    Step::emit(
        1,
        ParsedQuestion::CaseStudy(CaseStudyQuestion {
            scenario: scenario.to_string(),
            prompt: String::new(),
            model_answer: String::new(),
        }),
    )
}

fn roman_rule(lines: &[&str], i: usize, ctx: &GrammarContext) -> Option<Step> {
    let statement = label_value(lines[i], "Statement:")?;
    let first = line_at(lines, i + 1).filter(|l| !l.starts_with("II."))?;
    let item_i = label_value(first, "I.")?;
    let item_ii = line_at(lines, i + 2).and_then(|l| label_value(l, "II."))?;
    let block = choice_block(lines, i + 3)?;

    let association = match ctx.roman {
        RomanPreference::Association => true,
        RomanPreference::Conditional => false,
        RomanPreference::Either => block
            .options
            .iter()
            .any(|o| o.text.to_lowercase().contains("associat")),
    };

    let question = RomanChoiceQuestion {
        statement: statement.to_string(),
        item_i: item_i.to_string(),
        item_ii: item_ii.to_string(),
        options: block.options,
        correct_label: block.correct_label,
    };
    let item = if association {
        ParsedQuestion::Association(question)
    } else {
        ParsedQuestion::TrueFalseConditional(question)
    };

    Step::emit(block.answer_index + 1 - i, item)
}

fn true_false_rule(lines: &[&str], i: usize, _ctx: &GrammarContext) -> Option<Step> {
    let statement = label_value(lines[i], "Statement:")?;
    let answer = line_at(lines, i + 1).and_then(|l| label_value(l, "Answer:"))?;
    let explanation = line_at(lines, i + 2).and_then(|l| label_value(l, "Explanation:"));

    Step::emit(
        if explanation.is_some() { 3 } else { 2 },
        ParsedQuestion::TrueFalse(TrueFalseQuestion {
            statement: statement.to_string(),
            correct_value: answer.to_lowercase().starts_with("true"),
            explanation: explanation.unwrap_or_default().to_string(),
        }),
    )
}

fn is_pair_candidate(line: &str) -> bool {
    line.contains(" | ")
        && !line.starts_with(MATCHING_HEADER_PREFIX)
        && !OPTION_LINE.is_match(line)
        && !["Q:", "Statement:", "Scenario:"]
            .iter()
            .any(|prefix| line.starts_with(prefix))
}

fn split_pair(line: &str) -> Option<MatchingPair> {
    let parts: Vec<&str> = line.split('|').map(str::trim).collect();
    match parts.as_slice() {
        [left, right] if !left.is_empty() && !right.is_empty() => Some(MatchingPair {
            left: left.to_string(),
            right: right.to_string(),
        }),
        _ => None,
    }
}

fn matching_rule(lines: &[&str], i: usize, _ctx: &GrammarContext) -> Option<Step> {
    let line = lines[i];
    let header = line.starts_with(MATCHING_HEADER_PREFIX);
    if !header && !is_pair_candidate(line) {
        return None;
    }

    let mut j = if header { i + 1 } else { i };
    let mut pairs = Vec::new();
    while let Some(pair) = line_at(lines, j)
        .filter(|l| is_pair_candidate(l))
        .and_then(split_pair)
    {
        pairs.push(pair);
        j += 1;
    }

    if pairs.is_empty() {
        return Step::skip(1);
    }

    Step::emit(j - i, ParsedQuestion::Matching(MatchingQuestion { pairs }))
}

fn flashcard_rule(lines: &[&str], i: usize, _ctx: &GrammarContext) -> Option<Step> {
    let front = label_value(lines[i], "Front:")?;
    let back = line_at(lines, i + 1).and_then(|l| label_value(l, "Back:"));

    Step::emit(
        if back.is_some() { 2 } else { 1 },
        ParsedQuestion::Flashcard(FlashcardQuestion {
            front: front.to_string(),
            back: back.unwrap_or_default().to_string(),
        }),
    )
}

fn choice_question(
    lines: &[&str],
    i: usize,
    prompt: &str,
    wrap: fn(ChoiceQuestion) -> ParsedQuestion,
) -> Option<Step> {
    let block = choice_block(lines, i + 1)?;
    Step::emit(
        block.answer_index + 1 - i,
        wrap(ChoiceQuestion {
            prompt: prompt.to_string(),
            options: block.options,
            correct_label: block.correct_label,
        }),
    )
}

fn odd_one_out_rule(lines: &[&str], i: usize, _ctx: &GrammarContext) -> Option<Step> {
    let line = lines[i];
    if !line.starts_with(ODD_ONE_OUT_PREFIX) {
        return None;
    }
    let prompt = label_value(line, "Q:").unwrap_or(line);
    choice_question(lines, i, prompt, ParsedQuestion::OddOneOut)
}

fn except_rule(lines: &[&str], i: usize, _ctx: &GrammarContext) -> Option<Step> {
    let line = lines[i];
    if !line.contains("EXCEPT:") {
        return None;
    }
    let prompt = label_value(line, "Q:").unwrap_or(line);
    choice_question(lines, i, prompt, ParsedQuestion::ExceptQuestions)
}

fn multiple_choice_rule(lines: &[&str], i: usize, _ctx: &GrammarContext) -> Option<Step> {
    let prompt = label_value(lines[i], "Q:")?;
    choice_question(lines, i, prompt, ParsedQuestion::MultipleChoice)
}

fn question_answer_rule(lines: &[&str], i: usize, _ctx: &GrammarContext) -> Option<Step> {
    let prompt = label_value(lines[i], "Q:")?;
    let answer = line_at(lines, i + 1).and_then(|l| label_value(l, "A:"))?;

    let question = FreeTextQuestion {
        prompt: prompt.to_string(),
        reference_answer: answer.to_string(),
    };
    let item = if NUMBERED_ANSWER.is_match(answer) || answer.contains(',') {
        ParsedQuestion::Enumeration(question)
    } else {
        ParsedQuestion::Identification(question)
    };

    Step::emit(2, item)
}
