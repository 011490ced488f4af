// Templates use `{count}` and `{material}` placeholders filled by the prompt builder.

pub const PRIMARY_SYSTEM_PROMPT: &str = "You are a quiz generator. Generate EXACTLY {count} {noun} in the EXACT format specified. No extra text, no numbering, no section headers. Just the questions.";

pub const SECONDARY_SYSTEM_PROMPT: &str = "Generate EXACTLY {count} {noun}. Use ONLY the exact format shown. No intro text. No numbering. No headers.";

pub const ANSWER_CHECKER_SYSTEM_PROMPT: &str = "You are checking if a student's answer is correct. Be lenient with spelling, capitalization, and minor variations. Return ONLY 'CORRECT' or 'INCORRECT' followed by a brief explanation.";

pub const ANSWER_CHECKER_USER_TEMPLATE: &str = "Question: {question}\nCorrect Answer: {reference}\nStudent Answer: {answer}\n\nIs the student's answer correct?";

pub const ADDITIONAL_REQUIREMENT_PREFIX: &str = "\n\nADDITIONAL REQUIREMENT: ";

pub const MATCHING_HEADER: &str = "Column A | Column B";

pub const MULTIPLE_CHOICE_TEMPLATE: &str = "Generate EXACTLY {count} multiple choice questions.

FORMAT (MANDATORY - NO NUMBERING):
Q: [question]
A) [option]
B) [option]
C) [option]
D) [option]
Correct: [A/B/C/D]

Study material: {material}

Generate now:";

pub const TRUE_FALSE_TEMPLATE: &str = "Generate EXACTLY {count} true/false questions.

FORMAT (MANDATORY - NO NUMBERING):
Statement: [statement]
Answer: [True/False]
Explanation: [brief]

Study material: {material}

Generate now:";

pub const TRUE_FALSE_CONDITIONAL_TEMPLATE: &str = "Generate EXACTLY {count} conditional true/false questions.

FORMAT (MANDATORY - NO NUMBERING):
Statement: [condition that links the two items]
I. [first statement]
II. [second statement]
A) Only I is true
B) Only II is true
C) Both I and II are true
D) Neither I nor II is true
Correct: [A/B/C/D]

Study material: {material}

Generate now:";

pub const IDENTIFICATION_TEMPLATE: &str = "Generate EXACTLY {count} identification questions.

FORMAT (MANDATORY - NO NUMBERING):
Q: [question]
A: [1-3 word answer]

Study material: {material}

Generate now:";

pub const ENUMERATION_TEMPLATE: &str = "Generate EXACTLY {count} enumeration questions.

FORMAT (MANDATORY - NO NUMBERING):
Q: [question asking to list items]
A: 1. [item], 2. [item], 3. [item]

Study material: {material}

Generate now:";

pub const FLASHCARD_TEMPLATE: &str = "Generate EXACTLY {count} flashcards.

FORMAT (MANDATORY - NO NUMBERING):
Front: [term/question]
Back: [definition/answer]

Study material: {material}

Generate now:";

pub const MATCHING_TEMPLATE: &str = "Generate EXACTLY {count} matching pairs.

FORMAT (MANDATORY - MUST INCLUDE HEADER):
Column A | Column B
term1 | definition1
term2 | definition2
term3 | definition3

CRITICAL: Always start with \"Column A | Column B\" header line first, then list pairs below.
Do not skip the header.

Study material: {material}

Generate now:";

pub const ASSOCIATION_TEMPLATE: &str = "Generate EXACTLY {count} association questions.

FORMAT (MANDATORY - NO NUMBERING):
Statement: [characteristic]
I. [item]
II. [item]
A) If \"I\" is associated
B) If \"II\" is associated
C) If both are associated
D) Neither are associated
Correct: [A/B/C/D]

Study material: {material}

Generate now:";

pub const CASE_STUDY_TEMPLATE: &str = "Generate EXACTLY {count} case study questions.

FORMAT (MANDATORY - NO NUMBERING - NO BULLETS):
Scenario: [2-4 sentence situation]
Question: [what should be done?]
ModelAnswer: [2-3 sentence answer]

Repeat this pattern {count} times with different scenarios.

Study material: {material}

Generate now:";

pub const ODD_ONE_OUT_TEMPLATE: &str = "Generate EXACTLY {count} odd one out questions.

FORMAT (MANDATORY - NO NUMBERING):
Q: Which is the odd one out?
A) [item]
B) [item]
C) [item]
D) [item]
Correct: [A/B/C/D]

Study material: {material}

Generate now:";

pub const EXCEPT_TEMPLATE: &str = "Generate EXACTLY {count} EXCEPT questions.

FORMAT (MANDATORY - NO NUMBERING):
Q: All of the following are [category] EXCEPT:
A) [option]
B) [option]
C) [option]
D) [option]
Correct: [A/B/C/D]

Study material: {material}

Generate now:";

pub const FILL_MULTIPLE_CHOICE_TEMPLATE: &str = "Generate EXACTLY {count} multiple choice questions. Use only this format with NO numbering:

Q: [question]
A) [option]
B) [option]
C) [option]
D) [option]
Correct: [letter]

Repeat {count} times.

Material: {material}";

pub const FILL_TRUE_FALSE_TEMPLATE: &str = "Generate EXACTLY {count} true/false questions. Use only this format with NO numbering:

Statement: [statement]
Answer: [True or False]
Explanation: [brief reason]

Repeat {count} times.

Material: {material}";

pub const FILL_TRUE_FALSE_CONDITIONAL_TEMPLATE: &str = "Generate EXACTLY {count} conditional true/false questions. Use only this format with NO numbering:

Statement: [condition]
I. [first statement]
II. [second statement]
A) Only I is true
B) Only II is true
C) Both I and II are true
D) Neither I nor II is true
Correct: [letter]

Repeat {count} times.

Material: {material}";

pub const FILL_IDENTIFICATION_TEMPLATE: &str = "Generate EXACTLY {count} identification questions. Use only this format with NO numbering:

Q: [question]
A: [1-3 word answer]

Repeat {count} times.

Material: {material}";

pub const FILL_ENUMERATION_TEMPLATE: &str = "Generate EXACTLY {count} enumeration questions. Use only this format with NO numbering:

Q: [question asking to list]
A: 1. [item], 2. [item], 3. [item]

Repeat {count} times.

Material: {material}";

pub const FILL_FLASHCARD_TEMPLATE: &str = "Generate EXACTLY {count} flashcards. Use only this format with NO numbering:

Front: [term or question]
Back: [definition or answer]

Repeat {count} times.

Material: {material}";

pub const FILL_MATCHING_TEMPLATE: &str = "You MUST generate EXACTLY {count} matching pairs.

CRITICAL FORMATTING RULES:
1. ALWAYS start with this exact line first: Column A | Column B
2. Then list each pair on a new line with format: term | definition
3. NO extra text, NO numbering, NO sections

EXAMPLE OUTPUT:
Column A | Column B
Static Routing | Manual route configuration
Dynamic Routing | Automatic route learning

Material: {material}

NOW GENERATE EXACTLY {count} PAIRS:";

pub const FILL_ASSOCIATION_TEMPLATE: &str = "Generate EXACTLY {count} association questions. Use only this format with NO numbering:

Statement: [description]
I. [first item]
II. [second item]
A) If \"I\" is associated
B) If \"II\" is associated
C) If both are associated
D) Neither are associated
Correct: [letter]

Repeat {count} times.

Material: {material}";

pub const FILL_CASE_STUDY_TEMPLATE: &str = "You must generate EXACTLY {count} case study questions. Use only this format with NO numbering, NO bullets, NO headers:

Scenario: [situation description]
Question: [what to do/analyze]
ModelAnswer: [answer]

Repeat {count} times.

Material: {material}";

pub const FILL_ODD_ONE_OUT_TEMPLATE: &str = "Generate EXACTLY {count} odd one out questions. Use only this format with NO numbering:

Q: Which is the odd one out?
A) [item]
B) [item]
C) [item]
D) [item]
Correct: [letter]

Repeat {count} times.

Material: {material}";

pub const FILL_EXCEPT_TEMPLATE: &str = "Generate EXACTLY {count} EXCEPT questions. Use only this format with NO numbering:

Q: All of the following are [category] EXCEPT:
A) [option]
B) [option]
C) [option]
D) [option]
Correct: [letter]

Repeat {count} times.

Material: {material}";
