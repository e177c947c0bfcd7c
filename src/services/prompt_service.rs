use crate::models::question::{Difficulty, QuestionKind};

// The output formats below are what `parser_service` decodes line by line.
// Changing a format here without changing the matching decoder (or the other
// way round) silently drops every generated question.

const MCQ_FORMAT: &str = "\
Q1. What is the capital of France?
A) Berlin
B) Madrid
C) Paris
D) Rome
Answer: C - Explanation: Paris is the capital and largest city of France.";

const MCQ_RULES: &str = "\
Rules:
1. Each question is exactly 6 lines: the question, 4 options labelled A) to D), then one line with the answer and explanation.
2. The last line must read 'Answer: <letter> - Explanation: <text>'.
3. Separate questions with one blank line. Do not use blank lines inside a question.
4. Do not add headings, numbering outside the question line, or any other text.";

const FILL_BLANK_FORMAT: &str = "\
Fill in the blank: The chemical symbol for water is ____.
Answer: H2O
Explanation: Water consists of two hydrogen atoms and one oxygen atom.";

const FILL_BLANK_RULES: &str = "\
Rules:
1. Each question is exactly 3 lines: 'Fill in the blank:', 'Answer:', 'Explanation:'.
2. Mark the blank with ____.
3. Separate questions with one blank line. Do not add any other text.";

const TRUE_FALSE_FORMAT: &str = "\
Q1. Cricket is played with a ball and bat? (True/False)
Answer: True
Explanation: Cricket is a game played with a bat and ball between two teams.";

const TRUE_FALSE_RULES: &str = "\
Rules:
1. Each question is exactly 3 lines: 'Q<number>. <statement>? (True/False)', 'Answer: True' or 'Answer: False', 'Explanation:'.
2. Separate questions with one blank line. Do not add any other text.";

const MATCHING_FORMAT: &str = "\
Photosynthesis | Process by which plants make food using sunlight
Mitochondria | Organelle that produces energy for the cell";

const MATCHING_RULES: &str = "\
Rules:
1. Write one pair per line as '<column 1 item> | <column 2 item>'.
2. Use the ' | ' separator exactly once per line.
3. Do not add headings, numbering, or any other text.";

/// Builds the instruction sent to the model. Pure: identical inputs always
/// produce byte-identical prompts.
pub fn build_prompt(
    kind: QuestionKind,
    syllabus: &str,
    count: usize,
    difficulty: Difficulty,
) -> String {
    let (instruction, rules, format) = match kind {
        QuestionKind::Mcq => (
            "Provide 4 options for each question, and clearly indicate the correct answer.",
            MCQ_RULES,
            MCQ_FORMAT,
        ),
        QuestionKind::FillBlank => (
            "Provide the correct answer for each blank.",
            FILL_BLANK_RULES,
            FILL_BLANK_FORMAT,
        ),
        QuestionKind::TrueFalse => (
            "Clearly indicate the correct answers.",
            TRUE_FALSE_RULES,
            TRUE_FALSE_FORMAT,
        ),
        QuestionKind::Matching => (
            "Provide two columns of items where each item in column 1 matches with an item in column 2.",
            MATCHING_RULES,
            MATCHING_FORMAT,
        ),
    };

    format!(
        "Syllabus:\n{syllabus}\n\n\
         Based on the syllabus above, generate {count} {label}.\n\
         {instruction}\n\
         Difficulty Level: {difficulty}.\n\n\
         {rules}\n\n\
         Follow this format exactly:\n{format}\n",
        label = kind.label(),
    )
}
