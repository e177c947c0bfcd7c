//! Decoders that turn raw model text into question records.
//!
//! Each decoder mirrors one output format from `prompt_service`. The parsing
//! is deliberately positional: blocks are separated by a blank line, fields are
//! found by line index and literal markers. A block that does not fit is
//! dropped whole; nothing is repaired or guessed.

use crate::models::question::{new_question_id, BlankItem, McqItem, TrueFalseItem};

const BLOCK_SEPARATOR: &str = "\n\n";
const ANSWER_MARKER: &str = "Answer:";
const EXPLANATION_MARKER: &str = "Explanation:";
const MCQ_EXPLANATION_DELIMITER: &str = "- Explanation:";
const BLANK_MARKER: &str = "Fill in the blank:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("No questions were generated. Please retry with a clearer syllabus or adjusted difficulty.")]
    Empty,

    #[error("Generated questions were improperly formatted. Please retry.")]
    ImproperlyFormatted,
}

pub type ParseResult<T> = std::result::Result<Vec<T>, ParseError>;

pub fn parse_mcq(raw: &str) -> ParseResult<McqItem> {
    if raw.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let items: Vec<McqItem> = raw
        .split(BLOCK_SEPARATOR)
        .enumerate()
        .filter_map(|(idx, block)| {
            let item = parse_mcq_block(block);
            if item.is_none() {
                tracing::debug!(block = idx + 1, "dropping malformed MCQ block");
            }
            item
        })
        .collect();

    non_empty(items)
}

/// Expects: question, four option lines, then
/// `Answer: <label> - Explanation: <text>` on the sixth line. Lines past the
/// sixth are ignored.
fn parse_mcq_block(block: &str) -> Option<McqItem> {
    let lines: Vec<&str> = block.split('\n').collect();
    if lines.len() < 6 {
        return None;
    }

    let answer_line = lines[5];
    if !answer_line.contains(ANSWER_MARKER) || !answer_line.contains(MCQ_EXPLANATION_DELIMITER) {
        return None;
    }

    let (answer_segment, explanation) = answer_line.split_once(MCQ_EXPLANATION_DELIMITER)?;
    // Only the field between the first and second colon is taken as the
    // label; a second colon inside the answer segment truncates it.
    let answer = answer_segment.split(':').nth(1)?.trim();

    Some(McqItem {
        id: new_question_id(),
        question: lines[0].to_string(),
        options: lines[1..5].join("\n"),
        answer: answer.to_string(),
        explanation: explanation.trim().to_string(),
    })
}

pub fn parse_fill_in_blanks(raw: &str) -> ParseResult<BlankItem> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut items = Vec::new();
    for (idx, block) in trimmed.split(BLOCK_SEPARATOR).enumerate() {
        let lines: Vec<&str> = block.trim().split('\n').collect();
        if lines.len() != 3 {
            tracing::debug!(
                block = idx + 1,
                lines = lines.len(),
                "unexpected format for fill-in-the-blank block"
            );
            continue;
        }

        items.push(BlankItem {
            id: new_question_id(),
            question: remove_marker(lines[0], BLANK_MARKER),
            answer: remove_marker(lines[1], ANSWER_MARKER),
            explanation: remove_marker(lines[2], EXPLANATION_MARKER),
        });
    }

    non_empty(items)
}

pub fn parse_true_false(raw: &str) -> ParseResult<TrueFalseItem> {
    if raw.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let items: Vec<TrueFalseItem> = raw
        .split(BLOCK_SEPARATOR)
        .enumerate()
        .filter_map(|(idx, block)| {
            let item = parse_true_false_block(block);
            if item.is_none() {
                tracing::debug!(block = idx + 1, "dropping malformed true/false block");
            }
            item
        })
        .collect();

    non_empty(items)
}

/// Expects `Q<n>. <statement>?`, `Answer: <True|False>`, `Explanation: <text>`.
fn parse_true_false_block(block: &str) -> Option<TrueFalseItem> {
    let lines: Vec<&str> = block.split('\n').collect();
    if lines.len() != 3 {
        return None;
    }

    let question_line = lines[0].trim();
    if !question_line.starts_with('Q') || !question_line.contains('?') {
        return None;
    }
    let (_, question) = question_line.split_once(". ")?;

    Some(TrueFalseItem {
        id: new_question_id(),
        question: question.trim().to_string(),
        answer: remove_marker(lines[1], ANSWER_MARKER),
        explanation: remove_marker(lines[2], EXPLANATION_MARKER),
    })
}

/// Removes every occurrence of `marker` and trims the rest.
fn remove_marker(line: &str, marker: &str) -> String {
    line.trim().replace(marker, "").trim().to_string()
}

fn non_empty<T>(items: Vec<T>) -> ParseResult<T> {
    if items.is_empty() {
        Err(ParseError::ImproperlyFormatted)
    } else {
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MCQ_BLOCK: &str = "Q1. What is the capital of France?\nA) Berlin\nB) Madrid\nC) Paris\nD) Rome\nAnswer: C - Explanation: Paris is the capital of France.";

    const TF_EXAMPLE: &str = "Q1. Cricket is played with a ball and bat? (True/False)\nAnswer: True\nExplanation: Cricket is a game played with a bat and ball between two teams.";

    #[test]
    fn mcq_well_formed_block_yields_label_and_joined_options() {
        let items = parse_mcq(MCQ_BLOCK).unwrap();

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.question, "Q1. What is the capital of France?");
        assert_eq!(item.options, "A) Berlin\nB) Madrid\nC) Paris\nD) Rome");
        assert_eq!(item.answer, "C");
        assert_eq!(item.explanation, "Paris is the capital of France.");
        assert!(!item.id.is_empty());
    }

    #[test]
    fn mcq_drops_short_blocks_and_keeps_good_ones() {
        let raw = format!(
            "{MCQ_BLOCK}\n\nQ2. Too short?\nA) yes\nB) no\nAnswer: A - Explanation: missing options\n\n{}",
            MCQ_BLOCK.replace("Q1.", "Q3.")
        );
        let items = parse_mcq(&raw).unwrap();

        assert_eq!(items.len(), 2);
        assert!(items[0].question.starts_with("Q1."));
        assert!(items[1].question.starts_with("Q3."));
    }

    #[test]
    fn mcq_drops_blocks_missing_markers() {
        let no_answer = MCQ_BLOCK.replace("Answer:", "Solution:");
        let no_explanation = MCQ_BLOCK.replace("- Explanation:", "because");

        assert_eq!(parse_mcq(&no_answer), Err(ParseError::ImproperlyFormatted));
        assert_eq!(parse_mcq(&no_explanation), Err(ParseError::ImproperlyFormatted));
    }

    #[test]
    fn mcq_ignores_lines_after_the_sixth() {
        let raw = format!("{MCQ_BLOCK}\nSource: textbook chapter 2");
        let items = parse_mcq(&raw).unwrap();
        assert_eq!(items[0].answer, "C");
    }

    #[test]
    fn mcq_answer_with_extra_colon_keeps_second_field_only() {
        let raw = MCQ_BLOCK.replace("Answer: C -", "Answer: C: Paris -");
        let items = parse_mcq(&raw).unwrap();
        assert_eq!(items[0].answer, "C");
    }

    #[test]
    fn mcq_empty_input_is_distinct_from_bad_format() {
        assert_eq!(parse_mcq("   \n"), Err(ParseError::Empty));
        assert_eq!(
            parse_mcq("Error querying LLM API: connection refused"),
            Err(ParseError::ImproperlyFormatted)
        );
    }

    #[test]
    fn fill_blank_strips_markers() {
        let raw = "Fill in the blank: The powerhouse of the cell is the ____.\nAnswer: mitochondria\nExplanation: Mitochondria produce ATP.";
        let items = parse_fill_in_blanks(raw).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].question, "The powerhouse of the cell is the ____.");
        assert_eq!(items[0].answer, "mitochondria");
        assert_eq!(items[0].explanation, "Mitochondria produce ATP.");
    }

    #[test]
    fn fill_blank_skips_blocks_with_two_or_four_lines() {
        let raw = "\
Fill in the blank: Water freezes at ____ degrees Celsius.
Answer: 0
Explanation: The freezing point of water is 0C.

Fill in the blank: Only two lines here ____.
Answer: oops

Fill in the blank: Four lines here ____.
Answer: one
Explanation: two
Extra: three";
        let items = parse_fill_in_blanks(raw).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].answer, "0");
    }

    #[test]
    fn fill_blank_trims_surrounding_whitespace_before_splitting() {
        let raw = "\n\n  Fill in the blank: H2O is ____.\nAnswer: water\nExplanation: It is.  \n\n";
        assert_eq!(parse_fill_in_blanks(raw).unwrap().len(), 1);
    }

    #[test]
    fn fill_blank_reports_empty_and_improper_separately() {
        assert_eq!(parse_fill_in_blanks(""), Err(ParseError::Empty));
        assert_eq!(
            parse_fill_in_blanks("just one line"),
            Err(ParseError::ImproperlyFormatted)
        );
    }

    #[test]
    fn true_false_prompt_example_round_trips() {
        let items = parse_true_false(TF_EXAMPLE).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].question,
            "Cricket is played with a ball and bat? (True/False)"
        );
        assert_eq!(items[0].answer, "True");
        assert_eq!(
            items[0].explanation,
            "Cricket is a game played with a bat and ball between two teams."
        );
        assert_eq!(items[0].as_bool(), Some(true));
    }

    #[test]
    fn true_false_requires_q_prefix_question_mark_and_separator() {
        let not_q = TF_EXAMPLE.replace("Q1.", "1.");
        let no_question_mark = TF_EXAMPLE.replace('?', "");
        let no_separator = TF_EXAMPLE.replace("Q1. ", "Q1 ");

        for raw in [not_q, no_question_mark, no_separator] {
            assert_eq!(parse_true_false(&raw), Err(ParseError::ImproperlyFormatted));
        }
    }

    #[test]
    fn true_false_drops_blocks_with_wrong_line_count() {
        let raw = format!("{TF_EXAMPLE}\n\nQ2. Is the sky green?\nAnswer: False\n\n{TF_EXAMPLE}\nExtra line");
        let items = parse_true_false(&raw).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn true_false_preserves_non_boolean_answer_text() {
        let raw = TF_EXAMPLE.replace("Answer: True", "Answer: Partly");
        let items = parse_true_false(&raw).unwrap();
        assert_eq!(items[0].answer, "Partly");
        assert_eq!(items[0].as_bool(), None);
    }

    #[test]
    fn true_false_empty_input() {
        assert_eq!(parse_true_false(" \n "), Err(ParseError::Empty));
    }

    #[test]
    fn every_item_gets_its_own_id() {
        let raw = format!("{TF_EXAMPLE}\n\n{}", TF_EXAMPLE.replace("Q1.", "Q2."));
        let items = parse_true_false(&raw).unwrap();
        assert_ne!(items[0].id, items[1].id);
    }
}
