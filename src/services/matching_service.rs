use crate::models::question::{new_question_id, MatchingAnswer, MatchingEntry, MatchingSet};
use rand::seq::SliceRandom;
use rand::Rng;

/// Separator the matching prompt asks the model to put between the two sides
/// of a pair.
const PAIR_DELIMITER: &str = " | ";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchingColumns {
    pub column1: Vec<MatchingEntry>,
    pub column2: Vec<MatchingEntry>,
    pub answers: Vec<MatchingAnswer>,
}

impl MatchingColumns {
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn into_set(self) -> MatchingSet {
        MatchingSet {
            question_id: new_question_id(),
            column1: self.column1,
            column2: self.column2,
            answers: self.answers,
        }
    }
}

/// Splits `left | right` lines into two columns and an answer key, then
/// shuffles each column on its own. The key is built before shuffling and
/// refers to entries by id, so display order never affects it.
pub fn build_matching<R: Rng + ?Sized>(raw: &str, rng: &mut R) -> MatchingColumns {
    let mut columns = MatchingColumns::default();

    let pairs = raw.lines().filter_map(|line| {
        if !line.contains(PAIR_DELIMITER) {
            return None;
        }
        let fields: Vec<&str> = line.split(PAIR_DELIMITER).collect();
        match fields.as_slice() {
            [left, right] => Some((left.trim(), right.trim())),
            _ => {
                tracing::debug!(line = %line, "skipping matching line with more than one delimiter");
                None
            }
        }
    });

    for (idx, (left, right)) in pairs.enumerate() {
        let column1_id = format!("c1_item_{}", idx + 1);
        let column2_id = format!("c2_item_{}", idx + 1);

        columns.column1.push(MatchingEntry {
            id: column1_id.clone(),
            text: left.to_string(),
        });
        columns.column2.push(MatchingEntry {
            id: column2_id.clone(),
            text: right.to_string(),
        });
        columns.answers.push(MatchingAnswer {
            column1_id,
            column2_id,
        });
    }

    columns.column1.shuffle(rng);
    columns.column2.shuffle(rng);
    columns
}
