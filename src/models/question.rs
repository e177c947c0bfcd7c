use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Mcq,
    FillBlank,
    TrueFalse,
    Matching,
}

impl QuestionKind {
    pub fn label(&self) -> &'static str {
        match self {
            QuestionKind::Mcq => "multiple-choice questions (MCQs)",
            QuestionKind::FillBlank => "'Fill in the Blanks' questions",
            QuestionKind::TrueFalse => "True/False questions",
            QuestionKind::Matching => "matching questions",
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    /// Accepts the route selectors as well as the numeric menu choices
    /// `1`..`4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "mcq" => Ok(QuestionKind::Mcq),
            "2" | "fill-in-the-blanks" | "fill_blank" | "fill-blank" => Ok(QuestionKind::FillBlank),
            "3" | "true-false" | "true_false" => Ok(QuestionKind::TrueFalse),
            "4" | "matching" | "matching-questions" => Ok(QuestionKind::Matching),
            other => Err(format!(
                "Invalid question type '{}'. Use one of: mcq, fill-in-the-blanks, true-false, matching",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "Invalid difficulty '{}'. Use easy, medium, or hard",
                other
            )),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub syllabus: String,
    pub count: usize,
    pub kind: QuestionKind,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct McqItem {
    pub id: String,
    pub question: String,
    /// The four option lines, newline-joined exactly as the model wrote them.
    pub options: String,
    pub answer: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BlankItem {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TrueFalseItem {
    pub id: String,
    pub question: String,
    /// Literal answer text as produced by the model, normally `True` or `False`.
    pub answer: String,
    pub explanation: String,
}

impl TrueFalseItem {
    pub fn as_bool(&self) -> Option<bool> {
        match self.answer.to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MatchingEntry {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MatchingAnswer {
    pub column1_id: String,
    pub column2_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MatchingSet {
    pub question_id: String,
    pub column1: Vec<MatchingEntry>,
    pub column2: Vec<MatchingEntry>,
    pub answers: Vec<MatchingAnswer>,
}

pub fn new_question_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
