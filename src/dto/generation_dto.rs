use crate::models::question::{BlankItem, MatchingSet, McqItem, TrueFalseItem};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct GenerateQuestionsPayload {
    #[validate(length(min = 1))]
    pub syllabus: String,
    #[validate(range(min = 1))]
    pub num_questions: usize,
    /// `easy`, `medium` or `hard`, any case.
    pub difficulty: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct McqResponse {
    pub request_id: String,
    pub mcq: Vec<McqItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FillInBlanksResponse {
    pub request_id: String,
    pub fill_in_the_blanks: Vec<BlankItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrueFalseResponse {
    pub request_id: String,
    pub true_false_questions: Vec<TrueFalseItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MatchingResponse {
    pub request_id: String,
    pub questions: Vec<MatchingSet>,
}
