use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProcessTextPayload {
    pub text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProcessTextResponse {
    pub request_id: String,
    pub processed_text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProcessFileResponse {
    pub request_id: String,
    pub result: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TranslatePayload {
    #[validate(length(min = 1))]
    pub text: String,
    #[validate(length(min = 1))]
    pub target_language: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TranslateResponse {
    pub request_id: String,
    pub translated_text: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SupportedLanguagesResponse {
    pub request_id: String,
    pub languages: BTreeMap<String, String>,
}
