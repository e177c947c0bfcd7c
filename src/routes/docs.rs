use axum::Json;
use utoipa::OpenApi;

use crate::dto::{
    generation_dto::{
        FillInBlanksResponse, GenerateQuestionsPayload, McqResponse, MatchingResponse,
        TrueFalseResponse,
    },
    source_dto::{
        ProcessFileResponse, ProcessTextPayload, ProcessTextResponse, SupportedLanguagesResponse,
        TranslatePayload, TranslateResponse,
    },
};
use crate::models::question::{
    BlankItem, Difficulty, MatchingAnswer, MatchingEntry, MatchingSet, McqItem, QuestionKind,
    TrueFalseItem,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::source::process_text,
        crate::routes::source::process_file,
        crate::routes::generation::generate_mcq,
        crate::routes::generation::generate_fill_in_the_blanks,
        crate::routes::generation::generate_true_false,
        crate::routes::generation::generate_matching_questions,
        crate::routes::generation::generate_by_kind,
        crate::routes::translation::translate,
        crate::routes::translation::supported_languages,
    ),
    components(schemas(
        GenerateQuestionsPayload,
        McqResponse,
        FillInBlanksResponse,
        TrueFalseResponse,
        MatchingResponse,
        ProcessTextPayload,
        ProcessTextResponse,
        ProcessFileResponse,
        TranslatePayload,
        TranslateResponse,
        SupportedLanguagesResponse,
        McqItem,
        BlankItem,
        TrueFalseItem,
        MatchingEntry,
        MatchingAnswer,
        MatchingSet,
        QuestionKind,
        Difficulty,
    )),
    tags((name = "quizgen", description = "Question generation from study material"))
)]
pub struct ApiDoc;

#[axum::debug_handler]
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        for path in [
            "/process-text",
            "/process-file",
            "/generate-mcq",
            "/generate-fill-in-the-blanks",
            "/generate-true-false",
            "/generate-matching-questions",
            "/generate/{kind}",
            "/translate",
            "/supported-languages",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
