use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
    Extension,
};
use validator::Validate;

use crate::{
    dto::generation_dto::{
        FillInBlanksResponse, GenerateQuestionsPayload, McqResponse, MatchingResponse,
        TrueFalseResponse,
    },
    error::{Error, Result},
    middleware::RequestId,
    models::question::{GenerationRequest, QuestionKind},
    utils::extract::JsonBody,
    AppState,
};

fn build_request(
    state: &AppState,
    kind: QuestionKind,
    payload: &GenerateQuestionsPayload,
) -> Result<GenerationRequest> {
    payload.validate()?;
    state.quiz_service.build_request(
        kind,
        &payload.syllabus,
        payload.num_questions,
        &payload.difficulty,
    )
}

async fn mcq(
    state: &AppState,
    request_id: RequestId,
    request: &GenerationRequest,
) -> Result<McqResponse> {
    let (mcq, error) = match state.quiz_service.generate_mcq(request).await? {
        Ok(items) => (items, None),
        Err(e) => (vec![], Some(e.to_string())),
    };
    Ok(McqResponse {
        request_id: request_id.0,
        mcq,
        error,
    })
}

async fn fill_in_blanks(
    state: &AppState,
    request_id: RequestId,
    request: &GenerationRequest,
) -> Result<FillInBlanksResponse> {
    let parsed = state.quiz_service.generate_fill_in_blanks(request).await?;
    let (fill_in_the_blanks, error) = match parsed {
        Ok(items) => (items, None),
        Err(e) => (vec![], Some(e.to_string())),
    };
    Ok(FillInBlanksResponse {
        request_id: request_id.0,
        fill_in_the_blanks,
        error,
    })
}

async fn true_false(
    state: &AppState,
    request_id: RequestId,
    request: &GenerationRequest,
) -> Result<TrueFalseResponse> {
    let parsed = state.quiz_service.generate_true_false(request).await?;
    let (true_false_questions, error) = match parsed {
        Ok(items) => (items, None),
        Err(e) => (vec![], Some(e.to_string())),
    };
    Ok(TrueFalseResponse {
        request_id: request_id.0,
        true_false_questions,
        error,
    })
}

async fn matching(
    state: &AppState,
    request_id: RequestId,
    request: &GenerationRequest,
) -> Result<MatchingResponse> {
    let columns = state.quiz_service.generate_matching(request).await?;
    // No qualifying pairs is a no-results answer, not an error.
    let questions = if columns.is_empty() {
        vec![]
    } else {
        vec![columns.into_set()]
    };
    Ok(MatchingResponse {
        request_id: request_id.0,
        questions,
    })
}

#[utoipa::path(
    post,
    path = "/generate-mcq",
    request_body = GenerateQuestionsPayload,
    responses(
        (status = 200, description = "Parsed multiple-choice questions, with an error message when none were usable", body = McqResponse),
        (status = 400, description = "Invalid payload or difficulty"),
        (status = 500, description = "LLM not configured")
    )
)]
#[axum::debug_handler]
pub async fn generate_mcq(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    JsonBody(payload): JsonBody<GenerateQuestionsPayload>,
) -> Result<Json<McqResponse>> {
    let request = build_request(&state, QuestionKind::Mcq, &payload)?;
    Ok(Json(mcq(&state, request_id, &request).await?))
}

#[utoipa::path(
    post,
    path = "/generate-fill-in-the-blanks",
    request_body = GenerateQuestionsPayload,
    responses(
        (status = 200, description = "Parsed fill-in-the-blank questions, with an error message when none were usable", body = FillInBlanksResponse),
        (status = 400, description = "Invalid payload or difficulty"),
        (status = 500, description = "LLM not configured")
    )
)]
#[axum::debug_handler]
pub async fn generate_fill_in_the_blanks(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    JsonBody(payload): JsonBody<GenerateQuestionsPayload>,
) -> Result<Json<FillInBlanksResponse>> {
    let request = build_request(&state, QuestionKind::FillBlank, &payload)?;
    Ok(Json(fill_in_blanks(&state, request_id, &request).await?))
}

#[utoipa::path(
    post,
    path = "/generate-true-false",
    request_body = GenerateQuestionsPayload,
    responses(
        (status = 200, description = "Parsed true/false questions, with an error message when none were usable", body = TrueFalseResponse),
        (status = 400, description = "Invalid payload or difficulty"),
        (status = 500, description = "LLM not configured")
    )
)]
#[axum::debug_handler]
pub async fn generate_true_false(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    JsonBody(payload): JsonBody<GenerateQuestionsPayload>,
) -> Result<Json<TrueFalseResponse>> {
    let request = build_request(&state, QuestionKind::TrueFalse, &payload)?;
    Ok(Json(true_false(&state, request_id, &request).await?))
}

#[utoipa::path(
    post,
    path = "/generate-matching-questions",
    request_body = GenerateQuestionsPayload,
    responses(
        (status = 200, description = "One shuffled matching set, or an empty list when the model produced no pairs", body = MatchingResponse),
        (status = 400, description = "Invalid payload or difficulty"),
        (status = 500, description = "LLM not configured")
    )
)]
#[axum::debug_handler]
pub async fn generate_matching_questions(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    JsonBody(payload): JsonBody<GenerateQuestionsPayload>,
) -> Result<Json<MatchingResponse>> {
    let request = build_request(&state, QuestionKind::Matching, &payload)?;
    Ok(Json(matching(&state, request_id, &request).await?))
}

#[utoipa::path(
    post,
    path = "/generate/{kind}",
    params(
        ("kind" = String, Path, description = "mcq, fill-in-the-blanks, true-false, matching, or 1-4")
    ),
    request_body = GenerateQuestionsPayload,
    responses(
        (status = 200, description = "Same body as the kind-specific endpoint"),
        (status = 400, description = "Unknown question kind or invalid payload"),
        (status = 500, description = "LLM not configured")
    )
)]
#[axum::debug_handler]
pub async fn generate_by_kind(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(kind): Path<String>,
    JsonBody(payload): JsonBody<GenerateQuestionsPayload>,
) -> Result<Response> {
    let kind: QuestionKind = kind.parse().map_err(Error::UnsupportedFormat)?;
    let request = build_request(&state, kind, &payload)?;

    let response = match kind {
        QuestionKind::Mcq => Json(mcq(&state, request_id, &request).await?).into_response(),
        QuestionKind::FillBlank => {
            Json(fill_in_blanks(&state, request_id, &request).await?).into_response()
        }
        QuestionKind::TrueFalse => {
            Json(true_false(&state, request_id, &request).await?).into_response()
        }
        QuestionKind::Matching => {
            Json(matching(&state, request_id, &request).await?).into_response()
        }
    };
    Ok(response)
}
