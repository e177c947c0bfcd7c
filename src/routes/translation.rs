use axum::{
    extract::State,
    response::Json,
    Extension,
};
use validator::Validate;

use crate::{
    dto::source_dto::{SupportedLanguagesResponse, TranslatePayload, TranslateResponse},
    error::Result,
    middleware::RequestId,
    utils::extract::FormBody,
    AppState,
};

#[utoipa::path(
    post,
    path = "/translate",
    request_body(content = TranslatePayload, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Text translated", body = TranslateResponse),
        (status = 400, description = "Empty text or target language"),
        (status = 500, description = "Translation not configured or service failure")
    )
)]
#[axum::debug_handler]
pub async fn translate(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    FormBody(payload): FormBody<TranslatePayload>,
) -> Result<Json<TranslateResponse>> {
    payload.validate()?;
    let translated_text = state
        .translator
        .translate(&payload.text, payload.target_language.trim())
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Translation failed"))?;

    Ok(Json(TranslateResponse {
        request_id: request_id.0,
        translated_text,
    }))
}

#[utoipa::path(
    get,
    path = "/supported-languages",
    responses(
        (status = 200, description = "Language display names mapped to codes", body = SupportedLanguagesResponse),
        (status = 500, description = "Translation not configured or service failure")
    )
)]
#[axum::debug_handler]
pub async fn supported_languages(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Json<SupportedLanguagesResponse>> {
    let languages = state
        .translator
        .supported_languages()
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Fetching languages failed"))?;

    Ok(Json(SupportedLanguagesResponse {
        request_id: request_id.0,
        languages,
    }))
}
