use axum::{
    extract::{Multipart, State},
    response::Json,
    Extension,
};
use bytes::Bytes;
use std::path::Path;

use crate::{
    dto::source_dto::{ProcessFileResponse, ProcessTextPayload, ProcessTextResponse},
    error::{Error, Result},
    middleware::RequestId,
    models::source::{SourceDocument, SourceKind},
    services::transcription_service::{video_to_text, DEFAULT_LANGUAGE},
    utils::{
        extract::JsonBody,
        upload::{sanitized_extension, TempFile},
    },
    AppState,
};

const UNSUPPORTED_FILE: &str = "Unsupported file format. Supported: .pdf, .docx, .txt, .mp3, .wav, .m4a, .mp4, .mkv, .avi";

#[utoipa::path(
    post,
    path = "/process-text",
    request_body = ProcessTextPayload,
    responses(
        (status = 200, description = "Text normalized", body = ProcessTextResponse)
    )
)]
#[axum::debug_handler]
pub async fn process_text(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    JsonBody(payload): JsonBody<ProcessTextPayload>,
) -> Json<ProcessTextResponse> {
    let document = state.document_service.typed(&payload.text);
    Json(ProcessTextResponse {
        request_id: request_id.0,
        processed_text: document.into_text(),
    })
}

#[utoipa::path(
    post,
    path = "/process-file",
    responses(
        (status = 200, description = "Text extracted or transcribed from the uploaded file", body = ProcessFileResponse),
        (status = 400, description = "Missing file or unsupported format"),
        (status = 500, description = "Missing credentials or extraction failure"),
        (status = 502, description = "Speech service failure")
    )
)]
#[axum::debug_handler]
pub async fn process_file(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    mut multipart: Multipart,
) -> Result<Json<ProcessFileResponse>> {
    let mut upload: Option<(String, Bytes)> = None;
    let mut language = DEFAULT_LANGUAGE.to_string();

    while let Some(field) = multipart.next_field().await? {
        match field.name().unwrap_or("") {
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await?;
                upload = Some((file_name, data));
            }
            "language" => {
                let value = field.text().await?;
                if !value.trim().is_empty() {
                    language = value.trim().to_string();
                }
            }
            _ => {}
        }
    }

    let (file_name, data) =
        upload.ok_or_else(|| Error::BadRequest("Missing 'file' field".to_string()))?;

    let (Some(kind), Some(ext)) = (
        SourceKind::from_path(Path::new(&file_name)),
        sanitized_extension(&file_name),
    ) else {
        tracing::info!(file_name = %file_name, "Rejected upload with unsupported format");
        return Err(Error::UnsupportedFormat(UNSUPPORTED_FILE.to_string()));
    };

    let file = TempFile::write(&state.upload_dir, request_id.as_str(), &ext, &data).await?;
    tracing::info!(file_name = %file_name, ?kind, bytes = data.len(), "Processing upload");

    let document = match kind {
        SourceKind::Audio => SourceDocument::new(
            state.transcriber.transcribe(file.path(), &language).await?,
            SourceKind::Audio,
        ),
        SourceKind::Video => SourceDocument::new(
            video_to_text(
                state.transcriber.as_ref(),
                file.path(),
                &state.upload_dir,
                request_id.as_str(),
                &language,
            )
            .await?,
            SourceKind::Video,
        ),
        SourceKind::File | SourceKind::Typed => {
            state
                .document_service
                .load(file.path(), request_id.as_str())
                .await?
        }
    };

    Ok(Json(ProcessFileResponse {
        request_id: request_id.0,
        result: document.into_text(),
    }))
}
