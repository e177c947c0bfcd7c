use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unsupported input: {0}")]
    UnsupportedFormat(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid JSON body: {}", .0.body_text())]
    Json(#[from] JsonRejection),

    #[error("Invalid form body: {}", .0.body_text())]
    Form(#[from] FormRejection),

    #[error("Error in translation: {0}")]
    Translation(String),

    #[error("Error in transcription: {0}")]
    Transcription(String),

    #[error("Error extracting text: {0}")]
    Extraction(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest(_)
            | Error::UnsupportedFormat(_)
            | Error::Validation(_)
            | Error::Json(_)
            | Error::Form(_)
            | Error::Multipart(_) => StatusCode::BAD_REQUEST,
            Error::Transcription(_) => StatusCode::BAD_GATEWAY,
            Error::Config(_)
            | Error::Translation(_)
            | Error::Extraction(_)
            | Error::Internal(_)
            | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let error_message = match &self {
            Error::BadRequest(msg) | Error::UnsupportedFormat(msg) => msg.clone(),
            Error::Io(_) | Error::Internal(_) => {
                tracing::error!(error = ?self, "request failed");
                "An unexpected error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
