pub mod docs;
pub mod generation;
pub mod health;
pub mod source;
pub mod translation;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{middleware::request_id_middleware, AppState};

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;

    let source_api = Router::new()
        .route("/process-text", post(source::process_text))
        .route("/process-file", post(source::process_file));

    let generation_api = Router::new()
        .route("/generate-mcq", post(generation::generate_mcq))
        .route(
            "/generate-fill-in-the-blanks",
            post(generation::generate_fill_in_the_blanks),
        )
        .route("/generate-true-false", post(generation::generate_true_false))
        .route(
            "/generate-matching-questions",
            post(generation::generate_matching_questions),
        )
        .route("/generate/:kind", post(generation::generate_by_kind));

    let translation_api = Router::new()
        .route("/translate", post(translation::translate))
        .route("/supported-languages", get(translation::supported_languages));

    Router::new()
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .merge(source_api)
        .merge(generation_api)
        .merge(translation_api)
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        // Outermost, so preflights and rejections carry the id too.
        .layer(axum::middleware::from_fn(request_id_middleware))
}
