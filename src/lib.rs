pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::services::{
    ai_service::AIService, document_service::DocumentService, quiz_service::QuizService,
    transcription_service::{Transcriber, TranscriptionService},
    translation_service::{TranslationService, Translator},
};
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: QuizService,
    pub document_service: DocumentService,
    pub translator: Arc<dyn Translator>,
    pub transcriber: Arc<dyn Transcriber>,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {e}")))?;

        let ai_service = AIService::new(config.llm.clone(), http_client.clone());
        let quiz_service = QuizService::new(Arc::new(ai_service), config.max_questions);
        let document_service = DocumentService::new(config.upload_dir.clone());
        let translator =
            TranslationService::new(config.translation.clone(), http_client.clone());
        let transcriber = TranscriptionService::new(config.transcription.clone(), http_client);

        Ok(Self {
            quiz_service,
            document_service,
            translator: Arc::new(translator),
            transcriber: Arc::new(transcriber),
            upload_dir: config.upload_dir.clone(),
            max_upload_bytes: config.max_upload_bytes,
        })
    }
}
