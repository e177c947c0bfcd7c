pub mod ai_service;
pub mod document_service;
pub mod matching_service;
pub mod parser_service;
pub mod prompt_service;
pub mod quiz_service;
pub mod transcription_service;
pub mod translation_service;
