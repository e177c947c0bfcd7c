use crate::error::{Error, Result};
use crate::models::question::{
    BlankItem, Difficulty, GenerationRequest, McqItem, QuestionKind, TrueFalseItem,
};
use crate::services::ai_service::{RawModelResponse, TextGenerator};
use crate::services::matching_service::{build_matching, MatchingColumns};
use crate::services::parser_service::{self, ParseResult};
use crate::services::prompt_service::build_prompt;
use std::sync::Arc;

/// Prompt -> model -> decoder, per question kind.
#[derive(Clone)]
pub struct QuizService {
    generator: Arc<dyn TextGenerator>,
    max_questions: usize,
}

impl QuizService {
    pub fn new(generator: Arc<dyn TextGenerator>, max_questions: usize) -> Self {
        Self {
            generator,
            max_questions: max_questions.max(1),
        }
    }

    /// Validates the raw request fields. The count is capped at the
    /// configured maximum rather than rejected.
    pub fn build_request(
        &self,
        kind: QuestionKind,
        syllabus: &str,
        num_questions: usize,
        difficulty: &str,
    ) -> Result<GenerationRequest> {
        if num_questions == 0 {
            return Err(Error::BadRequest("num_questions must be at least 1".to_string()));
        }
        let difficulty: Difficulty = difficulty.parse().map_err(Error::BadRequest)?;

        Ok(GenerationRequest {
            syllabus: syllabus.to_string(),
            count: num_questions.min(self.max_questions),
            kind,
            difficulty,
        })
    }

    async fn query(&self, request: &GenerationRequest) -> Result<RawModelResponse> {
        let prompt = build_prompt(
            request.kind,
            &request.syllabus,
            request.count,
            request.difficulty,
        );
        let raw = self.generator.generate(&prompt).await?;
        if raw.is_sentinel() {
            tracing::warn!(kind = ?request.kind, response = raw.as_str(), "Generation backend returned no usable output");
        }
        Ok(raw)
    }

    pub async fn generate_mcq(&self, request: &GenerationRequest) -> Result<ParseResult<McqItem>> {
        let raw = self.query(request).await?;
        Ok(log_outcome(request, parser_service::parse_mcq(raw.as_str())))
    }

    pub async fn generate_fill_in_blanks(
        &self,
        request: &GenerationRequest,
    ) -> Result<ParseResult<BlankItem>> {
        let raw = self.query(request).await?;
        tracing::debug!("Raw output from generator:\n{}", raw.as_str());
        Ok(log_outcome(request, parser_service::parse_fill_in_blanks(raw.as_str())))
    }

    pub async fn generate_true_false(
        &self,
        request: &GenerationRequest,
    ) -> Result<ParseResult<TrueFalseItem>> {
        let raw = self.query(request).await?;
        Ok(log_outcome(request, parser_service::parse_true_false(raw.as_str())))
    }

    pub async fn generate_matching(&self, request: &GenerationRequest) -> Result<MatchingColumns> {
        let raw = self.query(request).await?;
        let columns = build_matching(raw.as_str(), &mut rand::thread_rng());
        if columns.is_empty() {
            tracing::warn!("No matching pairs found in model output");
        } else {
            tracing::info!(pairs = columns.answers.len(), "Matching set generated");
        }
        Ok(columns)
    }
}

fn log_outcome<T>(request: &GenerationRequest, result: ParseResult<T>) -> ParseResult<T> {
    match &result {
        Ok(items) => tracing::info!(
            kind = ?request.kind,
            requested = request.count,
            parsed = items.len(),
            "Questions generated"
        ),
        Err(e) => tracing::warn!(kind = ?request.kind, error = %e, "No valid questions parsed"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ai_service::MockTextGenerator;
    use crate::services::parser_service::ParseError;

    fn service_returning(text: &'static str) -> QuizService {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .returning(move |_| Ok(RawModelResponse::new(text)));
        QuizService::new(Arc::new(generator), 10)
    }

    #[test]
    fn build_request_validates_and_caps() {
        let svc = QuizService::new(Arc::new(MockTextGenerator::new()), 10);

        let req = svc
            .build_request(QuestionKind::Mcq, "Cells", 25, "HARD")
            .unwrap();
        assert_eq!(req.count, 10);
        assert_eq!(req.difficulty, Difficulty::Hard);

        assert!(matches!(
            svc.build_request(QuestionKind::Mcq, "Cells", 0, "easy"),
            Err(Error::BadRequest(_))
        ));
        assert!(matches!(
            svc.build_request(QuestionKind::Mcq, "Cells", 3, "impossible"),
            Err(Error::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn prompt_reaches_the_generator() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|prompt: &str| {
                prompt.contains("Thermodynamics") && prompt.contains("Difficulty Level: Medium.")
            })
            .times(1)
            .returning(|_| Ok(RawModelResponse::new("")));
        let svc = QuizService::new(Arc::new(generator), 10);

        let req = svc
            .build_request(QuestionKind::TrueFalse, "Thermodynamics", 2, "medium")
            .unwrap();
        let result = svc.generate_true_false(&req).await.unwrap();
        assert_eq!(result, Err(ParseError::Empty));
    }

    #[tokio::test]
    async fn mcq_pipeline_parses_model_output() {
        let svc = service_returning(
            "Q1. 2 + 2 = ?\nA) 3\nB) 4\nC) 5\nD) 22\nAnswer: B - Explanation: Basic addition.",
        );
        let req = svc.build_request(QuestionKind::Mcq, "Arithmetic", 1, "easy").unwrap();

        let items = svc.generate_mcq(&req).await.unwrap().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].answer, "B");
    }

    #[tokio::test]
    async fn sentinel_output_is_reported_as_improperly_formatted() {
        let svc = service_returning("Error querying LLM API: operation timed out");
        let req = svc
            .build_request(QuestionKind::FillBlank, "Optics", 3, "easy")
            .unwrap();

        let result = svc.generate_fill_in_blanks(&req).await.unwrap();
        assert_eq!(result, Err(ParseError::ImproperlyFormatted));
    }

    #[tokio::test]
    async fn matching_pipeline_builds_columns() {
        let svc = service_returning("Lens | Refracts light\nMirror | Reflects light\nPrism | Splits light");
        let req = svc
            .build_request(QuestionKind::Matching, "Optics", 3, "hard")
            .unwrap();

        let columns = svc.generate_matching(&req).await.unwrap();
        assert_eq!(columns.answers.len(), 3);
    }

    #[tokio::test]
    async fn configuration_errors_propagate() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .returning(|_| Err(Error::Config("LLM API key is missing".to_string())));
        let svc = QuizService::new(Arc::new(generator), 10);
        let req = svc.build_request(QuestionKind::Mcq, "Any", 1, "easy").unwrap();

        assert!(matches!(svc.generate_mcq(&req).await, Err(Error::Config(_))));
    }
}
