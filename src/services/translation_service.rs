use crate::config::TranslationConfig;
use crate::error::Error;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("{0}")]
    NotConfigured(String),

    #[error("{0}")]
    Service(String),
}

impl From<TranslationError> for Error {
    fn from(err: TranslationError) -> Self {
        match err {
            TranslationError::NotConfigured(msg) => Error::Config(msg),
            TranslationError::Service(msg) => Error::Translation(msg),
        }
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(err: reqwest::Error) -> Self {
        // The message reaches API clients; the request URL stays out of it.
        TranslationError::Service(err.without_url().to_string())
    }
}

pub type TranslationResult<T> = std::result::Result<T, TranslationError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_language: &str) -> TranslationResult<String>;

    /// Display name to language code.
    async fn supported_languages(&self) -> TranslationResult<BTreeMap<String, String>>;
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct TranslationsData {
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

#[derive(Deserialize)]
struct LanguagesData {
    languages: Vec<Language>,
}

#[derive(Deserialize)]
struct Language {
    language: String,
    name: Option<String>,
}

#[derive(Clone)]
pub struct TranslationService {
    client: Client,
    config: TranslationConfig,
}

impl TranslationService {
    pub fn new(config: TranslationConfig, client: Client) -> Self {
        Self { client, config }
    }

    fn api_key(&self) -> TranslationResult<&str> {
        self.config.api_key.as_deref().ok_or_else(|| {
            TranslationError::NotConfigured(
                "Translation API key is missing. Set TRANSLATION_API_KEY in the environment."
                    .to_string(),
            )
        })
    }

    fn endpoint(&self, extra_segment: Option<&str>) -> TranslationResult<Url> {
        let mut url = Url::parse(&self.config.api_url).map_err(|e| {
            TranslationError::NotConfigured(format!("Invalid TRANSLATION_API_URL: {}", e))
        })?;
        if let Some(segment) = extra_segment {
            url.path_segments_mut()
                .map_err(|_| {
                    TranslationError::NotConfigured(
                        "TRANSLATION_API_URL cannot be used as a base URL".to_string(),
                    )
                })?
                .pop_if_empty()
                .push(segment);
        }
        Ok(url)
    }
}

#[async_trait]
impl Translator for TranslationService {
    async fn translate(&self, text: &str, target_language: &str) -> TranslationResult<String> {
        let key = self.api_key()?;
        let url = self.endpoint(None)?;

        let body: Envelope<TranslationsData> = self
            .client
            .post(url)
            .header(API_KEY_HEADER, key)
            .json(&TranslateRequest {
                q: text,
                target: target_language,
                format: "text",
            })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        body.data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| TranslationError::Service("Translation response was empty".to_string()))
    }

    async fn supported_languages(&self) -> TranslationResult<BTreeMap<String, String>> {
        let key = self.api_key()?;
        let url = self.endpoint(Some("languages"))?;

        let body: Envelope<LanguagesData> = self
            .client
            .get(url)
            .header(API_KEY_HEADER, key)
            .query(&[("target", "en")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(body
            .data
            .languages
            .into_iter()
            .map(|lang| {
                let name = lang.name.unwrap_or_else(|| lang.language.clone());
                (name, lang.language)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::to_bytes,
        extract::Query,
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value as JsonValue};
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    async fn serve(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/language/translate/v2", addr)
    }

    async fn spawn_backend() -> String {
        let app = Router::new()
            .route(
                "/language/translate/v2",
                post(|Json(body): Json<JsonValue>| async move {
                    let translated = format!("[{}] {}", body["target"].as_str().unwrap_or(""), body["q"].as_str().unwrap_or(""));
                    Json(json!({ "data": { "translations": [ { "translatedText": translated } ] } }))
                }),
            )
            .route(
                "/language/translate/v2/languages",
                get(|headers: HeaderMap, Query(params): Query<HashMap<String, String>>| async move {
                    assert_eq!(headers[API_KEY_HEADER], "secret");
                    assert!(!params.contains_key("key"));
                    Json(json!({ "data": { "languages": [
                        { "language": "fr", "name": "French" },
                        { "language": "hi", "name": "Hindi" },
                        { "language": "xx" }
                    ] } }))
                }),
            );
        serve(app).await
    }

    async fn spawn_forbidding_backend() -> String {
        let forbidden = || async { (StatusCode::FORBIDDEN, "API key not valid").into_response() };
        let app = Router::new()
            .route("/language/translate/v2", post(forbidden))
            .route("/language/translate/v2/languages", get(forbidden));
        serve(app).await
    }

    async fn error_body(err: TranslationError) -> String {
        let response = Error::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn service(api_key: Option<&str>, api_url: String) -> TranslationService {
        TranslationService::new(
            TranslationConfig {
                api_key: api_key.map(str::to_string),
                api_url,
            },
            Client::new(),
        )
    }

    #[tokio::test]
    async fn missing_key_is_reported_as_misconfiguration() {
        let svc = service(None, "http://127.0.0.1:9/language/translate/v2".to_string());

        let err = svc.translate("hello", "fr").await.unwrap_err();
        assert!(matches!(err, TranslationError::NotConfigured(_)));
        assert!(matches!(Error::from(err), Error::Config(_)));
    }

    #[tokio::test]
    async fn translates_through_the_backend() {
        let svc = service(Some("secret"), spawn_backend().await);
        let translated = svc.translate("hello", "fr").await.unwrap();
        assert_eq!(translated, "[fr] hello");
    }

    #[tokio::test]
    async fn lists_languages_by_display_name() {
        let svc = service(Some("secret"), spawn_backend().await);
        let languages = svc.supported_languages().await.unwrap();

        assert_eq!(languages.get("French").map(String::as_str), Some("fr"));
        assert_eq!(languages.get("Hindi").map(String::as_str), Some("hi"));
        assert_eq!(languages.get("xx").map(String::as_str), Some("xx"));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_service_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let svc = service(Some("secret"), format!("http://{}/language/translate/v2", addr));
        let err = svc.translate("hello", "fr").await.unwrap_err();
        assert!(matches!(err, TranslationError::Service(_)));
        assert!(matches!(Error::from(err), Error::Translation(_)));
    }

    #[tokio::test]
    async fn upstream_rejection_does_not_expose_the_key() {
        let svc = service(Some("SUPERSECRETKEY"), spawn_forbidding_backend().await);

        let err = svc.translate("hello", "fr").await.unwrap_err();
        assert!(matches!(err, TranslationError::Service(_)));
        let body = error_body(err).await;
        assert!(body.contains("403"));
        assert!(!body.contains("SUPERSECRETKEY"));

        let err = svc.supported_languages().await.unwrap_err();
        assert!(!error_body(err).await.contains("SUPERSECRETKEY"));
    }

    #[tokio::test]
    async fn transport_failure_message_omits_the_url() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let svc = service(Some("SUPERSECRETKEY"), format!("http://{}/language/translate/v2", addr));
        let body = error_body(svc.translate("hello", "fr").await.unwrap_err()).await;
        assert!(!body.contains("SUPERSECRETKEY"));
        assert!(!body.contains(&addr.to_string()));
    }
}
