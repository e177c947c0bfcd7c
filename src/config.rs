use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

const DEFAULT_LLM_API_URL: &str = "https://api.perplexity.ai/chat/completions";
const DEFAULT_LLM_MODEL: &str = "llama-3.1-sonar-small-128k-online";
const DEFAULT_TRANSLATION_API_URL: &str = "https://translation.googleapis.com/language/translate/v2";
const DEFAULT_TRANSCRIPTION_API_URL: &str = "https://api.openai.com/v1/audio/transcriptions";
const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub upload_dir: PathBuf,
    pub max_questions: usize,
    pub max_upload_bytes: usize,
    pub llm: LlmConfig,
    pub translation: TranslationConfig,
    pub transcription: TranscriptionConfig,
}

/// Settings for the chat-completions backend. `temperature` and `seed` are
/// forwarded as-is; whether the backend honours them is up to the backend.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub seed: Option<u64>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct TranslationConfig {
    pub api_key: Option<String>,
    pub api_url: String,
}

#[derive(Debug, Clone)]
pub struct TranscriptionConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "127.0.0.1:8000"),
            upload_dir: PathBuf::from(get_env_or("UPLOAD_DIR", "uploads")),
            max_questions: get_env_parse_or("MAX_QUESTIONS", 50)?,
            max_upload_bytes: get_env_parse_or("MAX_UPLOAD_BYTES", 50 * 1024 * 1024)?,
            llm: LlmConfig {
                api_key: get_env_opt("LLM_API_KEY").or_else(|| get_env_opt("PERPLEXITY_API_KEY")),
                api_url: get_env_url("LLM_API_URL", DEFAULT_LLM_API_URL)?,
                model: get_env_or("LLM_MODEL", DEFAULT_LLM_MODEL),
                temperature: get_env_parse_or("LLM_TEMPERATURE", 0.7)?,
                max_tokens: get_env_parse_or("LLM_MAX_TOKENS", 10_000)?,
                seed: get_env_opt("LLM_SEED")
                    .map(|raw| parse_value("LLM_SEED", &raw))
                    .transpose()?,
                timeout: Duration::from_secs(get_env_parse_or("LLM_TIMEOUT_SECS", 30)?),
            },
            translation: TranslationConfig {
                api_key: get_env_opt("TRANSLATION_API_KEY"),
                api_url: get_env_url("TRANSLATION_API_URL", DEFAULT_TRANSLATION_API_URL)?,
            },
            transcription: TranscriptionConfig {
                api_key: get_env_opt("TRANSCRIPTION_API_KEY"),
                api_url: get_env_url("TRANSCRIPTION_API_URL", DEFAULT_TRANSCRIPTION_API_URL)?,
                model: get_env_or("TRANSCRIPTION_MODEL", DEFAULT_TRANSCRIPTION_MODEL),
            },
        })
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_LLM_API_URL.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 10_000,
            seed: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_TRANSLATION_API_URL.to_string(),
        }
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_TRANSCRIPTION_API_URL.to_string(),
            model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
        }
    }
}

/// Empty values count as unset so that a blank `KEY=` line in `.env` does not
/// masquerade as a credential.
fn get_env_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_or(name: &str, default: &str) -> String {
    get_env_opt(name).unwrap_or_else(|| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get_env_opt(name) {
        Some(raw) => parse_value(name, &raw),
        None => Ok(default),
    }
}

fn get_env_url(name: &str, default: &str) -> Result<String> {
    let raw = get_env_or(name, default);
    Url::parse(&raw).map_err(|e| Error::Config(format!("Invalid URL for {}: {}", name, e)))?;
    Ok(raw)
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_reports_the_variable_name() {
        let err = parse_value::<u32>("LLM_MAX_TOKENS", "lots").unwrap_err();
        assert!(matches!(err, Error::Config(ref msg) if msg.contains("LLM_MAX_TOKENS")));
    }

    #[test]
    fn parse_value_trims_whitespace() {
        let value: f32 = parse_value("LLM_TEMPERATURE", " 0.2 ").unwrap();
        assert!((value - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn unset_variables_fall_back_to_defaults() {
        let value: u64 = get_env_parse_or("QUIZGEN_TEST_SURELY_UNSET_VAR", 30).unwrap();
        assert_eq!(value, 30);
        assert_eq!(get_env_or("QUIZGEN_TEST_SURELY_UNSET_VAR", "uploads"), "uploads");
    }

    #[test]
    fn default_llm_config_matches_reference_backend() {
        let llm = LlmConfig::default();
        assert!(llm.api_key.is_none());
        assert_eq!(llm.timeout, Duration::from_secs(30));
        assert_eq!(llm.model, DEFAULT_LLM_MODEL);
    }
}
