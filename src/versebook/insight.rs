//! # Verse Insight
//!
//! A short generated explanation of one verse: theological meaning and
//! historical context, in markdown, in the reader's language.
//!
//! [`InsightProvider`] is the seam; [`GeminiClient`] is the production
//! implementation, calling the Google Generative Language `generateContent`
//! endpoint. Every call is one request. [`fetch_with_timeout`] bounds it so
//! a stalled connection surfaces as [`InsightError::Timeout`].
//!
//! ## Configuration
//!
//! | Variable                         | Meaning                          |
//! |----------------------------------|----------------------------------|
//! | `GEMINI_API_KEY` / `API_KEY`     | API key (first one set wins)     |
//! | `VERSEBOOK_INSIGHT_TIMEOUT_SECS` | request timeout, default 30      |

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use serde::Deserialize;
use serde_json::json;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::model::Locale;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT_VALUE: &str = concat!("versebook/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightRequest {
    pub verse_text: String,
    pub book_display_name: String,
    pub chapter: u32,
    pub verse: u32,
    pub locale: Locale,
}

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("no API key configured (set GEMINI_API_KEY or API_KEY)")]
    MissingCredential,

    #[error("network error: {0}")]
    Network(String),

    #[error("provider returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("provider returned no text")]
    EmptyResponse,

    #[error("no response after {0:?}")]
    Timeout(Duration),
}

impl InsightError {
    /// The message shown to the reader in place of the insight.
    pub fn user_message(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::MissingCredential, Locale::En) => {
                "API key not configured. Please set the API_KEY environment variable."
            }
            (Self::MissingCredential, Locale::Pt) => {
                "Chave de API não configurada. Defina a variável de ambiente API_KEY."
            }
            (_, Locale::En) => {
                "Sorry, I couldn't fetch insights for this verse. Please check your API key and network connection."
            }
            (_, Locale::Pt) => {
                "Desculpe, não consegui buscar insights para este versículo. Verifique sua chave de API e conexão."
            }
        }
    }
}

impl From<reqwest::Error> for InsightError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

pub fn build_prompt(req: &InsightRequest) -> String {
    let lang_instruction = match req.locale {
        Locale::En => "Respond in English.",
        Locale::Pt => "Responda em Português do Brasil.",
    };
    format!(
        "Provide a brief theological explanation and historical context for the following Bible verse: \"{}\" from {} {}:{}. Keep the explanation concise, clear, and suitable for a general audience. Structure your response in markdown. {}",
        req.verse_text, req.book_display_name, req.chapter, req.verse, lang_instruction
    )
}

pub trait InsightProvider {
    fn fetch_insight(
        &self,
        req: &InsightRequest,
    ) -> impl Future<Output = Result<String, InsightError>> + Send;
}

/// Runs one provider call, giving up after `timeout`.
pub async fn fetch_with_timeout<P: InsightProvider>(
    provider: &P,
    req: &InsightRequest,
    timeout: Duration,
) -> Result<String, InsightError> {
    tracing::debug!(
        book = %req.book_display_name,
        chapter = req.chapter,
        verse = req.verse,
        "requesting insight"
    );
    let result = match tokio::time::timeout(timeout, provider.fetch_insight(req)).await {
        Ok(result) => result,
        Err(_) => Err(InsightError::Timeout(timeout)),
    };
    if let Err(e) = &result {
        tracing::warn!(error = %e, "insight request failed");
    }
    result
}

#[derive(Debug, Clone)]
pub struct InsightConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl InsightConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = ["GEMINI_API_KEY", "API_KEY"]
            .iter()
            .filter_map(|name| lookup(name))
            .find(|v| !v.trim().is_empty());
        let timeout = lookup("VERSEBOOK_INSIGHT_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);
        Self {
            api_key,
            timeout,
            ..Self::default()
        }
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &InsightConfig) -> Result<Self, InsightError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| InsightError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    async fn generate(&self, prompt: String) -> Result<String, InsightError> {
        let api_key = self.api_key.as_deref().ok_or(InsightError::MissingCredential)?;
        let url = format!("{}/{}:generateContent", API_BASE, self.model);
        let body = json!({ "contents": [{ "parts": [{ "text": prompt }] }] });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<String, InsightError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InsightError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        let parsed: GenerateResponse = response.json().await?;
        parsed.into_text().ok_or(InsightError::EmptyResponse)
    }
}

impl InsightProvider for GeminiClient {
    fn fetch_insight(
        &self,
        req: &InsightRequest,
    ) -> impl Future<Output = Result<String, InsightError>> + Send {
        self.generate(build_prompt(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(locale: Locale) -> InsightRequest {
        InsightRequest {
            verse_text: "For God so loved the world".into(),
            book_display_name: "John".into(),
            chapter: 3,
            verse: 16,
            locale,
        }
    }

    struct Canned(Result<&'static str, ()>);

    impl InsightProvider for Canned {
        fn fetch_insight(
            &self,
            _req: &InsightRequest,
        ) -> impl Future<Output = Result<String, InsightError>> + Send {
            let result = match self.0 {
                Ok(text) => Ok(text.to_string()),
                Err(()) => Err(InsightError::EmptyResponse),
            };
            async move { result }
        }
    }

    struct Stalled;

    impl InsightProvider for Stalled {
        fn fetch_insight(
            &self,
            _req: &InsightRequest,
        ) -> impl Future<Output = Result<String, InsightError>> + Send {
            async {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(String::new())
            }
        }
    }

    #[test]
    fn prompt_names_verse_and_language() {
        let en = build_prompt(&request(Locale::En));
        assert!(en.contains("\"For God so loved the world\" from John 3:16."));
        assert!(en.contains("Structure your response in markdown."));
        assert!(en.ends_with("Respond in English."));
        assert!(build_prompt(&request(Locale::Pt)).ends_with("Responda em Português do Brasil."));
    }

    #[test]
    fn failure_messages_are_localized() {
        let err = InsightError::Network("refused".into());
        assert!(err.user_message(Locale::En).starts_with("Sorry"));
        assert!(err.user_message(Locale::Pt).starts_with("Desculpe"));
        assert!(InsightError::MissingCredential
            .user_message(Locale::En)
            .contains("API_KEY"));
    }

    #[test]
    fn config_reads_key_and_timeout() {
        let config = InsightConfig::from_lookup(|name| match name {
            "API_KEY" => Some("k2".into()),
            "VERSEBOOK_INSIGHT_TIMEOUT_SECS" => Some("5".into()),
            _ => None,
        });
        assert_eq!(config.api_key.as_deref(), Some("k2"));
        assert_eq!(config.timeout, Duration::from_secs(5));

        let config = InsightConfig::from_lookup(|name| match name {
            "GEMINI_API_KEY" => Some("k1".into()),
            "API_KEY" => Some("k2".into()),
            "VERSEBOOK_INSIGHT_TIMEOUT_SECS" => Some("soon".into()),
            _ => None,
        });
        assert_eq!(config.api_key.as_deref(), Some("k1"));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn response_text_is_joined() {
        let parsed: GenerateResponse = serde_json::from_str(
            r##"{"candidates":[{"content":{"parts":[{"text":"# Title\n"},{"text":"Body"}]}}]}"##,
        )
        .unwrap();
        assert_eq!(parsed.into_text().as_deref(), Some("# Title\nBody"));

        let empty: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(empty.into_text().is_none());
    }

    #[tokio::test]
    async fn missing_key_fails_before_network() {
        let client = GeminiClient::new(&InsightConfig::default()).unwrap();
        let err = client.fetch_insight(&request(Locale::En)).await.unwrap_err();
        assert!(matches!(err, InsightError::MissingCredential));
    }

    #[tokio::test]
    async fn provider_results_pass_through() {
        let text = fetch_with_timeout(&Canned(Ok("insight")), &request(Locale::En), DEFAULT_TIMEOUT)
            .await
            .unwrap();
        assert_eq!(text, "insight");
        let err = fetch_with_timeout(&Canned(Err(())), &request(Locale::En), DEFAULT_TIMEOUT).await;
        assert!(matches!(err, Err(InsightError::EmptyResponse)));
    }

    #[tokio::test]
    async fn stalled_provider_times_out() {
        let timeout = Duration::from_millis(20);
        let err = fetch_with_timeout(&Stalled, &request(Locale::Pt), timeout).await;
        assert!(matches!(err, Err(InsightError::Timeout(_))));
    }
}
