use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, Request, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::safety::{SAFETY_SETTINGS, SafetySetting};
use crate::error::{Error, Result};
use crate::fetch::auth::ApiKey;
use crate::fetch::{BasicClient, HttpClient, send_for_text};
use crate::services::TextGenerator;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    safety_settings: &'a [SafetySetting],
}

/// [`TextGenerator`] backed by the Gemini `generateContent` endpoint.
pub struct GeminiClient<C = ApiKey<BasicClient>> {
    http: C,
    endpoint: Url,
}

impl GeminiClient {
    /// Builds a client that authenticates with `api_key` in the
    /// `x-goog-api-key` header.
    pub fn new(api_key: &str, base_url: &str, model: &str) -> Result<Self> {
        let http = ApiKey::new(BasicClient::new()?, API_KEY_HEADER, api_key)?;
        Self::with_client(http, base_url, model)
    }
}

impl<C: HttpClient> GeminiClient<C> {
    pub fn with_client(http: C, base_url: &str, model: &str) -> Result<Self> {
        let raw = format!(
            "{}/v1beta/models/{}:generateContent",
            base_url.trim_end_matches('/'),
            model
        );
        let endpoint =
            Url::parse(&raw).map_err(|e| Error::Config(format!("invalid Gemini endpoint '{raw}': {e}")))?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn build_request(&self, prompt: &str) -> Result<Request> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            safety_settings: &SAFETY_SETTINGS,
        };

        let mut req = Request::new(Method::POST, self.endpoint.clone());
        req.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        *req.body_mut() = Some(serde_json::to_vec(&body)?.into());
        Ok(req)
    }
}

/// Extracts the completion text from a `generateContent` response body.
///
/// A blocked prompt, or a first candidate without text, is an error naming
/// the reason the service gave.
pub fn parse_response(body: &str) -> Result<String> {
    let json: Value = serde_json::from_str(body)?;

    if let Some(reason) = json["promptFeedback"]["blockReason"].as_str() {
        return Err(Error::Advisory(format!(
            "The request was blocked by the content filter ({reason})"
        )));
    }

    let candidate = &json["candidates"][0];
    let text: String = candidate["content"]["parts"]
        .as_array()
        .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let finish = candidate["finishReason"].as_str().unwrap_or("UNKNOWN");
        return Err(Error::Advisory(format!(
            "The response contained no text (finish reason: {finish})"
        )));
    }
    Ok(text)
}

#[async_trait]
impl<C: HttpClient> TextGenerator for GeminiClient<C> {
    #[tracing::instrument(skip_all, fields(prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let req = self.build_request(prompt)?;
        let body = send_for_text(&self.http, req).await.inspect_err(|e| {
            warn!(error = %e, "Gemini request failed");
        })?;

        let text = parse_response(&body)?;
        debug!(response_len = text.len(), "Gemini response received");
        Ok(text)
    }
}
