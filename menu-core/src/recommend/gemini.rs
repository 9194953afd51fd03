use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{error::StageError, http};

use super::{CompletionModel, Prompt};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

pub const MODEL: &str = "gemini-exp-1206";
pub const TEMPERATURE: f64 = 0.8;
pub const TOP_P: f64 = 0.9;
pub const MAX_OUTPUT_TOKENS: u32 = 800;

/// Google Gemini `generateContent` client with fixed sampling parameters.
#[derive(Debug, Clone)]
pub struct GeminiModel {
    base_url: String,
    api_key: String,
    model: &'static str,
    http: Client,
}

impl GeminiModel {
    pub fn new(api_key: impl Into<String>) -> reqwest::Result<Self> {
        Self::new_with_base_url(api_key, GEMINI_API_URL)
    }

    pub fn new_with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> reqwest::Result<Self> {
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: MODEL,
            http: http::client(http::GENERATION_TIMEOUT)?,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_p: f64,
    max_output_tokens: u32,
}

impl<'a> GenerateRequest<'a> {
    fn new(prompt: &'a Prompt) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: prompt.parts().into_iter().map(|text| RequestPart { text }).collect(),
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl GenerateResponse {
    fn into_text(self) -> Result<String, StageError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            let reason = self
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .map(|r| format!("prompt blocked: {r}"))
                .unwrap_or_else(|| "response contained no candidates".to_string());
            return Err(StageError::Generation(reason));
        };

        Ok(candidate
            .content
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl CompletionModel for GeminiModel {
    async fn generate(&self, prompt: &Prompt) -> Result<String, StageError> {
        tracing::debug!(model = self.model, "requesting completion");

        let res = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateRequest::new(prompt))
            .send()
            .await
            .map_err(|e| StageError::Generation(format!("request to Gemini failed: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| StageError::Generation(format!("failed to read Gemini response: {e}")))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| http::truncate_body(&body));
            return Err(StageError::Generation(format!(
                "Gemini responded with status {status}: {detail}"
            )));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            StageError::Generation(format!("failed to parse Gemini response JSON: {e}"))
        })?;

        parsed.into_text()
    }
}
