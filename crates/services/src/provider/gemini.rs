use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use dojo_core::model::{BeltRank, GenerationSettings, Question, Quiz};

use super::{QuestionProvider, resolve_api_key};
use crate::config::ProviderConfig;
use crate::error::ProviderError;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Question provider backed by the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiQuestionProvider {
    client: Client,
    config: ProviderConfig,
}

impl GeminiQuestionProvider {
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    #[must_use]
    pub fn has_shared_key(&self) -> bool {
        self.config.shared_api_key.is_some()
    }

    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, model
        )
    }
}

#[async_trait]
impl QuestionProvider for GeminiQuestionProvider {
    async fn request_quiz(
        &self,
        belt: BeltRank,
        settings: &GenerationSettings,
        api_key: Option<&str>,
    ) -> Result<Quiz, ProviderError> {
        let key = resolve_api_key(api_key, self.config.shared_api_key.as_deref())
            .ok_or(ProviderError::MissingCredential)?;

        let payload = GenerateRequest::for_quiz(belt, settings);
        tracing::debug!(model = settings.model(), belt = %belt, "requesting quiz");

        let response = self
            .client
            .post(self.generate_url(settings.model()))
            .header(API_KEY_HEADER, key)
            .timeout(self.config.timeout)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = map_status(status, &body);
            tracing::warn!(%status, error = %err, "quiz request rejected");
            return Err(err);
        }

        let body = response.text().await?;
        parse_quiz(&body)
    }

    async fn test_credential(&self, api_key: &str) -> bool {
        let url = format!("{}/v1beta/models?pageSize=1", self.config.base_url);
        match self
            .client
            .get(url)
            .header(API_KEY_HEADER, api_key.trim())
            .timeout(self.config.timeout)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                tracing::debug!(error = %err, "credential check failed");
                false
            }
        }
    }
}

fn map_status(status: StatusCode, body: &str) -> ProviderError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited,
        StatusCode::UNAUTHORIZED => ProviderError::Unauthorized,
        StatusCode::FORBIDDEN => ProviderError::Forbidden,
        // Gemini reports a bad key as 400 with this reason.
        StatusCode::BAD_REQUEST if body.contains("API_KEY_INVALID") => ProviderError::Unauthorized,
        other => ProviderError::NetworkFailure(format!("upstream returned {other}")),
    }
}

fn parse_quiz(body: &str) -> Result<Quiz, ProviderError> {
    let envelope: GenerateResponse = serde_json::from_str(body)
        .map_err(|err| ProviderError::InvalidResponseShape(err.to_string()))?;

    let raw = envelope.text();
    let text = strip_code_fence(&raw);
    if text.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    let questions: Vec<Question> = serde_json::from_str(text)
        .map_err(|err| ProviderError::InvalidResponseShape(err.to_string()))?;
    Quiz::new(questions).map_err(|err| ProviderError::InvalidResponseShape(err.to_string()))
}

/// Grounded responses come back as free text, usually inside a ```json fence.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn question_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": { "type": "STRING" },
                "questionBengali": { "type": "STRING" },
                "options": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Array of 4 options in English"
                },
                "optionsBengali": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "Array of 4 options in Bengali"
                },
                "correctAnswer": {
                    "type": "INTEGER",
                    "description": "Index of the correct answer (0-3)"
                },
                "explanation": { "type": "STRING" },
                "explanationBengali": { "type": "STRING" }
            },
            "required": [
                "question",
                "questionBengali",
                "options",
                "optionsBengali",
                "correctAnswer",
                "explanation",
                "explanationBengali"
            ]
        }
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

impl GenerateRequest {
    fn for_quiz(belt: BeltRank, settings: &GenerationSettings) -> Self {
        // The search tool cannot be combined with a JSON response schema.
        let grounded = settings.use_search_grounding();
        Self {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart {
                    text: settings.render_prompt(belt),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: settings.temperature(),
                top_p: settings.top_p(),
                top_k: settings.top_k(),
                max_output_tokens: settings.max_output_tokens(),
                response_mime_type: (!grounded).then_some("application/json"),
                response_schema: (!grounded).then(question_schema),
            },
            tools: if grounded {
                vec![Tool {
                    google_search: GoogleSearch {},
                }]
            } else {
                Vec::new()
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}
