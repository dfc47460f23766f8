//! Generative-language service client.
//!
//! Thin reqwest client for the external text and image generation
//! endpoints. Construction is config-driven: an empty API key yields no
//! client, and every dependent feature degrades instead of failing at
//! startup.

use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::GenerativeConfig;

/// Errors from the generative-language service.
#[derive(Debug, Error)]
pub enum GenerativeError {
    #[error("Generative service is not configured")]
    NotConfigured,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Generative service returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response from generative service: {0}")]
    InvalidResponse(String),
}

/// One generated text completion.
#[derive(Debug, Clone)]
pub struct GeneratedText {
    pub text: String,
    pub token_count: u32,
}

// Request/response DTOs for the generateContent wire format.

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CandidatePart {
    text: Option<String>,
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    total_token_count: u32,
}

/// Client for the generative-language endpoints.
pub struct GenerativeClient {
    client: Client,
    config: GenerativeConfig,
}

impl GenerativeClient {
    /// Builds a client when an API key is configured; `None` otherwise.
    pub fn from_config(config: &GenerativeConfig) -> Option<Self> {
        if config.api_key.is_empty() {
            return None;
        }

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .ok()?;

        Some(Self {
            client,
            config: config.clone(),
        })
    }

    /// Generates text for a prompt with an optional system instruction.
    pub async fn generate_text(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<GeneratedText, GenerativeError> {
        let response = self
            .invoke(&self.config.text_model, prompt, system_instruction, None)
            .await?;

        let text = first_part(&response)
            .and_then(|part| part.text.clone())
            .ok_or_else(|| GenerativeError::InvalidResponse("no text candidate".to_string()))?;

        let token_count = response
            .usage_metadata
            .map(|usage| usage.total_token_count)
            .unwrap_or(0);

        Ok(GeneratedText { text, token_count })
    }

    /// Generates an image for a prompt, returning the decoded bytes.
    pub async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, GenerativeError> {
        let generation_config = GenerationConfig {
            response_modalities: vec!["IMAGE".to_string()],
        };
        let response = self
            .invoke(&self.config.image_model, prompt, None, Some(generation_config))
            .await?;

        let encoded = first_part(&response)
            .and_then(|part| part.inline_data.as_ref())
            .map(|data| data.data.clone())
            .ok_or_else(|| GenerativeError::InvalidResponse("no image candidate".to_string()))?;

        STANDARD
            .decode(encoded)
            .map_err(|e| GenerativeError::InvalidResponse(format!("bad image encoding: {}", e)))
    }

    async fn invoke(
        &self,
        model: &str,
        prompt: &str,
        system_instruction: Option<&str>,
        generation_config: Option<GenerationConfig>,
    ) -> Result<GenerateResponse, GenerativeError> {
        let url = format!("{}/models/{}:generateContent", self.config.base_url, model);

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: system_instruction.map(|text| Content {
                parts: vec![Part {
                    text: text.to_string(),
                }],
            }),
            generation_config,
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerativeError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| GenerativeError::InvalidResponse(e.to_string()))
    }
}

fn first_part(response: &GenerateResponse) -> Option<&CandidatePart> {
    response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.first())
}
