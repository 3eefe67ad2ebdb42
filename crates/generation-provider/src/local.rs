//! Local backend: locally hosted model servers reached over HTTP.
//!
//! Images come from a Stable Diffusion WebUI-compatible server (`POST /sdapi/v1/txt2img`,
//! base64 images in the response). Text comes from a text-generation-inference style server
//! (`POST /generate`).

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::{GenerationError, Result};
use crate::provider::GenerationProvider;
use crate::types::{Prompt, ProviderKind, Resolution};

/// Settings for [`LocalModelProvider`].
#[derive(Debug, Clone)]
pub struct LocalConfig {
    pub image_url: String,
    pub text_url: String,
    pub max_new_tokens: u32,
    pub temperature: f32,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            image_url: "http://127.0.0.1:7860".to_string(),
            text_url: "http://127.0.0.1:8080".to_string(),
            max_new_tokens: 200,
            temperature: 0.7,
        }
    }
}

#[derive(Debug, Serialize)]
struct Txt2ImgRequest<'a> {
    prompt: &'a str,
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
struct Txt2ImgResponse {
    #[serde(default)]
    images: Vec<String>,
}

#[derive(Debug, Serialize)]
struct GenerateParameters {
    max_new_tokens: u32,
    do_sample: bool,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    generated_text: String,
}

/// Generation backend backed by local model servers.
#[derive(Debug, Clone)]
pub struct LocalModelProvider {
    http: reqwest::Client,
    config: LocalConfig,
}

impl LocalModelProvider {
    pub fn new(config: LocalConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(base: &str, path: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), path)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(GenerationError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl GenerationProvider for LocalModelProvider {
    #[instrument(skip(self, prompt), fields(resolution = %resolution))]
    async fn generate_image(&self, prompt: &Prompt, resolution: Resolution) -> Result<Vec<u8>> {
        let url = Self::endpoint(&self.config.image_url, "/sdapi/v1/txt2img");
        info!(
            url = %url,
            prompt_preview = %prompt.preview(100),
            "Local image generation request"
        );

        let body = Txt2ImgRequest {
            prompt: prompt.as_str(),
            width: resolution.width,
            height: resolution.height,
        };
        let response = self.http.post(&url).json(&body).send().await?;
        let parsed: Txt2ImgResponse = Self::check_status(response).await?.json().await?;

        let encoded = parsed
            .images
            .first()
            .ok_or_else(|| GenerationError::EmptyResponse("no images in txt2img response".into()))?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| GenerationError::Decode(e.to_string()))?;

        info!(bytes = bytes.len(), "Local image generation completed");
        Ok(bytes)
    }

    #[instrument(skip(self, prompt))]
    async fn generate_text(&self, prompt: &Prompt) -> Result<String> {
        let url = Self::endpoint(&self.config.text_url, "/generate");
        info!(
            url = %url,
            prompt_preview = %prompt.preview(100),
            "Local text generation request"
        );

        let body = GenerateRequest {
            inputs: prompt.as_str(),
            parameters: GenerateParameters {
                max_new_tokens: self.config.max_new_tokens,
                do_sample: true,
                temperature: self.config.temperature,
            },
        };
        let response = self.http.post(&url).json(&body).send().await?;
        let parsed: GenerateResponse = Self::check_status(response).await?.json().await?;

        if parsed.generated_text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse(
                "empty generated_text".into(),
            ));
        }
        info!(
            response_len = parsed.generated_text.len(),
            "Local text generation completed"
        );
        Ok(parsed.generated_text)
    }

    async fn health_check(&self) -> Result<()> {
        for url in [
            Self::endpoint(&self.config.image_url, "/sdapi/v1/sd-models"),
            Self::endpoint(&self.config.text_url, "/health"),
        ] {
            let response = self.http.get(&url).send().await?;
            Self::check_status(response).await?;
            info!(url = %url, "Local model server reachable");
        }
        Ok(())
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Local
    }
}
