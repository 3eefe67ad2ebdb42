//! Hosted backend: OpenAI-compatible images and chat completions via async-openai.

use std::sync::Arc;

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
        CreateImageRequestArgs, ImageModel, ImageSize,
    },
    Client,
};
use async_trait::async_trait;
use base64::Engine;
use tracing::{info, instrument};

use crate::error::{GenerationError, Result};
use crate::mask::mask_token;
use crate::provider::GenerationProvider;
use crate::types::{Prompt, ProviderKind, Resolution};

/// System message sent ahead of every `/ask` question.
pub const DEFAULT_SYSTEM_CONTENT: &str = "You are a helpful assistant.";

/// Settings for [`HostedProvider`].
#[derive(Debug, Clone)]
pub struct HostedConfig {
    pub api_key: String,
    /// `None` uses async-openai's default (`https://api.openai.com/v1`).
    pub base_url: Option<String>,
    pub image_model: String,
    pub text_model: String,
}

impl HostedConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            image_model: "dall-e-3".to_string(),
            text_model: "gpt-4".to_string(),
        }
    }
}

/// OpenAI-compatible generation backend.
#[derive(Clone)]
pub struct HostedProvider {
    client: Arc<Client<OpenAIConfig>>,
    http: reqwest::Client,
    image_model: String,
    text_model: String,
    masked_key: String,
}

impl HostedProvider {
    pub fn new(config: HostedConfig) -> Self {
        let masked_key = mask_token(&config.api_key);
        let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key);
        if let Some(base_url) = config.base_url {
            openai_config = openai_config.with_api_base(base_url);
        }
        Self {
            client: Arc::new(Client::with_config(openai_config)),
            http: reqwest::Client::new(),
            image_model: config.image_model,
            text_model: config.text_model,
            masked_key,
        }
    }

    fn image_model(&self) -> ImageModel {
        match self.image_model.as_str() {
            "dall-e-2" => ImageModel::DallE2,
            "dall-e-3" => ImageModel::DallE3,
            other => ImageModel::Other(other.to_string()),
        }
    }

    /// Resolves the first image of a response to bytes: inline base64 is decoded, a URL is
    /// downloaded.
    async fn image_bytes(&self, datum: serde_json::Value) -> Result<Vec<u8>> {
        if let Some(b64) = datum.get("b64_json").and_then(|v| v.as_str()) {
            return base64::engine::general_purpose::STANDARD
                .decode(b64)
                .map_err(|e| GenerationError::Decode(e.to_string()));
        }
        let url = datum
            .get("url")
            .and_then(|v| v.as_str())
            .ok_or_else(|| GenerationError::EmptyResponse("no image URL in response".into()))?;
        info!(image_url = %url, "Downloading generated image");
        let bytes = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}

/// Maps a resolution onto the sizes the images endpoint accepts.
pub(crate) fn image_size(resolution: Resolution) -> Result<ImageSize> {
    match (resolution.width, resolution.height) {
        (256, 256) => Ok(ImageSize::S256x256),
        (512, 512) => Ok(ImageSize::S512x512),
        (1024, 1024) => Ok(ImageSize::S1024x1024),
        (1792, 1024) => Ok(ImageSize::S1792x1024),
        (1024, 1792) => Ok(ImageSize::S1024x1792),
        _ => Err(GenerationError::UnsupportedResolution {
            provider: ProviderKind::Hosted,
            resolution,
        }),
    }
}

/// Whether `model` accepts `resolution`. dall-e-2 only produces square images up to 1024²;
/// dall-e-3 produces 1024² and the two 1792 sizes. Other models accept any size the
/// endpoint enumerates.
pub fn model_supports(model: &str, resolution: Resolution) -> bool {
    match (model, resolution.width, resolution.height) {
        ("dall-e-2", w, h) => w == h && matches!(w, 256 | 512 | 1024),
        ("dall-e-3", 1024, 1024) | ("dall-e-3", 1792, 1024) | ("dall-e-3", 1024, 1792) => true,
        ("dall-e-3", _, _) => false,
        _ => image_size(resolution).is_ok(),
    }
}

#[async_trait]
impl GenerationProvider for HostedProvider {
    #[instrument(skip(self, prompt), fields(resolution = %resolution))]
    async fn generate_image(&self, prompt: &Prompt, resolution: Resolution) -> Result<Vec<u8>> {
        let size = image_size(resolution)?;
        if !model_supports(&self.image_model, resolution) {
            return Err(GenerationError::UnsupportedResolution {
                provider: ProviderKind::Hosted,
                resolution,
            });
        }
        info!(
            model = %self.image_model,
            prompt_preview = %prompt.preview(100),
            api_key = %self.masked_key,
            "OpenAI image generation request"
        );

        let request = CreateImageRequestArgs::default()
            .prompt(prompt.as_str())
            .model(self.image_model())
            .size(size)
            .n(1)
            .build()?;

        let response = self.client.images().create(request).await?;
        let datum = response
            .data
            .first()
            .ok_or_else(|| GenerationError::EmptyResponse("no image in response".into()))?;
        let datum = serde_json::to_value(datum)
            .map_err(|e| GenerationError::Decode(e.to_string()))?;
        let bytes = self.image_bytes(datum).await?;

        info!(bytes = bytes.len(), "OpenAI image generation completed");
        Ok(bytes)
    }

    #[instrument(skip(self, prompt))]
    async fn generate_text(&self, prompt: &Prompt) -> Result<String> {
        info!(
            model = %self.text_model,
            prompt_preview = %prompt.preview(100),
            api_key = %self.masked_key,
            "OpenAI chat request"
        );

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(DEFAULT_SYSTEM_CONTENT)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.as_str())
                .build()?
                .into(),
        ];
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.text_model)
            .messages(messages)
            .build()?;

        let response = self.client.chat().create(request).await?;
        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| GenerationError::EmptyResponse("no content in chat response".into()))?;

        info!(response_len = content.len(), "OpenAI chat completed");
        Ok(content)
    }

    async fn health_check(&self) -> Result<()> {
        let models = self.client.models().list().await?;
        info!(models = models.data.len(), "OpenAI endpoint reachable");
        Ok(())
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Hosted
    }
}
