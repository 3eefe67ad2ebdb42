//! Generation backend config: which backend, how to reach it, which models and sizes.

use anyhow::{Context, Result};
use generation_provider::{mask_token, HostedConfig, LocalConfig, ProviderKind, Resolution};

use super::env;

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// GENERATION_BACKEND (hosted | local)
    pub backend: ProviderKind,
    /// OPENAI_API_KEY; required for the hosted backend
    pub openai_api_key: Option<String>,
    /// OPENAI_BASE_URL
    pub openai_base_url: Option<String>,
    /// IMAGE_MODEL
    pub image_model: String,
    /// TEXT_MODEL
    pub text_model: String,
    /// LOCAL_IMAGE_URL
    pub local_image_url: String,
    /// LOCAL_TEXT_URL
    pub local_text_url: String,
    /// IMAGE_SIZE, resolution for /image
    pub image_size: Resolution,
}

impl GenerationConfig {
    /// Load from env. `backend` overrides GENERATION_BACKEND if provided.
    pub fn load(backend: Option<ProviderKind>) -> Result<Self> {
        let backend = match backend {
            Some(b) => b,
            None => env::parse("GENERATION_BACKEND")?.unwrap_or(ProviderKind::Hosted),
        };
        let default_size = match backend {
            ProviderKind::Hosted => Resolution::SQUARE_1024,
            ProviderKind::Local => Resolution::SQUARE_512,
        };
        let local = LocalConfig::default();

        Ok(Self {
            backend,
            openai_api_key: env::var("OPENAI_API_KEY"),
            openai_base_url: env::var("OPENAI_BASE_URL"),
            image_model: env::var("IMAGE_MODEL").unwrap_or_else(|| "dall-e-3".to_string()),
            text_model: env::var("TEXT_MODEL").unwrap_or_else(|| "gpt-4".to_string()),
            local_image_url: env::var("LOCAL_IMAGE_URL").unwrap_or(local.image_url),
            local_text_url: env::var("LOCAL_TEXT_URL").unwrap_or(local.text_url),
            image_size: env::parse("IMAGE_SIZE")?.unwrap_or(default_size),
        })
    }

    pub fn validate(&self) -> Result<()> {
        match self.backend {
            ProviderKind::Hosted => {
                if self.openai_api_key.is_none() {
                    anyhow::bail!("OPENAI_API_KEY is required when GENERATION_BACKEND=hosted");
                }
                if let Some(ref url) = self.openai_base_url {
                    reqwest::Url::parse(url)
                        .with_context(|| format!("OPENAI_BASE_URL is not a valid URL: {}", url))?;
                }
            }
            ProviderKind::Local => {
                for (key, url) in [
                    ("LOCAL_IMAGE_URL", &self.local_image_url),
                    ("LOCAL_TEXT_URL", &self.local_text_url),
                ] {
                    reqwest::Url::parse(url)
                        .with_context(|| format!("{} is not a valid URL: {}", key, url))?;
                }
            }
        }
        Ok(())
    }

    /// Settings for the hosted provider. Call after [`validate`](Self::validate).
    pub fn hosted(&self) -> HostedConfig {
        let mut config = HostedConfig::new(self.openai_api_key.clone().unwrap_or_default());
        config.base_url = self.openai_base_url.clone();
        config.image_model = self.image_model.clone();
        config.text_model = self.text_model.clone();
        config
    }

    pub fn local(&self) -> LocalConfig {
        LocalConfig {
            image_url: self.local_image_url.clone(),
            text_url: self.local_text_url.clone(),
            ..LocalConfig::default()
        }
    }

    pub fn masked_api_key(&self) -> String {
        self.openai_api_key
            .as_deref()
            .map(mask_token)
            .unwrap_or_else(|| "(unset)".to_string())
    }
}
