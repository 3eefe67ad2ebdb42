//! BotConfig: BaseConfig + GenerationConfig + VideoConfig. Use load() for env-based loading.

use anyhow::Result;
use generation_provider::{mask_token, model_supports, ProviderKind};

use super::{BaseConfig, GenerationConfig, VideoConfig};

/// Bot config. Use BotConfig::load() for env-based loading.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub generation: GenerationConfig,
    pub video: VideoConfig,
}

impl BotConfig {
    /// Load full config from environment variables. `token` overrides BOT_TOKEN and `backend`
    /// overrides GENERATION_BACKEND when provided.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>, backend: Option<ProviderKind>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let generation = GenerationConfig::load(backend)?;
        let video = VideoConfig::load(generation.backend)?;
        Ok(Self {
            base,
            generation,
            video,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.generation.validate()?;
        if self.generation.backend == ProviderKind::Hosted {
            let model = &self.generation.image_model;
            for (key, size) in [
                ("IMAGE_SIZE", self.generation.image_size),
                ("VIDEO_FRAME_SIZE", self.video.frame_size),
            ] {
                if !model_supports(model, size) {
                    anyhow::bail!(
                        "{}={} is not supported by IMAGE_MODEL={}",
                        key,
                        size,
                        model
                    );
                }
            }
        }
        Ok(())
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn backend(&self) -> ProviderKind {
        self.generation.backend
    }

    /// Effective settings with secrets masked, for `genbot check` and startup logs.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let g = &self.generation;
        let v = &self.video;
        let mut lines = vec![
            ("bot_token", mask_token(&self.base.bot_token)),
            (
                "telegram_api_url",
                self.telegram_api_url().unwrap_or("(default)").to_string(),
            ),
            ("log_file", self.base.log_file.clone()),
            ("backend", g.backend.to_string()),
        ];
        match g.backend {
            ProviderKind::Hosted => {
                lines.push(("openai_api_key", g.masked_api_key()));
                lines.push((
                    "openai_base_url",
                    g.openai_base_url.clone().unwrap_or_else(|| "(default)".into()),
                ));
                lines.push(("image_model", g.image_model.clone()));
                lines.push(("text_model", g.text_model.clone()));
            }
            ProviderKind::Local => {
                lines.push(("local_image_url", g.local_image_url.clone()));
                lines.push(("local_text_url", g.local_text_url.clone()));
            }
        }
        lines.extend([
            ("image_size", g.image_size.to_string()),
            ("video_frame_size", v.frame_size.to_string()),
            ("video_frame_count", v.frame_count.to_string()),
            ("video_fps", v.fps.to_string()),
            (
                "video_caption",
                v.caption.clone().unwrap_or_else(|| "(none)".into()),
            ),
            ("ffmpeg_path", v.ffmpeg_path.display().to_string()),
            (
                "workspace_root",
                v.workspace_root
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "(system temp)".into()),
            ),
        ]);
        lines
    }
}
