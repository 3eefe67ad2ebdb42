//! /video pipeline config: frames, playback rate, caption, encoder and workspace location.

use anyhow::{Context, Result};
use generation_provider::{ProviderKind, Resolution};
use media_handlers::VideoSettings;
use std::num::{NonZeroU32, NonZeroUsize};
use std::path::PathBuf;

use super::env;

#[derive(Debug, Clone)]
pub struct VideoConfig {
    /// VIDEO_FRAME_SIZE
    pub frame_size: Resolution,
    /// VIDEO_FRAME_COUNT
    pub frame_count: NonZeroUsize,
    /// VIDEO_FPS
    pub fps: NonZeroU32,
    /// VIDEO_CAPTION; set but empty disables the caption
    pub caption: Option<String>,
    /// FFMPEG_PATH
    pub ffmpeg_path: PathBuf,
    /// WORKSPACE_ROOT
    pub workspace_root: Option<PathBuf>,
}

impl VideoConfig {
    /// Load from env. Frame size, frame count, fps and caption default per backend.
    pub fn load(backend: ProviderKind) -> Result<Self> {
        let (size, count, fps, caption) = match backend {
            ProviderKind::Hosted => (Resolution::SQUARE_1024, 5, 1, None),
            ProviderKind::Local => (
                Resolution::SQUARE_512,
                3,
                2,
                Some("Generated video".to_string()),
            ),
        };
        let caption = match std::env::var("VIDEO_CAPTION") {
            Ok(value) if value.trim().is_empty() => None,
            Ok(value) => Some(value),
            Err(_) => caption,
        };

        let frame_count = env::parse::<usize>("VIDEO_FRAME_COUNT")?.unwrap_or(count);
        let fps = env::parse::<u32>("VIDEO_FPS")?.unwrap_or(fps);

        Ok(Self {
            frame_size: env::parse("VIDEO_FRAME_SIZE")?.unwrap_or(size),
            frame_count: NonZeroUsize::new(frame_count)
                .context("VIDEO_FRAME_COUNT must be at least 1")?,
            fps: NonZeroU32::new(fps).context("VIDEO_FPS must be at least 1")?,
            caption,
            ffmpeg_path: env::var("FFMPEG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("ffmpeg")),
            workspace_root: env::var("WORKSPACE_ROOT").map(PathBuf::from),
        })
    }

    pub fn settings(&self) -> VideoSettings {
        VideoSettings {
            frame_count: self.frame_count,
            fps: self.fps,
            frame_size: self.frame_size,
            caption: self.caption.clone(),
            workspace_root: self.workspace_root.clone(),
        }
    }
}
