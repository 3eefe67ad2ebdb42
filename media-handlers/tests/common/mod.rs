//! Test doubles shared by the handler tests: a recording bot, a scripted provider and a fake
//! assembler.

#![allow(dead_code)]

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use dbot_core::{Bot, Chat, ChatAction, DbotError, Message, User};
use generation_provider::{
    GenerationError, GenerationProvider, Prompt, ProviderKind, Resolution,
};
use media_pipeline::{PipelineError, VideoAssembler, Workspace, OUTPUT_NAME};

pub fn create_test_message(content: &str) -> Message {
    Message {
        id: "test_message_id".to_string(),
        content: content.to_string(),
        user: User {
            id: 123,
            username: Some("test_user".to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        created_at: Utc::now(),
    }
}

pub fn no_username() -> media_handlers::BotUsername {
    Arc::new(tokio::sync::RwLock::new(None))
}

/// What the bot was asked to send, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(String),
    Photo {
        bytes: Vec<u8>,
        caption: Option<String>,
    },
    /// `exists` and `content` are captured at send time, while the workspace is alive.
    Video {
        path: PathBuf,
        caption: Option<String>,
        exists: bool,
        content: Vec<u8>,
    },
    Action(ChatAction),
}

/// Records every send; optionally fails media uploads.
#[derive(Default)]
pub struct MockBot {
    pub sent: Mutex<Vec<Sent>>,
    pub fail_uploads: bool,
}

impl MockBot {
    pub fn failing_uploads() -> Self {
        Self {
            fail_uploads: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Sends other than chat actions.
    pub fn replies(&self) -> Vec<Sent> {
        self.sent()
            .into_iter()
            .filter(|s| !matches!(s, Sent::Action(_)))
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    fn upload_result(&self) -> dbot_core::Result<()> {
        if self.fail_uploads {
            Err(DbotError::Bot("Request Entity Too Large".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, _chat: &Chat, text: &str) -> dbot_core::Result<()> {
        self.sent.lock().unwrap().push(Sent::Text(text.to_string()));
        Ok(())
    }

    async fn send_photo(&self, _chat: &Chat, image: Vec<u8>, caption: Option<&str>) -> dbot_core::Result<()> {
        self.sent.lock().unwrap().push(Sent::Photo {
            bytes: image,
            caption: caption.map(str::to_string),
        });
        self.upload_result()
    }

    async fn send_video(&self, _chat: &Chat, path: &Path, caption: Option<&str>) -> dbot_core::Result<()> {
        self.sent.lock().unwrap().push(Sent::Video {
            path: path.to_path_buf(),
            caption: caption.map(str::to_string),
            exists: path.exists(),
            content: std::fs::read(path).unwrap_or_default(),
        });
        self.upload_result()
    }

    async fn send_chat_action(&self, _chat: &Chat, action: ChatAction) -> dbot_core::Result<()> {
        self.sent.lock().unwrap().push(Sent::Action(action));
        Ok(())
    }
}

/// Provider that records every prompt and can fail on the n-th image call (1-based).
#[derive(Default)]
pub struct MockProvider {
    pub image_prompts: Mutex<Vec<(String, Resolution)>>,
    pub text_prompts: Mutex<Vec<String>>,
    pub fail_on_image_call: Option<usize>,
    pub fail_text: bool,
    image_calls: AtomicUsize,
}

impl MockProvider {
    pub fn failing_on_image(call: usize) -> Self {
        Self {
            fail_on_image_call: Some(call),
            ..Default::default()
        }
    }

    pub fn failing_text() -> Self {
        Self {
            fail_text: true,
            ..Default::default()
        }
    }

    pub fn image_prompts(&self) -> Vec<String> {
        self.image_prompts
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p.clone())
            .collect()
    }

    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.image_calls() + self.text_prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationProvider for MockProvider {
    async fn generate_image(&self, prompt: &Prompt, resolution: Resolution) -> generation_provider::Result<Vec<u8>> {
        let call = self.image_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.image_prompts
            .lock()
            .unwrap()
            .push((prompt.as_str().to_string(), resolution));
        if self.fail_on_image_call == Some(call) {
            return Err(GenerationError::Api("content policy violation".into()));
        }
        Ok(format!("image-{}", call).into_bytes())
    }

    async fn generate_text(&self, prompt: &Prompt) -> generation_provider::Result<String> {
        self.text_prompts
            .lock()
            .unwrap()
            .push(prompt.as_str().to_string());
        if self.fail_text {
            return Err(GenerationError::Status {
                status: 500,
                message: "model crashed".into(),
            });
        }
        Ok(format!("answer to: {}", prompt))
    }

    async fn health_check(&self) -> generation_provider::Result<()> {
        Ok(())
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Local
    }
}

/// Frame files seen by [`FakeAssembler`], with their content at assembly time.
pub type SeenFrames = Vec<(PathBuf, Vec<u8>)>;

/// Writes a placeholder `output.mp4` listing the frame files it was given.
#[derive(Default)]
pub struct FakeAssembler {
    pub seen: Mutex<SeenFrames>,
    pub fps: Mutex<Option<NonZeroU32>>,
    pub workspace: Mutex<Option<PathBuf>>,
    pub fail: bool,
}

impl FakeAssembler {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn seen_names(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    pub fn workspace(&self) -> Option<PathBuf> {
        self.workspace.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoAssembler for FakeAssembler {
    async fn assemble(
        &self,
        frame_paths: &[PathBuf],
        fps: NonZeroU32,
        workspace: &Workspace,
    ) -> media_pipeline::Result<PathBuf> {
        *self.workspace.lock().unwrap() = Some(workspace.path().to_path_buf());
        *self.fps.lock().unwrap() = Some(fps);
        {
            let mut seen = self.seen.lock().unwrap();
            for path in frame_paths {
                seen.push((path.clone(), std::fs::read(path)?));
            }
        }
        if self.fail {
            return Err(PipelineError::Encoding("ffmpeg exited with exit status: 1".into()));
        }
        let output = workspace.file(OUTPUT_NAME);
        std::fs::write(&output, format!("fake video of {} frames", frame_paths.len()))?;
        Ok(output)
    }
}
