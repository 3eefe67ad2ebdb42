//! Frames → video.

use std::ffi::OsString;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{error, info, instrument};

use crate::error::{PipelineError, Result};
use crate::workspace::Workspace;

pub const CONCAT_LIST_NAME: &str = "frames.txt";
pub const OUTPUT_NAME: &str = "output.mp4";

/// Encodes an ordered list of frame files into one video inside the workspace.
#[async_trait]
pub trait VideoAssembler: Send + Sync {
    /// Each frame is shown for exactly `1/fps` seconds, in input order. Returns the video path.
    async fn assemble(
        &self,
        frame_paths: &[PathBuf],
        fps: NonZeroU32,
        workspace: &Workspace,
    ) -> Result<PathBuf>;
}

/// Builds an ffmpeg concat-demuxer list giving every frame `1/fps` seconds.
///
/// The demuxer ignores the duration of the final entry, so the last frame is listed twice.
pub fn build_concat_list(frame_paths: &[PathBuf], fps: NonZeroU32) -> String {
    let duration = 1.0 / f64::from(fps.get());
    let mut list = String::from("ffconcat version 1.0\n");
    for path in frame_paths {
        list.push_str(&format!("file '{}'\nduration {}\n", escape_path(path), duration));
    }
    if let Some(last) = frame_paths.last() {
        list.push_str(&format!("file '{}'\n", escape_path(last)));
    }
    list
}

/// Arguments for one ffmpeg run over a concat list.
///
/// The repeated last entry yields one extra timestamp, so the output is capped at
/// `frame_count` frames to keep the duration at exactly `frame_count / fps`.
pub fn encoder_args(
    list_path: &Path,
    fps: NonZeroU32,
    frame_count: usize,
    output: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-y", "-hide_banner", "-loglevel", "error"]
        .into_iter()
        .chain(["-f", "concat", "-safe", "0", "-i"])
        .map(OsString::from)
        .collect();
    args.push(list_path.into());
    for arg in [
        "-vf".to_string(),
        "scale=trunc(iw/2)*2:trunc(ih/2)*2".to_string(),
        "-r".to_string(),
        fps.get().to_string(),
        "-frames:v".to_string(),
        frame_count.to_string(),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
    ] {
        args.push(arg.into());
    }
    args.push(output.into());
    args
}

/// Quotes a path for a single-quoted concat entry.
fn escape_path(path: &Path) -> String {
    path.to_string_lossy().replace('\'', r"'\''")
}

/// [`VideoAssembler`] that runs the `ffmpeg` executable as a child process.
#[derive(Debug, Clone)]
pub struct FfmpegAssembler {
    ffmpeg_path: PathBuf,
}

impl Default for FfmpegAssembler {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FfmpegAssembler {
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }

    pub fn ffmpeg_path(&self) -> &Path {
        &self.ffmpeg_path
    }

    /// Runs `ffmpeg -version`; used at startup to fail fast when the encoder is missing.
    pub async fn probe(&self) -> Result<()> {
        let status = Command::new(&self.ffmpeg_path)
            .arg("-version")
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .await
            .map_err(|e| {
                PipelineError::Encoding(format!(
                    "cannot run {}: {}",
                    self.ffmpeg_path.display(),
                    e
                ))
            })?;
        if !status.success() {
            return Err(PipelineError::Encoding(format!(
                "{} -version exited with {}",
                self.ffmpeg_path.display(),
                status
            )));
        }
        Ok(())
    }

    async fn run(
        &self,
        list_path: &Path,
        fps: NonZeroU32,
        frame_count: usize,
        output: &Path,
    ) -> Result<()> {
        let result = Command::new(&self.ffmpeg_path)
            .args(encoder_args(list_path, fps, frame_count, output))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                PipelineError::Encoding(format!(
                    "cannot run {}: {}",
                    self.ffmpeg_path.display(),
                    e
                ))
            })?;

        if result.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&result.stderr);
        Err(PipelineError::Encoding(format!(
            "ffmpeg exited with {}: {}",
            result.status,
            stderr.trim()
        )))
    }
}

#[async_trait]
impl VideoAssembler for FfmpegAssembler {
    #[instrument(skip(self, frame_paths, workspace), fields(frames = frame_paths.len(), fps = fps.get()))]
    async fn assemble(
        &self,
        frame_paths: &[PathBuf],
        fps: NonZeroU32,
        workspace: &Workspace,
    ) -> Result<PathBuf> {
        if frame_paths.is_empty() {
            return Err(PipelineError::Encoding("no frames to assemble".into()));
        }

        let list_path = workspace.file(CONCAT_LIST_NAME);
        tokio::fs::write(&list_path, build_concat_list(frame_paths, fps)).await?;

        let output = workspace.file(OUTPUT_NAME);
        if let Err(e) = self.run(&list_path, fps, frame_paths.len(), &output).await {
            error!(error = %e, "Video encoding failed");
            let _ = tokio::fs::remove_file(&output).await;
            return Err(e);
        }
        if !tokio::fs::try_exists(&output).await.unwrap_or(false) {
            return Err(PipelineError::Encoding(
                "encoder reported success but produced no output".into(),
            ));
        }

        info!(output = %output.display(), "Video assembled");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fps(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_concat_list_orders_frames_and_repeats_last() {
        let paths: Vec<PathBuf> = (0..3)
            .map(|i| PathBuf::from(format!("/w/frame_{}.png", i)))
            .collect();
        let list = build_concat_list(&paths, fps(2));
        assert_eq!(
            list,
            "ffconcat version 1.0\n\
             file '/w/frame_0.png'\nduration 0.5\n\
             file '/w/frame_1.png'\nduration 0.5\n\
             file '/w/frame_2.png'\nduration 0.5\n\
             file '/w/frame_2.png'\n"
        );
    }

    #[test]
    fn test_encoder_args_cap_output_at_frame_count() {
        let args = encoder_args(
            Path::new("/w/frames.txt"),
            fps(1),
            5,
            Path::new("/w/output.mp4"),
        );
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        let at = |flag: &str| {
            let i = args.iter().position(|a| a == flag).unwrap();
            args[i + 1].as_str()
        };
        assert_eq!(at("-i"), "/w/frames.txt");
        assert_eq!(at("-r"), "1");
        assert_eq!(at("-frames:v"), "5");
        assert_eq!(at("-c:v"), "libx264");
        assert_eq!(at("-pix_fmt"), "yuv420p");
        assert_eq!(args.last().unwrap(), "/w/output.mp4");
    }

    #[test]
    fn test_concat_list_escapes_quotes() {
        let list = build_concat_list(&[PathBuf::from("/tmp/it's/frame_0.png")], fps(1));
        assert!(list.contains(r"file '/tmp/it'\''s/frame_0.png'"));
        assert!(list.contains("duration 1\n"));
    }

    #[tokio::test]
    async fn test_zero_frames_is_encoding_error() {
        let workspace = Workspace::create(None).unwrap();
        let err = FfmpegAssembler::default()
            .assemble(&[], fps(1), &workspace)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Encoding(_)));
    }

    #[tokio::test]
    async fn test_missing_binary_is_encoding_error() {
        let workspace = Workspace::create(None).unwrap();
        let frame = workspace.file("frame_0.png");
        std::fs::write(&frame, b"png").unwrap();

        let assembler = FfmpegAssembler::new("/nonexistent/bin/ffmpeg-missing");
        let err = assembler
            .assemble(&[frame], fps(1), &workspace)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Encoding(ref msg) if msg.contains("cannot run")));
        assert!(assembler.probe().await.is_err());
    }

    /// `false` ignores its arguments and exits 1, standing in for a failing encoder.
    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_removes_partial_output() {
        let workspace = Workspace::create(None).unwrap();
        let frame = workspace.file("frame_0.png");
        std::fs::write(&frame, b"png").unwrap();
        std::fs::write(workspace.file(OUTPUT_NAME), b"partial").unwrap();

        let err = FfmpegAssembler::new("false")
            .assemble(&[frame], fps(1), &workspace)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Encoding(_)));
        assert!(!workspace.file(OUTPUT_NAME).exists());
    }
}
