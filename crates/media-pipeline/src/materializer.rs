use std::io;
use std::path::PathBuf;

use tracing::{info, instrument, warn};

use crate::error::{PipelineError, Result};
use crate::frame::FrameSequence;
use crate::workspace::Workspace;

pub fn frame_file_name(ordinal: usize) -> String {
    format!("frame_{}.png", ordinal)
}

/// Writes every frame to `workspace/frame_{i}.png` and returns the paths in frame order.
///
/// All-or-nothing: if any write fails, files written so far are removed before the error is
/// returned. An incomplete sequence is rejected without touching the filesystem.
#[instrument(skip(frames, workspace), fields(frames = frames.len(), workspace = %workspace.path().display()))]
pub async fn materialize(frames: &FrameSequence, workspace: &Workspace) -> Result<Vec<PathBuf>> {
    if !frames.is_complete() {
        return Err(PipelineError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "frame sequence incomplete: {} of {} frames",
                frames.len(),
                frames.expected_len()
            ),
        )));
    }

    let mut written = Vec::with_capacity(frames.len());
    for frame in frames.iter() {
        let path = workspace.file(&frame_file_name(frame.ordinal()));
        if let Err(e) = tokio::fs::write(&path, frame.bytes()).await {
            warn!(frame = frame.ordinal(), error = %e, "Frame write failed, rolling back");
            for done in &written {
                let _ = tokio::fs::remove_file(done).await;
            }
            // The failed write may have left a truncated file.
            let _ = tokio::fs::remove_file(&path).await;
            return Err(PipelineError::Io(e));
        }
        written.push(path);
    }

    info!(count = written.len(), "Frames materialized");
    Ok(written)
}
