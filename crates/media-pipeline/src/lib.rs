//! # media-pipeline
//!
//! Turns generated frames into a delivered video and cleans up after itself:
//!
//! - [`FrameSequence`]: fixed-length, gap-free ordered frames
//! - [`Workspace`]: uniquely named temporary directory removed when the request ends
//! - [`materialize`]: writes frames as `frame_{i}.png`, all-or-nothing
//! - [`VideoAssembler`] / [`FfmpegAssembler`]: slideshow encoding via the ffmpeg concat demuxer
//! - [`deliver`]: sends a text, image, or video [`Artifact`] through a [`dbot_core::Bot`]
//! - [`RequestMachine`]: per-request state machine with a recorded transition history

mod assembler;
mod delivery;
mod error;
mod frame;
mod materializer;
mod state;
mod workspace;

pub use assembler::{build_concat_list, encoder_args, FfmpegAssembler, VideoAssembler, CONCAT_LIST_NAME, OUTPUT_NAME};
pub use delivery::{deliver, Artifact};
pub use error::{PipelineError, Result};
pub use frame::{Frame, FrameSequence};
pub use materializer::{frame_file_name, materialize};
pub use state::{FailureKind, RequestMachine, RequestState, TransitionError};
pub use workspace::Workspace;
