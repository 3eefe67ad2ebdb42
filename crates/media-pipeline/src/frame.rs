use std::num::NonZeroUsize;

/// Raster image bytes tagged with their position in the video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    ordinal: usize,
    bytes: Vec<u8>,
}

impl Frame {
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Ordered frames with a length fixed at creation. Ordinals are assigned on push, so the
/// k-th pushed frame always has ordinal k.
#[derive(Debug, Clone)]
pub struct FrameSequence {
    expected: NonZeroUsize,
    frames: Vec<Frame>,
}

impl FrameSequence {
    pub fn new(expected: NonZeroUsize) -> Self {
        Self {
            expected,
            frames: Vec::with_capacity(expected.get()),
        }
    }

    /// Appends a frame and returns its ordinal. When the sequence is already full the bytes
    /// are handed back.
    pub fn push(&mut self, bytes: Vec<u8>) -> Result<usize, Vec<u8>> {
        if self.is_complete() {
            return Err(bytes);
        }
        let ordinal = self.frames.len();
        self.frames.push(Frame { ordinal, bytes });
        Ok(ordinal)
    }

    pub fn expected_len(&self) -> usize {
        self.expected.get()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.frames.len() == self.expected.get()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }
}
