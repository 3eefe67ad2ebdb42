//! User-facing replies.

pub const HELP_TEXT: &str = "🤖 Hello! I can:\n\
- Generate images from text prompts (/image <prompt>)\n\
- Answer questions (/ask <question>)\n\
- Create videos from text (/video <prompt>)";

pub const MISSING_IMAGE_PROMPT: &str = "Please provide a prompt after /image";
pub const MISSING_QUESTION: &str = "Please provide a question after /ask";
pub const MISSING_VIDEO_PROMPT: &str = "Please provide a prompt after /video";

pub const IMAGE_FAILED: &str = "Error generating image";
pub const ANSWER_FAILED: &str = "Error generating answer";
pub const VIDEO_FAILED: &str = "Error generating video";
