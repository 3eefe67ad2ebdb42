//! Value types shared by every backend.

use std::fmt;
use std::str::FromStr;

/// Non-empty free-form user text. The text is kept exactly as given; only a prompt that is
/// blank after trimming is refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Returns `None` when `text` is empty or whitespace only.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            None
        } else {
            Some(Self(text))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `max_chars` characters, for log fields.
    pub fn preview(&self, max_chars: usize) -> String {
        let mut preview: String = self.0.chars().take(max_chars).collect();
        if self.0.chars().count() > max_chars {
            preview.push_str("...");
        }
        preview
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const SQUARE_256: Resolution = Resolution::new(256, 256);
    pub const SQUARE_512: Resolution = Resolution::new(512, 512);
    pub const SQUARE_1024: Resolution = Resolution::new(1024, 1024);
    pub const LANDSCAPE_1792: Resolution = Resolution::new(1792, 1024);
    pub const PORTRAIT_1792: Resolution = Resolution::new(1024, 1792);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = String;

    /// Parses `WIDTHxHEIGHT`, e.g. `512x512`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
        let width: u32 = w
            .trim()
            .parse()
            .map_err(|_| format!("invalid width in '{}'", s))?;
        let height: u32 = h
            .trim()
            .parse()
            .map_err(|_| format!("invalid height in '{}'", s))?;
        if width == 0 || height == 0 {
            return Err(format!("resolution must be non-zero, got '{}'", s));
        }
        Ok(Self::new(width, height))
    }
}

/// Which generation backend serves requests. Fixed for the whole process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Hosted,
    Local,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Hosted => "hosted",
            ProviderKind::Local => "local",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hosted" | "openai" => Ok(ProviderKind::Hosted),
            "local" => Ok(ProviderKind::Local),
            other => Err(format!(
                "unknown generation backend '{}', expected 'hosted' or 'local'",
                other
            )),
        }
    }
}
