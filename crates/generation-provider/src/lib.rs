//! # generation-provider
//!
//! Text and image generation behind one [`GenerationProvider`] trait. Two backends:
//! [`HostedProvider`] (OpenAI-compatible images + chat API via async-openai) and
//! [`LocalModelProvider`] (locally hosted Stable Diffusion and text-generation servers over HTTP).
//! The backend is chosen at startup by [`ProviderKind`]; callers only see the trait.

mod error;
mod hosted;
mod local;
mod mask;
mod provider;
mod types;

pub use error::{GenerationError, Result};
pub use hosted::{model_supports, HostedConfig, HostedProvider, DEFAULT_SYSTEM_CONTENT};
pub use local::{LocalConfig, LocalModelProvider};
pub use mask::mask_token;
pub use provider::GenerationProvider;
pub use types::{Prompt, ProviderKind, Resolution};
