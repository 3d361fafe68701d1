//! Speech synthesis backends
//!
//! A backend turns the text of one chunk into encoded audio bytes.

mod openai;

pub use openai::OpenAiSynthesizer;

use crate::{config::Voice, Result};

/// Speech synthesis backend
#[async_trait::async_trait]
pub trait Synthesizer: Send + Sync {
    /// Synthesize `text` with `voice`, returning encoded audio.
    ///
    /// Implementations reject empty or whitespace-only text.
    async fn synthesize(&self, text: &str, voice: &Voice) -> Result<Vec<u8>>;

    /// Short backend name for logs
    fn name(&self) -> &str {
        "synthesizer"
    }
}
