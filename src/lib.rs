//! storyvoice - Long-form narration through a remote speech service
//!
//! Splits a long text into sentence-aligned chunks that fit the speech
//! endpoint's input limit, synthesizes the chunks in parallel with a bounded
//! number of requests in flight, and joins the returned audio into a single
//! file in chunk order.
//!
//! # Example
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use storyvoice::{progress::NoProgress, Config, Narrator, OpenAiSynthesizer};
//!
//! # async fn run() -> storyvoice::Result<()> {
//! let config = Config::default();
//! let synthesizer = OpenAiSynthesizer::new(config.synthesis.clone())?;
//! let voice = config.catalog.voice("nova")?;
//! let narrator = Narrator::new(config, Arc::new(synthesizer))?;
//!
//! narrator
//!     .narrate("Once upon a time.", &voice, Path::new("story.mp3"), &NoProgress)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod progress;
pub mod synthesis;
pub mod text;

pub use config::{Catalog, Config, Language, Voice};
pub use error::{Error, ErrorKind, Result};
pub use pipeline::{assemble, NarrationResult, Narrator, Scheduler};
pub use synthesis::{OpenAiSynthesizer, Synthesizer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default maximum chunk length in characters
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 2800;

/// Default number of synthesis requests in flight
pub const DEFAULT_CONCURRENCY: usize = 5;
