//! End-to-end narration of a text

use super::{assemble, estimate_duration, PipelineStage, Scheduler};
use crate::{
    config::{Config, Voice},
    progress::ProgressObserver,
    synthesis::Synthesizer,
    text::{preview, segment_text, Chunk},
    Error, Result,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Speaking rate used for the narration length estimate
const CHARS_PER_SECOND: f32 = 15.0;

/// Outcome of a successful narration
#[derive(Debug, Clone)]
pub struct NarrationResult {
    /// Final audio file
    pub output: PathBuf,
    /// Number of chunks synthesized
    pub chunks: usize,
    /// Size of the final audio file
    pub bytes: u64,
    /// Wall-clock time of the run in seconds
    pub processing_time: f32,
}

impl NarrationResult {
    /// Processing time formatted as MM:SS
    pub fn processing_time_formatted(&self) -> String {
        let minutes = (self.processing_time / 60.0) as u32;
        let seconds = (self.processing_time % 60.0) as u32;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Turns text into one audio file through a [`Synthesizer`]
pub struct Narrator {
    config: Config,
    synthesizer: Arc<dyn Synthesizer>,
}

impl Narrator {
    /// Create a narrator; the configuration is validated first
    pub fn new(config: Config, synthesizer: Arc<dyn Synthesizer>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            synthesizer,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Chunks that `narrate` would synthesize for `text`
    pub fn plan(&self, text: &str) -> Vec<Chunk> {
        segment_text(text, self.config.chunking.max_chunk_size)
    }

    /// Synthesize `text` with `voice` and write the joined audio to `output`.
    ///
    /// Chunk audio is staged in a directory that lives only for this call and
    /// is removed whether the run succeeds or fails. On failure `output` is
    /// left untouched.
    pub async fn narrate(
        &self,
        text: &str,
        voice: &Voice,
        output: &Path,
        observer: &dyn ProgressObserver,
    ) -> Result<NarrationResult> {
        let start_time = Instant::now();
        log::debug!(
            "Stages: {}",
            PipelineStage::all()
                .iter()
                .map(|stage| stage.name())
                .collect::<Vec<_>>()
                .join(" -> ")
        );

        log::info!("[{}] {}", PipelineStage::Segmentation.name(), preview(text, 50));
        let chunks = self.plan(text);
        if chunks.is_empty() {
            return Err(Error::EmptyInput("text contains nothing to narrate".into()));
        }
        log::info!(
            "Created {} chunk(s), about {:.0}s of speech",
            chunks.len(),
            estimate_duration(text, CHARS_PER_SECOND)
        );

        let staging = tempfile::Builder::new()
            .prefix(&self.config.output.temp_prefix)
            .tempdir_in(&self.config.output.temp_dir)?;
        log::debug!("Staging chunk audio in {}", staging.path().display());

        log::info!(
            "[{}] {} chunk(s) with {} via {}, {} at a time",
            PipelineStage::Synthesis.name(),
            chunks.len(),
            voice,
            self.synthesizer.name(),
            self.config.scheduler.concurrency
        );
        let scheduler = Scheduler::new(self.config.scheduler.concurrency)?;
        let task = {
            let synthesizer = Arc::clone(&self.synthesizer);
            let config = self.config.clone();
            let dir = staging.path().to_path_buf();
            let voice = voice.clone();
            move |chunk: Chunk| {
                let synthesizer = Arc::clone(&synthesizer);
                let voice = voice.clone();
                let path = config.chunk_file(&dir, chunk.index);
                async move { stage_chunk(synthesizer.as_ref(), &chunk, &voice, path).await }
            }
        };
        let files = scheduler.run(&chunks, task, observer).await?;

        log::info!("[{}] {}", PipelineStage::Assembly.name(), output.display());
        let target = output.to_path_buf();
        let bytes = tokio::task::spawn_blocking(move || assemble(&files, &target)).await??;
        staging.close()?;

        Ok(NarrationResult {
            output: output.to_path_buf(),
            chunks: chunks.len(),
            bytes,
            processing_time: start_time.elapsed().as_secs_f32(),
        })
    }
}

/// Synthesize one chunk and write its audio to `path`
async fn stage_chunk(
    synthesizer: &dyn Synthesizer,
    chunk: &Chunk,
    voice: &Voice,
    path: PathBuf,
) -> Result<PathBuf> {
    if chunk.text.trim().is_empty() {
        return Err(Error::EmptyInput(format!("chunk {} has no text", chunk.index)));
    }

    let audio = synthesizer.synthesize(&chunk.text, voice).await?;
    if audio.is_empty() {
        return Err(Error::Collaborator("generated audio is empty".into()));
    }

    tokio::fs::write(&path, &audio).await?;
    log::debug!("Chunk {} staged ({} bytes)", chunk.index, audio.len());
    Ok(path)
}
