//! Bounded-concurrency execution of per-chunk tasks

use crate::{progress::ProgressObserver, text::Chunk, Error, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Runs one task per chunk with at most `concurrency` tasks admitted at once
#[derive(Debug, Clone)]
pub struct Scheduler {
    concurrency: usize,
}

impl Scheduler {
    /// Create a scheduler; the cap must fit the semaphore's permit range
    pub fn new(concurrency: usize) -> Result<Self> {
        if concurrency == 0 {
            return Err(Error::Config("concurrency must be > 0".into()));
        }
        if concurrency > Semaphore::MAX_PERMITS {
            return Err(Error::Config(format!(
                "concurrency must be at most {}",
                Semaphore::MAX_PERMITS
            )));
        }
        Ok(Self { concurrency })
    }

    /// Scheduler that runs one task at a time
    pub fn sequential() -> Self {
        Self { concurrency: 1 }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Run `task` for every chunk and return the outputs in chunk order.
    ///
    /// Every chunk gets its own tokio task, which waits on the admission
    /// semaphore before calling `task`. Output `i` always belongs to
    /// `chunks[i]`, whatever order the tasks finish in. A failing task does
    /// not cancel its siblings: all tasks are drained, then the first failure
    /// seen (in completion order) is returned, tagged with its chunk index.
    /// The observer is told about every successful completion.
    pub async fn run<T, F, Fut>(
        &self,
        chunks: &[Chunk],
        task: F,
        observer: &dyn ProgressObserver,
    ) -> Result<Vec<T>>
    where
        F: Fn(Chunk) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let total = chunks.len();
        observer.on_start(total);

        let gate = Arc::new(Semaphore::new(self.concurrency));
        let task = Arc::new(task);
        let mut pending = FuturesUnordered::new();

        for (slot, chunk) in chunks.iter().cloned().enumerate() {
            let index = chunk.index;
            let gate = Arc::clone(&gate);
            let task = Arc::clone(&task);

            let handle = tokio::spawn(async move {
                let _permit = gate
                    .acquire_owned()
                    .await
                    .map_err(|e| Error::Task(e.to_string()))?;
                log::debug!("Chunk {} admitted", index);
                task(chunk).await
            });
            pending.push(async move { (slot, index, handle.await) });
        }

        // Slots are addressed by dispatch position, so each is written once.
        let mut slots: Vec<Option<T>> = (0..total).map(|_| None).collect();
        let mut completed = 0;
        let mut first_failure: Option<Error> = None;

        while let Some((slot, index, joined)) = pending.next().await {
            match joined.map_err(Error::from).and_then(|outcome| outcome) {
                Ok(value) => {
                    slots[slot] = Some(value);
                    completed += 1;
                    log::debug!("Chunk {} done ({}/{})", index, completed, total);
                    observer.on_advance(completed, total);
                }
                Err(err) => {
                    log::warn!("Chunk {} failed: {}", index, err);
                    if first_failure.is_none() {
                        first_failure = Some(Error::for_chunk(index, err));
                    }
                }
            }
        }

        observer.on_finish();

        if let Some(err) = first_failure {
            return Err(err);
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(slot, value)| {
                value.ok_or_else(|| Error::Task(format!("no output recorded for slot {}", slot)))
            })
            .collect()
    }
}
