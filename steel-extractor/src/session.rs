use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use steel_config::TrackingConfig;
use steel_world::{ChunkReadinessTracker, GenerationHost, chunk::ChunkStatus, chunks_within_radius};

use crate::{
    SHOULD_STOP, TRACKING_RADIUS,
    error::ExtractorError,
    extractor::{ChunkStageHashes, Extractor},
    output::OutputWriter,
};

/// The blocking wait is split into slices this long so a stop request is noticed.
const WAIT_SLICE: Duration = Duration::from_millis(250);

/// One extraction run against a generation host, from tracking set-up to the final report.
pub struct ExtractionSession {
    host: Arc<dyn GenerationHost>,
    tracker: Arc<ChunkReadinessTracker>,
    output: OutputWriter,
    config: TrackingConfig,
    radius: i32,
}

impl ExtractionSession {
    /// `tracker` must be the one the host's generation hook reports to.
    pub fn new(
        host: Arc<dyn GenerationHost>,
        tracker: Arc<ChunkReadinessTracker>,
        output: OutputWriter,
        config: TrackingConfig,
    ) -> Self {
        Self {
            host,
            tracker,
            output,
            config,
            radius: TRACKING_RADIUS,
        }
    }

    #[must_use]
    pub fn with_radius(mut self, radius: i32) -> Self {
        self.radius = radius;
        self
    }

    /// Registers the chunks to watch. Must run before any of them is generated.
    pub fn starting(&self) {
        log::info!("Setting up chunk stage hash tracking (radius={})", self.radius);
        self.tracker.reset();
        self.tracker.set_tracked_seed(self.host.seed());
        self.tracker.start_tracking(chunks_within_radius(self.radius));
    }

    /// Runs the immediate extractors on the blocking pool, then asks the host to generate the
    /// tracked chunks.
    pub async fn started(&self, immediate: Vec<Box<dyn Extractor>>) {
        let time = Instant::now();
        let host = self.host.clone();
        let output = self.output.clone();
        let extracted = tokio::task::spawn_blocking(move || {
            for extractor in &immediate {
                // failures are logged by the writer
                let _ = output.run(extractor.as_ref(), host.as_ref());
            }
        })
        .await;
        if let Err(err) = extracted {
            log::error!("Immediate extractors failed: {err}");
        }
        log::info!(
            "Immediate extractors done, took {}ms",
            time.elapsed().as_millis()
        );

        let chunks: Vec<_> = chunks_within_radius(self.radius).collect();
        log::info!("Forcing generation of {} chunks...", chunks.len());
        self.host.force_generation(&chunks, ChunkStatus::Full);
        log::info!("Chunk generation forced, waiting for completion...");
    }

    /// Waits for the tracked chunks and writes the chunk stage report. On timeout or stop the
    /// partial report is still written before [`ExtractorError::Timeout`] or
    /// [`ExtractorError::Stopped`] is returned.
    pub async fn finish(&self) -> Result<PathBuf, ExtractorError> {
        let tracker = self.tracker.clone();
        let timeout = self.config.wait_timeout();
        let outcome =
            tokio::task::spawn_blocking(move || wait_for_chunks(&tracker, timeout, &SHOULD_STOP))
                .await
                .unwrap_or_else(|err| {
                    log::error!("Waiting for chunks failed: {err}");
                    WaitOutcome::TimedOut
                });

        let ready = self.tracker.ready_count();
        let tracked = self.tracker.tracked_count();
        if outcome != WaitOutcome::Ready {
            log::warn!(
                "Only {ready}/{tracked} chunks are ready, writing a partial report. Missing: {:?}",
                self.tracker.pending_chunks()
            );
        }

        let extractor = ChunkStageHashes::new(self.tracker.clone());
        let path = self.output.run(&extractor, self.host.as_ref())?;
        match outcome {
            WaitOutcome::Ready => Ok(path),
            WaitOutcome::TimedOut => Err(ExtractorError::Timeout { ready, tracked }),
            WaitOutcome::Stopped => Err(ExtractorError::Stopped { ready, tracked }),
        }
    }

    /// `starting`, `started` and `finish` in order.
    pub async fn run(&self, immediate: Vec<Box<dyn Extractor>>) -> Result<PathBuf, ExtractorError> {
        self.starting();
        self.started(immediate).await;
        self.finish().await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WaitOutcome {
    Ready,
    TimedOut,
    Stopped,
}

fn wait_for_chunks(
    tracker: &ChunkReadinessTracker,
    timeout: Duration,
    stop: &AtomicBool,
) -> WaitOutcome {
    let deadline = Instant::now().checked_add(timeout);
    loop {
        let slice = deadline.map_or(WAIT_SLICE, |deadline| {
            deadline.saturating_duration_since(Instant::now()).min(WAIT_SLICE)
        });
        if tracker.wait_until_all_ready(slice) {
            return WaitOutcome::Ready;
        }
        if stop.load(Ordering::Relaxed) {
            log::warn!("Stop requested while waiting for chunks");
            return WaitOutcome::Stopped;
        }
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return WaitOutcome::TimedOut;
        }
    }
}
