use std::sync::Arc;

use serde_json::Value;
use steel_world::{ChunkReadinessTracker, ChunkStageReport, GenerationHost};

use crate::error::ExtractorError;

use super::Extractor;

/// Stage digests recorded by the generation hook. Runs once the tracked chunks are ready, or with
/// whatever was recorded so far after a timeout.
pub struct ChunkStageHashes {
    tracker: Arc<ChunkReadinessTracker>,
}

impl ChunkStageHashes {
    #[must_use]
    pub fn new(tracker: Arc<ChunkReadinessTracker>) -> Self {
        Self { tracker }
    }

    #[must_use]
    pub fn report(&self, host: &dyn GenerationHost) -> ChunkStageReport {
        let seed = self.tracker.tracked_seed().unwrap_or_else(|| host.seed());
        let report = ChunkStageReport::compile(seed, &self.tracker.snapshot_tracked_hashes());
        log::info!(
            "Extracted chunk stage hashes for {} chunks",
            report.chunk_count
        );
        report
    }
}

impl Extractor for ChunkStageHashes {
    fn file_name(&self) -> &'static str {
        ChunkStageReport::FILE_NAME
    }

    fn extract(&self, host: &dyn GenerationHost) -> Result<Value, ExtractorError> {
        Ok(serde_json::to_value(self.report(host))?)
    }
}
