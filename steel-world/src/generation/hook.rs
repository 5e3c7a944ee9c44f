use std::sync::Arc;

use crate::{
    ChunkReadinessTracker,
    chunk::{ChunkAccess, ChunkStatus},
    hash::block_hash,
};

/// Runs after the engine finished a generation step on a chunk.
///
/// For tracked chunks it records the block digest after every block modifying step and marks the
/// chunk ready once [`ChunkStatus::FINAL_TRACKED`] is reached. The digest is always recorded
/// before the chunk is marked ready. Untracked chunks are left alone.
#[derive(Debug, Clone)]
pub struct ChunkStageHook {
    tracker: Arc<ChunkReadinessTracker>,
}

impl ChunkStageHook {
    pub fn new(tracker: Arc<ChunkReadinessTracker>) -> Self {
        Self { tracker }
    }

    pub fn on_step_complete<C: ChunkAccess + ?Sized>(&self, chunk: &C, step: ChunkStatus) {
        let pos = chunk.pos();
        if !self.tracker.is_tracking(&pos) {
            return;
        }

        if step.modifies_blocks() {
            let digest = block_hash(chunk.sections());
            log::trace!("Chunk {pos} {step}: {digest}");
            self.tracker.record_hash(pos, step.as_str(), digest);
        }

        if step == ChunkStatus::FINAL_TRACKED {
            self.tracker.mark_ready(pos);
        }
    }
}
