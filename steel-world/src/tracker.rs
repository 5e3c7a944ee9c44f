use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::Duration,
};

use dashmap::DashSet;
use parking_lot::{Mutex, RwLock};

use crate::{ChunkPos, Seed, latch::CountDownLatch};

/// Digests keyed by chunk and generation stage name.
pub type HashRecord = HashMap<(ChunkPos, String), String>;

/// Membership and completion state of one tracking session. The tracked set never changes after
/// creation, so membership checks need no locking.
#[derive(Debug)]
struct TrackingSession {
    tracked: HashSet<ChunkPos>,
    ready: DashSet<ChunkPos>,
    latch: CountDownLatch,
}

/// Watches a fixed set of chunks while the engine generates them on its worker threads.
///
/// Workers record a digest per generation stage and mark a chunk ready once it passed the last
/// stage of interest; one controller thread waits for all tracked chunks and then reads the
/// recorded digests. Chunks outside the tracked set are ignored by `mark_ready`.
///
/// A digest recorded before the matching `mark_ready` is always visible to a controller that
/// observed the completion of the wait.
#[derive(Debug, Default)]
pub struct ChunkReadinessTracker {
    session: RwLock<Option<Arc<TrackingSession>>>,
    hashes: RwLock<HashRecord>,
    seed: Mutex<Option<Seed>>,
}

impl ChunkReadinessTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a session watching `chunks`. Ready chunks of a previous session are forgotten;
    /// recorded digests are only dropped by [`Self::reset`].
    pub fn start_tracking(&self, chunks: impl IntoIterator<Item = ChunkPos>) {
        let tracked: HashSet<ChunkPos> = chunks.into_iter().collect();
        let count = tracked.len();
        let session = TrackingSession {
            latch: CountDownLatch::new(count),
            ready: DashSet::with_capacity(count),
            tracked,
        };
        *self.session.write() = Some(Arc::new(session));
        log::debug!("Tracking {count} chunks");
    }

    fn session(&self) -> Option<Arc<TrackingSession>> {
        self.session.read().clone()
    }

    /// Membership test for the generation hook. Only takes the session lock for reading, so
    /// workers never wait on each other or on `mark_ready`. It can wait for the short write in
    /// `start_tracking` or `reset`, which only happen before generation is forced.
    pub fn is_tracking(&self, pos: &ChunkPos) -> bool {
        self.session
            .read()
            .as_ref()
            .is_some_and(|session| session.tracked.contains(pos))
    }

    /// Marks a tracked chunk as ready. Counts every chunk once, no matter how often or from how
    /// many threads it is marked.
    pub fn mark_ready(&self, pos: ChunkPos) {
        let Some(session) = self.session() else {
            return;
        };
        if session.tracked.contains(&pos) && session.ready.insert(pos) {
            session.latch.count_down();
            log::trace!("Chunk {pos} ready");
        }
    }

    /// Blocks until every tracked chunk is ready or `timeout` elapses. Returns `true` right away
    /// when no session was started.
    pub fn wait_until_all_ready(&self, timeout: Duration) -> bool {
        match self.session() {
            Some(session) => session.latch.wait_timeout(timeout),
            None => true,
        }
    }

    /// Stores a digest. The chunk does not have to be tracked.
    pub fn record_hash(&self, pos: ChunkPos, stage: impl Into<String>, digest: impl Into<String>) {
        self.hashes
            .write()
            .insert((pos, stage.into()), digest.into());
    }

    pub fn get_hash(&self, pos: ChunkPos, stage: &str) -> Option<String> {
        self.hashes.read().get(&(pos, stage.to_string())).cloned()
    }

    /// Copy of every recorded digest at this point in time.
    pub fn snapshot_hashes(&self) -> HashRecord {
        self.hashes.read().clone()
    }

    /// Like [`Self::snapshot_hashes`], restricted to tracked chunks when a session is active.
    pub fn snapshot_tracked_hashes(&self) -> HashRecord {
        let session = self.session();
        let hashes = self.hashes.read();
        match session {
            Some(session) => hashes
                .iter()
                .filter(|((pos, _), _)| session.tracked.contains(pos))
                .map(|(key, digest)| (key.clone(), digest.clone()))
                .collect(),
            None => hashes.clone(),
        }
    }

    pub fn ready_count(&self) -> usize {
        self.session().map_or(0, |session| session.ready.len())
    }

    pub fn tracked_count(&self) -> usize {
        self.session().map_or(0, |session| session.tracked.len())
    }

    /// What the completion barrier still counts. Always `tracked_count() - ready_count()` once
    /// concurrent marks have settled.
    pub fn remaining(&self) -> usize {
        self.session().map_or(0, |session| session.latch.count())
    }

    /// Chunks of the current session that are not ready yet, sorted.
    pub fn pending_chunks(&self) -> Vec<ChunkPos> {
        let Some(session) = self.session() else {
            return Vec::new();
        };
        let mut pending: Vec<_> = session
            .tracked
            .iter()
            .filter(|pos| !session.ready.contains(*pos))
            .copied()
            .collect();
        pending.sort_unstable();
        pending
    }

    pub fn set_tracked_seed(&self, seed: Seed) {
        *self.seed.lock() = Some(seed);
    }

    pub fn tracked_seed(&self) -> Option<Seed> {
        *self.seed.lock()
    }

    /// Drops the session, every recorded digest and the tracked seed.
    pub fn reset(&self) {
        *self.session.write() = None;
        self.hashes.write().clear();
        *self.seed.lock() = None;
    }
}
