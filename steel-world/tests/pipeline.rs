use std::{collections::BTreeSet, sync::Arc, time::Duration};

use steel_world::{
    ChunkPos, ChunkReadinessTracker, ChunkStageReport, EXPECTED_SEED, GenerationHost,
    chunk::ChunkStatus,
    chunks_within_radius,
    generation::{ChunkStageHook, SuperflatHost},
};

fn host(tracker: &Arc<ChunkReadinessTracker>, threads: usize) -> SuperflatHost {
    SuperflatHost::new(EXPECTED_SEED, ChunkStageHook::new(tracker.clone()), threads).unwrap()
}

fn run(threads: usize) -> ChunkStageReport {
    let _ = env_logger::builder().is_test(true).try_init();

    let tracker = Arc::new(ChunkReadinessTracker::new());
    let chunks: Vec<_> = chunks_within_radius(2).collect();
    tracker.set_tracked_seed(EXPECTED_SEED);
    tracker.start_tracking(chunks.iter().copied());

    let host = host(&tracker, threads);
    // a border of untracked chunks is generated as well
    let generated: Vec<_> = chunks_within_radius(3).collect();
    host.force_generation(&generated, ChunkStatus::Full);

    assert!(tracker.wait_until_all_ready(Duration::from_secs(60)));
    ChunkStageReport::compile(host.seed(), &tracker.snapshot_tracked_hashes())
}

#[test]
fn every_tracked_chunk_has_all_block_stages() {
    let report = run(4);
    assert!(report.seed_matches);
    assert_eq!(report.chunk_count, 25);

    let expected: BTreeSet<_> = ChunkStatus::BLOCK_MODIFYING
        .iter()
        .map(|step| step.as_str().to_string())
        .collect();
    for chunk in &report.chunks {
        assert!(chunk.x.abs() <= 2 && chunk.z.abs() <= 2);
        let stages: BTreeSet<_> = chunk.stages.keys().cloned().collect();
        assert_eq!(stages, expected);
        assert_ne!(
            chunk.stages["minecraft:noise"],
            chunk.stages["minecraft:surface"]
        );
    }
}

#[test]
fn worker_count_does_not_change_the_report() {
    let single = run(1);
    let parallel = run(8);
    assert_eq!(
        serde_json::to_string(&single).unwrap(),
        serde_json::to_string(&parallel).unwrap()
    );
}

#[test]
fn final_digest_matches_the_generated_chunk() {
    let tracker = Arc::new(ChunkReadinessTracker::new());
    tracker.start_tracking([ChunkPos::new(1, -1)]);
    let host = host(&tracker, 2);

    // stop right at the tracked checkpoint
    host.force_generation(&[ChunkPos::new(1, -1)], ChunkStatus::Features);
    assert!(tracker.wait_until_all_ready(Duration::from_secs(30)));
    let features = tracker
        .get_hash(ChunkPos::new(1, -1), ChunkStatus::Features.as_str())
        .unwrap();
    assert_eq!(host.block_hash(ChunkPos::new(1, -1)).unwrap(), features);

    assert!(host.block_hash(ChunkPos::new(9, 9)).is_err());
}
