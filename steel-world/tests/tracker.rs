use std::{
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use serde_json::json;
use steel_world::{
    ChunkPos, ChunkReadinessTracker, ChunkStageReport, EXPECTED_SEED, chunks_within_radius,
};

fn stage_name(i: usize) -> String {
    format!("minecraft:stage_{i}")
}

#[test]
fn concurrent_marks_release_the_waiter() {
    let tracker = Arc::new(ChunkReadinessTracker::new());
    let chunks: Vec<_> = chunks_within_radius(5).collect();
    tracker.start_tracking(chunks.iter().copied());

    let waiter = {
        let tracker = tracker.clone();
        thread::spawn(move || tracker.wait_until_all_ready(Duration::from_secs(30)))
    };

    thread::scope(|scope| {
        for worker in 0..8 {
            let tracker = &tracker;
            let chunks = &chunks;
            scope.spawn(move || {
                // every chunk is marked by every worker, plus a stray one
                for pos in chunks.iter().cycle().skip(worker * 13).take(chunks.len()) {
                    tracker.record_hash(*pos, stage_name(worker), format!("{worker}"));
                    tracker.mark_ready(*pos);
                }
                tracker.mark_ready(ChunkPos::new(100, worker as i32));
            });
        }
    });

    assert!(waiter.join().unwrap());
    assert_eq!(tracker.remaining(), 0);
    assert_eq!(tracker.ready_count(), 121);
    assert_eq!(tracker.tracked_count(), 121);
    assert_eq!(tracker.snapshot_hashes().len(), 121 * 8);
}

#[test]
fn hashes_recorded_before_ready_are_visible() {
    let tracker = Arc::new(ChunkReadinessTracker::new());
    let chunks: Vec<_> = chunks_within_radius(3).collect();
    tracker.start_tracking(chunks.iter().copied());

    thread::scope(|scope| {
        for slice in chunks.chunks(7) {
            let tracker = &tracker;
            scope.spawn(move || {
                for pos in slice {
                    for stage in 0..4 {
                        tracker.record_hash(*pos, stage_name(stage), format!("{}:{}", pos.x, pos.z));
                    }
                    tracker.mark_ready(*pos);
                }
            });
        }

        assert!(tracker.wait_until_all_ready(Duration::from_secs(30)));
        let hashes = tracker.snapshot_hashes();
        for pos in &chunks {
            for stage in 0..4 {
                assert_eq!(
                    hashes.get(&(*pos, stage_name(stage))),
                    Some(&format!("{}:{}", pos.x, pos.z))
                );
            }
        }
    });
}

#[test]
fn missing_chunk_times_out() {
    let tracker = ChunkReadinessTracker::new();
    let chunks: Vec<_> = chunks_within_radius(1).collect();
    tracker.start_tracking(chunks.iter().copied());
    for pos in chunks.iter().skip(1) {
        tracker.mark_ready(*pos);
    }

    let start = Instant::now();
    assert!(!tracker.wait_until_all_ready(Duration::from_millis(100)));
    assert!(start.elapsed() >= Duration::from_millis(100));
    assert_eq!(tracker.ready_count(), 8);
    assert_eq!(tracker.pending_chunks(), vec![chunks[0]]);
}

#[test]
fn late_mark_wakes_a_blocked_waiter() {
    let tracker = Arc::new(ChunkReadinessTracker::new());
    tracker.start_tracking([ChunkPos::new(0, 0)]);

    let marker = {
        let tracker = tracker.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            tracker.record_hash(ChunkPos::new(0, 0), "full", "abc123");
            tracker.mark_ready(ChunkPos::new(0, 0));
        })
    };

    assert!(tracker.wait_until_all_ready(Duration::from_secs(30)));
    assert_eq!(
        tracker.get_hash(ChunkPos::new(0, 0), "full").as_deref(),
        Some("abc123")
    );
    marker.join().unwrap();
}

#[test]
fn round_trip_report() {
    let tracker = ChunkReadinessTracker::new();
    tracker.start_tracking([ChunkPos::new(0, 0)]);
    tracker.record_hash(ChunkPos::new(0, 0), "full", "abc123");
    tracker.mark_ready(ChunkPos::new(0, 0));
    assert!(tracker.wait_until_all_ready(Duration::from_secs(5)));

    let report = ChunkStageReport::compile(EXPECTED_SEED, &tracker.snapshot_hashes());
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({
            "seed": 13579,
            "chunk_count": 1,
            "chunks": [{ "x": 0, "z": 0, "stages": { "full": "abc123" } }]
        })
    );
}

#[test]
fn barrier_tracks_ready_set_under_contention() {
    let tracker = Arc::new(ChunkReadinessTracker::new());
    let chunks: Vec<_> = chunks_within_radius(4).collect();
    tracker.start_tracking(chunks.iter().copied());

    // every chunk in the first half is marked by 16 threads at once
    let half = &chunks[..chunks.len() / 2];
    thread::scope(|scope| {
        for _ in 0..16 {
            let tracker = &tracker;
            scope.spawn(move || {
                for pos in half {
                    tracker.mark_ready(*pos);
                }
            });
        }
    });

    assert_eq!(tracker.ready_count(), half.len());
    assert_eq!(tracker.remaining(), tracker.tracked_count() - half.len());
    assert!(!tracker.wait_until_all_ready(Duration::from_millis(10)));
}
