use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ChunkPos, EXPECTED_SEED, HashRecord, Seed};

/// Stage digests of one chunk, stage names sorted lexicographically.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChunkStages {
    pub x: i32,
    pub z: i32,
    pub stages: BTreeMap<String, String>,
}

/// Contents of `chunk_stage_hashes.json`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChunkStageReport {
    pub seed: Seed,
    pub chunk_count: usize,
    pub chunks: Vec<ChunkStages>,
    /// `false` when the hashes were produced with another seed than [`EXPECTED_SEED`] and cannot
    /// be compared against reference values.
    #[serde(skip)]
    pub seed_matches: bool,
}

impl ChunkStageReport {
    pub const FILE_NAME: &'static str = "chunk_stage_hashes.json";

    /// Groups `record` by chunk, chunks sorted by x then z.
    pub fn compile(seed: Seed, record: &HashRecord) -> Self {
        let mut grouped: BTreeMap<ChunkPos, BTreeMap<String, String>> = BTreeMap::new();
        for ((pos, stage), digest) in record {
            grouped
                .entry(*pos)
                .or_default()
                .insert(stage.clone(), digest.clone());
        }

        let seed_matches = seed == EXPECTED_SEED;
        if !seed_matches {
            log::warn!(
                "Chunk hashes were generated with seed {seed}, expected {EXPECTED_SEED}; they are not comparable"
            );
        }

        let chunks: Vec<_> = grouped
            .into_iter()
            .map(|(pos, stages)| ChunkStages {
                x: pos.x,
                z: pos.z,
                stages,
            })
            .collect();
        Self {
            seed,
            chunk_count: chunks.len(),
            chunks,
            seed_matches,
        }
    }
}

/// Contents of `biome_hashes.json`. Entries keep the order they were pushed in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BiomeHashReport {
    pub seed: Seed,
    pub radius: i32,
    pub hashes: Vec<(i32, i32, String)>,
}

impl BiomeHashReport {
    pub const FILE_NAME: &'static str = "biome_hashes.json";

    pub fn new(seed: Seed, radius: i32) -> Self {
        let side = (2 * radius.max(0) + 1) as usize;
        Self {
            seed,
            radius,
            hashes: Vec::with_capacity(side * side),
        }
    }

    pub fn push(&mut self, pos: ChunkPos, digest: String) {
        self.hashes.push((pos.x, pos.z, digest));
    }
}
