use thiserror::Error;

use crate::{ChunkPos, Seed, chunk::ChunkStatus, hash::BiomeSampler};

/// A value the engine was asked for could not be produced. Recovered locally by skipping the
/// digest that needed it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineDataError {
    #[error("Biome at quart {x}, {y}, {z} could not be sampled")]
    BiomeUnavailable { x: i32, y: i32, z: i32 },
    #[error("Chunk {0} has not been generated far enough")]
    ChunkNotGenerated(ChunkPos),
}

/// The game server as seen by the extractor.
pub trait GenerationHost: Send + Sync {
    /// Seed of the loaded overworld.
    fn seed(&self) -> Seed;

    /// A biome sampler for the overworld built from `seed`, regardless of the seed the world was
    /// loaded with.
    fn biome_sampler(&self, seed: Seed) -> Result<Box<dyn BiomeSampler + '_>, EngineDataError>;

    /// Starts generating `chunks` up to `target` on the engine's own workers. Does not wait for
    /// completion; progress is observed through the generation hook.
    fn force_generation(&self, chunks: &[ChunkPos], target: ChunkStatus);
}
