use steel_util::math::vector2::Vector2;

pub mod block;
pub mod chunk;
pub mod engine;
pub mod generation;
pub mod hash;
pub mod latch;
pub mod report;
pub mod tracker;

pub use engine::{EngineDataError, GenerationHost};
pub use generation::Seed;
pub use hash::{BiomeSampler, HashableSection};
pub use report::{BiomeHashReport, ChunkStageReport};
pub use tracker::{ChunkReadinessTracker, HashRecord};

/// Position of a chunk in the chunk grid.
pub type ChunkPos = Vector2<i32>;

pub const WORLD_HEIGHT: usize = 384;
pub const WORLD_LOWEST_Y: i16 = -64;
pub const WORLD_MAX_Y: i16 = WORLD_HEIGHT as i16 - WORLD_LOWEST_Y.abs();

/// Seed every hash in the reports is expected to be produced with.
pub const EXPECTED_SEED: Seed = Seed(13579);

/// Lowest section index sampled by the biome hash.
pub const MIN_SECTION_Y: i32 = -4;
/// Section index (exclusive) where biome sampling stops.
pub const MAX_SECTION_Y: i32 = 20;

/// All chunks with both coordinates in `-radius..=radius`, x outer and z inner.
pub fn chunks_within_radius(radius: i32) -> impl Iterator<Item = ChunkPos> {
    (-radius..=radius).flat_map(move |x| (-radius..=radius).map(move |z| ChunkPos::new(x, z)))
}
