use serde_json::Value;
use steel_world::GenerationHost;

use crate::error::ExtractorError;

mod biome_hashes;
mod chunk_stage_hashes;

pub use biome_hashes::BiomeHashes;
pub use chunk_stage_hashes::ChunkStageHashes;

/// Produces one JSON output file.
pub trait Extractor: Send + Sync {
    fn file_name(&self) -> &'static str;

    fn extract(&self, host: &dyn GenerationHost) -> Result<Value, ExtractorError>;
}
