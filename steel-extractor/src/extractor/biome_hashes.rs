use serde_json::Value;
use steel_world::{
    BiomeHashReport, EXPECTED_SEED, GenerationHost, MAX_SECTION_Y, MIN_SECTION_Y,
    chunks_within_radius, hash::chunk_biome_hash,
};

use crate::{BIOME_RADIUS, error::ExtractorError};

use super::Extractor;

/// Biome digests around the origin, computed with the expected seed rather than the seed the
/// world was loaded with.
pub struct BiomeHashes {
    radius: i32,
}

impl BiomeHashes {
    #[must_use]
    pub fn new(radius: i32) -> Self {
        Self { radius }
    }

    pub fn report(&self, host: &dyn GenerationHost) -> Result<BiomeHashReport, ExtractorError> {
        let sampler = host.biome_sampler(EXPECTED_SEED)?;
        let mut report = BiomeHashReport::new(EXPECTED_SEED, self.radius);
        for pos in chunks_within_radius(self.radius) {
            match chunk_biome_hash(sampler.as_ref(), pos, MIN_SECTION_Y, MAX_SECTION_Y) {
                Ok(digest) => report.push(pos, digest),
                Err(err) => log::warn!("Skipping biome hash of chunk {pos}: {err}"),
            }
        }
        log::info!(
            "Extracted biome hashes for {} chunks (seed={EXPECTED_SEED}, radius={})",
            report.hashes.len(),
            self.radius
        );
        Ok(report)
    }
}

impl Default for BiomeHashes {
    fn default() -> Self {
        Self::new(BIOME_RADIUS)
    }
}

impl Extractor for BiomeHashes {
    fn file_name(&self) -> &'static str {
        BiomeHashReport::FILE_NAME
    }

    fn extract(&self, host: &dyn GenerationHost) -> Result<Value, ExtractorError> {
        Ok(serde_json::to_value(self.report(host)?)?)
    }
}
