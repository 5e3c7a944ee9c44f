use std::collections::HashMap;

use steel_util::{
    math::{biome_coords, vector3::Vector3},
    strip_default_namespace,
};

use crate::{ChunkPos, engine::EngineDataError};

use super::to_hex;

/// Name hashed for a biome that has no registry key.
pub const UNKNOWN_BIOME: &str = "unknown";

/// Biome cells per section along each axis.
const QUARTS_PER_SECTION: u8 = 4;

/// Source of noise biomes, queried at quart resolution.
pub trait BiomeSampler: Send + Sync {
    /// Registry key of the biome at the given quart position, `None` when the biome is not
    /// registered under any key.
    fn noise_biome(&self, at: Vector3<i32>) -> Result<Option<String>, EngineDataError>;
}

/// Position of one biome cell inside a chunk: the section index plus the quart offsets within that
/// section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BiomeKey {
    pub section_y: i32,
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

impl BiomeKey {
    pub const fn new(section_y: i32, x: u8, y: u8, z: u8) -> Self {
        Self { section_y, x, y, z }
    }

    /// Absolute quart position of this cell in `chunk`.
    pub fn quart_pos(&self, chunk: ChunkPos) -> Vector3<i32> {
        Vector3::new(
            biome_coords::from_chunk(chunk.x) + i32::from(self.x),
            biome_coords::from_section(self.section_y) + i32::from(self.y),
            biome_coords::from_chunk(chunk.z) + i32::from(self.z),
        )
    }
}

/// Biome names of one chunk, keyed by cell.
///
/// Filling the store and hashing it are two separate passes: the engine is queried in its own
/// generation order (its samplers cache the last result, so order changes which biome wins a
/// tie), while the digest always walks section, y, z, x.
#[derive(Debug, Clone)]
pub struct BiomeSamples {
    min_section_y: i32,
    max_section_y: i32,
    biomes: HashMap<BiomeKey, String>,
}

impl BiomeSamples {
    /// Store for sections `min_section_y..max_section_y`.
    pub fn new(min_section_y: i32, max_section_y: i32) -> Self {
        let sections = (max_section_y - min_section_y).max(0) as usize;
        Self {
            min_section_y,
            max_section_y,
            biomes: HashMap::with_capacity(sections * 64),
        }
    }

    /// Samples every cell of `chunk`, x outer, y middle and z inner within each section.
    pub fn sample(
        sampler: &(impl BiomeSampler + ?Sized),
        chunk: ChunkPos,
        min_section_y: i32,
        max_section_y: i32,
    ) -> Result<Self, EngineDataError> {
        let mut samples = Self::new(min_section_y, max_section_y);
        for section_y in min_section_y..max_section_y {
            for x in 0..QUARTS_PER_SECTION {
                for y in 0..QUARTS_PER_SECTION {
                    for z in 0..QUARTS_PER_SECTION {
                        let key = BiomeKey::new(section_y, x, y, z);
                        let biome = sampler
                            .noise_biome(key.quart_pos(chunk))?
                            .unwrap_or_else(|| UNKNOWN_BIOME.to_string());
                        samples.insert(key, biome);
                    }
                }
            }
        }
        Ok(samples)
    }

    pub fn insert(&mut self, key: BiomeKey, biome: String) {
        self.biomes.insert(key, biome);
    }

    pub fn get(&self, key: &BiomeKey) -> Option<&str> {
        self.biomes.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }

    /// MD5 over the samples in canonical order. Every section contributes its index as one byte
    /// followed by the names of its cells (y outer, z middle, x inner) with the `minecraft:`
    /// namespace removed. Cells that were never sampled contribute nothing.
    pub fn digest(&self) -> String {
        let mut context = md5::Context::new();

        for section_y in self.min_section_y..self.max_section_y {
            // Low byte only, negative sections wrap.
            context.consume([section_y as u8]);
            for y in 0..QUARTS_PER_SECTION {
                for z in 0..QUARTS_PER_SECTION {
                    for x in 0..QUARTS_PER_SECTION {
                        if let Some(biome) = self.get(&BiomeKey::new(section_y, x, y, z)) {
                            context.consume(strip_default_namespace(biome).as_bytes());
                        }
                    }
                }
            }
        }

        to_hex(context.compute())
    }
}

/// Biome digest of `chunk` over sections `min_section_y..max_section_y`.
pub fn chunk_biome_hash(
    sampler: &(impl BiomeSampler + ?Sized),
    chunk: ChunkPos,
    min_section_y: i32,
    max_section_y: i32,
) -> Result<String, EngineDataError> {
    BiomeSamples::sample(sampler, chunk, min_section_y, max_section_y).map(|s| s.digest())
}
