use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use steel_util::math::{biome_coords, section_coords, vector3::Vector3};

use crate::{
    ChunkPos, WORLD_LOWEST_Y, WORLD_MAX_Y,
    block,
    chunk::{CHUNK_DIM, ChunkAccess, ChunkStatus, ProtoChunk},
    engine::{EngineDataError, GenerationHost},
    hash::{BiomeSampler, block_hash},
};

use super::{ChunkStageHook, PositionalRandom, Seed};

pub const SEA_LEVEL: i32 = 62;
const BASE_HEIGHT: i32 = 60;
const HEIGHT_VARIATION: u32 = 8;
const DIRT_DEPTH: i32 = 3;
const TRUNK_HEIGHT: i32 = 4;

const SALT_HEIGHT: u64 = 1;
const SALT_CARVER: u64 = 2;
const SALT_TREE: u64 = 3;
const SALT_BIOME: u64 = 4;

/// A layered world with a little height variation, a cave pocket here and there and a few trees.
/// Each generation step touches only the blocks that step is responsible for, so the digests of
/// the block modifying steps all differ.
#[derive(Debug, Clone)]
pub struct SuperflatGenerator {
    seed: Seed,
}

impl SuperflatGenerator {
    pub fn new(seed: Seed) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    /// Height of the topmost solid block. Constant over 4x4 columns.
    pub fn surface_height(&self, block_x: i32, block_z: i32) -> i32 {
        let mut random = PositionalRandom::new(
            self.seed,
            biome_coords::from_block(block_x),
            biome_coords::from_block(block_z),
            SALT_HEIGHT,
        );
        BASE_HEIGHT + random.next_bounded(HEIGHT_VARIATION) as i32
    }

    pub fn apply_step(&self, chunk: &mut ProtoChunk, step: ChunkStatus) {
        match step {
            ChunkStatus::Noise => self.fill_noise(chunk),
            ChunkStatus::Surface => self.build_surface(chunk),
            ChunkStatus::Carvers => self.carve(chunk),
            ChunkStatus::Features => self.place_trees(chunk),
            _ => {}
        }
    }

    fn columns(chunk: &ProtoChunk) -> impl Iterator<Item = (usize, usize, i32, i32)> {
        let origin_x = section_coords::section_to_block(chunk.pos().x);
        let origin_z = section_coords::section_to_block(chunk.pos().z);
        (0..CHUNK_DIM).flat_map(move |x| {
            (0..CHUNK_DIM).map(move |z| (x, z, origin_x + x as i32, origin_z + z as i32))
        })
    }

    fn fill_noise(&self, chunk: &mut ProtoChunk) {
        for (x, z, block_x, block_z) in Self::columns(chunk) {
            let height = self.surface_height(block_x, block_z);
            for y in i32::from(WORLD_LOWEST_Y)..=height {
                chunk.set_block_state(x, y, z, block::STONE);
            }
            for y in height + 1..=SEA_LEVEL {
                chunk.set_block_state(x, y, z, block::WATER);
            }
        }
    }

    fn build_surface(&self, chunk: &mut ProtoChunk) {
        for (x, z, block_x, block_z) in Self::columns(chunk) {
            let height = self.surface_height(block_x, block_z);
            for y in height - DIRT_DEPTH..height {
                chunk.set_block_state(x, y, z, block::DIRT);
            }
            let top = if height >= SEA_LEVEL {
                block::GRASS_BLOCK
            } else {
                block::DIRT
            };
            chunk.set_block_state(x, height, z, top);
            chunk.set_block_state(x, i32::from(WORLD_LOWEST_Y), z, block::BEDROCK);
        }
    }

    /// Hollows a sphere of cave air out of the stone in one of three chunks.
    fn carve(&self, chunk: &mut ProtoChunk) {
        let pos = chunk.pos();
        let mut random = PositionalRandom::new(self.seed, pos.x, pos.z, SALT_CARVER);
        if !random.next_chance(3) {
            return;
        }
        let radius = 2 + random.next_bounded(3) as i32;
        let span = CHUNK_DIM as u32 - 2 * radius as u32;
        let center_x = radius + random.next_bounded(span) as i32;
        let center_z = radius + random.next_bounded(span) as i32;
        let center_y = -40 + random.next_bounded(48) as i32;

        for dx in -radius..=radius {
            for dy in -radius..=radius {
                for dz in -radius..=radius {
                    if dx * dx + dy * dy + dz * dz > radius * radius {
                        continue;
                    }
                    let x = (center_x + dx) as usize;
                    let z = (center_z + dz) as usize;
                    let y = center_y + dy;
                    if chunk.get_block_state(x, y, z) == block::STONE {
                        chunk.set_block_state(x, y, z, block::CAVE_AIR);
                    }
                }
            }
        }
    }

    /// Up to two oak trees on grass, kept two blocks away from the chunk border.
    fn place_trees(&self, chunk: &mut ProtoChunk) {
        let pos = chunk.pos();
        let mut random = PositionalRandom::new(self.seed, pos.x, pos.z, SALT_TREE);
        let attempts = random.next_bounded(3);
        for _ in 0..attempts {
            let x = 2 + random.next_bounded(CHUNK_DIM as u32 - 4) as usize;
            let z = 2 + random.next_bounded(CHUNK_DIM as u32 - 4) as usize;
            let ground = self.surface_height(
                section_coords::section_to_block(pos.x) + x as i32,
                section_coords::section_to_block(pos.z) + z as i32,
            );
            if chunk.get_block_state(x, ground, z) != block::GRASS_BLOCK {
                continue;
            }

            let crown = ground + TRUNK_HEIGHT;
            for dx in -2i32..=2 {
                for dz in -2i32..=2 {
                    for y in crown - 1..=crown + 1 {
                        // narrower at the top
                        if y == crown + 1 && (dx.abs() > 1 || dz.abs() > 1) {
                            continue;
                        }
                        let leaf_x = (x as i32 + dx) as usize;
                        let leaf_z = (z as i32 + dz) as usize;
                        if block::is_air(chunk.get_block_state(leaf_x, y, leaf_z)) {
                            chunk.set_block_state(leaf_x, y, leaf_z, block::OAK_LEAVES);
                        }
                    }
                }
            }
            for y in ground + 1..=crown {
                chunk.set_block_state(x, y, z, block::OAK_LOG);
            }
            chunk.set_block_state(x, ground, z, block::DIRT);
        }
    }
}

/// Biomes of the built-in world: surface biomes in 64 block regions, caves below y 0.
#[derive(Debug, Clone)]
pub struct SuperflatBiomes {
    seed: Seed,
}

impl SuperflatBiomes {
    const SURFACE: [&'static str; 4] = [
        "minecraft:plains",
        "minecraft:forest",
        "minecraft:birch_forest",
        "minecraft:river",
    ];
    const CAVES: [&'static str; 2] = ["minecraft:dripstone_caves", "minecraft:lush_caves"];

    pub fn new(seed: Seed) -> Self {
        Self { seed }
    }
}

impl BiomeSampler for SuperflatBiomes {
    fn noise_biome(&self, at: Vector3<i32>) -> Result<Option<String>, EngineDataError> {
        let bottom = biome_coords::from_block(i32::from(WORLD_LOWEST_Y));
        let top = biome_coords::from_block(i32::from(WORLD_MAX_Y));
        if at.y < bottom || at.y >= top {
            return Err(EngineDataError::BiomeUnavailable {
                x: at.x,
                y: at.y,
                z: at.z,
            });
        }

        let mut random = PositionalRandom::new(self.seed, at.x >> 4, at.z >> 4, SALT_BIOME);
        let surface = Self::SURFACE[random.next_bounded(Self::SURFACE.len() as u32) as usize];
        let cave = Self::CAVES[random.next_bounded(Self::CAVES.len() as u32) as usize];
        // one region in 64 uses a biome missing from the registry
        if random.next_chance(64) {
            return Ok(None);
        }
        let biome = if biome_coords::to_block(at.y) < 0 {
            cave
        } else {
            surface
        };
        Ok(Some(biome.to_string()))
    }
}

type SharedChunk = Arc<Mutex<ProtoChunk>>;

/// A self-contained engine: generates [`SuperflatGenerator`] chunks step by step on its own rayon
/// pool and reports every finished step to a [`ChunkStageHook`].
pub struct SuperflatHost {
    seed: Seed,
    generator: Arc<SuperflatGenerator>,
    hook: ChunkStageHook,
    chunks: Arc<DashMap<ChunkPos, SharedChunk>>,
    pool: ThreadPool,
}

impl SuperflatHost {
    /// `threads` of 0 lets rayon pick the number of worker threads.
    pub fn new(
        seed: Seed,
        hook: ChunkStageHook,
        threads: usize,
    ) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("worldgen-{index}"))
            .build()?;
        Ok(Self {
            seed,
            generator: Arc::new(SuperflatGenerator::new(seed)),
            hook,
            chunks: Arc::new(DashMap::new()),
            pool,
        })
    }

    pub fn generator(&self) -> &SuperflatGenerator {
        &self.generator
    }

    pub fn chunk_status(&self, pos: ChunkPos) -> Option<ChunkStatus> {
        self.chunks.get(&pos).map(|chunk| chunk.lock().status())
    }

    /// Current block digest of a chunk, independent of tracking.
    pub fn block_hash(&self, pos: ChunkPos) -> Result<String, EngineDataError> {
        let chunk = self
            .chunks
            .get(&pos)
            .map(|chunk| chunk.value().clone())
            .ok_or(EngineDataError::ChunkNotGenerated(pos))?;
        let chunk = chunk.lock();
        if chunk.status() < ChunkStatus::Noise {
            return Err(EngineDataError::ChunkNotGenerated(pos));
        }
        Ok(block_hash(chunk.sections()))
    }

    fn generate(
        generator: &SuperflatGenerator,
        hook: &ChunkStageHook,
        chunk: &SharedChunk,
        target: ChunkStatus,
    ) {
        let mut chunk = chunk.lock();
        for step in chunk.status().steps_until(target) {
            generator.apply_step(&mut chunk, step);
            chunk.set_status(step);
            hook.on_step_complete(&*chunk, step);
        }
    }
}

impl GenerationHost for SuperflatHost {
    fn seed(&self) -> Seed {
        self.seed
    }

    fn biome_sampler(&self, seed: Seed) -> Result<Box<dyn BiomeSampler + '_>, EngineDataError> {
        Ok(Box::new(SuperflatBiomes::new(seed)))
    }

    fn force_generation(&self, chunks: &[ChunkPos], target: ChunkStatus) {
        log::debug!("Generating {} chunks up to {target}", chunks.len());
        for &pos in chunks {
            let chunk = self
                .chunks
                .entry(pos)
                .or_insert_with(|| Arc::new(Mutex::new(ProtoChunk::new(pos))))
                .value()
                .clone();
            let generator = self.generator.clone();
            let hook = self.hook.clone();
            self.pool.spawn(move || Self::generate(&generator, &hook, &chunk, target));
        }
    }
}
