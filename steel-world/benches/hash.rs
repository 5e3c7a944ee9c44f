use criterion::{Criterion, criterion_group, criterion_main};
use steel_world::{
    ChunkPos, EXPECTED_SEED, MAX_SECTION_Y, MIN_SECTION_Y,
    chunk::{ChunkAccess, ChunkStatus, ProtoChunk},
    generation::{SuperflatBiomes, SuperflatGenerator},
    hash::{block_hash, chunk_biome_hash},
};

fn bench_hashes(c: &mut Criterion) {
    let generator = SuperflatGenerator::new(EXPECTED_SEED);
    let mut chunk = ProtoChunk::new(ChunkPos::new(0, 0));
    for step in ChunkStatus::Empty.steps_until(ChunkStatus::Full) {
        generator.apply_step(&mut chunk, step);
    }
    let empty = ProtoChunk::new(ChunkPos::new(0, 0));
    let biomes = SuperflatBiomes::new(EXPECTED_SEED);

    c.bench_function("block hash", |b| {
        b.iter(|| block_hash(chunk.sections()));
    });

    c.bench_function("block hash empty", |b| {
        b.iter(|| block_hash(empty.sections()));
    });

    c.bench_function("biome hash", |b| {
        b.iter(|| chunk_biome_hash(&biomes, ChunkPos::new(0, 0), MIN_SECTION_Y, MAX_SECTION_Y));
    });
}

criterion_group!(benches, bench_hashes);
criterion_main!(benches);
