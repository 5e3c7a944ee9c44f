//! Canonical content digests of generated chunks.
//!
//! Both digests sample in whatever order suits the engine and only then feed bytes into MD5 in
//! a fixed order, so equal world content always produces an equal digest no matter how the
//! engine iterates its data.

pub mod biome;
pub mod block;

pub use biome::{BiomeKey, BiomeSampler, BiomeSamples, UNKNOWN_BIOME, chunk_biome_hash};
pub use block::{BlockHasher, HashableSection, block_hash};

fn to_hex(digest: md5::Digest) -> String {
    format!("{digest:x}")
}
