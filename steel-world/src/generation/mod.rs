use std::fmt;

use serde::{Deserialize, Serialize};

mod hook;
pub mod superflat;

pub use hook::ChunkStageHook;
pub use superflat::{SuperflatBiomes, SuperflatGenerator, SuperflatHost};

/// A world generation seed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Seed(pub i64);

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deterministic per-position randomness, derived from the seed with a splitmix64 finalizer.
#[derive(Debug, Clone)]
pub struct PositionalRandom {
    state: u64,
}

impl PositionalRandom {
    pub fn new(seed: Seed, x: i32, z: i32, salt: u64) -> Self {
        let mut state = seed.0 as u64 ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        state = mix64(state ^ (x as u32 as u64));
        state = mix64(state ^ ((z as u32 as u64) << 32));
        Self { state }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        mix64(self.state)
    }

    /// Uniform-enough value in `0..bound`. `bound` must not be zero.
    pub fn next_bounded(&mut self, bound: u32) -> u32 {
        ((self.next_u64() >> 32) * u64::from(bound) >> 32) as u32
    }

    pub fn next_chance(&mut self, one_in: u32) -> bool {
        self.next_bounded(one_in) == 0
    }
}

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
