use crate::{
    ChunkPos, WORLD_HEIGHT, WORLD_LOWEST_Y,
    block::{self, BlockStateId},
    hash::HashableSection,
};

pub mod palette;
pub mod status;

pub use palette::BlockPalette;
pub use status::ChunkStatus;

pub const CHUNK_DIM: usize = 16;
pub const CHUNK_AREA: usize = CHUNK_DIM * CHUNK_DIM;
pub const SECTION_VOLUME: usize = CHUNK_AREA * CHUNK_DIM;
pub const SECTION_COUNT: usize = WORLD_HEIGHT / CHUNK_DIM;

/// Read access to a chunk that is somewhere in the generation pipeline. This is the only view of
/// engine chunks the hashing code needs.
pub trait ChunkAccess {
    type Section: HashableSection;

    fn pos(&self) -> ChunkPos;

    /// Sections from the bottom of the world to the top.
    fn sections(&self) -> &[Self::Section];
}

/// # Section
/// A 16x16x16 cube of block states stacked vertically inside a chunk.
#[derive(Debug, Clone, Default)]
pub struct ChunkSection {
    pub block_states: BlockPalette,
}

impl ChunkSection {
    pub fn get_block_state(&self, x: usize, y: usize, z: usize) -> BlockStateId {
        self.block_states.get(x, y, z)
    }

    pub fn set_block_state(&mut self, x: usize, y: usize, z: usize, state: BlockStateId) {
        self.block_states.set(x, y, z, state);
    }
}

impl HashableSection for ChunkSection {
    fn has_only_air(&self) -> bool {
        self.block_states.all_values(block::is_air)
    }

    fn block_state_id(&self, x: usize, y: usize, z: usize) -> u32 {
        u32::from(self.get_block_state(x, y, z))
    }

    fn for_each_state_id(&self, mut f: impl FnMut(u32)) {
        self.block_states.for_each(|state| f(u32::from(state)));
    }
}

/// A chunk that is still being generated. Tracks the last generation step it completed.
#[derive(Debug, Clone)]
pub struct ProtoChunk {
    pos: ChunkPos,
    status: ChunkStatus,
    sections: Box<[ChunkSection]>,
}

impl ProtoChunk {
    pub fn new(pos: ChunkPos) -> Self {
        Self {
            pos,
            status: ChunkStatus::Empty,
            sections: vec![ChunkSection::default(); SECTION_COUNT].into_boxed_slice(),
        }
    }

    pub fn status(&self) -> ChunkStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: ChunkStatus) {
        self.status = status;
    }

    /// `local_x` and `local_z` are in `0..16`, `y` is an absolute world height.
    pub fn get_block_state(&self, local_x: usize, y: i32, local_z: usize) -> BlockStateId {
        match Self::section_index(y) {
            Some(index) => {
                self.sections[index].get_block_state(local_x, Self::section_local_y(y), local_z)
            }
            None => block::VOID_AIR,
        }
    }

    /// Writes outside of the world height are dropped.
    pub fn set_block_state(&mut self, local_x: usize, y: i32, local_z: usize, state: BlockStateId) {
        if let Some(index) = Self::section_index(y) {
            self.sections[index].set_block_state(
                local_x,
                Self::section_local_y(y),
                local_z,
                state,
            );
        }
    }

    fn section_index(y: i32) -> Option<usize> {
        let relative = y - i32::from(WORLD_LOWEST_Y);
        if relative < 0 {
            return None;
        }
        let index = relative as usize / CHUNK_DIM;
        (index < SECTION_COUNT).then_some(index)
    }

    fn section_local_y(y: i32) -> usize {
        (y - i32::from(WORLD_LOWEST_Y)) as usize % CHUNK_DIM
    }
}

impl ChunkAccess for ProtoChunk {
    type Section = ChunkSection;

    fn pos(&self) -> ChunkPos {
        self.pos
    }

    fn sections(&self) -> &[ChunkSection] {
        &self.sections
    }
}
