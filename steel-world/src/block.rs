//! Block state ids of the built-in generator's block table.
//!
//! Ids are only meaningful within one engine build; the block hash relies on them being stable
//! between two runs of the same build, not across engines.

pub type BlockStateId = u16;

pub const AIR: BlockStateId = 0;
pub const STONE: BlockStateId = 1;
pub const GRASS_BLOCK: BlockStateId = 9;
pub const DIRT: BlockStateId = 10;
pub const BEDROCK: BlockStateId = 85;
pub const WATER: BlockStateId = 86;
pub const OAK_LOG: BlockStateId = 137;
pub const OAK_LEAVES: BlockStateId = 279;
pub const VOID_AIR: BlockStateId = 12957;
pub const CAVE_AIR: BlockStateId = 12958;

#[inline]
pub fn is_air(state: BlockStateId) -> bool {
    matches!(state, AIR | CAVE_AIR | VOID_AIR)
}
