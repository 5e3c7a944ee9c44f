use crate::chunk::{CHUNK_DIM, SECTION_VOLUME};

use super::to_hex;

/// Marker fed for a section that holds nothing but air.
const EMPTY_SECTION_MARKER: u8 = 0;

/// A 16x16x16 cube of block states as exposed by an engine.
pub trait HashableSection {
    fn has_only_air(&self) -> bool;

    /// Engine specific id of the block state at the given section-local position.
    fn block_state_id(&self, x: usize, y: usize, z: usize) -> u32;

    /// Visits every block state id, y outer, z middle and x inner.
    fn for_each_state_id(&self, mut f: impl FnMut(u32)) {
        for y in 0..CHUNK_DIM {
            for z in 0..CHUNK_DIM {
                for x in 0..CHUNK_DIM {
                    f(self.block_state_id(x, y, z));
                }
            }
        }
    }
}

/// Incremental MD5 over the block content of a chunk, one section at a time from the bottom up.
pub struct BlockHasher {
    context: md5::Context,
}

impl BlockHasher {
    pub fn new() -> Self {
        Self {
            context: md5::Context::new(),
        }
    }

    pub fn update<S: HashableSection>(&mut self, section: &S) {
        if section.has_only_air() {
            self.context.consume([EMPTY_SECTION_MARKER]);
            return;
        }

        let mut buf = Vec::with_capacity(SECTION_VOLUME * 4);
        section.for_each_state_id(|id| buf.extend_from_slice(&id.to_be_bytes()));
        self.context.consume(&buf);
    }

    /// Lowercase hex of the digest.
    pub fn finish(self) -> String {
        to_hex(self.context.compute())
    }
}

impl Default for BlockHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Digest of a chunk's sections in vertical stacking order.
pub fn block_hash<'a, S, I>(sections: I) -> String
where
    S: HashableSection + 'a,
    I: IntoIterator<Item = &'a S>,
{
    let mut hasher = BlockHasher::new();
    for section in sections {
        hasher.update(section);
    }
    hasher.finish()
}

#[cfg(test)]
mod test {
    use super::{HashableSection, block_hash};
    use crate::{
        block::{AIR, CAVE_AIR, DIRT, STONE},
        chunk::{ChunkSection, SECTION_VOLUME},
    };

    /// Stores cells x-major, the opposite of the y,z,x layout the hasher walks.
    struct XMajorSection {
        cells: Vec<u32>,
    }

    impl XMajorSection {
        fn from_section(section: &ChunkSection) -> Self {
            let mut cells = vec![0; SECTION_VOLUME];
            for x in 0..16 {
                for y in 0..16 {
                    for z in 0..16 {
                        cells[x * 256 + y * 16 + z] = section.block_state_id(x, y, z);
                    }
                }
            }
            Self { cells }
        }
    }

    impl HashableSection for XMajorSection {
        fn has_only_air(&self) -> bool {
            self.cells.iter().all(|id| *id == u32::from(AIR))
        }

        fn block_state_id(&self, x: usize, y: usize, z: usize) -> u32 {
            self.cells[x * 256 + y * 16 + z]
        }
    }

    fn sample_sections() -> Vec<ChunkSection> {
        let mut sections = vec![ChunkSection::default(); 4];
        for x in 0..16 {
            for z in 0..16 {
                for y in 0..16 {
                    sections[0].set_block_state(x, y, z, STONE);
                }
                sections[1].set_block_state(x, (x + z) % 16, z, DIRT);
            }
        }
        sections[1].set_block_state(0, 15, 0, STONE);
        sections
    }

    #[test]
    fn air_sections_hash_as_zero_bytes() {
        assert_eq!(
            block_hash(&[ChunkSection::default()]),
            "93b885adfe0da089cdf634904fd59f71"
        );

        for count in [2, 4, 24] {
            let sections = vec![ChunkSection::default(); count];
            let expected = format!("{:x}", md5::compute(vec![0u8; count]));
            assert_eq!(block_hash(&sections), expected);
        }
    }

    #[test]
    fn empty_chunk_hashes_nothing() {
        let sections: Vec<ChunkSection> = Vec::new();
        assert_eq!(block_hash(&sections), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn cave_air_section_uses_marker() {
        let mut section = ChunkSection::default();
        section.set_block_state(3, 3, 3, CAVE_AIR);
        assert_eq!(
            block_hash(&[section]),
            block_hash(&[ChunkSection::default()])
        );
    }

    #[test]
    fn solid_section_bytes() {
        let mut section = ChunkSection::default();
        for x in 0..16 {
            for y in 0..16 {
                for z in 0..16 {
                    section.set_block_state(x, y, z, STONE);
                }
            }
        }
        let expected: Vec<u8> = std::iter::repeat([0u8, 0, 0, 1])
            .take(4096)
            .flatten()
            .collect();
        assert_eq!(
            block_hash(&[section]),
            format!("{:x}", md5::compute(expected))
        );
    }

    #[test]
    fn independent_of_storage_layout() {
        let sections = sample_sections();
        let x_major: Vec<_> = sections.iter().map(XMajorSection::from_section).collect();

        assert_eq!(block_hash(&sections), block_hash(&x_major));
    }

    #[test]
    fn single_cell_change_changes_hash() {
        let sections = sample_sections();
        let original = block_hash(&sections);

        let mut seen = std::collections::HashSet::new();
        seen.insert(original.clone());
        for (x, y, z) in [(0, 0, 0), (15, 15, 15), (7, 3, 9), (0, 15, 0), (15, 0, 15)] {
            for section_index in 0..sections.len() {
                let mut changed = sections.clone();
                let current = changed[section_index].get_block_state(x, y, z);
                let replacement = if current == STONE { DIRT } else { STONE };
                changed[section_index].set_block_state(x, y, z, replacement);

                let hash = block_hash(&changed);
                assert_ne!(hash, original, "section {section_index} ({x}, {y}, {z})");
                assert!(seen.insert(hash));
            }
        }
    }

    #[test]
    fn section_order_matters() {
        let mut sections = sample_sections();
        let original = block_hash(&sections);
        sections.swap(0, 1);
        assert_ne!(block_hash(&sections), original);
    }
}
