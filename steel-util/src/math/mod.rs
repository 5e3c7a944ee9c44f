pub mod vector2;
pub mod vector3;

/// Coordinate conversions between blocks and 16-block sections.
pub mod section_coords {
    use num_traits::PrimInt;

    #[inline]
    pub fn section_to_block<T>(coord: T) -> T
    where
        T: PrimInt,
    {
        coord << 4
    }
}

/// Biomes are stored at quarter resolution: one biome cell ("quart") per 4x4x4 blocks.
pub mod biome_coords {
    use num_traits::PrimInt;

    #[inline]
    pub fn from_block<T>(coord: T) -> T
    where
        T: PrimInt,
    {
        coord >> 2
    }

    #[inline]
    pub fn to_block<T>(coord: T) -> T
    where
        T: PrimInt,
    {
        coord << 2
    }

    #[inline]
    pub fn from_chunk<T>(coord: T) -> T
    where
        T: PrimInt,
    {
        coord << 2
    }

    #[inline]
    pub fn from_section<T>(coord: T) -> T
    where
        T: PrimInt,
    {
        coord << 2
    }
}

#[cfg(test)]
mod test {
    use super::{biome_coords, section_coords};

    #[test]
    fn negative_coords_keep_sign() {
        assert_eq!(section_coords::section_to_block(-1), -16);
        assert_eq!(biome_coords::to_block(-3), -12);
        assert_eq!(biome_coords::from_block(-1), -1);
        assert_eq!(biome_coords::from_chunk(-5), -20);
        assert_eq!(biome_coords::from_section(-4), -16);
    }
}
