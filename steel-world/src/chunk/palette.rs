use std::{
    collections::{HashMap, hash_map::Entry},
    hash::Hash,
};

/// 3d array indexed by y,z,x
type AbstractCube<T, const DIM: usize> = [[[T; DIM]; DIM]; DIM];

#[derive(Debug, Clone)]
pub struct HeterogeneousPaletteData<V: Hash + Eq + Copy, const DIM: usize> {
    cube: Box<AbstractCube<V, DIM>>,
    counts: HashMap<V, u16>,
}

impl<V: Hash + Eq + Copy, const DIM: usize> HeterogeneousPaletteData<V, DIM> {
    fn get(&self, x: usize, y: usize, z: usize) -> V {
        debug_assert!(x < DIM);
        debug_assert!(y < DIM);
        debug_assert!(z < DIM);

        self.cube[y][z][x]
    }

    fn set(&mut self, x: usize, y: usize, z: usize, value: V) {
        debug_assert!(x < DIM);
        debug_assert!(y < DIM);
        debug_assert!(z < DIM);

        let original = self.cube[y][z][x];
        if let Entry::Occupied(mut entry) = self.counts.entry(original) {
            let count = entry.get_mut();
            *count -= 1;
            if *count == 0 {
                let _ = entry.remove();
            }
        }

        self.cube[y][z][x] = value;
        self.counts
            .entry(value)
            .and_modify(|count| *count += 1)
            .or_insert(1);
    }

    /// The only value left in the cube, if there is exactly one.
    fn single_value(&self) -> Option<V> {
        if self.counts.len() == 1 {
            self.counts.keys().next().copied()
        } else {
            None
        }
    }
}

/// A paletted container is a cube of registry ids. A cube holding a single id is stored without
/// any backing array.
#[derive(Debug, Clone)]
pub enum PalettedContainer<V: Hash + Eq + Copy + Default, const DIM: usize> {
    Homogeneous(V),
    Heterogeneous(Box<HeterogeneousPaletteData<V, DIM>>),
}

impl<V: Hash + Eq + Copy + Default, const DIM: usize> PalettedContainer<V, DIM> {
    pub const SIZE: usize = DIM;
    pub const VOLUME: usize = DIM * DIM * DIM;

    fn from_cube(cube: Box<AbstractCube<V, DIM>>) -> Self {
        let counts =
            cube.as_flattened()
                .as_flattened()
                .iter()
                .fold(HashMap::new(), |mut acc, key| {
                    acc.entry(*key).and_modify(|count| *count += 1).or_insert(1);
                    acc
                });

        let data = HeterogeneousPaletteData { cube, counts };
        match data.single_value() {
            Some(value) => Self::Homogeneous(value),
            None => Self::Heterogeneous(Box::new(data)),
        }
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> V {
        match self {
            Self::Homogeneous(value) => *value,
            Self::Heterogeneous(data) => data.get(x, y, z),
        }
    }

    pub fn set(&mut self, x: usize, y: usize, z: usize, value: V) {
        debug_assert!(x < Self::SIZE);
        debug_assert!(y < Self::SIZE);
        debug_assert!(z < Self::SIZE);

        match self {
            Self::Homogeneous(original) => {
                if value != *original {
                    let mut cube = Box::new([[[*original; DIM]; DIM]; DIM]);
                    cube[y][z][x] = value;
                    *self = Self::from_cube(cube);
                }
            }
            Self::Heterogeneous(data) => {
                data.set(x, y, z, value);
                if let Some(single) = data.single_value() {
                    *self = Self::Homogeneous(single);
                }
            }
        }
    }

    /// Whether every distinct value in the cube satisfies `predicate`.
    pub fn all_values(&self, mut predicate: impl FnMut(V) -> bool) -> bool {
        match self {
            Self::Homogeneous(value) => predicate(*value),
            Self::Heterogeneous(data) => data.counts.keys().all(|value| predicate(*value)),
        }
    }

    /// Visits every cell in y,z,x order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(V),
    {
        match self {
            Self::Homogeneous(registry_id) => {
                for _ in 0..Self::VOLUME {
                    f(*registry_id);
                }
            }
            Self::Heterogeneous(data) => {
                data.cube
                    .as_flattened()
                    .as_flattened()
                    .iter()
                    .for_each(|value| {
                        f(*value);
                    });
            }
        }
    }
}

impl<V: Default + Hash + Eq + Copy, const DIM: usize> Default for PalettedContainer<V, DIM> {
    fn default() -> Self {
        Self::Homogeneous(V::default())
    }
}

pub type BlockPalette = PalettedContainer<u16, 16>;
