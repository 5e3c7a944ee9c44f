use std::fmt;

use serde::{Deserialize, Serialize};

/// A horizontal position. Used with `i32` for chunk coordinates, where the derived ordering
/// compares `x` first and then `z`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Vector2<T> {
    pub x: T,
    pub z: T,
}

impl<T> Vector2<T> {
    pub const fn new(x: T, z: T) -> Self {
        Self { x, z }
    }
}

impl<T: fmt::Display> fmt::Display for Vector2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.z)
    }
}
