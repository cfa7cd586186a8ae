use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Column/row index of a plot in the grid.
///
/// Keys order lexicographically by `(i, j)`, which is also the order the grid
/// enumerates them in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct CellKey {
    pub i: u32,
    pub j: u32,
}

impl CellKey {
    pub fn new(i: u32, j: u32) -> Self {
        Self { i, j }
    }

    /// Converts the key into an index into a flat, row-major array of
    /// `dims.0 * dims.1` elements, where `dims.0` counts columns (`i`) and
    /// `dims.1` counts rows (`j`). Element `(i, j)` sits at `i * dims.1 + j`,
    /// matching a nested `array[i][j]` layout.
    ///
    /// Returns `None` if the key falls outside `dims`.
    pub fn into_dense_index(self, dims: (usize, usize)) -> Option<usize> {
        let (i, j) = (self.i as usize, self.j as usize);
        if i < dims.0 && j < dims.1 {
            Some(i * dims.1 + j)
        } else {
            None
        }
    }

    /// Inverse of [`CellKey::into_dense_index`] for an array with `rows`
    /// elements along `j`.
    pub fn from_dense_index(index: usize, rows: usize) -> Self {
        Self::new((index / rows) as u32, (index % rows) as u32)
    }
}

impl From<(u32, u32)> for CellKey {
    fn from((i, j): (u32, u32)) -> Self {
        Self::new(i, j)
    }
}

impl From<CellKey> for (u32, u32) {
    fn from(key: CellKey) -> Self {
        (key.i, key.j)
    }
}

impl Display for CellKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}
