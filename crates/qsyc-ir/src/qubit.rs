//! Grid qubit addressing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IrError;

/// A qubit on the processor lattice, addressed by row and column.
///
/// Ordering is row-major, so sorting a set of grid qubits walks the
/// lattice line by line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridQubit {
    /// Row on the lattice.
    pub row: i32,
    /// Column on the lattice.
    pub col: i32,
}

impl GridQubit {
    /// Create a new grid qubit.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Check whether `other` is a nearest neighbour on the lattice.
    pub fn is_adjacent(&self, other: &GridQubit) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }

    /// The four lattice neighbours, in up/down/left/right order.
    pub fn neighbors(&self) -> [GridQubit; 4] {
        [
            GridQubit::new(self.row - 1, self.col),
            GridQubit::new(self.row + 1, self.col),
            GridQubit::new(self.row, self.col - 1),
            GridQubit::new(self.row, self.col + 1),
        ]
    }

    /// All qubits of a `rows` x `cols` rectangle anchored at (0, 0), row-major.
    pub fn rect(rows: i32, cols: i32) -> Vec<GridQubit> {
        (0..rows)
            .flat_map(|row| (0..cols).map(move |col| GridQubit::new(row, col)))
            .collect()
    }

    /// A horizontal line of `len` qubits starting at (0, 0).
    pub fn line(len: i32) -> Vec<GridQubit> {
        Self::rect(1, len)
    }
}

impl fmt::Display for GridQubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for GridQubit {
    fn from((row, col): (i32, i32)) -> Self {
        GridQubit::new(row, col)
    }
}

impl FromStr for GridQubit {
    type Err = IrError;

    /// Parses `row,col` or the display form `q(row, col)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix("q(")
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed);

        let mut parts = inner.split(',').map(str::trim);
        let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(IrError::InvalidQubit(s.to_string()));
        };

        let row = row
            .parse()
            .map_err(|_| IrError::InvalidQubit(s.to_string()))?;
        let col = col
            .parse()
            .map_err(|_| IrError::InvalidQubit(s.to_string()))?;
        Ok(GridQubit::new(row, col))
    }
}
