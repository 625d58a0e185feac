//! Dense unitary matrices.
//!
//! Basis ordering is big-endian: for an operation on qubits `[q0, q1, ...]`,
//! `q0` is the most significant bit of the row/column index.

use std::fmt;

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// A square complex matrix of dimension 2^n.
///
/// Unitarity is not enforced on construction; callers that need it can
/// check with [`Unitary::is_unitary`]. The shape is always validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<Vec<Complex64>>",
    into = "Vec<Vec<Complex64>>"
)]
pub struct Unitary {
    data: Array2<Complex64>,
}

impl Unitary {
    /// Wrap an ndarray matrix, validating its shape.
    pub fn new(data: Array2<Complex64>) -> IrResult<Self> {
        let (rows, cols) = data.dim();
        if rows != cols || !rows.is_power_of_two() {
            return Err(IrError::InvalidShape { rows, cols });
        }
        Ok(Self { data })
    }

    /// Build from row-major elements.
    pub fn from_row_major(dim: usize, elements: Vec<Complex64>) -> IrResult<Self> {
        if dim == 0 || elements.len() != dim * dim {
            return Err(IrError::InvalidShape {
                rows: dim,
                cols: elements.len().checked_div(dim).unwrap_or(0),
            });
        }
        let data = Array2::from_shape_vec((dim, dim), elements).map_err(|_| {
            IrError::InvalidShape {
                rows: dim,
                cols: dim,
            }
        })?;
        Self::new(data)
    }

    /// Build from a list of rows.
    pub fn from_rows(rows: Vec<Vec<Complex64>>) -> IrResult<Self> {
        let n = rows.len();
        if let Some(bad) = rows.iter().find(|r| r.len() != n) {
            return Err(IrError::InvalidShape {
                rows: n,
                cols: bad.len(),
            });
        }
        Self::from_row_major(n, rows.into_iter().flatten().collect())
    }

    /// The identity on `num_qubits` qubits.
    pub fn identity(num_qubits: usize) -> Self {
        Self {
            data: Array2::eye(1 << num_qubits),
        }
    }

    /// A diagonal matrix with the given entries.
    pub fn diagonal(entries: &[Complex64]) -> IrResult<Self> {
        let dim = entries.len();
        let mut data = Array2::zeros((dim, dim));
        for (i, &e) in entries.iter().enumerate() {
            data[[i, i]] = e;
        }
        Self::new(data)
    }

    /// A single-qubit matrix from its rows.
    pub fn single_qubit(rows: [[Complex64; 2]; 2]) -> Self {
        Self {
            data: Array2::from_shape_fn((2, 2), |(i, j)| rows[i][j]),
        }
    }

    /// The identity with the all-ones basis state negated (CZ, CCZ, ...).
    pub fn multi_controlled_z(num_qubits: usize) -> Self {
        let mut data = Array2::<Complex64>::eye(1 << num_qubits);
        let last = (1 << num_qubits) - 1;
        data[[last, last]] = Complex64::new(-1.0, 0.0);
        Self { data }
    }

    /// The matrix that swaps basis states `a` and `b` and fixes the rest.
    pub fn permutation_swap(num_qubits: usize, a: usize, b: usize) -> Self {
        let mut data = Array2::<Complex64>::eye(1 << num_qubits);
        data[[a, a]] = Complex64::new(0.0, 0.0);
        data[[b, b]] = Complex64::new(0.0, 0.0);
        data[[a, b]] = Complex64::new(1.0, 0.0);
        data[[b, a]] = Complex64::new(1.0, 0.0);
        Self { data }
    }

    /// Matrix dimension (2^n).
    #[inline]
    pub fn dim(&self) -> usize {
        self.data.nrows()
    }

    /// Number of qubits the matrix acts on.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.dim().trailing_zeros() as usize
    }

    /// Element at (`row`, `col`).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[[row, col]]
    }

    /// Borrow the underlying array.
    pub fn as_array(&self) -> &Array2<Complex64> {
        &self.data
    }

    /// Matrix rows as nested vectors.
    pub fn rows(&self) -> Vec<Vec<Complex64>> {
        self.data.outer_iter().map(|row| row.to_vec()).collect()
    }

    /// Matrix product `self · other`.
    pub fn dot(&self, other: &Unitary) -> IrResult<Unitary> {
        if self.dim() != other.dim() {
            return Err(IrError::DimensionMismatch {
                left: self.dim(),
                right: other.dim(),
            });
        }
        Ok(Self {
            data: self.data.dot(&other.data),
        })
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Unitary {
        Self {
            data: self.data.t().mapv(|z| z.conj()),
        }
    }

    /// Tensor product `self ⊗ other`; `self` occupies the high-order qubits.
    pub fn kron(&self, other: &Unitary) -> Unitary {
        let (n, m) = (self.dim(), other.dim());
        let mut data = Array2::zeros((n * m, n * m));
        for ((i, j), &a) in self.data.indexed_iter() {
            for ((k, l), &b) in other.data.indexed_iter() {
                data[[i * m + k, j * m + l]] = a * b;
            }
        }
        Self { data }
    }

    /// Frobenius distance, or `None` when the shapes differ.
    pub fn distance(&self, other: &Unitary) -> Option<f64> {
        if self.dim() != other.dim() {
            return None;
        }
        let sum: f64 = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a - b).norm_sqr())
            .sum();
        Some(sum.sqrt())
    }

    /// Equal within `atol` in Frobenius norm.
    pub fn approx_eq(&self, other: &Unitary, atol: f64) -> bool {
        self.distance(other).is_some_and(|d| d <= atol)
    }

    /// Element-wise equality without tolerance.
    #[allow(clippy::float_cmp)]
    pub fn exactly_eq(&self, other: &Unitary) -> bool {
        self.dim() == other.dim() && self.data.iter().zip(other.data.iter()).all(|(a, b)| a == b)
    }

    /// Check whether this is the identity within `atol`.
    pub fn is_identity(&self, atol: f64) -> bool {
        self.approx_eq(&Unitary::identity(self.num_qubits()), atol)
    }

    /// Check `U† U = I` within `atol`.
    pub fn is_unitary(&self, atol: f64) -> bool {
        self.dagger()
            .dot(self)
            .is_ok_and(|product| product.is_identity(atol))
    }

    /// Equal within `atol` after removing a global phase.
    ///
    /// The phase is fixed by the largest-magnitude entry of `other`.
    pub fn equiv_up_to_global_phase(&self, other: &Unitary, atol: f64) -> bool {
        if self.dim() != other.dim() {
            return false;
        }
        let Some((idx, anchor)) = other
            .data
            .indexed_iter()
            .max_by(|a, b| a.1.norm().total_cmp(&b.1.norm()))
        else {
            return true;
        };
        if anchor.norm() <= atol {
            return self.approx_eq(other, atol);
        }
        let ratio = self.data[idx] / anchor;
        if ratio.norm() <= f64::EPSILON {
            return false;
        }
        let phase = ratio / ratio.norm();
        let aligned = Self {
            data: other.data.mapv(|z| z * phase),
        };
        self.approx_eq(&aligned, atol)
    }

    /// Lift this matrix onto `num_qubits` qubits.
    ///
    /// `positions[j]` is the register position of this matrix's j-th qubit
    /// (position 0 is the most significant).
    pub fn embed(&self, positions: &[usize], num_qubits: usize) -> IrResult<Unitary> {
        let k = positions.len();
        if k != self.num_qubits() {
            return Err(IrError::DimensionMismatch {
                left: 1 << k,
                right: self.dim(),
            });
        }
        let mut mask = 0usize;
        let mut shifts = Vec::with_capacity(k);
        for &p in positions {
            if p >= num_qubits || mask & (1 << (num_qubits - 1 - p)) != 0 {
                return Err(IrError::InvalidEmbedding {
                    positions: positions.to_vec(),
                    num_qubits,
                });
            }
            let shift = num_qubits - 1 - p;
            mask |= 1 << shift;
            shifts.push(shift);
        }

        let dim = 1usize << num_qubits;
        let mut data = Array2::zeros((dim, dim));
        for col in 0..dim {
            let sub_col = extract_bits(col, &shifts);
            let base = col & !mask;
            for sub_row in 0..self.dim() {
                let row = deposit_bits(base, sub_row, &shifts);
                data[[row, col]] = self.data[[sub_row, sub_col]];
            }
        }
        Ok(Self { data })
    }
}

/// Gather the bits at `shifts` (most significant first) into a sub-index.
fn extract_bits(index: usize, shifts: &[usize]) -> usize {
    shifts
        .iter()
        .fold(0, |acc, &s| (acc << 1) | ((index >> s) & 1))
}

/// Scatter the bits of `sub` onto `shifts` over `base`.
fn deposit_bits(base: usize, sub: usize, shifts: &[usize]) -> usize {
    let k = shifts.len();
    shifts
        .iter()
        .enumerate()
        .fold(base, |acc, (j, &s)| acc | (((sub >> (k - 1 - j)) & 1) << s))
}

impl TryFrom<Vec<Vec<Complex64>>> for Unitary {
    type Error = IrError;

    fn try_from(rows: Vec<Vec<Complex64>>) -> Result<Self, Self::Error> {
        Unitary::from_rows(rows)
    }
}

impl From<Unitary> for Vec<Vec<Complex64>> {
    fn from(u: Unitary) -> Self {
        u.rows()
    }
}

impl fmt::Display for Unitary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, row) in self.data.outer_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "[")?;
            for (j, z) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:.4}{:+.4}i", z.re, z.im)?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}
