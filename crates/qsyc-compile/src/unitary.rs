//! Unitary matrix utilities for single-qubit gates.
//!
//! Provides 2x2 unitary products, ZYZ Euler decomposition and the
//! PhasedX + Rz form native to Sycamore-style hardware.

use num_complex::Complex64;
use std::f64::consts::{FRAC_PI_2, PI};

use qsyc_ir::{StandardGate, Unitary};

/// Tolerance for floating point comparisons.
pub const EPSILON: f64 = 1e-10;

/// A 2x2 unitary matrix in row-major order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unitary2x2 {
    /// The matrix elements in row-major order: [[a, b], [c, d]].
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Create a new 2x2 unitary matrix.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// Create the identity matrix.
    pub fn identity() -> Self {
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
        )
    }

    /// Take a 2x2 [`Unitary`]; `None` for any other dimension.
    pub fn from_unitary(u: &Unitary) -> Option<Self> {
        (u.dim() == 2).then(|| Self::new(u.get(0, 0), u.get(0, 1), u.get(1, 0), u.get(1, 1)))
    }

    /// Matrix of a single-qubit standard gate.
    pub fn from_gate(gate: &StandardGate) -> Option<Self> {
        if gate.num_qubits() != 1 {
            return None;
        }
        Self::from_unitary(&gate.matrix())
    }

    /// Convert back into a dense [`Unitary`].
    pub fn to_unitary(&self) -> Unitary {
        let [a, b, c, d] = self.data;
        Unitary::single_qubit([[a, b], [c, d]])
    }

    /// Multiply this matrix by another: self * other.
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Get the conjugate transpose (dagger).
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }

    /// Check if this is the identity up to global phase, within `atol`.
    pub fn is_identity(&self, atol: f64) -> bool {
        let [a, b, c, d] = self.data;
        b.norm() <= atol && c.norm() <= atol && (a - d).norm() <= atol
    }

    /// Decompose into e^{i·phase} · RZ(alpha) · RY(beta) · RZ(gamma).
    ///
    /// Returns (alpha, beta, gamma, phase) with beta in [0, π].
    pub fn zyz_decomposition(&self) -> (f64, f64, f64, f64) {
        let [a, b, c, d] = self.data;

        let det = a * d - b * c;
        let global_phase = det.arg() / 2.0;

        // Remove global phase to get an SU(2) matrix
        // [[cos(β/2)·e^{-i(α+γ)/2}, -sin(β/2)·e^{-i(α-γ)/2}],
        //  [sin(β/2)·e^{i(α-γ)/2},   cos(β/2)·e^{i(α+γ)/2}]]
        let phase_factor = Complex64::from_polar(1.0, -global_phase);
        let a = a * phase_factor;
        let b = b * phase_factor;
        let c = c * phase_factor;

        // Rounding can push |a| past 1.
        let beta = 2.0 * a.norm().min(1.0).acos();

        if beta < EPSILON {
            let alpha_plus_gamma = -2.0 * a.arg();
            return (
                alpha_plus_gamma / 2.0,
                0.0,
                alpha_plus_gamma / 2.0,
                global_phase,
            );
        }

        if (beta - PI).abs() < EPSILON {
            let alpha_minus_gamma = -2.0 * (-b).arg();
            return (
                alpha_minus_gamma / 2.0,
                PI,
                -alpha_minus_gamma / 2.0,
                global_phase,
            );
        }

        let alpha_plus_gamma = -2.0 * a.arg();
        let alpha_minus_gamma = 2.0 * c.arg();

        let alpha = f64::midpoint(alpha_plus_gamma, alpha_minus_gamma);
        let gamma = (alpha_plus_gamma - alpha_minus_gamma) / 2.0;

        (alpha, beta, gamma, global_phase)
    }

    /// Decompose into the native form PhasedX(theta, phi) followed by Rz(rz).
    pub fn phased_x_z(&self) -> PhasedXZ {
        let (alpha, beta, gamma, _) = self.zyz_decomposition();
        PhasedXZ {
            theta: beta,
            phi: normalize_angle(FRAC_PI_2 - gamma),
            rz: normalize_angle(alpha + gamma),
        }
    }
}

/// Normalize angles to [-pi, pi].
pub fn normalize_angle(angle: f64) -> f64 {
    if angle.is_nan() || angle.is_infinite() {
        return 0.0;
    }
    let mut a = angle.rem_euclid(2.0 * PI);
    if a > PI {
        a -= 2.0 * PI;
    }
    a
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    #[allow(clippy::needless_pass_by_value)]
    fn mul(self, rhs: Self) -> Self::Output {
        Unitary2x2::mul(&self, &rhs)
    }
}

/// A single-qubit unitary as PhasedX(theta, phi) then Rz(rz), up to phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhasedXZ {
    /// X rotation angle, in [0, π].
    pub theta: f64,
    /// Phase of the X axis.
    pub phi: f64,
    /// Trailing Z rotation.
    pub rz: f64,
}

impl PhasedXZ {
    /// Gates in time order, dropping rotations smaller than `atol`.
    pub fn gates(&self, atol: f64) -> Vec<StandardGate> {
        let mut gates = Vec::with_capacity(2);
        if self.theta.abs() > atol {
            gates.push(StandardGate::PhasedX(self.theta, self.phi));
        }
        if self.rz.abs() > atol {
            gates.push(StandardGate::Rz(self.rz));
        }
        gates
    }
}
