//! Quantum gate types.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};
use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::matrix::Unitary;

/// Standard gates with known semantics.
///
/// Angles are in radians. Multi-qubit matrices use the gate's qubit order,
/// first qubit most significant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford+T gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate diag(1, e^{iλ}).
    P(f64),
    /// Phased X rotation: PhasedX(θ, φ) = RZ(φ) · RX(θ) · RZ(-φ).
    PhasedX(f64, f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
    /// Fredkin gate (CSWAP).
    CSwap,
    /// Doubly-controlled Z gate.
    CCZ,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::PhasedX(_, _) => "phased_x",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::CCX => "ccx",
            StandardGate::CSwap => "cswap",
            StandardGate::CCZ => "ccz",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_)
            | StandardGate::PhasedX(_, _) => 1,

            StandardGate::CX | StandardGate::CZ | StandardGate::Swap => 2,

            StandardGate::CCX | StandardGate::CSwap | StandardGate::CCZ => 3,
        }
    }

    /// Get the angle parameters of this gate.
    pub fn parameters(&self) -> Vec<f64> {
        match *self {
            StandardGate::Rx(p) | StandardGate::Ry(p) | StandardGate::Rz(p) | StandardGate::P(p) => {
                vec![p]
            }
            StandardGate::PhasedX(theta, phi) => vec![theta, phi],
            _ => vec![],
        }
    }

    /// The unitary matrix of this gate.
    pub fn matrix(&self) -> Unitary {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);

        match *self {
            StandardGate::I => Unitary::identity(1),
            StandardGate::X => one_qubit([zero, one, one, zero]),
            StandardGate::Y => one_qubit([zero, -i, i, zero]),
            StandardGate::Z => one_qubit([one, zero, zero, -one]),
            StandardGate::H => {
                let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
                one_qubit([h, h, h, -h])
            }
            StandardGate::S => one_qubit([one, zero, zero, i]),
            StandardGate::Sdg => one_qubit([one, zero, zero, -i]),
            StandardGate::T => one_qubit([one, zero, zero, Complex64::from_polar(1.0, FRAC_PI_4)]),
            StandardGate::Tdg => {
                one_qubit([one, zero, zero, Complex64::from_polar(1.0, -FRAC_PI_4)])
            }
            StandardGate::Rx(theta) => {
                let (s, c) = (theta / 2.0).sin_cos();
                one_qubit([
                    Complex64::new(c, 0.0),
                    Complex64::new(0.0, -s),
                    Complex64::new(0.0, -s),
                    Complex64::new(c, 0.0),
                ])
            }
            StandardGate::Ry(theta) => {
                let (s, c) = (theta / 2.0).sin_cos();
                one_qubit([
                    Complex64::new(c, 0.0),
                    Complex64::new(-s, 0.0),
                    Complex64::new(s, 0.0),
                    Complex64::new(c, 0.0),
                ])
            }
            StandardGate::Rz(theta) => one_qubit([
                Complex64::from_polar(1.0, -theta / 2.0),
                zero,
                zero,
                Complex64::from_polar(1.0, theta / 2.0),
            ]),
            StandardGate::P(lambda) => {
                one_qubit([one, zero, zero, Complex64::from_polar(1.0, lambda)])
            }
            StandardGate::PhasedX(theta, phi) => {
                // [[cos(θ/2), -i·e^{-iφ}·sin(θ/2)], [-i·e^{iφ}·sin(θ/2), cos(θ/2)]]
                let (s, c) = (theta / 2.0).sin_cos();
                one_qubit([
                    Complex64::new(c, 0.0),
                    -i * Complex64::from_polar(s, -phi),
                    -i * Complex64::from_polar(s, phi),
                    Complex64::new(c, 0.0),
                ])
            }
            StandardGate::CX => Unitary::permutation_swap(2, 0b10, 0b11),
            StandardGate::CZ => Unitary::multi_controlled_z(2),
            StandardGate::Swap => Unitary::permutation_swap(2, 0b01, 0b10),
            StandardGate::CCX => Unitary::permutation_swap(3, 0b110, 0b111),
            StandardGate::CSwap => Unitary::permutation_swap(3, 0b101, 0b110),
            StandardGate::CCZ => Unitary::multi_controlled_z(3),
        }
    }
}

/// Build a 2x2 matrix from row-major entries.
fn one_qubit([a, b, c, d]: [Complex64; 4]) -> Unitary {
    Unitary::single_qubit([[a, b], [c, d]])
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.parameters();
        if params.is_empty() {
            write!(f, "{}", self.name())
        } else {
            let rendered: Vec<String> = params.iter().map(|p| format!("{p:.4}")).collect();
            write!(f, "{}({})", self.name(), rendered.join(", "))
        }
    }
}

/// A gate defined only by its unitary matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixGate {
    /// The unitary matrix.
    pub matrix: Unitary,
    /// Optional label for display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl MatrixGate {
    /// Wrap a unitary matrix as a gate.
    pub fn new(matrix: Unitary) -> Self {
        Self {
            matrix,
            label: None,
        }
    }

    /// Add a label to the gate.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.matrix.num_qubits()
    }
}

/// A quantum gate, either standard or matrix-defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A gate given by an explicit matrix.
    Matrix(MatrixGate),
}

impl Gate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Gate::Standard(g) => g.name(),
            Gate::Matrix(g) => g.label.as_deref().unwrap_or("matrix"),
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        match self {
            Gate::Standard(g) => g.num_qubits(),
            Gate::Matrix(g) => g.num_qubits(),
        }
    }

    /// The unitary matrix of this gate.
    pub fn matrix(&self) -> Unitary {
        match self {
            Gate::Standard(g) => g.matrix(),
            Gate::Matrix(g) => g.matrix.clone(),
        }
    }

    /// Get the standard gate, if this is one.
    pub fn as_standard(&self) -> Option<&StandardGate> {
        match self {
            Gate::Standard(g) => Some(g),
            Gate::Matrix(_) => None,
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::Standard(gate)
    }
}

impl From<MatrixGate> for Gate {
    fn from(gate: MatrixGate) -> Self {
        Gate::Matrix(gate)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Standard(g) => write!(f, "{g}"),
            Gate::Matrix(g) => write!(f, "{}[{}q]", self.name(), g.num_qubits()),
        }
    }
}
