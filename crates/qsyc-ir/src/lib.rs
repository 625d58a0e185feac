//! qsyc Circuit Intermediate Representation
//!
//! Core data types shared by the qsyc compiler: grid qubits on the processor
//! lattice, gates, dense unitaries and flat operation lists.
//!
//! # Core Components
//!
//! - **Qubits**: [`GridQubit`] addresses a qubit by row and column
//! - **Gates**: [`StandardGate`] for named gates and [`MatrixGate`] for gates
//!   given only by their matrix
//! - **Matrices**: [`Unitary`] for dense 2^n x 2^n complex matrices
//! - **Operations**: [`Operation`] binds a gate to its qubits
//! - **Circuit**: [`Circuit`] is an ordered list of operations
//!
//! # Example: CX from CZ
//!
//! ```rust
//! use qsyc_ir::{Circuit, GridQubit, StandardGate};
//!
//! let (c, t) = (GridQubit::new(0, 0), GridQubit::new(0, 1));
//! let mut circuit = Circuit::new();
//! circuit.h(t).unwrap().cz(c, t).unwrap().h(t).unwrap();
//!
//! let u = circuit.unitary(&[c, t]).unwrap();
//! assert!(u.approx_eq(&StandardGate::CX.matrix(), 1e-12));
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `H` | 1 | Hadamard gate |
//! | `S`, `Sdg`, `T`, `Tdg` | 1 | Phase gates |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | Rotation gates |
//! | `PhasedX` | 1 | Phased X rotation |
//! | `CX`, `CZ` | 2 | Controlled-NOT and Controlled-Z |
//! | `Swap` | 2 | SWAP gate |
//! | `CCX`, `CSwap`, `CCZ` | 3 | Toffoli, Fredkin and doubly-controlled Z |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod matrix;
pub mod operation;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Gate, MatrixGate, StandardGate};
pub use matrix::Unitary;
pub use num_complex::Complex64;
pub use operation::Operation;
pub use qubit::GridQubit;
