//! qsyc Unitary Compilation
//!
//! This crate turns a unitary matrix on a handful of grid qubits into a
//! sequence of operations native to a Sycamore-style processor.
//!
//! # Overview
//!
//! [`UnitaryCompiler`] dispatches on the matrix:
//! 1. **Identity**: no operations
//! 2. **Named single-qubit gates** (X, Y, Z, S, T): the gate itself
//! 3. **Named three-qubit gates** (Toffoli, Fredkin, CCZ): converted by name
//! 4. **Anything else**: converted as a raw matrix
//!
//! Converted sequences pass through a [`CircuitOptimizer`] built on the
//! [`PassManager`].
//!
//! # Architecture
//!
//! ```text
//! (qubits, matrix)
//!       |
//!       v
//! +------------------+
//! | UnitaryCompiler  | <-- MatchPolicy (tolerance or exact)
//! +------------------+
//!       |
//!       +-- GateSetConverter   (XmonConverter, Givens synthesis)
//!       +-- CircuitOptimizer   (XmonOptimizer -> PassManager)
//!       |
//!       v
//! Decomposition { outcome, ancillas, strategy }
//! ```
//!
//! # Example: Toffoli
//!
//! ```rust
//! use qsyc_compile::{Strategy, UnitaryCompiler};
//! use qsyc_ir::{Circuit, GridQubit, StandardGate};
//!
//! let qubits = GridQubit::line(3);
//! let toffoli = StandardGate::CCX.matrix();
//!
//! let decomposition = UnitaryCompiler::new().compile(&qubits, &toffoli).unwrap();
//! assert_eq!(decomposition.strategy, Strategy::ThreeQubit(StandardGate::CCX));
//! assert!(decomposition.ancillas.is_empty());
//!
//! let ops = decomposition.operations().unwrap().to_vec();
//! let got = Circuit::from_operations(ops).unitary(&qubits).unwrap();
//! assert!(got.equiv_up_to_global_phase(&toffoli, 1e-8));
//! ```
//!
//! # Optimization Levels
//!
//! | Level | Passes Included |
//! |-------|-----------------|
//! | 0 | Verification only |
//! | 1 | + Single-qubit merging, negligible gate removal |
//! | 2 | + CZ cancellation, second merge |
//!
//! # Custom Passes
//!
//! Implement the [`Pass`] trait to create custom compilation passes:
//!
//! ```rust
//! use qsyc_compile::{CompileResult, Pass, PassKind, PropertySet};
//! use qsyc_ir::Circuit;
//!
//! struct MyCustomPass;
//!
//! impl Pass for MyCustomPass {
//!     fn name(&self) -> &str { "my_custom_pass" }
//!     fn kind(&self) -> PassKind { PassKind::Transformation }
//!
//!     fn run(&self, circuit: &mut Circuit, props: &mut PropertySet) -> CompileResult<()> {
//!         Ok(())
//!     }
//! }
//! ```

pub mod config;
pub mod converter;
pub mod dispatch;
pub mod error;
pub mod manager;
pub mod optimizer;
pub mod pass;
pub mod property;
pub mod synthesis;
pub mod unitary;

// Built-in passes
pub mod passes;

pub use config::{CompilerConfig, DeviceSpec, MatchPolicy};
pub use converter::{GateSetConverter, XmonConverter};
pub use dispatch::{
    Decomposition, Outcome, Strategy, UnitaryCompiler, matrix_to_sycamore_operations,
};
pub use error::{CompileError, CompileResult};
pub use manager::{PassManager, PassManagerBuilder};
pub use optimizer::{CircuitOptimizer, OptimizationStats, XmonOptimizer};
pub use pass::{Pass, PassKind};
pub use property::{Device, NativeGateSet, PropertySet};
