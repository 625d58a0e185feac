//! Compiler configuration.
//!
//! Every field has a default, so an empty document is a valid
//! configuration. Unknown keys are rejected.

use serde::{Deserialize, Serialize};

use qsyc_ir::{GridQubit, Unitary};

use crate::error::{CompileError, CompileResult};
use crate::manager::MAX_OPTIMIZATION_LEVEL;
use crate::property::Device;

/// Default tolerance for special-case matching.
pub const DEFAULT_MATCH_ATOL: f64 = 1e-8;

/// How an input matrix is compared against a named gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Element-wise equality with no tolerance.
    Exact,
    /// Frobenius distance of at most `atol`.
    Tolerance {
        /// Absolute tolerance.
        atol: f64,
    },
}

impl MatchPolicy {
    /// Check whether `matrix` matches `reference` under this policy.
    ///
    /// Matrices of different dimension never match.
    pub fn matches(&self, matrix: &Unitary, reference: &Unitary) -> bool {
        match *self {
            MatchPolicy::Exact => matrix.exactly_eq(reference),
            MatchPolicy::Tolerance { atol } => matrix.approx_eq(reference, atol),
        }
    }
}

impl Default for MatchPolicy {
    fn default() -> Self {
        MatchPolicy::Tolerance {
            atol: DEFAULT_MATCH_ATOL,
        }
    }
}

/// Description of the target device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeviceSpec {
    /// Full rectangle anchored at (0, 0).
    Grid {
        /// Number of rows.
        rows: i32,
        /// Number of columns.
        cols: i32,
    },
    /// Explicit qubit list; neighbours on the lattice are coupled.
    Qubits {
        /// Device qubits.
        qubits: Vec<GridQubit>,
    },
}

impl DeviceSpec {
    /// Build the device graph.
    pub fn build(&self) -> Device {
        match self {
            DeviceSpec::Grid { rows, cols } => Device::grid(*rows, *cols),
            DeviceSpec::Qubits { qubits } => Device::from_qubits(qubits.iter().copied()),
        }
    }
}

/// Configuration of a [`UnitaryCompiler`](crate::UnitaryCompiler).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerConfig {
    /// Special-case matching policy.
    #[serde(default)]
    pub match_policy: MatchPolicy,

    /// Optimizer level, 0 to 2.
    #[serde(default = "default_optimization_level")]
    pub optimization_level: u8,

    /// Target device; unconstrained when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceSpec>,
}

fn default_optimization_level() -> u8 {
    MAX_OPTIMIZATION_LEVEL
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            match_policy: MatchPolicy::default(),
            optimization_level: default_optimization_level(),
            device: None,
        }
    }
}

impl CompilerConfig {
    /// Check value ranges.
    pub fn validate(&self) -> CompileResult<()> {
        if let MatchPolicy::Tolerance { atol } = self.match_policy {
            if !atol.is_finite() || atol < 0.0 {
                return Err(CompileError::InvalidConfiguration(format!(
                    "match tolerance must be a non-negative number, got {atol}"
                )));
            }
        }
        if self.optimization_level > MAX_OPTIMIZATION_LEVEL {
            return Err(CompileError::InvalidConfiguration(format!(
                "optimization level must be at most {MAX_OPTIMIZATION_LEVEL}, got {}",
                self.optimization_level
            )));
        }
        match &self.device {
            Some(DeviceSpec::Grid { rows, cols }) if *rows <= 0 || *cols <= 0 => {
                Err(CompileError::InvalidConfiguration(format!(
                    "grid device must have positive dimensions, got {rows}x{cols}"
                )))
            }
            Some(DeviceSpec::Qubits { qubits }) if qubits.is_empty() => Err(
                CompileError::InvalidConfiguration("device qubit list is empty".into()),
            ),
            _ => Ok(()),
        }
    }
}
