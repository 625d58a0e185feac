//! Error types for the compilation crate.

use qsyc_ir::GridQubit;
use thiserror::Error;

/// Errors that can occur during compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] qsyc_ir::IrError),

    /// Qubit list and matrix do not describe a valid request.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The converter has no decomposition for this gate.
    #[error("Cannot decompose '{gate}': {reason}")]
    Unsupported {
        /// Name of the gate.
        gate: String,
        /// Why no decomposition exists.
        reason: String,
    },

    /// A two-qubit operation acts on qubits that are not coupled.
    #[error("Operation '{gate}' acts on {qubit1} and {qubit2}, which are not adjacent")]
    NotAdjacent {
        /// Name of the gate.
        gate: String,
        /// First qubit.
        qubit1: GridQubit,
        /// Second qubit.
        qubit2: GridQubit,
    },

    /// Target qubit is not part of the configured device.
    #[error("Qubit {0} is not on the device")]
    QubitNotOnDevice(GridQubit),

    /// Gate not in the native gate set after conversion.
    #[error("Gate '{0}' is not native to the target gate set")]
    GateNotNative(String),

    /// Pass execution failed.
    #[error("Pass '{name}' failed: {reason}")]
    PassFailed {
        /// Name of the pass.
        name: String,
        /// Failure description.
        reason: String,
    },

    /// Invalid compiler configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl CompileError {
    /// Build a [`CompileError::Unsupported`] error.
    pub fn unsupported(gate: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unsupported {
            gate: gate.into(),
            reason: reason.into(),
        }
    }

    /// Whether this failure means "no native decomposition available"
    /// rather than a caller or internal error.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. } | Self::NotAdjacent { .. })
    }
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
