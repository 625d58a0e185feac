//! Error types for the IR crate.

use crate::qubit::GridQubit;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit not part of the requested basis ordering.
    #[error("Qubit {qubit} not found in qubit order{}", format_gate_context(.gate_name))]
    QubitNotFound {
        /// The qubit that was not found.
        qubit: GridQubit,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: usize,
        /// Actual number of qubits provided.
        got: usize,
    },

    /// Duplicate qubit in operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: GridQubit,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Matrix is not square with a power-of-two dimension.
    #[error("Matrix of shape {rows}x{cols} is not a 2^n x 2^n matrix")]
    InvalidShape {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Two matrices of different dimension were combined.
    #[error("Matrix dimension mismatch: {left} vs {right}")]
    DimensionMismatch {
        /// Dimension of the left operand.
        left: usize,
        /// Dimension of the right operand.
        right: usize,
    },

    /// Embedding positions are out of range or repeated.
    #[error("Cannot embed at positions {positions:?} in a {num_qubits}-qubit register")]
    InvalidEmbedding {
        /// Requested register positions.
        positions: Vec<usize>,
        /// Register size.
        num_qubits: usize,
    },

    /// Qubit literal could not be parsed.
    #[error("Invalid grid qubit '{0}', expected 'row,col' or 'q(row, col)'")]
    InvalidQubit(String),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
