//! Operations binding gates to grid qubits.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::qubit::GridQubit;

/// A gate applied to an ordered list of grid qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// The gate.
    pub gate: Gate,
    /// Qubits in the gate's qubit order.
    pub qubits: Vec<GridQubit>,
}

impl Operation {
    /// Create an operation, checking arity and distinct qubits.
    pub fn new(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = GridQubit>) -> IrResult<Self> {
        let gate = gate.into();
        let qubits: Vec<GridQubit> = qubits.into_iter().collect();

        if qubits.len() != gate.num_qubits() {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected: gate.num_qubits(),
                got: qubits.len(),
            });
        }
        for (i, q) in qubits.iter().enumerate() {
            if qubits[..i].contains(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: *q,
                    gate_name: Some(gate.name().to_string()),
                });
            }
        }

        Ok(Self { gate, qubits })
    }

    /// Create a single-qubit operation.
    pub fn single(gate: StandardGate, qubit: GridQubit) -> IrResult<Self> {
        Self::new(gate, [qubit])
    }

    /// Create a two-qubit operation.
    pub fn pair(gate: StandardGate, q0: GridQubit, q1: GridQubit) -> IrResult<Self> {
        Self::new(gate, [q0, q1])
    }

    /// Number of qubits this operation touches.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the standard gate, if this operation applies one.
    pub fn standard_gate(&self) -> Option<&StandardGate> {
        self.gate.as_standard()
    }

    /// Check if this operation acts on `qubit`.
    pub fn acts_on(&self, qubit: &GridQubit) -> bool {
        self.qubits.contains(qubit)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gate)?;
        for (i, q) in self.qubits.iter().enumerate() {
            write!(f, "{}{q}", if i == 0 { " " } else { ", " })?;
        }
        Ok(())
    }
}
