//! Moment-free circuit container over grid qubits.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::matrix::Unitary;
use crate::operation::Operation;
use crate::qubit::GridQubit;

/// An ordered list of operations on grid qubits.
///
/// Operations run in list order. The qubit set is whatever the operations
/// touch; there is no fixed register.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    operations: Vec<Operation>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a circuit from existing operations.
    pub fn from_operations(operations: impl IntoIterator<Item = Operation>) -> Self {
        Self {
            operations: operations.into_iter().collect(),
        }
    }

    // =========================================================================
    // Gate builders
    // =========================================================================

    /// Append a gate, validating its operands.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = GridQubit>,
    ) -> IrResult<&mut Self> {
        self.operations.push(Operation::new(gate, qubits)?);
        Ok(self)
    }

    /// Append an already-built operation.
    pub fn push(&mut self, operation: Operation) -> &mut Self {
        self.operations.push(operation);
        self
    }

    /// Append all operations of an iterator.
    pub fn extend(&mut self, operations: impl IntoIterator<Item = Operation>) -> &mut Self {
        self.operations.extend(operations);
        self
    }

    /// Apply H gate.
    pub fn h(&mut self, qubit: GridQubit) -> IrResult<&mut Self> {
        self.gate(StandardGate::H, [qubit])
    }

    /// Apply X gate.
    pub fn x(&mut self, qubit: GridQubit) -> IrResult<&mut Self> {
        self.gate(StandardGate::X, [qubit])
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: GridQubit) -> IrResult<&mut Self> {
        self.gate(StandardGate::T, [qubit])
    }

    /// Apply T-dagger gate.
    pub fn tdg(&mut self, qubit: GridQubit) -> IrResult<&mut Self> {
        self.gate(StandardGate::Tdg, [qubit])
    }

    /// Apply Rz gate.
    pub fn rz(&mut self, theta: f64, qubit: GridQubit) -> IrResult<&mut Self> {
        self.gate(StandardGate::Rz(theta), [qubit])
    }

    /// Apply PhasedX gate.
    pub fn phased_x(&mut self, theta: f64, phi: f64, qubit: GridQubit) -> IrResult<&mut Self> {
        self.gate(StandardGate::PhasedX(theta, phi), [qubit])
    }

    /// Apply CX gate.
    pub fn cx(&mut self, control: GridQubit, target: GridQubit) -> IrResult<&mut Self> {
        self.gate(StandardGate::CX, [control, target])
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, q0: GridQubit, q1: GridQubit) -> IrResult<&mut Self> {
        self.gate(StandardGate::CZ, [q0, q1])
    }

    /// Apply Toffoli gate.
    pub fn ccx(&mut self, c0: GridQubit, c1: GridQubit, target: GridQubit) -> IrResult<&mut Self> {
        self.gate(StandardGate::CCX, [c0, c1, target])
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The operations in execution order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Mutable access for passes that rewrite the list in place.
    pub fn operations_mut(&mut self) -> &mut Vec<Operation> {
        &mut self.operations
    }

    /// Consume the circuit into its operations.
    pub fn into_operations(self) -> Vec<Operation> {
        self.operations
    }

    /// Number of operations.
    pub fn num_ops(&self) -> usize {
        self.operations.len()
    }

    /// Check if the circuit has no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of operations that touch two or more qubits.
    pub fn multi_qubit_count(&self) -> usize {
        self.operations.iter().filter(|op| op.num_qubits() >= 2).count()
    }

    /// Qubits touched by the circuit, sorted.
    pub fn qubits(&self) -> Vec<GridQubit> {
        let mut qubits: Vec<GridQubit> = self
            .operations
            .iter()
            .flat_map(|op| op.qubits.iter().copied())
            .collect();
        qubits.sort();
        qubits.dedup();
        qubits
    }

    /// Circuit depth: the longest chain of operations sharing qubits.
    pub fn depth(&self) -> usize {
        let mut layer: FxHashMap<GridQubit, usize> = FxHashMap::default();
        let mut depth = 0;
        for op in &self.operations {
            let level = op
                .qubits
                .iter()
                .map(|q| layer.get(q).copied().unwrap_or(0))
                .max()
                .unwrap_or(0)
                + 1;
            for q in &op.qubits {
                layer.insert(*q, level);
            }
            depth = depth.max(level);
        }
        depth
    }

    /// The unitary this circuit implements on `order`.
    ///
    /// `order[0]` is the most significant qubit. Every qubit the circuit
    /// touches must appear in `order`.
    pub fn unitary(&self, order: &[GridQubit]) -> IrResult<Unitary> {
        let n = order.len();
        let mut total = Unitary::identity(n);
        for op in &self.operations {
            let positions = op
                .qubits
                .iter()
                .map(|q| {
                    order
                        .iter()
                        .position(|o| o == q)
                        .ok_or_else(|| IrError::QubitNotFound {
                            qubit: *q,
                            gate_name: Some(op.gate.name().to_string()),
                        })
                })
                .collect::<IrResult<Vec<usize>>>()?;
            let lifted = op.gate.matrix().embed(&positions, n)?;
            total = lifted.dot(&total)?;
        }
        Ok(total)
    }
}

impl FromIterator<Operation> for Circuit {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self::from_operations(iter)
    }
}

impl IntoIterator for Circuit {
    type Item = Operation;
    type IntoIter = std::vec::IntoIter<Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.into_iter()
    }
}
