//! Cancellation passes.

use qsyc_ir::{Circuit, StandardGate, Unitary};

use crate::error::CompileResult;
use crate::optimizer::OptimizationStats;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;
use crate::unitary::{EPSILON, Unitary2x2};

use super::record_stats;

/// CZ cancellation pass.
///
/// Removes pairs of CZ gates on the same qubit pair with nothing on either
/// wire between them. CZ · CZ = I.
pub struct CancelAdjacentCz;

impl CancelAdjacentCz {
    /// Index of the first cancellable CZ pair.
    fn find_pair(circuit: &Circuit) -> Option<(usize, usize)> {
        let ops = circuit.operations();
        for (i, op) in ops.iter().enumerate() {
            if op.standard_gate() != Some(&StandardGate::CZ) {
                continue;
            }
            let (a, b) = (op.qubits[0], op.qubits[1]);
            let next = ops[i + 1..]
                .iter()
                .position(|other| other.acts_on(&a) || other.acts_on(&b))
                .map(|offset| i + 1 + offset);
            if let Some(j) = next {
                let other = &ops[j];
                if other.standard_gate() == Some(&StandardGate::CZ)
                    && other.acts_on(&a)
                    && other.acts_on(&b)
                {
                    return Some((i, j));
                }
            }
        }
        None
    }
}

impl Pass for CancelAdjacentCz {
    fn name(&self) -> &'static str {
        "cancel_adjacent_cz"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let mut cancelled = 0;
        while let Some((i, j)) = Self::find_pair(circuit) {
            let ops = circuit.operations_mut();
            ops.remove(j);
            ops.remove(i);
            cancelled += 1;
        }
        record_stats(properties, |stats: &mut OptimizationStats| {
            stats.cancelled_cz_pairs += cancelled;
        });
        Ok(())
    }
}

/// Removes single-qubit gates equal to the identity up to global phase.
pub struct DropNegligibleGates {
    atol: f64,
}

impl DropNegligibleGates {
    /// Create a pass with the default tolerance.
    pub fn new() -> Self {
        Self { atol: EPSILON }
    }

    /// Create a pass with a custom tolerance.
    pub fn with_tolerance(atol: f64) -> Self {
        Self { atol }
    }

    fn is_negligible(&self, matrix: &Unitary) -> bool {
        Unitary2x2::from_unitary(matrix).is_some_and(|u| u.is_identity(self.atol))
    }
}

impl Default for DropNegligibleGates {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for DropNegligibleGates {
    fn name(&self) -> &'static str {
        "drop_negligible_gates"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let ops = circuit.operations_mut();
        let before = ops.len();
        ops.retain(|op| op.num_qubits() != 1 || !self.is_negligible(&op.gate.matrix()));
        let dropped = before - ops.len();
        record_stats(properties, |stats: &mut OptimizationStats| {
            stats.dropped_gates += dropped;
        });
        Ok(())
    }
}
