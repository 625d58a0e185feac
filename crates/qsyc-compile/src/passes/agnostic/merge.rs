//! Single-qubit gate merging pass.

use rustc_hash::FxHashMap;

use qsyc_ir::{Circuit, GridQubit, Operation};

use crate::error::CompileResult;
use crate::optimizer::OptimizationStats;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;
use crate::unitary::{EPSILON, Unitary2x2};

use super::record_stats;

/// Merges maximal runs of single-qubit gates on a wire into at most a
/// `PhasedX` followed by an `Rz`.
///
/// A run that is a single gate already in the native gate set is left
/// untouched, so named gates such as `t` survive. Runs that multiply out
/// to the identity disappear.
pub struct MergeSingleQubitGates {
    atol: f64,
}

/// Pending single-qubit run on one wire.
#[derive(Default)]
struct Run {
    ops: Vec<Operation>,
    matrix: Unitary2x2,
}

impl MergeSingleQubitGates {
    /// Create a merge pass with the default rotation tolerance.
    pub fn new() -> Self {
        Self { atol: EPSILON }
    }

    /// Create a merge pass that drops rotations smaller than `atol`.
    pub fn with_tolerance(atol: f64) -> Self {
        Self { atol }
    }

    /// Emit the replacement for a finished run.
    fn flush(
        &self,
        qubit: GridQubit,
        run: Run,
        properties: &PropertySet,
        out: &mut Vec<Operation>,
        merged: &mut usize,
    ) -> CompileResult<()> {
        let keep_single = run.ops.len() == 1
            && properties.gate_set.as_ref().is_none_or(|set| {
                run.ops[0]
                    .standard_gate()
                    .is_some_and(|g| set.contains(g.name()))
            });
        if run.ops.is_empty() || keep_single {
            out.extend(run.ops);
            return Ok(());
        }

        *merged += 1;
        if run.matrix.is_identity(self.atol) {
            return Ok(());
        }
        for gate in run.matrix.phased_x_z().gates(self.atol) {
            out.push(Operation::single(gate, qubit)?);
        }
        Ok(())
    }
}

impl Default for MergeSingleQubitGates {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for MergeSingleQubitGates {
    fn name(&self) -> &'static str {
        "merge_single_qubit_gates"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let ops = std::mem::take(circuit.operations_mut());
        let mut out = Vec::with_capacity(ops.len());
        let mut pending: FxHashMap<GridQubit, Run> = FxHashMap::default();
        let mut merged = 0;

        for op in ops {
            let single = (op.num_qubits() == 1)
                .then(|| Unitary2x2::from_unitary(&op.gate.matrix()))
                .flatten();

            if let Some(u) = single {
                let run = pending.entry(op.qubits[0]).or_default();
                run.matrix = u * run.matrix;
                run.ops.push(op);
                continue;
            }

            // Wires touched by a multi-qubit gate close their runs first.
            for q in &op.qubits {
                if let Some(run) = pending.remove(q) {
                    self.flush(*q, run, properties, &mut out, &mut merged)?;
                }
            }
            out.push(op);
        }

        let mut rest: Vec<(GridQubit, Run)> = pending.into_iter().collect();
        rest.sort_by_key(|(q, _)| *q);
        for (q, run) in rest {
            self.flush(q, run, properties, &mut out, &mut merged)?;
        }

        *circuit.operations_mut() = out;
        record_stats(properties, |stats: &mut OptimizationStats| {
            stats.merged_runs += merged;
        });
        Ok(())
    }
}
