//! Gate-set conversion into Sycamore-native operations.

use tracing::trace;

use qsyc_ir::{Gate, GridQubit, Operation, StandardGate};

use crate::error::{CompileError, CompileResult};
use crate::property::NativeGateSet;
use crate::synthesis::synthesize_two_qubit;
use crate::unitary::{EPSILON, Unitary2x2};

/// Expansion depth after which conversion gives up.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Rewrites an operation into operations from a target gate set.
pub trait GateSetConverter: Send + Sync {
    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Convert one operation.
    ///
    /// Returns [`CompileError::Unsupported`] when no decomposition exists.
    fn convert(&self, op: &Operation) -> CompileResult<Vec<Operation>>;
}

/// Converter onto the CZ-based xmon gate set.
///
/// Standard gates expand through fixed identities (CX via CZ, Toffoli via
/// the T/CX network, Fredkin via Toffoli); single-qubit gates become
/// PhasedX + Rz; two-qubit matrices go through Givens synthesis.
pub struct XmonConverter {
    gate_set: NativeGateSet,
    max_depth: usize,
    atol: f64,
}

impl XmonConverter {
    /// Create a converter for [`NativeGateSet::xmon`].
    pub fn new() -> Self {
        Self {
            gate_set: NativeGateSet::xmon(),
            max_depth: DEFAULT_MAX_DEPTH,
            atol: EPSILON,
        }
    }

    /// Set the expansion depth limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the tolerance below which rotations are dropped.
    #[must_use]
    pub fn with_tolerance(mut self, atol: f64) -> Self {
        self.atol = atol;
        self
    }

    /// The target gate set.
    pub fn gate_set(&self) -> &NativeGateSet {
        &self.gate_set
    }

    fn is_native(&self, op: &Operation) -> bool {
        op.standard_gate()
            .is_some_and(|g| self.gate_set.contains(g.name()))
    }

    fn expand(&self, op: &Operation, depth: usize, out: &mut Vec<Operation>) -> CompileResult<()> {
        if self.is_native(op) {
            out.push(op.clone());
            return Ok(());
        }
        if depth >= self.max_depth {
            return Err(CompileError::unsupported(
                op.gate.name(),
                format!("no native form within {} expansion steps", self.max_depth),
            ));
        }
        let rewritten = self.rewrite(op)?;
        trace!(
            "{} expanded into {} operations at depth {depth}",
            op.gate.name(),
            rewritten.len()
        );
        for sub in &rewritten {
            self.expand(sub, depth + 1, out)?;
        }
        Ok(())
    }

    /// One rewriting step; output may still contain non-native gates.
    fn rewrite(&self, op: &Operation) -> CompileResult<Vec<Operation>> {
        if op.num_qubits() == 1 {
            return self.rewrite_single(op);
        }
        match &op.gate {
            Gate::Standard(gate) => rewrite_standard(*gate, &op.qubits),
            Gate::Matrix(m) if m.num_qubits() == 2 => {
                synthesize_two_qubit(&m.matrix, op.qubits[0], op.qubits[1], self.atol)
            }
            Gate::Matrix(m) => Err(CompileError::unsupported(
                op.gate.name(),
                format!("no synthesis for {}-qubit matrices", m.num_qubits()),
            )),
        }
    }

    fn rewrite_single(&self, op: &Operation) -> CompileResult<Vec<Operation>> {
        let u = Unitary2x2::from_unitary(&op.gate.matrix()).ok_or_else(|| {
            CompileError::unsupported(op.gate.name(), "expected a single-qubit matrix")
        })?;
        u.phased_x_z()
            .gates(self.atol)
            .into_iter()
            .map(|g| Operation::single(g, op.qubits[0]).map_err(CompileError::from))
            .collect()
    }
}

impl Default for XmonConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl GateSetConverter for XmonConverter {
    fn name(&self) -> &'static str {
        "xmon"
    }

    fn convert(&self, op: &Operation) -> CompileResult<Vec<Operation>> {
        let mut out = Vec::new();
        self.expand(op, 0, &mut out)?;
        Ok(out)
    }
}

/// Fixed decompositions of multi-qubit standard gates.
fn rewrite_standard(gate: StandardGate, qubits: &[GridQubit]) -> CompileResult<Vec<Operation>> {
    use StandardGate::{CCX, CCZ, CSwap, CX, CZ, H, Swap};

    Ok(match (gate, qubits) {
        (CX, &[c, t]) => vec![
            Operation::single(H, t)?,
            Operation::pair(CZ, c, t)?,
            Operation::single(H, t)?,
        ],
        (Swap, &[a, b]) => vec![
            Operation::pair(CX, a, b)?,
            Operation::pair(CX, b, a)?,
            Operation::pair(CX, a, b)?,
        ],
        (CCX, &[a, b, c]) => {
            let mut ops = vec![Operation::single(H, c)?];
            ops.extend(ccz_network(a, b, c)?);
            ops.push(Operation::single(H, c)?);
            ops
        }
        (CCZ, &[a, b, c]) => ccz_network(a, b, c)?,
        (CSwap, &[c, a, b]) => vec![
            Operation::pair(CX, b, a)?,
            Operation::new(CCX, [c, a, b])?,
            Operation::pair(CX, b, a)?,
        ],
        (gate, _) => {
            return Err(CompileError::unsupported(
                gate.name(),
                "no decomposition rule",
            ));
        }
    })
}

/// Doubly-controlled Z as a T-phase network whose CX gates only touch the
/// pairs (a, b) and (b, c) after reordering.
///
/// CCZ is symmetric in its qubits, so the qubit adjacent to both others is
/// moved to the middle. On a line of three grid qubits every CX then acts
/// on lattice neighbours.
fn ccz_network(a: GridQubit, b: GridQubit, c: GridQubit) -> CompileResult<Vec<Operation>> {
    use StandardGate::{CX, T, Tdg};

    let (a, b, c) = if !b.is_adjacent(&a) {
        (a, c, b)
    } else if !b.is_adjacent(&c) {
        (b, a, c)
    } else {
        (a, b, c)
    };
    let sweep = || -> CompileResult<[Operation; 2]> {
        Ok([Operation::pair(CX, a, b)?, Operation::pair(CX, b, c)?])
    };

    // Phases a + b + c - (a^b) + (a^b^c) - (a^c) - (b^c), in units of pi/4.
    let mut ops = vec![
        Operation::single(T, a)?,
        Operation::single(T, b)?,
        Operation::single(T, c)?,
    ];
    ops.extend(sweep()?);
    ops.push(Operation::single(Tdg, b)?);
    ops.push(Operation::single(T, c)?);
    ops.extend(sweep()?);
    ops.push(Operation::single(Tdg, c)?);
    ops.extend(sweep()?);
    ops.push(Operation::single(Tdg, c)?);
    ops.extend(sweep()?);
    Ok(ops)
}
