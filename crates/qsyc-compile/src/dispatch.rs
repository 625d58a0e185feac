//! Unitary dispatch onto Sycamore-native operations.
//!
//! [`UnitaryCompiler::compile`] recognises a few matrices by comparison
//! before falling back to generic conversion:
//!
//! 1. the identity, which needs no operations;
//! 2. on one qubit, X, Y, Z, S and T, emitted as that single gate;
//! 3. on any qubit count, Toffoli, Fredkin and CCZ, converted as named
//!    gates rather than as matrices;
//! 4. anything else, converted as a [`MatrixGate`].
//!
//! Converted sequences are then optimized. A matrix the converter cannot
//! decompose yields [`Outcome::NotImplemented`] instead of an error.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use qsyc_ir::{Circuit, GridQubit, MatrixGate, Operation, StandardGate, Unitary};

use crate::config::{CompilerConfig, MatchPolicy};
use crate::converter::{GateSetConverter, XmonConverter};
use crate::error::{CompileError, CompileResult};
use crate::optimizer::{CircuitOptimizer, XmonOptimizer};
use crate::property::Device;

/// Single-qubit gates emitted verbatim, in matching priority.
pub const SINGLE_QUBIT_SPECIAL_CASES: [StandardGate; 5] = [
    StandardGate::X,
    StandardGate::Y,
    StandardGate::Z,
    StandardGate::S,
    StandardGate::T,
];

/// Three-qubit gates converted by name, in matching priority.
pub const THREE_QUBIT_SPECIAL_CASES: [StandardGate; 3] =
    [StandardGate::CCX, StandardGate::CSwap, StandardGate::CCZ];

/// Which dispatch branch produced a decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// The matrix is the identity.
    Identity,
    /// The matrix is a named single-qubit gate.
    SingleQubit(StandardGate),
    /// The matrix is a named three-qubit gate.
    ThreeQubit(StandardGate),
    /// No special case applied.
    Generic,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Identity => write!(f, "identity"),
            Strategy::SingleQubit(gate) => write!(f, "single-qubit {gate}"),
            Strategy::ThreeQubit(gate) => write!(f, "three-qubit {gate}"),
            Strategy::Generic => write!(f, "generic"),
        }
    }
}

/// Result of compiling one unitary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Native operations reproducing the matrix up to global phase.
    Implemented {
        /// Operations in time order.
        operations: Vec<Operation>,
    },
    /// The matrix has no native decomposition.
    NotImplemented {
        /// Why conversion gave up.
        reason: String,
    },
}

/// Operations, ancillas and the branch that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    /// Compilation outcome.
    pub outcome: Outcome,
    /// Auxiliary qubits; never populated.
    pub ancillas: Vec<GridQubit>,
    /// Dispatch branch.
    pub strategy: Strategy,
}

impl Decomposition {
    fn new(outcome: Outcome, strategy: Strategy) -> Self {
        Self {
            outcome,
            ancillas: Vec::new(),
            strategy,
        }
    }

    /// Operations if the matrix was implemented.
    pub fn operations(&self) -> Option<&[Operation]> {
        match &self.outcome {
            Outcome::Implemented { operations } => Some(operations),
            Outcome::NotImplemented { .. } => None,
        }
    }

    /// Whether a native sequence was produced.
    pub fn is_implemented(&self) -> bool {
        matches!(self.outcome, Outcome::Implemented { .. })
    }

    /// Split into operations (or `None`) and ancillas.
    pub fn into_parts(self) -> (Option<Vec<Operation>>, Vec<GridQubit>) {
        let operations = match self.outcome {
            Outcome::Implemented { operations } => Some(operations),
            Outcome::NotImplemented { .. } => None,
        };
        (operations, self.ancillas)
    }
}

/// Dispatcher from unitaries to native operation sequences.
pub struct UnitaryCompiler {
    converter: Box<dyn GateSetConverter>,
    optimizer: Box<dyn CircuitOptimizer>,
    match_policy: MatchPolicy,
    device: Option<Device>,
}

impl UnitaryCompiler {
    /// Create a compiler with the xmon converter and optimizer and no
    /// device constraint.
    pub fn new() -> Self {
        Self {
            converter: Box::new(XmonConverter::new()),
            optimizer: Box::new(XmonOptimizer::default()),
            match_policy: MatchPolicy::default(),
            device: None,
        }
    }

    /// Create a compiler from a validated configuration.
    pub fn from_config(config: &CompilerConfig) -> CompileResult<Self> {
        config.validate()?;
        let device = config.device.as_ref().map(|spec| spec.build());
        let mut optimizer = XmonOptimizer::new(config.optimization_level);
        if let Some(device) = &device {
            optimizer = optimizer.with_device(device.clone());
        }
        Ok(Self {
            converter: Box::new(XmonConverter::new()),
            optimizer: Box::new(optimizer),
            match_policy: config.match_policy,
            device,
        })
    }

    /// Replace the gate-set converter.
    #[must_use]
    pub fn with_converter(mut self, converter: impl GateSetConverter + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }

    /// Replace the optimizer.
    #[must_use]
    pub fn with_optimizer(mut self, optimizer: impl CircuitOptimizer + 'static) -> Self {
        self.optimizer = Box::new(optimizer);
        self
    }

    /// Set how matrices are compared against the special cases.
    #[must_use]
    pub fn with_match_policy(mut self, match_policy: MatchPolicy) -> Self {
        self.match_policy = match_policy;
        self
    }

    /// The special-case matching policy.
    pub fn match_policy(&self) -> MatchPolicy {
        self.match_policy
    }

    /// Compile `matrix` acting on `qubits` (first qubit most significant).
    #[instrument(skip_all, fields(num_qubits = qubits.len()))]
    pub fn compile(&self, qubits: &[GridQubit], matrix: &Unitary) -> CompileResult<Decomposition> {
        debug!("Compiling matrix\n{matrix}");
        self.validate(qubits, matrix)?;

        let n = qubits.len();
        if self.match_policy.matches(matrix, &Unitary::identity(n)) {
            debug!("Matched identity");
            return Ok(Decomposition::new(
                Outcome::Implemented {
                    operations: Vec::new(),
                },
                Strategy::Identity,
            ));
        }

        if n == 1 {
            if let Some(gate) = self.find_match(matrix, &SINGLE_QUBIT_SPECIAL_CASES) {
                debug!("Matched single-qubit gate {gate}");
                let op = Operation::single(gate, qubits[0])?;
                return Ok(Decomposition::new(
                    Outcome::Implemented {
                        operations: vec![op],
                    },
                    Strategy::SingleQubit(gate),
                ));
            }
        }

        if let Some(gate) = self.find_match(matrix, &THREE_QUBIT_SPECIAL_CASES) {
            debug!("Matched three-qubit gate {gate}");
            let op = Operation::new(gate, qubits.iter().copied())?;
            return Ok(Decomposition::new(
                self.lower(&op)?,
                Strategy::ThreeQubit(gate),
            ));
        }

        let op = Operation::new(MatrixGate::new(matrix.clone()), qubits.iter().copied())?;
        Ok(Decomposition::new(self.lower(&op)?, Strategy::Generic))
    }

    fn validate(&self, qubits: &[GridQubit], matrix: &Unitary) -> CompileResult<()> {
        if qubits.is_empty() {
            return Err(CompileError::InvalidInput(
                "at least one target qubit is required".into(),
            ));
        }
        if matrix.num_qubits() != qubits.len() {
            return Err(CompileError::InvalidInput(format!(
                "{0}x{0} matrix does not act on {1} qubits",
                matrix.dim(),
                qubits.len()
            )));
        }
        for (i, q) in qubits.iter().enumerate() {
            if qubits[..i].contains(q) {
                return Err(CompileError::InvalidInput(format!(
                    "qubit {q} appears more than once"
                )));
            }
        }
        if let Some(device) = &self.device {
            if let Some(q) = qubits.iter().find(|q| !device.contains(**q)) {
                return Err(CompileError::QubitNotOnDevice(*q));
            }
        }
        Ok(())
    }

    fn find_match(&self, matrix: &Unitary, candidates: &[StandardGate]) -> Option<StandardGate> {
        candidates
            .iter()
            .copied()
            .find(|gate| self.match_policy.matches(matrix, &gate.matrix()))
    }

    /// Convert and optimize one operation.
    fn lower(&self, op: &Operation) -> CompileResult<Outcome> {
        let result = self.converter.convert(op).and_then(|ops| {
            let mut circuit = Circuit::from_operations(ops);
            let stats = self.optimizer.optimize(&mut circuit)?;
            debug!(
                "Converted {} with {}: {} ops, {} after {} optimizer",
                op.gate.name(),
                self.converter.name(),
                stats.ops_before,
                stats.ops_after,
                self.optimizer.name()
            );
            Ok(circuit.into_operations())
        });

        match result {
            Ok(operations) => Ok(Outcome::Implemented { operations }),
            Err(e) if e.is_unsupported() => {
                warn!("No native decomposition for {}: {e}", op.gate.name());
                Ok(Outcome::NotImplemented {
                    reason: e.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }
}

impl Default for UnitaryCompiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Compile `matrix` on `qubits` with a default [`UnitaryCompiler`].
///
/// Returns the operations (or `None` when the matrix is not implemented)
/// and the ancilla list, which is always empty.
pub fn matrix_to_sycamore_operations(
    qubits: &[GridQubit],
    matrix: &Unitary,
) -> CompileResult<(Option<Vec<Operation>>, Vec<GridQubit>)> {
    Ok(UnitaryCompiler::new().compile(qubits, matrix)?.into_parts())
}
