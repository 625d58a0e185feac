//! Hardware-targeted circuit optimization.

use serde::{Deserialize, Serialize};
use tracing::debug;

use qsyc_ir::Circuit;

use crate::error::CompileResult;
use crate::manager::PassManagerBuilder;
use crate::property::{Device, NativeGateSet};

/// Counters collected while optimizing a circuit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationStats {
    /// Operation count before optimization.
    pub ops_before: usize,
    /// Operation count after optimization.
    pub ops_after: usize,
    /// Single-qubit runs rewritten by merging.
    pub merged_runs: usize,
    /// CZ pairs removed.
    pub cancelled_cz_pairs: usize,
    /// Identity-equivalent gates removed.
    pub dropped_gates: usize,
}

/// Rewrites a converted circuit for a hardware target.
pub trait CircuitOptimizer: Send + Sync {
    /// Get the name of this optimizer.
    fn name(&self) -> &str;

    /// Optimize `circuit` in place.
    fn optimize(&self, circuit: &mut Circuit) -> CompileResult<OptimizationStats>;
}

/// Pass-manager based optimizer for the xmon gate set.
///
/// Every call builds a fresh pass pipeline and `PropertySet`, so one
/// optimizer can be shared between threads.
#[derive(Debug, Clone)]
pub struct XmonOptimizer {
    optimization_level: u8,
    gate_set: NativeGateSet,
    device: Option<Device>,
}

impl XmonOptimizer {
    /// Create an optimizer at the given level, verifying against the
    /// xmon gate set.
    pub fn new(optimization_level: u8) -> Self {
        Self {
            optimization_level,
            gate_set: NativeGateSet::xmon(),
            device: None,
        }
    }

    /// Also verify connectivity on `device`.
    #[must_use]
    pub fn with_device(mut self, device: Device) -> Self {
        self.device = Some(device);
        self
    }

    /// The configured optimization level.
    pub fn optimization_level(&self) -> u8 {
        self.optimization_level
    }
}

impl Default for XmonOptimizer {
    fn default() -> Self {
        Self::new(crate::manager::MAX_OPTIMIZATION_LEVEL)
    }
}

impl CircuitOptimizer for XmonOptimizer {
    fn name(&self) -> &'static str {
        "xmon"
    }

    fn optimize(&self, circuit: &mut Circuit) -> CompileResult<OptimizationStats> {
        let mut builder = PassManagerBuilder::new()
            .with_optimization_level(self.optimization_level)
            .with_gate_set(self.gate_set.clone());
        if let Some(device) = &self.device {
            builder = builder.with_device(device.clone());
        }
        let (pm, mut props) = builder.build();

        props.insert(OptimizationStats {
            ops_before: circuit.num_ops(),
            ..OptimizationStats::default()
        });
        pm.run(circuit, &mut props)?;

        let mut stats = props.remove::<OptimizationStats>().unwrap_or_default();
        stats.ops_after = circuit.num_ops();
        debug!(
            "Optimized {} -> {} ops ({} runs merged, {} CZ pairs cancelled)",
            stats.ops_before, stats.ops_after, stats.merged_runs, stats.cancelled_cz_pairs
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompileError;
    use qsyc_ir::GridQubit;

    fn q(row: i32, col: i32) -> GridQubit {
        GridQubit::new(row, col)
    }

    #[test]
    fn test_optimize_reports_stats() {
        let (a, b) = (q(0, 0), q(0, 1));
        let mut circuit = Circuit::new();
        circuit
            .phased_x(0.5, 0.0, a)
            .unwrap()
            .phased_x(-0.5, 0.0, a)
            .unwrap()
            .cz(a, b)
            .unwrap()
            .cz(a, b)
            .unwrap()
            .t(b)
            .unwrap();
        let before = circuit.unitary(&[a, b]).unwrap();

        let stats = XmonOptimizer::new(2).optimize(&mut circuit).unwrap();
        assert_eq!(stats.ops_before, 5);
        assert_eq!(stats.ops_after, 1);
        assert_eq!(stats.cancelled_cz_pairs, 1);
        assert!(
            circuit
                .unitary(&[a, b])
                .unwrap()
                .equiv_up_to_global_phase(&before, 1e-9)
        );
    }

    #[test]
    fn test_level_zero_only_verifies() {
        let (a, b) = (q(0, 0), q(0, 1));
        let mut circuit = Circuit::new();
        circuit.cz(a, b).unwrap().cz(a, b).unwrap();
        let stats = XmonOptimizer::new(0).optimize(&mut circuit).unwrap();
        assert_eq!(stats.ops_after, 2);

        let mut circuit = Circuit::new();
        circuit.h(a).unwrap();
        assert!(matches!(
            XmonOptimizer::new(0).optimize(&mut circuit),
            Err(CompileError::GateNotNative(_))
        ));
    }

    #[test]
    fn test_device_violation() {
        let mut circuit = Circuit::new();
        circuit.cz(q(0, 0), q(1, 1)).unwrap();
        let optimizer = XmonOptimizer::new(1).with_device(Device::grid(2, 2));
        let err = optimizer.optimize(&mut circuit).unwrap_err();
        assert!(err.is_unsupported());
    }
}
