//! Pass manager for orchestrating optimization.

use tracing::{debug, info, instrument};

use qsyc_ir::Circuit;

use crate::error::CompileResult;
use crate::pass::Pass;
use crate::passes::{
    CancelAdjacentCz, DeviceConnectivity, DropNegligibleGates, MergeSingleQubitGates,
    NativeGateVerification,
};
use crate::property::{Device, NativeGateSet, PropertySet};

/// Highest supported optimization level.
pub const MAX_OPTIMIZATION_LEVEL: u8 = 2;

/// Manages and executes a sequence of compilation passes.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Run all passes on the given circuit.
    #[instrument(skip(self, circuit, properties))]
    pub fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        info!(
            "Running pass manager with {} passes on circuit with {} ops",
            self.passes.len(),
            circuit.num_ops()
        );

        for pass in &self.passes {
            if pass.should_run(circuit, properties) {
                debug!("Running pass: {}", pass.name());
                pass.run(circuit, properties)?;
                debug!("Pass {} completed, ops: {}", pass.name(), circuit.num_ops());
            } else {
                debug!("Skipping pass: {}", pass.name());
            }
        }

        info!(
            "Pass manager completed, final depth: {}, ops: {}",
            circuit.depth(),
            circuit.num_ops()
        );

        Ok(())
    }

    /// Names of the passes, in run order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating pass managers with preset configurations.
pub struct PassManagerBuilder {
    /// Optimization level (0-2).
    optimization_level: u8,
    /// Target properties.
    properties: PropertySet,
}

impl PassManagerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            optimization_level: 1,
            properties: PropertySet::new(),
        }
    }

    /// Set the optimization level.
    ///
    /// - Level 0: No optimization, only verification
    /// - Level 1: Merge single-qubit runs and drop identities (default)
    /// - Level 2: Also cancel adjacent CZ pairs and re-merge
    #[must_use]
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level.min(MAX_OPTIMIZATION_LEVEL);
        self
    }

    /// Set the target properties.
    #[must_use]
    pub fn with_properties(mut self, properties: PropertySet) -> Self {
        self.properties = properties;
        self
    }

    /// Set the native gate set.
    #[must_use]
    pub fn with_gate_set(mut self, gate_set: NativeGateSet) -> Self {
        self.properties.gate_set = Some(gate_set);
        self
    }

    /// Set the device.
    #[must_use]
    pub fn with_device(mut self, device: Device) -> Self {
        self.properties.device = Some(device);
        self
    }

    /// Build the pass manager and return it with the properties.
    pub fn build(self) -> (PassManager, PropertySet) {
        let mut pm = PassManager::new();

        if self.optimization_level >= 1 {
            pm.add_pass(MergeSingleQubitGates::new());
            pm.add_pass(DropNegligibleGates::new());
        }

        if self.optimization_level >= 2 {
            pm.add_pass(CancelAdjacentCz);
            pm.add_pass(MergeSingleQubitGates::new());
        }

        if self.properties.gate_set.is_some() {
            pm.add_pass(NativeGateVerification);
        }

        if self.properties.device.is_some() {
            pm.add_pass(DeviceConnectivity);
        }

        (pm, self.properties)
    }
}

impl Default for PassManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsyc_ir::GridQubit;

    #[test]
    fn test_empty_pass_manager() {
        let pm = PassManager::new();
        assert!(pm.is_empty());
        assert_eq!(pm.len(), 0);
    }

    #[test]
    fn test_pass_manager_run() {
        let pm = PassManager::new();
        let mut props = PropertySet::new();

        let (a, b) = (GridQubit::new(0, 0), GridQubit::new(0, 1));
        let mut circuit = Circuit::new();
        circuit.h(a).unwrap().cz(a, b).unwrap();

        pm.run(&mut circuit, &mut props).unwrap();
        assert_eq!(circuit.num_ops(), 2);
    }

    #[test]
    fn test_builder_levels() {
        let (pm, _) = PassManagerBuilder::new().with_optimization_level(0).build();
        assert!(pm.is_empty());

        let (pm, props) = PassManagerBuilder::new()
            .with_optimization_level(1)
            .with_gate_set(NativeGateSet::xmon())
            .build();
        assert_eq!(
            pm.pass_names(),
            vec![
                "merge_single_qubit_gates",
                "drop_negligible_gates",
                "native_gate_verification"
            ]
        );
        assert!(props.gate_set.is_some());

        let (pm, props) = PassManagerBuilder::new()
            .with_optimization_level(7)
            .with_device(Device::grid(2, 2))
            .build();
        assert_eq!(
            pm.pass_names(),
            vec![
                "merge_single_qubit_gates",
                "drop_negligible_gates",
                "cancel_adjacent_cz",
                "merge_single_qubit_gates",
                "device_connectivity"
            ]
        );
        assert!(props.device.is_some());
    }

    #[test]
    fn test_builder_with_properties() {
        let props = PropertySet::new()
            .with_gate_set(NativeGateSet::xmon())
            .with_device(Device::grid(1, 2));
        let (pm, props) = PassManagerBuilder::new()
            .with_optimization_level(0)
            .with_properties(props)
            .build();
        assert_eq!(
            pm.pass_names(),
            vec!["native_gate_verification", "device_connectivity"]
        );
        assert_eq!(props.device.as_ref().map(Device::num_qubits), Some(2));
    }
}
