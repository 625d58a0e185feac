//! Verification passes for target compatibility.
//!
//! These run last and turn a circuit the hardware cannot execute into an
//! error instead of a silently wrong result.

use tracing::debug;

use qsyc_ir::Circuit;

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Analysis pass that checks every operation is in the native gate set.
///
/// Matrix gates are never native, whatever their label.
pub struct NativeGateVerification;

impl Pass for NativeGateVerification {
    fn name(&self) -> &'static str {
        "native_gate_verification"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let Some(gate_set) = properties.gate_set.as_ref() else {
            return Ok(());
        };
        for op in circuit.operations() {
            let native = op
                .standard_gate()
                .is_some_and(|g| gate_set.contains(g.name()));
            if !native {
                return Err(CompileError::GateNotNative(op.gate.name().to_string()));
            }
        }
        debug!("All {} operations are native", circuit.num_ops());
        Ok(())
    }

    fn should_run(&self, _circuit: &Circuit, properties: &PropertySet) -> bool {
        properties.gate_set.is_some()
    }
}

/// Analysis pass that checks operations only use device qubits and
/// coupled pairs.
pub struct DeviceConnectivity;

impl Pass for DeviceConnectivity {
    fn name(&self) -> &'static str {
        "device_connectivity"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let Some(device) = properties.device.as_ref() else {
            return Ok(());
        };
        for op in circuit.operations() {
            if let Some(q) = op.qubits.iter().find(|q| !device.contains(**q)) {
                return Err(CompileError::QubitNotOnDevice(*q));
            }
            for (i, &a) in op.qubits.iter().enumerate() {
                for &b in &op.qubits[i + 1..] {
                    if !device.is_coupled(a, b) {
                        return Err(CompileError::NotAdjacent {
                            gate: op.gate.name().to_string(),
                            qubit1: a,
                            qubit2: b,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn should_run(&self, _circuit: &Circuit, properties: &PropertySet) -> bool {
        properties.device.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{Device, NativeGateSet};
    use qsyc_ir::{GridQubit, MatrixGate, Unitary};

    fn q(row: i32, col: i32) -> GridQubit {
        GridQubit::new(row, col)
    }

    #[test]
    fn test_native_gates_pass() {
        let mut circuit = Circuit::new();
        circuit
            .phased_x(0.4, 0.2, q(0, 0))
            .unwrap()
            .cz(q(0, 0), q(0, 1))
            .unwrap()
            .t(q(0, 1))
            .unwrap();
        let mut props = PropertySet::new().with_gate_set(NativeGateSet::xmon());
        assert!(NativeGateVerification.run(&mut circuit, &mut props).is_ok());
    }

    #[test]
    fn test_non_native_rejected() {
        let mut props = PropertySet::new().with_gate_set(NativeGateSet::xmon());

        let mut circuit = Circuit::new();
        circuit.cx(q(0, 0), q(0, 1)).unwrap();
        assert!(matches!(
            NativeGateVerification.run(&mut circuit, &mut props),
            Err(CompileError::GateNotNative(name)) if name == "cx"
        ));

        let mut circuit = Circuit::new();
        circuit
            .gate(MatrixGate::new(Unitary::identity(1)).with_label("rz"), [q(0, 0)])
            .unwrap();
        assert!(NativeGateVerification.run(&mut circuit, &mut props).is_err());
    }

    #[test]
    fn test_connectivity() {
        let mut props = PropertySet::new().with_device(Device::grid(2, 2));

        let mut ok = Circuit::new();
        ok.cz(q(0, 0), q(1, 0)).unwrap();
        assert!(DeviceConnectivity.run(&mut ok, &mut props).is_ok());

        let mut diagonal = Circuit::new();
        diagonal.cz(q(0, 0), q(1, 1)).unwrap();
        let err = DeviceConnectivity.run(&mut diagonal, &mut props).unwrap_err();
        assert!(matches!(err, CompileError::NotAdjacent { .. }));
        assert!(err.is_unsupported());

        let mut off = Circuit::new();
        off.x(q(5, 5)).unwrap();
        assert!(matches!(
            DeviceConnectivity.run(&mut off, &mut props),
            Err(CompileError::QubitNotOnDevice(_))
        ));
    }

    #[test]
    fn test_skipped_without_target() {
        let props = PropertySet::new();
        assert!(!NativeGateVerification.should_run(&Circuit::new(), &props));
        assert!(!DeviceConnectivity.should_run(&Circuit::new(), &props));
    }
}
