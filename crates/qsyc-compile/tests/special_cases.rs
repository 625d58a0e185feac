//! Integration tests for the special-case branches of the dispatcher.
//!
//! Each recognised matrix must take its own branch and, where operations
//! are produced, reproduce the input up to global phase using only the
//! native gate set.

use qsyc_compile::{
    CompilerConfig, DeviceSpec, MatchPolicy, NativeGateSet, Outcome, Strategy, UnitaryCompiler,
};
use qsyc_ir::{Circuit, Complex64, GridQubit, Operation, StandardGate, Unitary};

/// Helper: composed unitary of an operation list over `qubits`.
fn compose(ops: &[Operation], qubits: &[GridQubit]) -> Unitary {
    Circuit::from_operations(ops.to_vec()).unitary(qubits).unwrap()
}

/// Helper: assert every operation is in the xmon gate set.
fn assert_native(ops: &[Operation]) {
    let set = NativeGateSet::xmon();
    for op in ops {
        assert!(set.contains(op.gate.name()), "non-native operation {op}");
    }
}

#[test]
fn test_identity_on_scattered_qubits() {
    let qubits = [GridQubit::new(3, 1), GridQubit::new(0, 7)];
    let d = UnitaryCompiler::new()
        .compile(&qubits, &Unitary::identity(2))
        .unwrap();
    assert_eq!(d.strategy, Strategy::Identity);
    assert!(d.operations().unwrap().is_empty());
    assert!(d.ancillas.is_empty());
}

#[test]
fn test_identity_within_tolerance() {
    let mut data = Unitary::identity(1).as_array().clone();
    data[[0, 0]] = Complex64::new(1.0 - 1e-12, 0.0);
    let near = Unitary::new(data).unwrap();
    let d = UnitaryCompiler::new()
        .compile(&GridQubit::line(1), &near)
        .unwrap();
    assert_eq!(d.strategy, Strategy::Identity);
}

#[test]
fn test_named_single_qubit_gates_emit_one_operation() {
    let q = GridQubit::new(2, 5);
    let compiler = UnitaryCompiler::new();
    for gate in [
        StandardGate::X,
        StandardGate::Y,
        StandardGate::Z,
        StandardGate::S,
        StandardGate::T,
    ] {
        let d = compiler.compile(&[q], &gate.matrix()).unwrap();
        let ops = d.operations().unwrap();
        assert_eq!(ops, &[Operation::single(gate, q).unwrap()]);
        assert!(d.ancillas.is_empty());
    }
}

#[test]
fn test_phase_multiple_of_named_gate_is_generic() {
    // -X differs from X by a global phase only, so it is not the X special case
    // but still compiles to an equivalent native sequence.
    let minus_x = Unitary::new(StandardGate::X.matrix().as_array().mapv(|z| -z)).unwrap();
    let q = GridQubit::line(1);
    let d = UnitaryCompiler::new().compile(&q, &minus_x).unwrap();
    assert_eq!(d.strategy, Strategy::Generic);
    let ops = d.operations().unwrap();
    assert_native(ops);
    assert!(compose(ops, &q).equiv_up_to_global_phase(&minus_x, 1e-8));
}

#[test]
fn test_unnamed_single_qubit_gates_are_converted() {
    let q = GridQubit::line(1);
    for gate in [StandardGate::H, StandardGate::Sdg, StandardGate::Rx(0.3)] {
        let d = UnitaryCompiler::new().compile(&q, &gate.matrix()).unwrap();
        assert_eq!(d.strategy, Strategy::Generic);
        let ops = d.operations().unwrap();
        assert_native(ops);
        assert!(compose(ops, &q).equiv_up_to_global_phase(&gate.matrix(), 1e-8));
    }
}

#[test]
fn test_three_qubit_gates_on_grid_corner() {
    let qubits = [GridQubit::new(0, 0), GridQubit::new(0, 1), GridQubit::new(1, 1)];
    let compiler = UnitaryCompiler::new();
    for gate in [StandardGate::CCX, StandardGate::CSwap, StandardGate::CCZ] {
        let d = compiler.compile(&qubits, &gate.matrix()).unwrap();
        assert_eq!(d.strategy, Strategy::ThreeQubit(gate));
        assert!(d.ancillas.is_empty());
        let ops = d.operations().unwrap();
        assert_native(ops);
        assert!(
            compose(ops, &qubits).equiv_up_to_global_phase(&gate.matrix(), 1e-8),
            "{gate} not reproduced"
        );
        assert!(ops.iter().filter(|op| op.num_qubits() == 2).count() <= 18);
    }
}

#[test]
fn test_three_qubit_priority_order() {
    // Toffoli is tried before Fredkin and CCZ; each only matches itself.
    let compiler = UnitaryCompiler::new();
    let qubits = GridQubit::line(3);
    let d = compiler.compile(&qubits, &StandardGate::CSwap.matrix()).unwrap();
    assert_eq!(d.strategy, Strategy::ThreeQubit(StandardGate::CSwap));
    let d = compiler.compile(&qubits, &StandardGate::CCZ.matrix()).unwrap();
    assert_eq!(d.strategy, Strategy::ThreeQubit(StandardGate::CCZ));
}

#[test]
fn test_toffoli_on_unconnected_qubits_not_implemented() {
    let config = CompilerConfig {
        device: Some(DeviceSpec::Grid { rows: 3, cols: 3 }),
        ..CompilerConfig::default()
    };
    let compiler = UnitaryCompiler::from_config(&config).unwrap();
    let qubits = [GridQubit::new(0, 0), GridQubit::new(2, 2), GridQubit::new(1, 0)];
    let d = compiler.compile(&qubits, &StandardGate::CCX.matrix()).unwrap();
    assert_eq!(d.strategy, Strategy::ThreeQubit(StandardGate::CCX));
    assert!(matches!(d.outcome, Outcome::NotImplemented { .. }));
    assert!(d.ancillas.is_empty());
}

#[test]
fn test_three_qubit_gates_on_line_device() {
    let config = CompilerConfig {
        device: Some(DeviceSpec::Grid { rows: 1, cols: 3 }),
        ..CompilerConfig::default()
    };
    let compiler = UnitaryCompiler::from_config(&config).unwrap();
    let qubits = GridQubit::line(3);
    for gate in [StandardGate::CCX, StandardGate::CSwap, StandardGate::CCZ] {
        let d = compiler.compile(&qubits, &gate.matrix()).unwrap();
        assert_eq!(d.strategy, Strategy::ThreeQubit(gate));
        assert!(
            matches!(d.outcome, Outcome::Implemented { .. }),
            "{gate} not implemented on a line: {:?}",
            d.outcome
        );
        let ops = d.operations().unwrap();
        assert_native(ops);
        assert!(compose(ops, &qubits).equiv_up_to_global_phase(&gate.matrix(), 1e-8));
    }
}

#[test]
fn test_doubly_controlled_gates_with_middle_qubit_last() {
    // The qubit coupled to both others is listed last; the network must
    // still avoid the uncoupled (0, 0)-(1, 1) pair.
    let config = CompilerConfig {
        device: Some(DeviceSpec::Grid { rows: 2, cols: 2 }),
        ..CompilerConfig::default()
    };
    let compiler = UnitaryCompiler::from_config(&config).unwrap();
    let qubits = [GridQubit::new(0, 0), GridQubit::new(1, 1), GridQubit::new(0, 1)];
    for gate in [StandardGate::CCX, StandardGate::CCZ] {
        let d = compiler.compile(&qubits, &gate.matrix()).unwrap();
        let ops = d.operations().expect("coupled layout");
        for op in ops.iter().filter(|op| op.num_qubits() == 2) {
            assert!(op.qubits[0].is_adjacent(&op.qubits[1]), "{op} spans a diagonal");
        }
        assert!(compose(ops, &qubits).equiv_up_to_global_phase(&gate.matrix(), 1e-8));
    }
}

#[test]
fn test_exact_policy_from_config() {
    let config: CompilerConfig =
        serde_json::from_str(r#"{"match_policy": {"kind": "exact"}}"#).unwrap();
    let compiler = UnitaryCompiler::from_config(&config).unwrap();
    assert_eq!(compiler.match_policy(), MatchPolicy::Exact);

    let mut data = StandardGate::T.matrix().as_array().clone();
    data[[1, 1]] += Complex64::new(0.0, 1e-10);
    let nudged = Unitary::new(data).unwrap();
    let d = compiler.compile(&GridQubit::line(1), &nudged).unwrap();
    assert_eq!(d.strategy, Strategy::Generic);

    let d = compiler
        .compile(&GridQubit::line(1), &StandardGate::T.matrix())
        .unwrap();
    assert_eq!(d.strategy, Strategy::SingleQubit(StandardGate::T));
}

#[test]
fn test_decomposition_json() {
    let d = UnitaryCompiler::new()
        .compile(&GridQubit::line(1), &StandardGate::S.matrix())
        .unwrap();
    let json = serde_json::to_value(&d).unwrap();
    assert_eq!(json["outcome"]["status"], "implemented");
    assert_eq!(json["ancillas"], serde_json::json!([]));

    let back: qsyc_compile::Decomposition = serde_json::from_value(json).unwrap();
    assert_eq!(back, d);
}
