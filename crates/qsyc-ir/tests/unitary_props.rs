//! Property-based tests for circuit unitaries.

use proptest::prelude::*;
use qsyc_ir::{Circuit, GridQubit, StandardGate};

/// A random gate on a register of `n` qubits.
#[derive(Debug, Clone)]
enum GateOp {
    PhasedX(f64, f64, usize),
    Rz(f64, usize),
    Cz(usize, usize),
}

fn arb_gate_op(n: usize) -> impl Strategy<Value = GateOp> {
    prop_oneof![
        (-3.2..3.2f64, -3.2..3.2f64, 0..n).prop_map(|(t, p, q)| GateOp::PhasedX(t, p, q)),
        (-3.2..3.2f64, 0..n).prop_map(|(t, q)| GateOp::Rz(t, q)),
        (0..n, 0..n)
            .prop_filter("qubits must differ", |(a, b)| a != b)
            .prop_map(|(a, b)| GateOp::Cz(a, b)),
    ]
}

fn arb_circuit() -> impl Strategy<Value = (Vec<GridQubit>, Circuit)> {
    (2_i32..=4).prop_flat_map(|n| {
        prop::collection::vec(arb_gate_op(n as usize), 1..=12).prop_map(move |ops| {
            let qubits = GridQubit::line(n);
            let mut circuit = Circuit::new();
            for op in ops {
                match op {
                    GateOp::PhasedX(t, p, q) => {
                        circuit.phased_x(t, p, qubits[q]).unwrap();
                    }
                    GateOp::Rz(t, q) => {
                        circuit.rz(t, qubits[q]).unwrap();
                    }
                    GateOp::Cz(a, b) => {
                        circuit.cz(qubits[a], qubits[b]).unwrap();
                    }
                }
            }
            (qubits, circuit)
        })
    })
}

proptest! {
    #[test]
    fn test_circuit_unitary_is_unitary((qubits, circuit) in arb_circuit()) {
        let u = circuit.unitary(&qubits).unwrap();
        prop_assert_eq!(u.num_qubits(), qubits.len());
        prop_assert!(u.is_unitary(1e-9));
    }

    #[test]
    fn test_dagger_is_inverse((qubits, circuit) in arb_circuit()) {
        let u = circuit.unitary(&qubits).unwrap();
        let product = u.dagger().dot(&u).unwrap();
        prop_assert!(product.is_identity(1e-9));
    }

    #[test]
    fn test_order_permutation_is_consistent((qubits, circuit) in arb_circuit()) {
        // Reversing the basis order equals conjugating by the reversal.
        let forward = circuit.unitary(&qubits).unwrap();
        let reversed: Vec<GridQubit> = qubits.iter().rev().copied().collect();
        let backward = circuit.unitary(&reversed).unwrap();
        let n = qubits.len();
        let positions: Vec<usize> = (0..n).rev().collect();
        let relabelled = forward.embed(&positions, n).unwrap();
        prop_assert!(relabelled.approx_eq(&backward, 1e-9));
    }
}

#[test]
fn test_empty_circuit_is_identity() {
    let qubits = GridQubit::line(3);
    let u = Circuit::new().unitary(&qubits).unwrap();
    assert!(u.is_identity(0.0));
    assert!(
        StandardGate::CZ
            .matrix()
            .embed(&[0, 2], 3)
            .unwrap()
            .is_unitary(1e-12)
    );
}
