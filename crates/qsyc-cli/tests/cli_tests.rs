//! File-format tests for the CLI.
//!
//! The CLI is a binary crate, so these tests exercise the formats it reads
//! and writes through the underlying crates: matrix JSON, YAML
//! configuration and decomposition JSON.

use std::fs;

use qsyc_compile::{CompilerConfig, Decomposition, Outcome, Strategy, UnitaryCompiler};
use qsyc_ir::{GridQubit, StandardGate, Unitary};

#[test]
fn test_matrix_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("toffoli.json");
    fs::write(&path, serde_json::to_string(&StandardGate::CCX.matrix()).unwrap()).unwrap();

    let source = fs::read_to_string(&path).unwrap();
    let u: Unitary = serde_json::from_str(&source).unwrap();
    assert_eq!(u.num_qubits(), 3);

    let d = UnitaryCompiler::new()
        .compile(&GridQubit::line(3), &u)
        .unwrap();
    assert_eq!(d.strategy, Strategy::ThreeQubit(StandardGate::CCX));
}

#[test]
fn test_hand_written_matrix() {
    // Hadamard, written as a user would.
    let s = std::f64::consts::FRAC_1_SQRT_2;
    let json = format!("[[[{s}, 0], [{s}, 0]], [[{s}, 0], [{n}, 0]]]", n = -s);
    let u: Unitary = serde_json::from_str(&json).unwrap();
    assert!(u.approx_eq(&StandardGate::H.matrix(), 1e-12));
}

#[test]
fn test_yaml_config_drives_compiler() {
    let yaml = "optimization_level: 0\ndevice:\n  kind: qubits\n  qubits:\n    - {row: 0, col: 0}\n    - {row: 0, col: 1}\n";
    let config: CompilerConfig = serde_yaml_ng::from_str(yaml).unwrap();
    let compiler = UnitaryCompiler::from_config(&config).unwrap();

    let qubits = [GridQubit::new(0, 0), GridQubit::new(0, 1)];
    let d = compiler.compile(&qubits, &StandardGate::CX.matrix()).unwrap();
    assert!(d.is_implemented());

    assert!(
        compiler
            .compile(&[GridQubit::new(1, 0)], &StandardGate::X.matrix())
            .is_err()
    );
}

#[test]
fn test_output_json_for_not_implemented() {
    let u = StandardGate::CCX
        .matrix()
        .dot(&StandardGate::CCZ.matrix())
        .unwrap();
    let d = UnitaryCompiler::new()
        .compile(&GridQubit::line(3), &u)
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");
    fs::write(&path, serde_json::to_string_pretty(&d).unwrap()).unwrap();

    let back: Decomposition = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(matches!(back.outcome, Outcome::NotImplemented { .. }));
    assert_eq!(back.strategy, Strategy::Generic);
    assert!(back.ancillas.is_empty());
}
